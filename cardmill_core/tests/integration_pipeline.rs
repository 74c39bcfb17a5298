//! Integration tests for the extraction pipeline.
//!
//! These tests verify the complete flow of:
//! - Definition-block matching with the default configuration
//! - Content filtering of malformed candidates
//! - Order-sensitive key/value normalization

use cardmill_core::{
    ExtractionPipeline, KeyValPair, MatcherDef, Transform, default_key_transforms,
    default_matchers, default_value_transforms,
};

/// A well-formed block yields exactly one normalized pair.
#[test]
fn test_single_definition_block() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();

    let pairs = pipeline.parse(r"\d *Term*: A short definition\e");
    assert_eq!(pairs, vec![KeyValPair::new("Term", "A short definition")]);
}

/// Empty input yields an empty sequence for any configuration.
#[test]
fn test_empty_input() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();
    assert!(pipeline.parse("").is_empty());

    let bare = ExtractionPipeline::new(vec![], vec![], vec![]).unwrap();
    assert!(bare.parse("").is_empty());
}

/// Two blocks in one body come out in left-to-right source order.
#[test]
fn test_source_order_preserved() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();

    let text = "notes before\n\
                \\d Alpha: first definition\\e\n\
                prose in between\n\
                \\d Beta: second definition\\e\n";
    let pairs = pipeline.parse(text);

    assert_eq!(
        pairs,
        vec![
            KeyValPair::new("Alpha", "first definition"),
            KeyValPair::new("Beta", "second definition"),
        ]
    );
}

/// Values may span lines; the trimmed text keeps interior breaks.
#[test]
fn test_multiline_value() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();

    let pairs = pipeline.parse("\\d Term: line one\nline two\\e");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].val, "line one\nline two");
}

/// Non-ASCII content excludes the whole pair, even with a clean key.
#[test]
fn test_non_ascii_exclusion() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();

    assert!(pipeline.parse("\\d Term: caf\u{e9}\\e").is_empty());
    assert!(pipeline.parse("\\d caf\u{e9}: coffee\\e").is_empty());
}

/// A literal `{` in the value excludes the pair.
#[test]
fn test_templated_value_exclusion() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();

    assert!(pipeline.parse(r"\d Term: some {{markup}} text\e").is_empty());
}

/// The documented key-transform order strips dash before numbering.
#[test]
fn test_transform_order_documented() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();

    let pairs = pipeline.parse(r"\d -12. Term: def\e");
    assert_eq!(pairs, vec![KeyValPair::new("Term", "def")]);
}

/// Swapping the dash and numbering steps changes the output, so transform
/// order is part of the contract.
#[test]
fn test_transform_order_swapped() {
    let swapped_keys = vec![
        Transform::key(|key| key.replace('*', "").trim().to_string()),
        Transform::key(|key| {
            let rest = key.trim_start_matches(|c: char| c.is_ascii_digit());
            if rest.len() < key.len() {
                if let Some(stripped) = rest.strip_prefix(". ") {
                    return stripped.trim().to_string();
                }
            }
            key.trim().to_string()
        }),
        Transform::key(|key| key.strip_prefix('-').unwrap_or(key).trim().to_string()),
    ];
    let pipeline = ExtractionPipeline::new(
        default_matchers().unwrap(),
        swapped_keys,
        default_value_transforms(),
    )
    .unwrap();

    let pairs = pipeline.parse(r"\d -12. Term: def\e");
    assert_eq!(pairs, vec![KeyValPair::new("12. Term", "def")]);
}

/// Parsing twice returns equal, independently owned sequences.
#[test]
fn test_repeated_parse() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();
    let text = r"\d One: 1\e \d Two: 2\e";

    let mut first = pipeline.parse(text);
    let second = pipeline.parse(text);
    assert_eq!(first, second);

    // Mutating one result must not leak into a later run.
    first[0].key.push('!');
    assert_eq!(pipeline.parse(text), second);
}

/// `parse_raw` filters but skips both transform chains.
#[test]
fn test_parse_raw() {
    let pipeline = ExtractionPipeline::with_defaults().unwrap();

    let pairs = pipeline.parse_raw(r"\d *Term*:   spaced out   \e");
    assert_eq!(pairs, vec![KeyValPair::new("*Term*", "spaced out")]);

    // The filter still applies without normalization.
    assert!(pipeline.parse_raw("\\d Term: caf\u{e9}\\e").is_empty());
}

/// Matchers defined in configuration run alongside the built-in chains.
#[test]
fn test_config_defined_matcher() {
    let def = MatcherDef {
        pattern: r"(?m)^Q: (.*?) A:((?s:.)+?)$".to_string(),
        key_slot: 1,
        val_slot: 2,
    };
    let pipeline = ExtractionPipeline::new(
        vec![def.build().unwrap()],
        default_key_transforms(),
        default_value_transforms(),
    )
    .unwrap();

    let pairs = pipeline.parse("Q: What is Rust? A: A systems language.");
    assert_eq!(
        pairs,
        vec![KeyValPair::new("What is Rust?", "A systems language.")]
    );
}

/// Matchers are applied in configuration order; their outputs concatenate.
#[test]
fn test_matcher_order() {
    let colon = MatcherDef {
        pattern: r"\\d (.*?):((?s:.)+?)\\e".to_string(),
        key_slot: 1,
        val_slot: 2,
    };
    let arrow = MatcherDef {
        pattern: r"(?m)^(.*?) => (.*)$".to_string(),
        key_slot: 1,
        val_slot: 2,
    };
    let pipeline = ExtractionPipeline::new(
        vec![colon.build().unwrap(), arrow.build().unwrap()],
        default_key_transforms(),
        default_value_transforms(),
    )
    .unwrap();

    let text = "term => late\n\\d Block: early\\e";
    let pairs = pipeline.parse(text);

    // All pairs from the first matcher precede the second's, regardless of
    // where they sit in the source.
    assert_eq!(
        pairs,
        vec![
            KeyValPair::new("Block", "early"),
            KeyValPair::new("term", "late"),
        ]
    );
}
