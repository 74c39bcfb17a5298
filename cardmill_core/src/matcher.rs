//! Pattern matchers that lift (key, value) pairs out of raw text.
//!
//! A matcher is a compiled regex plus two capture-slot indices. Matcher
//! definitions can also be loaded from configuration rather than hardcoded,
//! so the recognized annotation syntax stays data-driven.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::pair::KeyValPair;

/// The built-in definition-block pattern.
///
/// Recognizes `\d <key>: <value>\e` blocks: a literal `\d` marker, one space,
/// a lazily matched single-line key up to the first colon, the colon, and a
/// lazily matched value that may span multiple lines, closed by a literal
/// `\e` marker.
pub const DEFINITION_BLOCK_PATTERN: &str = r"\\d (.*?):((?s:.)+?)\\e";

/// Capture slot holding the key in [`DEFINITION_BLOCK_PATTERN`].
pub const DEFINITION_KEY_SLOT: usize = 1;

/// Capture slot holding the value in [`DEFINITION_BLOCK_PATTERN`].
pub const DEFINITION_VAL_SLOT: usize = 2;

/// Serializable definition of a single matcher.
///
/// This is the configuration surface for custom annotation syntaxes: a regex
/// source plus the capture-group indices for key and value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherDef {
    /// Regex source recognizing one annotation block per match.
    pub pattern: String,

    /// Capture-group index for the key.
    pub key_slot: usize,

    /// Capture-group index for the value.
    pub val_slot: usize,
}

impl MatcherDef {
    /// Compile and validate this definition.
    ///
    /// # Errors
    /// Returns an error if the regex fails to compile or a slot index is out
    /// of range for the compiled pattern.
    pub fn build(&self) -> Result<PatternMatcher> {
        let pattern = Regex::new(&self.pattern)?;
        PatternMatcher::new(pattern, self.key_slot, self.val_slot)
    }
}

/// One compiled extraction pattern with key and value capture slots.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Regex,
    key_slot: usize,
    val_slot: usize,
}

impl PatternMatcher {
    /// Create a matcher, validating both capture slots against the pattern.
    ///
    /// An out-of-range slot is a configuration error and is rejected here,
    /// never deferred to [`apply`](Self::apply).
    ///
    /// # Errors
    /// Returns [`PipelineError::SlotOutOfRange`] if either slot index is not
    /// a capture group of `pattern`.
    pub fn new(pattern: Regex, key_slot: usize, val_slot: usize) -> Result<Self> {
        let groups = pattern.captures_len();
        for slot in [key_slot, val_slot] {
            if slot >= groups {
                return Err(PipelineError::SlotOutOfRange { slot, groups });
            }
        }

        Ok(Self {
            pattern,
            key_slot,
            val_slot,
        })
    }

    /// Scan `content` and emit one trimmed pair per non-overlapping match,
    /// left to right.
    ///
    /// Every call scans from the start of `content`; no cursor is carried
    /// between invocations. A capture group that did not participate in a
    /// given match reads as the empty string.
    #[must_use]
    pub fn apply(&self, content: &str) -> Vec<KeyValPair> {
        self.pattern
            .captures_iter(content)
            .map(|caps| {
                let key = caps.get(self.key_slot).map_or("", |m| m.as_str());
                let val = caps.get(self.val_slot).map_or("", |m| m.as_str());
                KeyValPair::new(key.trim(), val.trim())
            })
            .collect()
    }
}

/// The default matcher set: one definition-block matcher.
///
/// # Errors
/// Returns an error if the built-in pattern fails to compile.
pub fn default_matchers() -> Result<Vec<PatternMatcher>> {
    let def = MatcherDef {
        pattern: DEFINITION_BLOCK_PATTERN.to_string(),
        key_slot: DEFINITION_KEY_SLOT,
        val_slot: DEFINITION_VAL_SLOT,
    };
    Ok(vec![def.build()?])
}
