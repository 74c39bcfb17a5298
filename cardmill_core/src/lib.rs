#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Extraction-and-normalization pipeline for delimited `key: value`
//! annotations embedded in free-form text.
//!
//! The core is synchronous and side-effect free: pattern matchers lift raw
//! pairs out of text, a content filter drops malformed candidates, and two
//! ordered transform chains normalize the survivors. Everything downstream
//! (file reading, the Anki sink) talks to this crate through [`CardSink`]
//! and plain function calls.

pub mod error;
pub mod matcher;
pub mod pair;
pub mod pipeline;
pub mod sink;
pub mod transform;

pub use error::PipelineError;
pub use matcher::{
    DEFINITION_BLOCK_PATTERN, DEFINITION_KEY_SLOT, DEFINITION_VAL_SLOT, MatcherDef,
    PatternMatcher, default_matchers,
};
pub use pair::KeyValPair;
pub use pipeline::ExtractionPipeline;
pub use sink::CardSink;
pub use transform::{
    Transform, TransformRole, default_key_transforms, default_value_transforms,
};
