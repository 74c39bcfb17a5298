//! The extracted key/value record.

use serde::{Deserialize, Serialize};

/// A (key, value) pair extracted from a definition block.
///
/// Pairs carry no identity beyond structural equality; the order they are
/// emitted in is the only ordering concept and it is stable across runs, so
/// downstream sinks can upsert idempotently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValPair {
    /// The front-facing term.
    pub key: String,

    /// The definition text. May span multiple lines.
    pub val: String,
}

impl KeyValPair {
    /// Create a new pair.
    #[must_use]
    pub fn new(key: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            val: val.into(),
        }
    }
}
