use thiserror::Error;

use crate::transform::TransformRole;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Configuration errors raised while building matchers or pipelines.
///
/// Every variant is a programmer/configuration error and is surfaced at
/// construction time; nothing here is deferred to `apply` or `parse`.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("capture slot {slot} out of range: pattern has {groups} capture groups")]
    SlotOutOfRange { slot: usize, groups: usize },

    #[error("{found}-role transform placed in the {expected} chain")]
    RoleMismatch {
        expected: TransformRole,
        found: TransformRole,
    },
}
