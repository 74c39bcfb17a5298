//! The extraction pipeline: ordered matchers, a content filter, and the
//! key/value normalization chains.

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::matcher::{PatternMatcher, default_matchers};
use crate::pair::KeyValPair;
use crate::transform::{
    Transform, TransformRole, default_key_transforms, default_value_transforms,
};

/// Extracts (key, value) pairs from raw text.
///
/// The pipeline owns an ordered list of matchers and two ordered transform
/// chains. It holds no state between calls: every [`parse`](Self::parse)
/// works on its own local list, so repeated runs over the same text produce
/// structurally equal, independently owned results.
pub struct ExtractionPipeline {
    matchers: Vec<PatternMatcher>,
    key_transforms: Vec<Transform>,
    value_transforms: Vec<Transform>,
}

impl ExtractionPipeline {
    /// Create a pipeline from explicit matchers and transform chains.
    ///
    /// # Errors
    /// Returns [`PipelineError::RoleMismatch`] if a transform carries the
    /// wrong role for the chain it was placed in.
    pub fn new(
        matchers: Vec<PatternMatcher>,
        key_transforms: Vec<Transform>,
        value_transforms: Vec<Transform>,
    ) -> Result<Self> {
        Self::check_roles(&key_transforms, TransformRole::Key)?;
        Self::check_roles(&value_transforms, TransformRole::Value)?;

        Ok(Self {
            matchers,
            key_transforms,
            value_transforms,
        })
    }

    /// Create a pipeline with the built-in matcher and transform chains.
    ///
    /// # Errors
    /// Returns an error if the built-in pattern fails to compile.
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            default_matchers()?,
            default_key_transforms(),
            default_value_transforms(),
        )
    }

    fn check_roles(transforms: &[Transform], expected: TransformRole) -> Result<()> {
        for transform in transforms {
            if transform.role() != expected {
                return Err(PipelineError::RoleMismatch {
                    expected,
                    found: transform.role(),
                });
            }
        }
        Ok(())
    }

    /// Extract, filter, and normalize all pairs from `text`.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<KeyValPair> {
        self.run(text, true)
    }

    /// Extract and filter pairs without applying the transform chains.
    #[must_use]
    pub fn parse_raw(&self, text: &str) -> Vec<KeyValPair> {
        self.run(text, false)
    }

    fn run(&self, text: &str, normalize: bool) -> Vec<KeyValPair> {
        let mut pairs = Vec::new();

        for matcher in &self.matchers {
            let candidates = matcher.apply(text);
            let found = candidates.len();

            // Single non-mutating filter pass; dropped pairs leave no trace.
            let mut matches: Vec<KeyValPair> =
                candidates.into_iter().filter(is_clean).collect();

            if found > matches.len() {
                debug!("dropped {} of {found} extracted pairs", found - matches.len());
            }

            if normalize {
                for transform in &self.key_transforms {
                    for pair in &mut matches {
                        pair.key = transform.process(&pair.key);
                    }
                }
                for transform in &self.value_transforms {
                    for pair in &mut matches {
                        pair.val = transform.process(&pair.val);
                    }
                }
            }

            pairs.extend(matches);
        }

        pairs
    }
}

/// Content filter applied to every candidate pair independently.
///
/// Rejects pairs containing characters outside 7-bit ASCII and values that
/// captured templated content (a literal `{`).
fn is_clean(pair: &KeyValPair) -> bool {
    pair.key.is_ascii() && pair.val.is_ascii() && !pair.val.contains('{')
}
