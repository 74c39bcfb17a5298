//! The downstream sink boundary.

use async_trait::async_trait;

use crate::pair::KeyValPair;

/// Durable store for extracted pairs, scoped by a caller-chosen grouping key.
///
/// Implementations look up an existing record by (`deck`, `pair.key`) and
/// overwrite its value when found, or create a fresh record otherwise, so
/// repeated runs over the same source converge to the same records. Retry
/// and transport policy belong to the implementation, never to the pipeline.
#[async_trait]
pub trait CardSink: Send + Sync {
    /// Insert or update one pair under the given grouping key.
    async fn upsert(&self, deck: &str, pair: &KeyValPair) -> anyhow::Result<()>;
}
