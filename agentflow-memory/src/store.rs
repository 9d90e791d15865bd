use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::cache::content_hash;

/// What an [`EmbeddingChunk`] was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkSource {
    Message,
    Summary,
    File,
}

/// One indexed unit of retrievable text.
///
/// `(agent_id, source, source_id)` is unique within the store; re-indexing
/// the same triple with unchanged content is a no-op, and with changed
/// content replaces `text`, `embedding`, and `content_hash` in place while
/// keeping the same chunk `id`.
#[derive(Debug, Clone)]
pub struct EmbeddingChunk {
    pub id: u64,
    pub agent_id: Option<i64>,
    pub source: ChunkSource,
    pub source_id: i64,
    pub text: String,
    pub embedding: Option<Vec<f32>>,
    pub embedding_model: String,
    pub content_hash: String,
}

/// List-partitioned chunk store: one partition per agent id, `None` acting
/// as the default partition described in this workspace's partitioning
/// notes. Backed by a `Vec` per partition and scanned exhaustively by the
/// search layer rather than an approximate index — see
/// [`crate::service::MemorySearchService::vector_search`] for why
/// `ef_search` is accepted but unused here.
#[derive(Default)]
pub struct ChunkStore {
    partitions: RwLock<HashMap<Option<i64>, Vec<EmbeddingChunk>>>,
    next_id: AtomicU64,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        &self,
        agent_id: Option<i64>,
        source: ChunkSource,
        source_id: i64,
        text: String,
        embedding: Option<Vec<f32>>,
        embedding_model: String,
    ) -> EmbeddingChunk {
        let hash = content_hash(&text);
        let mut partitions = self.partitions.write().await;
        let partition = partitions.entry(agent_id).or_default();

        if let Some(existing) = partition
            .iter_mut()
            .find(|chunk| chunk.source == source && chunk.source_id == source_id)
        {
            if existing.content_hash != hash {
                existing.text = text;
                existing.embedding = embedding;
                existing.embedding_model = embedding_model;
                existing.content_hash = hash;
            }
            return existing.clone();
        }

        let chunk = EmbeddingChunk {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            agent_id,
            source,
            source_id,
            text,
            embedding,
            embedding_model,
            content_hash: hash,
        };
        partition.push(chunk.clone());
        chunk
    }

    /// Chunks visible to a search scoped to `agent_id`, falling through to
    /// the default partition when no agent-specific partition exists yet.
    pub async fn list(&self, agent_id: Option<i64>) -> Vec<EmbeddingChunk> {
        let partitions = self.partitions.read().await;
        match agent_id {
            Some(_) => partitions.get(&agent_id).cloned().unwrap_or_default(),
            None => partitions.get(&None).cloned().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reindexing_same_content_keeps_chunk_id() {
        let store = ChunkStore::new();
        let first = store
            .upsert(Some(1), ChunkSource::Message, 10, "hello".into(), None, "m".into())
            .await;
        let second = store
            .upsert(Some(1), ChunkSource::Message, 10, "hello".into(), None, "m".into())
            .await;
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn reindexing_changed_content_replaces_text_in_place() {
        let store = ChunkStore::new();
        let first = store
            .upsert(Some(1), ChunkSource::Message, 10, "hello".into(), None, "m".into())
            .await;
        let second = store
            .upsert(Some(1), ChunkSource::Message, 10, "goodbye".into(), None, "m".into())
            .await;
        assert_eq!(first.id, second.id);
        assert_eq!(second.text, "goodbye");
        assert_ne!(first.content_hash, second.content_hash);
    }

    #[tokio::test]
    async fn partitions_are_isolated_by_agent_id() {
        let store = ChunkStore::new();
        store
            .upsert(Some(1), ChunkSource::Message, 1, "a".into(), None, "m".into())
            .await;
        store
            .upsert(Some(2), ChunkSource::Message, 1, "b".into(), None, "m".into())
            .await;
        assert_eq!(store.list(Some(1)).await.len(), 1);
        assert_eq!(store.list(Some(2)).await.len(), 1);
    }
}
