use std::collections::HashMap;

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

/// `(embedding_model, SHA-256(text)) → vector`, shared across every agent.
///
/// Duplicate-insert races are tolerated by design (last write wins on an
/// identical key) — the store's own lock is the only synchronization this
/// needs, per the workspace's locking notes for the embedding cache.
#[derive(Default)]
pub struct EmbeddingCache {
    entries: RwLock<HashMap<(String, String), Vec<f32>>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, embedding_model: &str, content_hash: &str) -> Option<Vec<f32>> {
        self.entries
            .read()
            .await
            .get(&(embedding_model.to_string(), content_hash.to_string()))
            .cloned()
    }

    pub async fn insert(&self, embedding_model: &str, content_hash: &str, vector: Vec<f32>) {
        self.entries
            .write()
            .await
            .insert((embedding_model.to_string(), content_hash.to_string()), vector);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
