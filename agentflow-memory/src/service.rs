use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use agentflow_core::MemorySearchConfig;

use crate::cache::EmbeddingCache;
use crate::encoder::EmbeddingEncoder;
use crate::result::MemorySearchResult;
use crate::store::{ChunkSource, ChunkStore, EmbeddingChunk};

/// Which retrieval strategy to run. `Default` is `Hybrid`, matching the
/// built-in `memory_search` tool's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    Hybrid,
    Vector,
    Text,
}

/// Owns the embedding cache, the chunk store, and the encoder, and answers
/// vector/text/hybrid queries against them.
///
/// This is the one external entry point the rest of the workspace calls
/// into for memory — `agentflow-tool`'s `memory_search` built-in wraps it,
/// and a caller may also hold one directly for the standalone
/// `MemorySearchService.search` interface.
pub struct MemorySearchService {
    config: MemorySearchConfig,
    cache: Arc<EmbeddingCache>,
    store: Arc<ChunkStore>,
    encoder: Arc<dyn EmbeddingEncoder>,
}

impl MemorySearchService {
    pub fn new(config: MemorySearchConfig, encoder: Arc<dyn EmbeddingEncoder>) -> Self {
        Self {
            config,
            cache: Arc::new(EmbeddingCache::new()),
            store: Arc::new(ChunkStore::new()),
            encoder,
        }
    }

    /// Builds a service sharing an existing cache/store — used when several
    /// services (e.g. one per `memory_search` tool instance) must see the
    /// same indexed corpus.
    pub fn with_shared_state(
        config: MemorySearchConfig,
        encoder: Arc<dyn EmbeddingEncoder>,
        cache: Arc<EmbeddingCache>,
        store: Arc<ChunkStore>,
    ) -> Self {
        Self {
            config,
            cache,
            store,
            encoder,
        }
    }

    pub fn config(&self) -> &MemorySearchConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ChunkStore> {
        &self.store
    }

    /// Returns the cached embedding for `text`, computing and caching it on
    /// a miss. `None` means the encoder could not produce a vector right
    /// now — never an error, per this engine's degrade-gracefully contract.
    pub async fn get_embedding(&self, text: &str) -> Option<Vec<f32>> {
        let hash = crate::cache::content_hash(text);
        if let Some(vector) = self.cache.get(&self.config.embedding_model, &hash).await {
            return Some(vector);
        }
        let vector = self.encoder.encode(text).await?;
        self.cache
            .insert(&self.config.embedding_model, &hash, vector.clone())
            .await;
        Some(vector)
    }

    pub async fn index_message(&self, agent_id: Option<i64>, message_id: i64, text: &str) -> EmbeddingChunk {
        let embedding = self.get_embedding(text).await;
        self.store
            .upsert(
                agent_id,
                ChunkSource::Message,
                message_id,
                text.to_string(),
                embedding,
                self.config.embedding_model.clone(),
            )
            .await
    }

    pub async fn index_summary(&self, agent_id: Option<i64>, summary_id: i64, text: &str) -> EmbeddingChunk {
        let embedding = self.get_embedding(text).await;
        self.store
            .upsert(
                agent_id,
                ChunkSource::Summary,
                summary_id,
                text.to_string(),
                embedding,
                self.config.embedding_model.clone(),
            )
            .await
    }

    /// Dense similarity search. `ef_search` is part of `MemorySearchConfig`
    /// for interface parity with the external HNSW-backed store this engine
    /// stands in for (§6); the in-process chunk store is an exhaustive scan
    /// over one partition, which is exact by construction, so the parameter
    /// has no effect here — it exists so a real backing store can be
    /// substituted later without changing this method's signature.
    pub async fn vector_search(&self, query: &str, agent_id: Option<i64>) -> Vec<MemorySearchResult> {
        let Some(query_embedding) = self.get_embedding(query).await else {
            return Vec::new();
        };

        let chunks = self.store.list(agent_id).await;
        let mut scored: Vec<(f32, EmbeddingChunk)> = chunks
            .into_iter()
            .filter_map(|chunk| {
                let embedding = chunk.embedding.as_ref()?;
                let score = 1.0 - cosine_distance(&query_embedding, embedding);
                (score >= self.config.min_score).then_some((score, chunk))
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(self.config.max_results);
        scored
            .into_iter()
            .filter_map(|(score, chunk)| MemorySearchResult::from_chunk(&chunk, score))
            .collect()
    }

    /// Lexical search: case-insensitive substring match per query token,
    /// scored as the fraction of tokens that appear in the candidate.
    /// Deliberately unweighted — no stemming, stopword removal, or IDF (see
    /// this workspace's open question on text scoring). Treat as a
    /// baseline, not a finished ranking function.
    pub async fn text_search(&self, query: &str, agent_id: Option<i64>) -> Vec<MemorySearchResult> {
        let tokens: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let chunks = self.store.list(agent_id).await;
        let mut scored: Vec<(f32, EmbeddingChunk)> = chunks
            .into_iter()
            .filter_map(|chunk| {
                let lower = chunk.text.to_lowercase();
                let matches = tokens.iter().filter(|token| lower.contains(token.as_str())).count();
                let score = matches as f32 / tokens.len() as f32;
                (score >= self.config.min_score).then_some((score, chunk))
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(self.config.max_results);
        scored
            .into_iter()
            .filter_map(|(score, chunk)| MemorySearchResult::from_chunk(&chunk, score))
            .collect()
    }

    /// Combines vector and text results by `"<source>:<source_id>"`: a row
    /// present in both contributes `vector_weight * vector_score +
    /// text_weight * text_score`; a row present in only one contributes just
    /// that weighted term.
    pub async fn hybrid_search(&self, query: &str, agent_id: Option<i64>) -> Vec<MemorySearchResult> {
        if !self.config.enabled {
            return Vec::new();
        }

        let vector_results = self.vector_search(query, agent_id).await;
        let text_results = self.text_search(query, agent_id).await;
        let weights = self.config.hybrid_weights;

        let mut combined: HashMap<String, MemorySearchResult> = HashMap::new();
        for mut result in vector_results {
            result.score *= weights.vector;
            combined.insert(result.combination_key(), result);
        }
        for mut result in text_results {
            result.score *= weights.text;
            let key = result.combination_key();
            combined
                .entry(key)
                .and_modify(|existing| existing.score += result.score)
                .or_insert(result);
        }

        let mut results: Vec<MemorySearchResult> = combined.into_values().collect();
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(self.config.max_results);
        results
    }

    pub async fn search(
        &self,
        query: &str,
        agent_id: Option<i64>,
        search_type: SearchType,
    ) -> Vec<MemorySearchResult> {
        match search_type {
            SearchType::Vector => self.vector_search(query, agent_id).await,
            SearchType::Text => self.text_search(query, agent_id).await,
            SearchType::Hybrid => self.hybrid_search(query, agent_id).await,
        }
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - (dot / (norm_a * norm_b))
}
