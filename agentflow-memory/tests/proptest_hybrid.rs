//! Property-based test: P5, hybrid search is score-monotone in the vector
//! weight for a row with a non-zero vector contribution.

use std::collections::HashMap;
use std::sync::Arc;

use agentflow_core::{HybridWeights, MemorySearchConfig};
use agentflow_memory::{EmbeddingEncoder, MemorySearchService};
use async_trait::async_trait;
use proptest::prelude::*;

/// Hands back a fixed vector for an exact text match, so the test controls
/// cosine similarity directly instead of depending on a real encoder.
struct ScriptedEncoder {
    vectors: HashMap<String, Vec<f32>>,
}

#[async_trait]
impl EmbeddingEncoder for ScriptedEncoder {
    async fn encode(&self, text: &str) -> Option<Vec<f32>> {
        self.vectors.get(text).cloned()
    }

    fn dimensions(&self) -> usize {
        2
    }
}

fn config_with(vector_weight: f32) -> MemorySearchConfig {
    MemorySearchConfig {
        min_score: 0.0,
        hybrid_weights: HybridWeights {
            vector: vector_weight,
            text: 1.0 - vector_weight.min(1.0),
        },
        ..MemorySearchConfig::default()
    }
}

proptest! {
    /// Two rows: one matched only by the vector (cosine-identical to the
    /// query) and one matched only lexically. Raising `vector_weight` while
    /// holding the other row's text weight fixed must never push the
    /// vector-matched row's rank below the text-only row's.
    #[test]
    fn raising_vector_weight_never_demotes_a_vector_matched_row(
        low in 0.0f32..0.5,
        high in 0.5f32..5.0,
    ) {
        let mut vectors = HashMap::new();
        vectors.insert("query".to_string(), vec![1.0, 0.0]);
        vectors.insert("vector row".to_string(), vec![1.0, 0.0]);

        let low_service = MemorySearchService::new(config_with(low), Arc::new(ScriptedEncoder { vectors: vectors.clone() }));
        let high_service = MemorySearchService::new(config_with(high), Arc::new(ScriptedEncoder { vectors }));

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            low_service.index_message(Some(1), 1, "vector row").await;
            low_service.index_message(Some(1), 2, "query text only row").await;
            high_service.index_message(Some(1), 1, "vector row").await;
            high_service.index_message(Some(1), 2, "query text only row").await;

            let low_results = low_service.hybrid_search("query", Some(1)).await;
            let high_results = high_service.hybrid_search("query", Some(1)).await;

            let rank_of = |results: &[agentflow_memory::MemorySearchResult], id: i64| {
                results.iter().position(|r| r.message_id == Some(id))
            };
            let low_rank = rank_of(&low_results, 1);
            let high_rank = rank_of(&high_results, 1);
            prop_assert!(high_rank <= low_rank);
            Ok(())
        })?;
    }
}
