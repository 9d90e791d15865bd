use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::store::{ChunkSource, EmbeddingChunk};

/// One ranked hit returned by a search. `message_id`/`summary_id` are
/// mutually exclusive, mirroring the two surfaced chunk sources — `File`
/// chunks are indexed (for future retrieval kinds) but are not surfaced by
/// this engine's search results today, since the result shape only
/// distinguishes message and summary provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySearchResult {
    pub content: String,
    pub score: f32,
    pub source: ResultSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_id: Option<i64>,
    #[serde(default)]
    pub metadata: Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Message,
    Summary,
}

impl MemorySearchResult {
    pub(crate) fn from_chunk(chunk: &EmbeddingChunk, score: f32) -> Option<Self> {
        let source = match chunk.source {
            ChunkSource::Message => ResultSource::Message,
            ChunkSource::Summary => ResultSource::Summary,
            ChunkSource::File => return None,
        };
        let (message_id, summary_id) = match source {
            ResultSource::Message => (Some(chunk.source_id), None),
            ResultSource::Summary => (None, Some(chunk.source_id)),
        };
        Some(Self {
            content: chunk.text.clone(),
            score,
            source,
            message_id,
            summary_id,
            metadata: Map::new(),
        })
    }

    /// Key used to merge vector and text contributions in hybrid search:
    /// `"<source>:<source_id>"`.
    pub(crate) fn combination_key(&self) -> String {
        match self.source {
            ResultSource::Message => format!("message:{}", self.message_id.unwrap_or_default()),
            ResultSource::Summary => format!("summary:{}", self.summary_id.unwrap_or_default()),
        }
    }
}
