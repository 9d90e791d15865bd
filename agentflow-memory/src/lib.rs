//! Memory Search Engine (C4): embedding cache, chunk store, and
//! vector/lexical/hybrid retrieval over indexed agent memory.

mod cache;
mod encoder;
mod result;
mod service;
mod store;

pub use cache::EmbeddingCache;
pub use encoder::{EmbeddingEncoder, HashEncoder};
pub use result::{MemorySearchResult, ResultSource};
pub use service::{MemorySearchService, SearchType};
pub use store::{ChunkSource, ChunkStore, EmbeddingChunk};
