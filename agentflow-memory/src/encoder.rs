use async_trait::async_trait;

/// Text → fixed-dimension dense vector, injected so this crate stays
/// agnostic to which model produces embeddings (the choice of encoder is
/// explicitly out of this workspace's scope).
///
/// Returning `None` is not an error — it is how an encoder signals "not
/// available right now" (e.g. the underlying model hasn't loaded), and
/// every caller of `encode` degrades gracefully to an empty vector result
/// rather than propagating a failure.
#[async_trait]
pub trait EmbeddingEncoder: Send + Sync {
    async fn encode(&self, text: &str) -> Option<Vec<f32>>;

    /// Dimensionality this encoder produces. Used only for documentation and
    /// test assertions; the store does not itself enforce a fixed width.
    fn dimensions(&self) -> usize;
}

/// Deterministic, zero-model stand-in for a real sentence encoder.
///
/// Hashes overlapping character trigrams into a fixed-width vector (feature
/// hashing). It gives textually similar inputs somewhat similar vectors —
/// enough to exercise the vector-search code path in tests — but it is not
/// a semantic embedding and must never be mistaken for one in production.
/// A real deployment supplies its own [`EmbeddingEncoder`] backed by an
/// actual model.
pub struct HashEncoder {
    dimensions: usize,
}

impl HashEncoder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

impl Default for HashEncoder {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingEncoder for HashEncoder {
    async fn encode(&self, text: &str) -> Option<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimensions];
        let normalized: String = text.to_lowercase();
        let chars: Vec<char> = normalized.chars().collect();
        if chars.is_empty() {
            return Some(vector);
        }
        let window = 3.min(chars.len());
        for start in 0..=(chars.len() - window) {
            let gram: String = chars[start..start + window].iter().collect();
            let bucket = fnv1a(gram.as_bytes()) as usize % self.dimensions;
            vector[bucket] += 1.0;
        }
        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Some(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
