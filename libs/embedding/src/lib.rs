//! Deterministic hash-based text embeddings.
//!
//! Produces 1536-dimensional unit vectors from product text without any
//! external model: the vector is derived from SHA-256 digests of the
//! normalized text and its individual words. Identical text always maps to
//! the identical vector, which makes the encoder safe to re-run over an
//! existing catalog.

use sha2::{Digest, Sha256};

/// Number of dimensions in every generated vector.
pub const EMBEDDING_DIM: usize = 1536;

/// Lowercase the text and collapse every non-alphanumeric, non-whitespace
/// character to a single space.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Generate a 1536-dimensional embedding for the given text.
///
/// The base SHA-256 digest of the normalized text seeds every dimension;
/// words longer than two bytes blend in their own digest. The result is
/// L2-normalized, so non-degenerate inputs always yield unit vectors.
pub fn generate_embedding(text: &str) -> Vec<f32> {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized.split_whitespace().collect();

    // Hash the canonical single-spaced form so runs of punctuation cannot
    // shift the base digest.
    let canonical = words.join(" ");
    let digest: [u8; 32] = Sha256::digest(canonical.as_bytes()).into();

    // Short words carry no signal of their own.
    let word_digests: Vec<Option<[u8; 32]>> = words
        .iter()
        .map(|word| (word.len() > 2).then(|| Sha256::digest(word.as_bytes()).into()))
        .collect();

    let mut embedding = vec![0f32; EMBEDDING_DIM];
    for (i, slot) in embedding.iter_mut().enumerate() {
        let hash_index = i % digest.len();
        let mut value = f32::from(digest[hash_index]) / 255.0;

        if !words.is_empty() {
            if let Some(word_digest) = &word_digests[i % words.len()] {
                value = (value + f32::from(word_digest[hash_index]) / 255.0) / 2.0;
            }
        }

        // Map [0, 1] onto [-1, 1].
        *slot = (value - 0.5) * 2.0;
    }

    let norm = embedding
        .iter()
        .map(|v| f64::from(*v) * f64::from(*v))
        .sum::<f64>()
        .sqrt() as f32;

    if norm > 0.0 {
        for value in &mut embedding {
            *value /= norm;
        }
    }

    embedding
}

/// Assemble the text fed to the encoder from product fields.
///
/// Order matters for determinism: name, category, then the optional brand,
/// color, and material, then the description.
pub fn build_embedding_text(
    name: &str,
    category: &str,
    brand: Option<&str>,
    color: Option<&str>,
    material: Option<&str>,
    description: &str,
) -> String {
    let mut parts = vec![name, category];
    if let Some(brand) = brand {
        parts.push(brand);
    }
    if let Some(color) = color {
        parts.push(color);
    }
    if let Some(material) = material {
        parts.push(material);
    }
    parts.push(description);
    parts.join(" ")
}

/// Render a vector as a pgvector text literal: `[v0,v1,...]` with six
/// decimal places per component.
pub fn to_pgvector(values: &[f32]) -> String {
    let mut out = String::with_capacity(values.len() * 10 + 2);
    out.push('[');
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!("{value:.6}"));
    }
    out.push(']');
    out
}
