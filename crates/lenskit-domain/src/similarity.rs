//! Vector similarity arithmetic
//!
//! Embeddings are stored as `f32` but accumulated in `f64` so that scores near
//! the admission band edges are not distorted by rounding.

/// Cosine similarity between two vectors
///
/// Returns `None` when the vectors differ in length, are empty, or either has
/// zero magnitude (the similarity is undefined there).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Cosine distance, `1 - cosine similarity`, in [0, 2]
///
/// # Examples
///
/// ```
/// use lenskit_domain::cosine_distance;
///
/// let d = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
/// assert!((d - 1.0).abs() < 1e-9);
/// assert!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]).is_none());
/// ```
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Option<f64> {
    cosine_similarity(a, b).map(|similarity| 1.0 - similarity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_identical() {
        let v = vec![0.3, -1.2, 4.0];
        let d = cosine_distance(&v, &v).unwrap();
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn test_distance_orthogonal() {
        let d = cosine_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!((d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_opposite() {
        let d = cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((d - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_magnitude_is_undefined() {
        assert!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]).is_none());
        assert!(cosine_distance(&[1.0, 0.0], &[0.0, 0.0]).is_none());
    }

    #[test]
    fn test_length_mismatch_is_undefined() {
        assert!(cosine_distance(&[1.0, 0.0], &[1.0, 0.0, 0.0]).is_none());
        assert!(cosine_distance(&[], &[]).is_none());
    }

    #[test]
    fn test_scale_invariance() {
        let a = cosine_distance(&[1.0, 2.0], &[2.0, 1.0]).unwrap();
        let b = cosine_distance(&[10.0, 20.0], &[0.2, 0.1]).unwrap();
        assert!((a - b).abs() < 1e-6);
    }
}
