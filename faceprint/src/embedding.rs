//! Embedding vector math.

use crate::FaceprintError;

/// Euclidean distance between two embedding vectors.
///
/// Both vectors must have the same dimensionality.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32, FaceprintError> {
    if a.len() != b.len() {
        return Err(FaceprintError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    let sum: f32 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum();
    Ok(sum.sqrt())
}

/// L2-normalizes a vector in place. A zero vector is left unchanged.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basic() {
        let a = [0.0, 0.0, 0.0];
        let b = [3.0, 4.0, 0.0];
        assert_eq!(euclidean_distance(&a, &b).unwrap(), 5.0);
        assert_eq!(euclidean_distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = [1.0, 2.0, 3.0];
        let b = [-1.0, 0.5, 2.0];
        let d1 = euclidean_distance(&a, &b).unwrap();
        let d2 = euclidean_distance(&b, &a).unwrap();
        assert_eq!(d1, d2);
    }

    #[test]
    fn distance_dimension_mismatch() {
        let a = [1.0, 2.0];
        let b = [1.0, 2.0, 3.0];
        assert!(matches!(
            euclidean_distance(&a, &b),
            Err(FaceprintError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn normalize_unit_norm() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector_unchanged() {
        let mut v = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }
}
