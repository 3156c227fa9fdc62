use serde::{Deserialize, Serialize};

/// A dense vector of double precision values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Whether every component is a finite number
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Squared L2 distance
    ///
    /// Returns infinity when dimensions differ.
    #[inline]
    pub fn l2_distance_squared(&self, other: &Vector) -> f64 {
        if self.dim() != other.dim() {
            return f64::INFINITY;
        }

        // Two accumulators for better pipelining
        let mut sum1 = 0.0;
        let mut sum2 = 0.0;
        let chunks = self.data.chunks_exact(2).zip(other.data.chunks_exact(2));
        for (a, b) in chunks {
            let d0 = a[0] - b[0];
            let d1 = a[1] - b[1];
            sum1 += d0 * d0;
            sum2 += d1 * d1;
        }
        if self.dim() % 2 == 1 {
            let last = self.dim() - 1;
            let d = self.data[last] - other.data[last];
            sum1 += d * d;
        }
        sum1 + sum2
    }

    /// Compute L2 (Euclidean) distance
    #[inline]
    pub fn l2_distance(&self, other: &Vector) -> f64 {
        self.l2_distance_squared(other).sqrt()
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Vector::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_distance() {
        let v1 = Vector::new(vec![0.0, 0.0]);
        let v2 = Vector::new(vec![3.0, 4.0]);
        assert!((v1.l2_distance(&v2) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_l2_distance_odd_dimension() {
        let v1 = Vector::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let v2 = Vector::new(vec![0.0; 7]);
        assert!((v1.l2_distance_squared(&v2) - 140.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch_is_infinite() {
        let v1 = Vector::new(vec![1.0, 2.0]);
        let v2 = Vector::new(vec![1.0, 2.0, 3.0]);
        assert!(v1.l2_distance(&v2).is_infinite());
    }

    #[test]
    fn test_is_finite() {
        assert!(Vector::new(vec![1.0, -2.5]).is_finite());
        assert!(!Vector::new(vec![1.0, f64::NAN]).is_finite());
        assert!(!Vector::new(vec![f64::INFINITY]).is_finite());
    }
}
