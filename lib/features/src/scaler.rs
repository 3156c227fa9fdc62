//! Standardization of feature vectors
//!
//! Centers each feature on its catalog mean and divides by its population
//! standard deviation. Columns without variance are handled by an explicit
//! [`VariancePolicy`] so the transform never yields `inf` or `NaN`.

use crate::schema::{Feature, FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use stockpickr_core::{Error, Result};
use tracing::warn;

/// Standard deviations below this are treated as zero
pub const MIN_STD: f64 = 1e-12;

/// Default floor for [`VariancePolicy::Floor`]
pub const DEFAULT_STD_FLOOR: f64 = 1e-8;

/// What to do with a feature whose standard deviation is (near) zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "policy", content = "value", rename_all = "snake_case")]
pub enum VariancePolicy {
    /// Center the column but leave it unscaled
    #[default]
    UnitScale,
    /// Clamp the standard deviation to at least the given value
    Floor(f64),
    /// Refuse to fit
    Reject,
}

/// Fitted per-feature mean and scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    /// Population standard deviation as measured
    std: [f64; FEATURE_COUNT],
    /// Divisor actually applied after the variance policy
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Fit mean and standard deviation over catalog rows
    pub fn fit(rows: &[FeatureVector], policy: VariancePolicy) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::DataLoad("cannot fit scaler on zero rows".to_string()));
        }
        if let Some(pos) = rows.iter().position(|r| !r.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "row {} has a non-finite feature value",
                pos
            )));
        }
        if let VariancePolicy::Floor(floor) = policy {
            if !(floor.is_finite() && floor > 0.0) {
                return Err(Error::InvalidArgument(format!(
                    "standard deviation floor must be positive, got {}",
                    floor
                )));
            }
        }

        let n = rows.len() as f64;
        let mut mean = [0.0; FEATURE_COUNT];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row.values()) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        // Population std (divide by n, not n-1)
        let mut std = [0.0; FEATURE_COUNT];
        for row in rows {
            for ((s, v), m) in std.iter_mut().zip(row.values()).zip(&mean) {
                let diff = v - m;
                *s += diff * diff;
            }
        }
        for s in &mut std {
            *s = (*s / n).sqrt();
        }

        let mut scale = std;
        for (feature, s) in Feature::ALL.into_iter().zip(scale.iter_mut()) {
            match policy {
                VariancePolicy::Floor(floor) => {
                    if *s < floor {
                        warn!("Feature '{}' std {:e} raised to floor {:e}", feature, s, floor);
                        *s = floor;
                    }
                }
                VariancePolicy::UnitScale if *s < MIN_STD => {
                    warn!("Feature '{}' has zero variance, leaving it unscaled", feature);
                    *s = 1.0;
                }
                VariancePolicy::Reject if *s < MIN_STD => {
                    return Err(Error::DegenerateFeature(feature.label().to_string()));
                }
                _ => {}
            }
        }

        Ok(Self { mean, std, scale })
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn std(&self) -> &[f64; FEATURE_COUNT] {
        &self.std
    }

    /// Divisors applied by [`transform`](Self::transform)
    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }

    /// Elementwise `(x - mean) / scale`
    pub fn transform(&self, raw: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, (o, x)) in out.iter_mut().zip(raw.values()).enumerate() {
            *o = (x - self.mean[i]) / self.scale[i];
        }
        FeatureVector::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<FeatureVector> {
        vec![
            FeatureVector::new([1.0, 10.0, 100.0, 1000.0, 0.01, 0.1, 10.0]),
            FeatureVector::new([2.0, 20.0, 200.0, 2000.0, 0.02, 0.2, 20.0]),
            FeatureVector::new([3.0, 30.0, 300.0, 3000.0, 0.03, 0.3, 30.0]),
        ]
    }

    #[test]
    fn test_fit_mean_and_population_std() {
        let scaler = StandardScaler::fit(&rows(), VariancePolicy::default()).unwrap();
        assert!((scaler.mean()[0] - 2.0).abs() < 1e-12);
        assert!((scaler.mean()[3] - 2000.0).abs() < 1e-9);
        // population std of [1, 2, 3] is sqrt(2/3)
        assert!((scaler.std()[0] - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_transformed_columns_are_standardized() {
        let data = rows();
        let scaler = StandardScaler::fit(&data, VariancePolicy::default()).unwrap();
        let scaled: Vec<FeatureVector> = data.iter().map(|r| scaler.transform(r)).collect();

        for j in 0..FEATURE_COUNT {
            let mean: f64 = scaled.iter().map(|r| r.values()[j]).sum::<f64>() / 3.0;
            let var: f64 = scaled.iter().map(|r| (r.values()[j] - mean).powi(2)).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-9, "column {} mean {}", j, mean);
            assert!((var - 1.0).abs() < 1e-9, "column {} variance {}", j, var);
        }
    }

    fn constant_dividend_rows() -> Vec<FeatureVector> {
        vec![
            FeatureVector::new([1.0, 10.0, 100.0, 1000.0, 0.0, 0.1, 10.0]),
            FeatureVector::new([2.0, 20.0, 200.0, 2000.0, 0.0, 0.2, 20.0]),
        ]
    }

    #[test]
    fn test_zero_variance_unit_scale() {
        let scaler = StandardScaler::fit(&constant_dividend_rows(), VariancePolicy::UnitScale).unwrap();
        assert_eq!(scaler.std()[4], 0.0);
        assert_eq!(scaler.scale()[4], 1.0);

        let query = FeatureVector::new([1.0, 10.0, 100.0, 1000.0, 0.05, 0.1, 10.0]);
        let scaled = scaler.transform(&query);
        assert!(scaled.is_finite());
        assert!((scaled.get(Feature::DividendYield) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_floor() {
        let scaler =
            StandardScaler::fit(&constant_dividend_rows(), VariancePolicy::Floor(1e-8)).unwrap();
        assert_eq!(scaler.scale()[4], 1e-8);
        // columns above the floor are untouched
        assert_eq!(scaler.scale()[0], scaler.std()[0]);
    }

    #[test]
    fn test_zero_variance_reject() {
        let err = StandardScaler::fit(&constant_dividend_rows(), VariancePolicy::Reject).unwrap_err();
        assert!(matches!(err, Error::DegenerateFeature(ref name) if name == "Dividend Yield"));
    }

    #[test]
    fn test_fit_rejects_empty_and_non_finite() {
        assert!(matches!(
            StandardScaler::fit(&[], VariancePolicy::default()),
            Err(Error::DataLoad(_))
        ));

        let bad = vec![FeatureVector::new([1.0, f64::NAN, 1.0, 1.0, 1.0, 1.0, 1.0])];
        assert!(matches!(
            StandardScaler::fit(&bad, VariancePolicy::default()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_floor() {
        assert!(matches!(
            StandardScaler::fit(&rows(), VariancePolicy::Floor(0.0)),
            Err(Error::InvalidArgument(_))
        ));
    }
}
