//! Feature pipeline
//!
//! Fits the standardization transform on a catalog and applies the exact
//! same transform to catalog rows and to queries.

use crate::catalog::Catalog;
use crate::scaler::{StandardScaler, VariancePolicy};
use crate::schema::{FeatureVector, FEATURE_COUNT};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stockpickr_core::{Error, Point, Result, Vector};
use tracing::info;

/// Settings for loading and fitting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Year company ages are computed against
    pub reference_year: i32,
    pub variance_policy: VariancePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reference_year: current_year(),
            variance_policy: VariancePolicy::default(),
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    #[must_use]
    pub fn with_variance_policy(mut self, policy: VariancePolicy) -> Self {
        self.variance_policy = policy;
        self
    }
}

/// Current UTC calendar year
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Load a catalog file using the configured reference year
pub fn load_catalog<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<Catalog> {
    Catalog::from_path(path, config.reference_year)
}

/// Fitted encoding and scaling shared by catalog rows and queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePipeline {
    scaler: StandardScaler,
}

impl FeaturePipeline {
    /// Fit the scaler over every catalog row
    pub fn fit(catalog: &Catalog, policy: VariancePolicy) -> Result<Self> {
        let rows: Vec<FeatureVector> = catalog.iter().map(|r| r.features()).collect();
        let scaler = StandardScaler::fit(&rows, policy)?;
        info!(
            "Fitted scaler on {} rows x {} features ({:?})",
            rows.len(),
            FEATURE_COUNT,
            policy
        );
        Ok(Self { scaler })
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Standardize raw features
    pub fn transform(&self, raw: &FeatureVector) -> Result<FeatureVector> {
        if !raw.is_finite() {
            return Err(Error::InvalidArgument(
                "feature values must be finite numbers".to_string(),
            ));
        }
        Ok(self.scaler.transform(raw))
    }

    /// Standardized vector of every catalog row, tagged with its row id
    pub fn scaled_points(&self, catalog: &Catalog) -> Vec<Point> {
        catalog
            .iter()
            .map(|r| Point::new(r.id, self.scaler.transform(&r.features()).to_vector()))
            .collect()
    }

    /// Standardize a query into an index vector
    pub fn query_vector(&self, raw: &FeatureVector) -> Result<Vector> {
        Ok(self.transform(raw)?.to_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CompanyRecord;
    use crate::schema::RiskLevel;

    fn catalog() -> Catalog {
        let records = vec![
            CompanyRecord {
                name: "A".into(),
                founding_year: 2010,
                risk_level: RiskLevel::Low,
                annual_revenue: 10.0,
                market_cap: 100.0,
                employee_size: 1000,
                dividend_yield: 0.01,
                growth_pct: 0.1,
                ..Default::default()
            },
            CompanyRecord {
                name: "B".into(),
                founding_year: 1990,
                risk_level: RiskLevel::High,
                annual_revenue: 30.0,
                market_cap: 300.0,
                employee_size: 3000,
                dividend_yield: 0.03,
                growth_pct: 0.9,
                ..Default::default()
            },
        ];
        Catalog::from_records(records, 2020).unwrap()
    }

    #[test]
    fn test_catalog_and_query_share_transform() {
        let catalog = catalog();
        let pipeline = FeaturePipeline::fit(&catalog, VariancePolicy::default()).unwrap();
        let points = pipeline.scaled_points(&catalog);

        let query = pipeline.query_vector(&catalog.records()[1].features()).unwrap();
        assert_eq!(points[1].vector, query);
        assert_eq!(points[1].id, catalog.records()[1].id);
    }

    #[test]
    fn test_two_row_catalog_standardizes_to_unit() {
        let catalog = catalog();
        let pipeline = FeaturePipeline::fit(&catalog, VariancePolicy::default()).unwrap();
        let points = pipeline.scaled_points(&catalog);
        for v in points[0].vector.as_slice() {
            assert!((v + 1.0).abs() < 1e-9);
        }
        for v in points[1].vector.as_slice() {
            assert!((v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_non_finite_query_rejected() {
        let catalog = catalog();
        let pipeline = FeaturePipeline::fit(&catalog, VariancePolicy::default()).unwrap();
        let raw = FeatureVector::new([1.0, f64::INFINITY, 1.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(matches!(pipeline.transform(&raw), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_config_builders() {
        let config = PipelineConfig::default()
            .with_reference_year(2023)
            .with_variance_policy(VariancePolicy::Reject);
        assert_eq!(config.reference_year, 2023);
        assert_eq!(config.variance_policy, VariancePolicy::Reject);
        assert!(PipelineConfig::default().reference_year >= 2024);
    }
}
