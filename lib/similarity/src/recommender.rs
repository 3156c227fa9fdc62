//! Similarity matcher
//!
//! [`Recommender`] is the immutable context built once at startup: the
//! original catalog, the fitted feature pipeline and the neighbor index over
//! standardized rows. Every query method takes `&self`, so one instance can be
//! shared across threads behind its internal `Arc` without locking.

use crate::explain::{ExplainedMatch, RecommendResponse};
use crate::request::RecommendRequest;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use stockpickr_core::{Error, Neighbor, NeighborIndex, Result, RowId};
use stockpickr_features::{
    load_catalog, Catalog, CompanyRecord, FeaturePipeline, FeatureVector, PipelineConfig,
    FEATURE_COUNT,
};
use tracing::{debug, info};

/// A recommended company and its distance from the query
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub distance: f64,
    pub record: CompanyRecord,
}

#[derive(Debug)]
struct Inner {
    catalog: Catalog,
    pipeline: FeaturePipeline,
    index: NeighborIndex,
    config: PipelineConfig,
}

/// Read-only recommendation context
#[derive(Debug, Clone)]
pub struct Recommender {
    inner: Arc<Inner>,
}

impl Recommender {
    /// Fit the pipeline on `catalog` and index its standardized rows
    ///
    /// The catalog's own reference year is kept; only the variance policy of
    /// `config` applies here.
    pub fn build(catalog: Catalog, config: PipelineConfig) -> Result<Self> {
        let pipeline = FeaturePipeline::fit(&catalog, config.variance_policy)?;
        let index = NeighborIndex::build(FEATURE_COUNT, pipeline.scaled_points(&catalog))?;
        info!("Indexed {} companies", index.len());

        let config = PipelineConfig {
            reference_year: catalog.reference_year(),
            ..config
        };
        Ok(Self {
            inner: Arc::new(Inner {
                catalog,
                pipeline,
                index,
                config,
            }),
        })
    }

    /// Load the catalog file and build the context
    pub fn from_path<P: AsRef<Path>>(path: P, config: PipelineConfig) -> Result<Self> {
        let catalog = load_catalog(path, &config)?;
        Self::build(catalog, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn pipeline(&self) -> &FeaturePipeline {
        &self.inner.pipeline
    }

    pub fn index(&self) -> &NeighborIndex {
        &self.inner.index
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.inner.config
    }

    /// Number of companies that can be recommended
    pub fn len(&self) -> usize {
        self.inner.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.index.is_empty()
    }

    /// k nearest catalog rows to raw (unscaled) query features
    pub fn query(&self, raw: &FeatureVector, k: usize) -> Result<Vec<Neighbor>> {
        let query = self.inner.pipeline.query_vector(raw)?;
        self.inner.index.search(&query, k)
    }

    /// Map row identifiers back to the original records
    pub fn resolve(&self, ids: &[RowId]) -> Result<Vec<&CompanyRecord>> {
        ids.iter()
            .map(|&id| self.inner.catalog.get(id).ok_or(Error::UnknownRow(id.0)))
            .collect()
    }

    /// Closest companies to the request, nearest first
    pub fn recommend(&self, request: &RecommendRequest) -> Result<Vec<Match>> {
        let raw = request.to_features()?;
        self.nearest(&raw, request.k)
    }

    /// Like [`recommend`](Self::recommend), with per-feature explanations and stats
    pub fn recommend_explained(&self, request: &RecommendRequest) -> Result<RecommendResponse> {
        let raw = request.to_features()?;
        let pipeline = &self.inner.pipeline;
        let scaled_query = pipeline.transform(&raw)?;

        let results = self
            .nearest(&raw, request.k)?
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                let candidate = pipeline.transform(&m.record.features())?;
                Ok(ExplainedMatch::new(i + 1, m, &scaled_query, &candidate))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RecommendResponse::new(results, self.len()))
    }

    fn nearest(&self, raw: &FeatureVector, k: usize) -> Result<Vec<Match>> {
        let neighbors = self.query(raw, k)?;
        debug!(k, best = ?neighbors.first().map(|n| n.distance), "recommend");

        let ids: Vec<RowId> = neighbors.iter().map(|n| n.id).collect();
        let records = self.resolve(&ids)?;

        Ok(neighbors
            .iter()
            .zip(records)
            .map(|(n, record)| Match {
                distance: n.distance,
                record: record.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpickr_features::{Feature, RiskLevel, VariancePolicy};

    fn company(name: &str, risk: RiskLevel, revenue: f64, age: i32) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            founding_year: 2024 - age,
            risk_level: risk,
            annual_revenue: revenue,
            market_cap: revenue * 5.0,
            employee_size: (revenue * 1000.0) as u64,
            dividend_yield: 0.02,
            growth_pct: 0.3,
            ..Default::default()
        }
    }

    fn recommender() -> Recommender {
        let records = vec![
            company("Alpha", RiskLevel::Low, 10.0, 50),
            company("Bravo", RiskLevel::Medium, 50.0, 30),
            company("Charlie", RiskLevel::High, 90.0, 10),
            company("Delta", RiskLevel::Medium, 55.0, 25),
        ];
        let catalog = Catalog::from_records(records, 2024).unwrap();
        Recommender::build(catalog, PipelineConfig::default()).unwrap()
    }

    fn request_like(record: &CompanyRecord) -> RecommendRequest {
        RecommendRequest {
            risk_level: record.risk_level.to_string(),
            annual_revenue: record.annual_revenue,
            market_cap: record.market_cap,
            employee_size: record.employee_size,
            dividend_yield_pct: record.dividend_yield * 100.0,
            growth_pct: record.growth_pct * 100.0,
            age_years: record.age_years as u32,
            k: 2,
        }
    }

    #[test]
    fn test_recommend_exact_row_first() {
        let rec = recommender();
        let bravo = rec.catalog().records()[1].clone();
        let matches = rec.recommend(&request_like(&bravo)).unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].record.name, "Bravo");
        assert!(matches[0].distance < 1e-9);
        assert_eq!(matches[1].record.name, "Delta");
    }

    #[test]
    fn test_resolve_unknown_row() {
        let rec = recommender();
        assert!(matches!(rec.resolve(&[RowId(99)]), Err(Error::UnknownRow(99))));
        assert_eq!(rec.resolve(&[RowId(2)]).unwrap()[0].name, "Charlie");
    }

    #[test]
    fn test_bad_k_rejected() {
        let rec = recommender();
        let request = RecommendRequest::default();
        assert!(matches!(
            rec.recommend(&request.clone().with_k(0)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            rec.recommend(&request.clone().with_k(5)),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(rec.recommend(&request.with_k(4)).unwrap().len(), 4);
    }

    #[test]
    fn test_unknown_category_fails_whole_query() {
        let rec = recommender();
        let request = RecommendRequest::default().with_risk_level("Unknown").with_k(2);
        assert!(matches!(
            rec.recommend(&request),
            Err(Error::InvalidCategory { .. })
        ));
    }

    #[test]
    fn test_explained_contributions_match_distance() {
        let rec = recommender();
        let request = RecommendRequest::default().with_k(3);
        let response = rec.recommend_explained(&request).unwrap();

        assert_eq!(response.result.len(), 3);
        assert_eq!(response.stats.catalog_size, 4);
        for (i, m) in response.result.iter().enumerate() {
            assert_eq!(m.rank, i + 1);
            let sum: f64 = m.explain.iter().map(|c| c.contribution).sum();
            assert!((sum.sqrt() - m.distance).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_variance_policy_applies() {
        // every company shares the same dividend yield
        let records = vec![
            company("A", RiskLevel::Low, 10.0, 50),
            company("B", RiskLevel::High, 20.0, 20),
        ];
        let catalog = Catalog::from_records(records, 2024).unwrap();
        let config = PipelineConfig::default().with_variance_policy(VariancePolicy::Reject);
        assert!(matches!(
            Recommender::build(catalog.clone(), config),
            Err(Error::DegenerateFeature(_))
        ));

        let rec = Recommender::build(catalog, PipelineConfig::default()).unwrap();
        let matches = rec.recommend(&RecommendRequest::default().with_k(2)).unwrap();
        assert!(matches.iter().all(|m| m.distance.is_finite()));
        assert_eq!(rec.pipeline().scaler().scale()[Feature::DividendYield.position()], 1.0);
    }

    #[test]
    fn test_explained_matches_plain_recommend() {
        let rec = recommender();
        let request = RecommendRequest::default().with_risk_level("Medium").with_k(4);
        let plain = rec.recommend(&request).unwrap();
        let explained = rec.recommend_explained(&request).unwrap();

        assert_eq!(plain.len(), explained.result.len());
        for (p, e) in plain.iter().zip(&explained.result) {
            assert_eq!(p.record.id, e.id);
            assert_eq!(p.distance, e.distance);
        }

        let bad = request.clone().with_risk_level("medium");
        assert!(matches!(
            rec.recommend_explained(&bad),
            Err(Error::InvalidCategory { .. })
        ));
        assert!(matches!(
            rec.recommend_explained(&request.with_k(9)),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_context_keeps_catalog_reference_year() {
        let rec = recommender();
        assert_eq!(rec.config().reference_year, 2024);
    }

    #[test]
    fn test_recommender_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();

        let rec = recommender();
        let clone = rec.clone();
        let request = RecommendRequest::default().with_k(3);
        let handle = std::thread::spawn(move || clone.recommend(&request).unwrap());
        let from_thread = handle.join().unwrap();
        let local = rec.recommend(&RecommendRequest::default().with_k(3)).unwrap();

        let names = |ms: &[Match]| ms.iter().map(|m| m.record.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&from_thread), names(&local));
    }
}
