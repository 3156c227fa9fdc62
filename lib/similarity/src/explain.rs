//! Explainability for recommendation results
//!
//! Breaks each match's squared distance down per feature so clients can show
//! which preferences drove a recommendation.

use crate::recommender::Match;
use serde::Serialize;
use stockpickr_core::RowId;
use stockpickr_features::{CompanyRecord, Feature, FeatureVector};

/// Squared standardized difference on one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: Feature,
    pub contribution: f64,
}

/// A match with its per-feature distance breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedMatch {
    /// 1-based position in the result list
    pub rank: usize,
    pub id: RowId,
    pub distance: f64,
    pub company: CompanyRecord,
    /// In feature order; sums to `distance²`
    pub explain: Vec<FeatureContribution>,
}

impl ExplainedMatch {
    /// Explain a match given the standardized query and candidate vectors
    pub fn new(rank: usize, m: Match, query: &FeatureVector, candidate: &FeatureVector) -> Self {
        let explain = query
            .iter()
            .zip(candidate.values())
            .map(|((feature, q), c)| FeatureContribution {
                feature,
                contribution: (q - c) * (q - c),
            })
            .collect();

        Self {
            rank,
            id: m.record.id,
            distance: m.distance,
            company: m.record,
            explain,
        }
    }

    /// Feature with the largest share of the distance
    pub fn top_feature(&self) -> Option<Feature> {
        self.explain
            .iter()
            .filter(|c| c.contribution > 0.0)
            .max_by(|a, b| a.contribution.total_cmp(&b.contribution))
            .map(|c| c.feature)
    }
}

/// Summary statistics for a recommendation query
#[derive(Debug, Clone, Serialize)]
pub struct MatchStats {
    /// Number of companies searched
    pub catalog_size: usize,
    pub results_count: usize,
    pub best_distance: f64,
    pub mean_distance: f64,
    /// Feature that separates the best match from the query the most
    pub top_contributing_feature: Option<Feature>,
}

impl MatchStats {
    pub fn compute(results: &[ExplainedMatch], catalog_size: usize) -> Self {
        if results.is_empty() {
            return Self {
                catalog_size,
                results_count: 0,
                best_distance: 0.0,
                mean_distance: 0.0,
                top_contributing_feature: None,
            };
        }

        let total: f64 = results.iter().map(|r| r.distance).sum();
        Self {
            catalog_size,
            results_count: results.len(),
            // results are sorted
            best_distance: results[0].distance,
            mean_distance: total / results.len() as f64,
            top_contributing_feature: results[0].top_feature(),
        }
    }
}

/// Response body for a recommendation query
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub result: Vec<ExplainedMatch>,
    pub stats: MatchStats,
}

impl RecommendResponse {
    pub fn new(result: Vec<ExplainedMatch>, catalog_size: usize) -> Self {
        let stats = MatchStats::compute(&result, catalog_size);
        Self { result, stats }
    }
}
