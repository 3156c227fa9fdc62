//! # StockPickr
//!
//! Company recommendations by nearest-neighbor search in a standardized
//! feature space.
//!
//! StockPickr loads a static catalog of companies, encodes seven modeling
//! features (risk level, revenue, market cap, employees, dividend yield,
//! growth and age), standardizes them, and returns the catalog entries
//! closest to a user's preferences by Euclidean distance.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! stockpickr --catalog data/companies.csv serve --http-port 8080
//! ```
//!
//! ### From the Command Line
//!
//! ```bash
//! stockpickr recommend --risk-level Medium --annual-revenue 80 -k 3
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use stockpickr::prelude::*;
//!
//! let config = PipelineConfig::default();
//! let recommender = Recommender::from_path("data/companies.csv", config).unwrap();
//!
//! let request = RecommendRequest::default().with_risk_level("High");
//! for m in recommender.recommend(&request).unwrap() {
//!     println!("{} ({:.3})", m.record.name, m.distance);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `stockpickr-core` - Error taxonomy, vectors, row identifiers, neighbor index
//! - `stockpickr-features` - Catalog loading, risk encoding, standardization
//! - `stockpickr-similarity` - Requests, the recommender context, explanations
//! - `stockpickr-api` - REST API

pub mod display;

// Re-export core types
pub use stockpickr_core::{Error, Neighbor, NeighborIndex, Result, RowId, Vector};

// Re-export the feature pipeline
pub use stockpickr_features::{
    encode_risk, Catalog, CompanyRecord, Feature, FeaturePipeline, FeatureVector, InputBounds,
    PipelineConfig, RiskLevel, StandardScaler, VariancePolicy,
};

// Re-export the matcher
pub use stockpickr_similarity::{
    ExplainedMatch, Match, MatchStats, RecommendRequest, RecommendResponse, Recommender,
};

// Re-export API
pub use stockpickr_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CompanyRecord, Error, Feature, FeatureVector, Match, PipelineConfig,
        RecommendRequest, RecommendResponse, Recommender, Result, RestApi, RiskLevel, RowId,
        VariancePolicy,
    };
}
