//! # StockPickr Similarity
//!
//! Finds the catalog companies closest to a user's preferences.
//!
//! A [`RecommendRequest`] is encoded and standardized with the same
//! [`FeaturePipeline`](stockpickr_features::FeaturePipeline) that was fitted on
//! the catalog, searched against the neighbor index by plain Euclidean
//! distance, and the hits are resolved back to the original, unscaled
//! company records.
//!
//! ## Example
//!
//! ```rust
//! use stockpickr_features::{Catalog, PipelineConfig};
//! use stockpickr_similarity::{RecommendRequest, Recommender};
//!
//! let csv = "\
//! Company Name,Founding Year,Sector,Industry,Country,Risk Level,Annual Revenue,Market Cap,Employee Size,Dividend Yield,% Growth
//! Apple,1976,Technology,Consumer Electronics,United States,Low,383.29,2990.0,161000,0.0055,0.48
//! Tesla,2003,Consumer Cyclical,Auto Manufacturers,United States,High,96.77,789.9,127855,0.0,1.01
//! Pfizer,1849,Healthcare,Drug Manufacturers,United States,Medium,58.5,160.0,88000,0.058,-0.41
//! ";
//! let catalog = Catalog::from_reader(csv.as_bytes(), 2024).unwrap();
//! let recommender = Recommender::build(catalog, PipelineConfig::default()).unwrap();
//!
//! let request = RecommendRequest::default().with_risk_level("High").with_k(2);
//! let matches = recommender.recommend(&request).unwrap();
//! assert_eq!(matches.len(), 2);
//! assert!(matches[0].distance <= matches[1].distance);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────>│  Pipeline   │────>│  Neighbor   │
//! │   (rows)    │     │ (fit/scale) │     │   Index     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       ▲                    ▲                   │
//!       │ resolve            │ scale query       │ k nearest
//!       │              ┌─────────────┐           │
//!       └──────────────│ Recommender │<──────────┘
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │   Explain   │
//!                      └─────────────┘
//! ```

pub mod explain;
pub mod recommender;
pub mod request;

pub use explain::{ExplainedMatch, FeatureContribution, MatchStats, RecommendResponse};
pub use recommender::{Match, Recommender};
pub use request::{RecommendRequest, DEFAULT_K};
