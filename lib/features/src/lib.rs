//! # StockPickr Features
//!
//! Turns the static company catalog into a standardized numeric feature
//! space.
//!
//! - **Schema**: the eleven catalog columns and the seven modeling features in fixed order
//! - **Catalog**: CSV loading with strict validation and a frozen reference year
//! - **Scaler**: per-feature standardization with an explicit zero-variance policy
//! - **Pipeline**: the one transform applied to catalog rows and queries alike
//! - **Bounds**: percentile-based ranges for query inputs
//!
//! ## Example
//!
//! ```rust
//! use stockpickr_features::{Catalog, FeaturePipeline, VariancePolicy};
//!
//! let csv = "\
//! Company Name,Founding Year,Sector,Industry,Country,Risk Level,Annual Revenue,Market Cap,Employee Size,Dividend Yield,% Growth
//! Apple,1976,Technology,Consumer Electronics,United States,Low,383.29,2990.0,161000,0.0055,0.48
//! Tesla,2003,Consumer Cyclical,Auto Manufacturers,United States,High,96.77,789.9,127855,0.0,1.01
//! ";
//! let catalog = Catalog::from_reader(csv.as_bytes(), 2024).unwrap();
//! let pipeline = FeaturePipeline::fit(&catalog, VariancePolicy::UnitScale).unwrap();
//!
//! let scaled = pipeline.transform(&catalog.records()[0].features()).unwrap();
//! assert!(scaled.is_finite());
//! ```

pub mod bounds;
pub mod catalog;
pub mod pipeline;
pub mod scaler;
pub mod schema;

pub use bounds::{quantile, Bound, InputBounds};
pub use catalog::{Catalog, CompanyRecord};
pub use pipeline::{current_year, load_catalog, FeaturePipeline, PipelineConfig};
pub use scaler::{StandardScaler, VariancePolicy, DEFAULT_STD_FLOOR, MIN_STD};
pub use schema::{encode_risk, Column, Feature, FeatureVector, RiskLevel, FEATURE_COUNT};
