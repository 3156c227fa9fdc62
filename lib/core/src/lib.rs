//! # StockPickr Core
//!
//! Core building blocks shared by the StockPickr crates.
//!
//! - [`Vector`] - Dense `f64` vector with Euclidean distance
//! - [`RowId`] / [`Point`] - Stable row identity carried into the index
//! - [`NeighborIndex`] - Exact k-nearest-neighbor search
//! - [`Error`] - Error taxonomy used across the workspace
//!
//! ## Example
//!
//! ```rust
//! use stockpickr_core::{NeighborIndex, Point, RowId, Vector};
//!
//! let points = vec![
//!     Point::new(RowId(0), Vector::new(vec![0.0, 0.0])),
//!     Point::new(RowId(1), Vector::new(vec![3.0, 4.0])),
//! ];
//! let index = NeighborIndex::build(2, points).unwrap();
//!
//! let hits = index.search(&Vector::new(vec![3.0, 3.0]), 1).unwrap();
//! assert_eq!(hits[0].id, RowId(1));
//! ```

pub mod error;
pub mod index;
pub mod point;
pub mod vector;

pub use error::{Error, Result};
pub use index::{Neighbor, NeighborIndex};
pub use point::{Point, RowId};
pub use vector::Vector;
