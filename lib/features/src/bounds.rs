//! Suggested input ranges derived from the catalog

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};

/// Lower percentile used for catalog-derived ranges
pub const LOWER_QUANTILE: f64 = 0.05;
/// Upper percentile used for catalog-derived ranges
pub const UPPER_QUANTILE: f64 = 0.95;

/// Closed range of acceptable values for one input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bound<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

/// Ranges a client should offer for each query field
///
/// Revenue, market cap, employee size and growth span the catalog's 5th to
/// 95th percentile; growth is expressed in percent. Age and dividend yield
/// use fixed ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub annual_revenue: Bound<f64>,
    pub market_cap: Bound<f64>,
    pub employee_size: Bound<u64>,
    pub dividend_yield_pct: Bound<f64>,
    pub growth_pct: Bound<f64>,
    pub age_years: Bound<u32>,
}

impl InputBounds {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let column = |f: fn(&crate::catalog::CompanyRecord) -> f64| -> Vec<f64> {
            catalog.iter().map(f).collect()
        };
        let range = |values: &[f64]| {
            Bound::new(
                quantile(values, LOWER_QUANTILE).unwrap_or(0.0),
                quantile(values, UPPER_QUANTILE).unwrap_or(0.0),
            )
        };

        let revenue = column(|r| r.annual_revenue);
        let market_cap = column(|r| r.market_cap);
        let employees = column(|r| r.employee_size as f64);
        let growth = column(|r| r.growth_pct * 100.0);

        let employee_range = range(&employees);

        Self {
            annual_revenue: range(&revenue),
            market_cap: range(&market_cap),
            // truncated toward zero
            employee_size: Bound::new(employee_range.min as u64, employee_range.max as u64),
            dividend_yield_pct: Bound::new(0.0, 8.0),
            growth_pct: range(&growth),
            age_years: Bound::new(0, 100),
        }
    }
}

/// Quantile with linear interpolation between the two closest ranks
///
/// `q` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
