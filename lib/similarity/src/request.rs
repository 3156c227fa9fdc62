//! Recommendation requests
//!
//! The structured query a client submits. Percent inputs are converted to
//! the fractions used by the catalog before encoding.

use serde::{Deserialize, Serialize};
use stockpickr_core::{Error, Result};
use stockpickr_features::{FeatureVector, RiskLevel};

/// Number of recommendations when the client does not ask for a count
pub const DEFAULT_K: usize = 5;

fn default_k() -> usize {
    DEFAULT_K
}

/// Preferences describing the kind of company the user is looking for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// One of "Low", "Medium", "High"
    pub risk_level: String,
    /// USD billions
    pub annual_revenue: f64,
    /// USD billions
    pub market_cap: f64,
    pub employee_size: u64,
    /// Percent, 0 to 100
    pub dividend_yield_pct: f64,
    /// Percent growth over the last year
    pub growth_pct: f64,
    pub age_years: u32,
    /// Number of companies to return
    #[serde(default = "default_k")]
    pub k: usize,
}

impl Default for RecommendRequest {
    fn default() -> Self {
        Self {
            risk_level: RiskLevel::Low.as_str().to_string(),
            annual_revenue: 50.0,
            market_cap: 200.0,
            employee_size: 10_000,
            dividend_yield_pct: 2.0,
            growth_pct: 120.0,
            age_years: 20,
            k: DEFAULT_K,
        }
    }
}

impl RecommendRequest {
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub fn with_risk_level(mut self, risk_level: impl Into<String>) -> Self {
        self.risk_level = risk_level.into();
        self
    }

    /// Check value ranges without encoding
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("annual_revenue", self.annual_revenue),
            ("market_cap", self.market_cap),
            ("dividend_yield_pct", self.dividend_yield_pct),
            ("growth_pct", self.growth_pct),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(Error::InvalidArgument(format!("{} must be a finite number", name)));
            }
        }

        if self.annual_revenue < 0.0 {
            return Err(Error::InvalidArgument("annual_revenue must not be negative".to_string()));
        }
        if self.market_cap < 0.0 {
            return Err(Error::InvalidArgument("market_cap must not be negative".to_string()));
        }
        if !(0.0..=100.0).contains(&self.dividend_yield_pct) {
            return Err(Error::InvalidArgument(format!(
                "dividend_yield_pct must be between 0 and 100, got {}",
                self.dividend_yield_pct
            )));
        }
        Ok(())
    }

    /// Encode into raw modeling features in catalog units
    ///
    /// Fails on an unknown risk level or out-of-range value; nothing is
    /// defaulted.
    pub fn to_features(&self) -> Result<FeatureVector> {
        self.validate()?;
        let risk: RiskLevel = self.risk_level.parse()?;

        Ok(FeatureVector::new([
            f64::from(risk.ordinal()),
            self.annual_revenue,
            self.market_cap,
            self.employee_size as f64,
            self.dividend_yield_pct / 100.0,
            self.growth_pct / 100.0,
            f64::from(self.age_years),
        ]))
    }
}
