//! Feature schema definitions
//!
//! Fixes the catalog columns, the seven modeling features and their order.
//! The same ordering is used to build catalog vectors at fit time and query
//! vectors at request time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use stockpickr_core::{Error, Result, Vector};

/// Number of modeling features
pub const FEATURE_COUNT: usize = 7;

/// Catalog file column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    CompanyName,
    FoundingYear,
    Sector,
    Industry,
    Country,
    RiskLevel,
    AnnualRevenue,
    MarketCap,
    EmployeeSize,
    DividendYield,
    Growth,
}

impl Column {
    /// Every required column
    pub const ALL: [Column; 11] = [
        Column::CompanyName,
        Column::FoundingYear,
        Column::Sector,
        Column::Industry,
        Column::Country,
        Column::RiskLevel,
        Column::AnnualRevenue,
        Column::MarketCap,
        Column::EmployeeSize,
        Column::DividendYield,
        Column::Growth,
    ];

    /// Canonical header name
    pub fn header(self) -> &'static str {
        match self {
            Column::CompanyName => "Company Name",
            Column::FoundingYear => "Founding Year",
            Column::Sector => "Sector",
            Column::Industry => "Industry",
            Column::Country => "Country",
            Column::RiskLevel => "Risk Level",
            Column::AnnualRevenue => "Annual Revenue 2022-2023 (USD in Billions)",
            Column::MarketCap => "Market Cap (USD in Billions)",
            Column::EmployeeSize => "Employee Size",
            Column::DividendYield => "Dividend Yield",
            Column::Growth => "% Growth over last year",
        }
    }

    /// Shorter header names accepted in place of the canonical one
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::AnnualRevenue => &["Annual Revenue"],
            Column::MarketCap => &["Market Cap"],
            Column::Growth => &["% Growth"],
            _ => &[],
        }
    }

    /// Whether `name` is the canonical header or one of its aliases
    pub fn matches(self, name: &str) -> bool {
        self.header() == name || self.aliases().contains(&name)
    }
}

/// Ordinal risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Ordinal code used in the feature space
    pub fn ordinal(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    /// Exact, case-sensitive match; there is no fallback category
    fn from_str(s: &str) -> Result<Self> {
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory {
                field: Column::RiskLevel.header().to_string(),
                value: s.to_string(),
                expected: "Low, Medium, High".to_string(),
            })
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a risk label to its ordinal code
pub fn encode_risk(level: &str) -> Result<u8> {
    Ok(level.parse::<RiskLevel>()?.ordinal())
}

/// Modeling feature, in fixed vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    RiskLevel,
    AnnualRevenue,
    MarketCap,
    EmployeeSize,
    DividendYield,
    #[serde(rename = "growth_pct")]
    Growth,
    #[serde(rename = "age_years")]
    Age,
}

impl Feature {
    /// Features in vector order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::RiskLevel,
        Feature::AnnualRevenue,
        Feature::MarketCap,
        Feature::EmployeeSize,
        Feature::DividendYield,
        Feature::Growth,
        Feature::Age,
    ];

    /// Position of this feature in a [`FeatureVector`]
    pub fn position(self) -> usize {
        self as usize
    }

    /// Human readable name
    pub fn label(self) -> &'static str {
        match self {
            Feature::RiskLevel => "Risk Level",
            Feature::AnnualRevenue => "Annual Revenue (USD in Billions)",
            Feature::MarketCap => "Market Cap (USD in Billions)",
            Feature::EmployeeSize => "Employee Size",
            Feature::DividendYield => "Dividend Yield",
            Feature::Growth => "% Growth over last year",
            Feature::Age => "Age of Company (Years)",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw or standardized values of the seven modeling features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    #[inline]
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.position()]
    }

    #[inline]
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Iterate `(feature, value)` pairs in vector order
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Convert to a core vector for indexing
    pub fn to_vector(&self) -> Vector {
        Vector::from_slice(&self.0)
    }
}
