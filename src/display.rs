//! Plain-text rendering of recommendations

use std::fmt;
use stockpickr_features::{Column, CompanyRecord};
use stockpickr_similarity::Match;

/// Multi-line description of one company
pub struct RecordDisplay<'a>(pub &'a CompanyRecord);

impl fmt::Display for RecordDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "Company: {}", r.name)?;
        writeln!(f, "  {}: {}", Column::Industry.header(), r.industry)?;
        writeln!(f, "  {}: {}", Column::Sector.header(), r.sector)?;
        writeln!(f, "  {}: {}", Column::Country.header(), r.country)?;
        writeln!(f, "  {}: {}", Column::RiskLevel.header(), r.risk_level)?;
        writeln!(f, "  Age of Company (Years): {}", r.age_years)?;
        writeln!(f, "  {}: ${:.2}", Column::AnnualRevenue.header(), r.annual_revenue)?;
        writeln!(f, "  {}: ${:.2}", Column::MarketCap.header(), r.market_cap)?;
        writeln!(f, "  {}: {} employees", Column::EmployeeSize.header(), r.employee_size)?;
        writeln!(f, "  {}: {:.2}%", Column::DividendYield.header(), r.dividend_yield * 100.0)?;
        write!(f, "  {}: {:.2}%", Column::Growth.header(), r.growth_pct * 100.0)
    }
}

/// Numbered listing of matches, closest first
pub fn format_matches(matches: &[Match]) -> String {
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}. (distance {:.4}) {}", i + 1, m.distance, RecordDisplay(&m.record)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpickr_features::RiskLevel;

    fn apple() -> CompanyRecord {
        CompanyRecord {
            name: "Apple".to_string(),
            industry: "Consumer Electronics".to_string(),
            sector: "Technology".to_string(),
            country: "United States".to_string(),
            risk_level: RiskLevel::Low,
            age_years: 48,
            annual_revenue: 383.285,
            market_cap: 2990.0,
            employee_size: 161_000,
            dividend_yield: 0.0055,
            growth_pct: 0.48,
            ..Default::default()
        }
    }

    #[test]
    fn test_record_display() {
        let text = RecordDisplay(&apple()).to_string();
        assert!(text.starts_with("Company: Apple\n"));
        assert!(text.contains("Risk Level: Low"));
        assert!(text.contains("Market Cap (USD in Billions): $2990.00"));
        assert!(text.contains("Employee Size: 161000 employees"));
        assert!(text.contains("Dividend Yield: 0.55%"));
        assert!(text.ends_with("% Growth over last year: 48.00%"));
    }

    #[test]
    fn test_format_matches_numbers_entries() {
        let matches = vec![
            Match { distance: 0.5, record: apple() },
            Match { distance: 1.25, record: CompanyRecord { name: "Tesla".into(), ..Default::default() } },
        ];
        let text = format_matches(&matches);
        assert!(text.starts_with("1. (distance 0.5000) Company: Apple"));
        assert!(text.contains("\n\n2. (distance 1.2500) Company: Tesla"));
    }
}
