//! Company catalog
//!
//! Loads the static company table from CSV, validates every row and derives
//! the company age from a fixed reference year. The loaded catalog is never
//! modified afterwards.

use crate::bounds::InputBounds;
use crate::schema::{Column, FeatureVector, RiskLevel};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use stockpickr_core::{Error, Result, RowId};
use tracing::{debug, info};

/// One company row with its display and modeling fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: RowId,
    pub name: String,
    pub founding_year: i32,
    pub sector: String,
    pub industry: String,
    pub country: String,
    pub risk_level: RiskLevel,
    /// USD billions
    pub annual_revenue: f64,
    /// USD billions
    pub market_cap: f64,
    pub employee_size: u64,
    /// Fraction, e.g. 0.025 for 2.5 %
    pub dividend_yield: f64,
    /// Fraction, may exceed 1.0
    pub growth_pct: f64,
    /// Derived from the catalog's reference year at load time
    pub age_years: i32,
}

impl CompanyRecord {
    /// Modeling features in fixed order, risk level encoded as its ordinal
    pub fn features(&self) -> FeatureVector {
        FeatureVector::new([
            f64::from(self.risk_level.ordinal()),
            self.annual_revenue,
            self.market_cap,
            self.employee_size as f64,
            self.dividend_yield,
            self.growth_pct,
            f64::from(self.age_years),
        ])
    }
}

/// The immutable company table
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<CompanyRecord>,
    reference_year: i32,
}

impl Catalog {
    /// Load a catalog from a CSV file
    pub fn from_path<P: AsRef<Path>>(path: P, reference_year: i32) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            Error::DataLoad(format!("cannot open '{}': {}", path.display(), e))
        })?;
        let catalog = Self::from_reader(file, reference_year)?;
        info!(
            "Loaded {} companies from {} (reference year {})",
            catalog.len(),
            path.display(),
            reference_year
        );
        Ok(catalog)
    }

    /// Load a catalog from any CSV source
    pub fn from_reader<R: Read>(reader: R, reference_year: i32) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::DataLoad(format!("failed to read header row: {}", e)))?
            .clone();
        let layout = ColumnLayout::resolve(&headers)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| Error::DataLoad(format!("failed to read row: {}", e)))?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let id = RowId(records.len() as u32);
            records.push(layout.parse_row(&row, line, id, reference_year)?);
        }

        if records.is_empty() {
            return Err(Error::DataLoad("catalog has no rows".to_string()));
        }

        debug!(rows = records.len(), "parsed catalog");
        Ok(Self { records, reference_year })
    }

    /// Build a catalog from in-memory records
    ///
    /// Row identifiers are reassigned in the given order and ages are derived
    /// from `reference_year`.
    pub fn from_records(records: Vec<CompanyRecord>, reference_year: i32) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::DataLoad("catalog has no rows".to_string()));
        }

        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, mut record)| {
                record.id = RowId(i as u32);
                record.age_years = age_at(record.founding_year, reference_year)
                    .map_err(|msg| Error::DataLoad(format!("row {}: {}", i, msg)))?;
                validate_modeling_fields(&record)
                    .map_err(|msg| Error::DataLoad(format!("row {}: {}", i, msg)))?;
                Ok(record)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records, reference_year })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Year the company ages were computed against
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompanyRecord> {
        self.records.iter()
    }

    /// Look up a record by its row identifier
    pub fn get(&self, id: RowId) -> Option<&CompanyRecord> {
        self.records.get(id.index()).filter(|r| r.id == id)
    }

    /// Industries in order of first appearance
    pub fn distinct_industries(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.industry.as_str()))
    }

    /// Countries in order of first appearance
    pub fn distinct_countries(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.country.as_str()))
    }

    /// Suggested ranges for query inputs
    pub fn input_bounds(&self) -> InputBounds {
        InputBounds::from_catalog(self)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = ahash::AHashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

fn age_at(founding_year: i32, reference_year: i32) -> std::result::Result<i32, String> {
    let age = reference_year.checked_sub(founding_year).ok_or_else(|| {
        format!(
            "age from founding year {} to reference year {} is out of range",
            founding_year, reference_year
        )
    })?;
    if age < 0 {
        return Err(format!(
            "founding year {} is after reference year {}",
            founding_year, reference_year
        ));
    }
    Ok(age)
}

fn validate_modeling_fields(record: &CompanyRecord) -> std::result::Result<(), String> {
    let checks = [
        (Column::AnnualRevenue, record.annual_revenue, true),
        (Column::MarketCap, record.market_cap, true),
        (Column::DividendYield, record.dividend_yield, true),
        (Column::Growth, record.growth_pct, false),
    ];
    for (column, value, non_negative) in checks {
        if !value.is_finite() {
            return Err(format!("{} is not a finite number", column.header()));
        }
        if non_negative && value < 0.0 {
            return Err(format!("{} must not be negative", column.header()));
        }
    }
    Ok(())
}

/// Positions of the required columns in a header row
struct ColumnLayout {
    positions: AHashMap<Column, usize>,
}

impl ColumnLayout {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let mut positions = AHashMap::with_capacity(Column::ALL.len());
        let mut missing = Vec::new();

        for column in Column::ALL {
            match headers.iter().position(|h| column.matches(h)) {
                Some(pos) => {
                    positions.insert(column, pos);
                }
                None => missing.push(column.header()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::DataLoad(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { positions })
    }

    fn field<'r>(&self, row: &'r csv::StringRecord, column: Column, line: u64) -> Result<&'r str> {
        self.positions
            .get(&column)
            .and_then(|&pos| row.get(pos))
            .ok_or_else(|| Error::data_load_at(line, column.header(), "value is missing"))
    }

    fn text(&self, row: &csv::StringRecord, column: Column, line: u64) -> Result<String> {
        let value = self.field(row, column, line)?;
        if value.is_empty() {
            return Err(Error::data_load_at(line, column.header(), "value is empty"));
        }
        Ok(value.to_string())
    }

    fn number(&self, row: &csv::StringRecord, column: Column, line: u64) -> Result<f64> {
        let raw = self.field(row, column, line)?;
        let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
        let value: f64 = cleaned
            .parse()
            .map_err(|_| Error::data_load_at(line, column.header(), format!("'{}' is not a number", raw)))?;
        if !value.is_finite() {
            return Err(Error::data_load_at(line, column.header(), format!("'{}' is not finite", raw)));
        }
        Ok(value)
    }

    fn whole_number(&self, row: &csv::StringRecord, column: Column, line: u64) -> Result<f64> {
        let value = self.number(row, column, line)?;
        if value.fract() != 0.0 {
            return Err(Error::data_load_at(
                line,
                column.header(),
                format!("{} is not a whole number", value),
            ));
        }
        Ok(value)
    }

    fn parse_row(
        &self,
        row: &csv::StringRecord,
        line: u64,
        id: RowId,
        reference_year: i32,
    ) -> Result<CompanyRecord> {
        let risk_level = self
            .field(row, Column::RiskLevel, line)?
            .parse::<RiskLevel>()
            .map_err(|e| Error::data_load_at(line, Column::RiskLevel.header(), e))?;

        let founding_year = self.whole_number(row, Column::FoundingYear, line)?;
        if founding_year < f64::from(i32::MIN) || founding_year > f64::from(i32::MAX) {
            return Err(Error::data_load_at(line, Column::FoundingYear.header(), "year out of range"));
        }
        let founding_year = founding_year as i32;
        let age_years = age_at(founding_year, reference_year)
            .map_err(|msg| Error::data_load_at(line, Column::FoundingYear.header(), msg))?;

        let employee_size = self.whole_number(row, Column::EmployeeSize, line)?;
        if employee_size < 0.0 {
            return Err(Error::data_load_at(line, Column::EmployeeSize.header(), "must not be negative"));
        }
        // u64::MAX rounds up to 2^64 as f64
        if employee_size >= u64::MAX as f64 {
            return Err(Error::data_load_at(line, Column::EmployeeSize.header(), "value out of range"));
        }

        let record = CompanyRecord {
            id,
            name: self.text(row, Column::CompanyName, line)?,
            founding_year,
            sector: self.text(row, Column::Sector, line)?,
            industry: self.text(row, Column::Industry, line)?,
            country: self.text(row, Column::Country, line)?,
            risk_level,
            annual_revenue: self.number(row, Column::AnnualRevenue, line)?,
            market_cap: self.number(row, Column::MarketCap, line)?,
            employee_size: employee_size as u64,
            dividend_yield: self.number(row, Column::DividendYield, line)?,
            growth_pct: self.number(row, Column::Growth, line)?,
            age_years,
        };

        validate_modeling_fields(&record)
            .map_err(|msg| Error::DataLoad(format!("line {}: {}", line, msg)))?;
        Ok(record)
    }
}
