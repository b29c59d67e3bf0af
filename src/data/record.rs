//! Energy Record Module
//! Typed rows of the cleaned renewables table.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One row of the dataset: a (country, year) pair and its capacity figures.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRecord {
    pub entity: String,
    pub code: String,
    pub year: i32,
    pub solar_gw: Option<f64>,
    pub wind_gw: Option<f64>,
    pub hydro_gw: Option<f64>,
    pub total_gw: Option<f64>,
    pub population: Option<f64>,
    pub gdp_per_capita: Option<f64>,
    pub capacity_per_capita_kw: Option<f64>,
}

impl EnergyRecord {
    /// Record with identifiers only; every numeric field is missing.
    pub fn new(entity: impl Into<String>, code: impl Into<String>, year: i32) -> Self {
        Self {
            entity: entity.into(),
            code: code.into(),
            year,
            solar_gw: None,
            wind_gw: None,
            hydro_gw: None,
            total_gw: None,
            population: None,
            gdp_per_capita: None,
            capacity_per_capita_kw: None,
        }
    }
}

/// Immutable, cleaned table. Records keep file order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTable {
    records: Vec<EnergyRecord>,
    columns: Vec<String>,
    source: PathBuf,
}

impl EnergyTable {
    pub fn new(records: Vec<EnergyRecord>, columns: Vec<String>, source: PathBuf) -> Self {
        Self {
            records,
            columns,
            source,
        }
    }

    /// Build a table from records alone (columns unknown).
    #[cfg(test)]
    pub fn from_records(records: Vec<EnergyRecord>) -> Self {
        Self::new(records, Vec::new(), PathBuf::new())
    }

    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    /// Column names retained after cleaning, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct entity names, sorted.
    pub fn entities(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.entity.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let years = self.years();
        Some((*years.first()?, *years.last()?))
    }

    /// Initial slider value: `preferred` clamped into the data's year range.
    pub fn default_year(&self, preferred: i32) -> i32 {
        match self.year_bounds() {
            Some((min, max)) => preferred.clamp(min, max),
            None => preferred,
        }
    }

    /// Initial country: `preferred` if present, else the first alphabetically.
    pub fn default_country(&self, preferred: &str) -> Option<String> {
        let entities = self.entities();
        if entities.iter().any(|e| e == preferred) {
            return Some(preferred.to_string());
        }
        entities.into_iter().next()
    }
}
