//! CSV Data Loader Module
//! Reads the renewables CSV with Polars and cleans it into an `EnergyTable`.

use crate::data::record::{EnergyRecord, EnergyTable};
use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const ENTITY_COL: &str = "Entity";
pub const CODE_COL: &str = "Code";
pub const YEAR_COL: &str = "Year";

/// Optional numeric columns, in the order they are read.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "Solar_GW",
    "Wind_GW",
    "Hydro_GW",
    "Total_GW",
    "Population",
    "GDP_per_Capita",
    "Capacity_per_Capita_kW",
];

/// Duplicate identifier columns left behind by an upstream join.
pub const LEGACY_COLUMNS: [&str; 3] = ["Country Name_x", "Country Name_y", "Country"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("'{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("Column '{0}' not found in the dataset")]
    MissingColumn(&'static str),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Non-fatal problems found while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    MissingNumericColumn(&'static str),
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MissingNumericColumn(name) => write!(
                f,
                "Column '{}' not found in the dataset. Some charts may be empty.",
                name
            ),
        }
    }
}

/// Cleaned table plus any warnings raised on the way.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub table: EnergyTable,
    pub warnings: Vec<LoadWarning>,
}

/// Load and clean the CSV at `path`.
pub fn load_data(path: &Path) -> Result<LoadedData, LoaderError> {
    if !path.is_file() {
        return Err(LoaderError::NotFound(path.to_path_buf()));
    }

    info!(path = %path.display(), "loading dataset");

    // Read every column as text; type coercion happens in `clean_frame`
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    clean_frame(df, path)
}

/// Apply the cleaning steps to a raw, all-text frame.
fn clean_frame(df: DataFrame, source: &Path) -> Result<LoadedData, LoaderError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let has_column = |name: &str| names.iter().any(|c| c == name);

    for required in [YEAR_COL, ENTITY_COL, CODE_COL] {
        if !has_column(required) {
            return Err(LoaderError::MissingColumn(required));
        }
    }

    // 1. Year: unparseable becomes 0, fractions truncate, never dropped
    let mut casts = vec![col(YEAR_COL)
        .cast(DataType::Float64)
        .cast(DataType::Int32)
        .fill_null(lit(0))];

    // 2. Numeric columns: unparseable becomes null; absent ones load as null
    let mut warnings = Vec::new();
    for name in NUMERIC_COLUMNS {
        if has_column(name) {
            casts.push(col(name).cast(DataType::Float64));
        } else {
            warn!(column = name, "numeric column missing, continuing without it");
            warnings.push(LoadWarning::MissingNumericColumn(name));
            casts.push(lit(NULL).cast(DataType::Float64).alias(name));
        }
    }

    // 3. Legacy identifier columns
    let raw_height = df.height();
    let df = df.drop_many(LEGACY_COLUMNS);

    // 4. Rows without identifiers
    let cleaned = df
        .lazy()
        .with_columns(casts)
        .filter(present(ENTITY_COL).and(present(CODE_COL)))
        .collect()?;

    let records = to_records(&cleaned)?;
    let dropped = raw_height - records.len();
    info!(rows = records.len(), dropped, "dataset loaded");

    let columns = names
        .into_iter()
        .filter(|name| !LEGACY_COLUMNS.contains(&name.as_str()))
        .collect();

    Ok(LoadedData {
        table: EnergyTable::new(records, columns, source.to_path_buf()),
        warnings,
    })
}

/// Non-null, non-empty text cell.
fn present(name: &str) -> Expr {
    col(name).is_not_null().and(col(name).neq(lit("")))
}

/// Copy a cleaned frame into records.
fn to_records(df: &DataFrame) -> Result<Vec<EnergyRecord>, LoaderError> {
    let entities = df.column(ENTITY_COL)?.str()?;
    let codes = df.column(CODE_COL)?.str()?;
    let years = df.column(YEAR_COL)?.i32()?;

    let mut numeric: Vec<Vec<Option<f64>>> = Vec::with_capacity(NUMERIC_COLUMNS.len());
    for name in NUMERIC_COLUMNS {
        numeric.push(float_column(df, name)?);
    }

    let records = entities
        .into_iter()
        .zip(codes)
        .zip(years)
        .enumerate()
        .map(|(i, ((entity, code), year))| EnergyRecord {
            entity: entity.unwrap_or_default().to_string(),
            code: code.unwrap_or_default().to_string(),
            year: year.unwrap_or(0),
            solar_gw: numeric[0][i],
            wind_gw: numeric[1][i],
            hydro_gw: numeric[2][i],
            total_gw: numeric[3][i],
            population: numeric[4][i],
            gdp_per_capita: numeric[5][i],
            capacity_per_capita_kw: numeric[6][i],
        })
        .collect();
    Ok(records)
}

/// Float column with NaN and infinities read as missing.
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
    let values = df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect();
    Ok(values)
}
