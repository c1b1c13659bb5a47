use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DashboardError, Result};
use crate::models::crime::normalize_measurement;
use crate::models::CrimeRecord;
use crate::readers::decode::read_text;
use crate::utils::constants::*;

const REQUIRED_COLUMNS: [&str; 9] = [
    COL_YEAR,
    COL_STATE,
    COL_CITY,
    COL_POPULATION,
    COL_VIOLENT_CRIME,
    COL_PROPERTY_CRIME,
    COL_VIOLENT_PER_100K,
    COL_PROPERTY_PER_100K,
    COL_VIOLENT_TO_PROPERTY,
];

/// Row as it appears in the CSV; the leading index column is ignored
#[derive(Debug, Deserialize)]
struct RawCrimeRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Population")]
    population: i64,
    #[serde(rename = "Violent_crime")]
    violent_crime: i64,
    #[serde(rename = "Property_crime")]
    property_crime: i64,
    #[serde(rename = "Violent_crime_per_100k")]
    violent_crime_per_100k: f64,
    #[serde(rename = "Property_crime_per_100k")]
    property_crime_per_100k: f64,
    #[serde(rename = "Violent_to_property_ratio")]
    violent_to_property_ratio: f64,
}

/// Records kept after load plus the count of outlier rows removed
#[derive(Debug, Clone)]
pub struct CrimeReadResult {
    pub records: Vec<CrimeRecord>,
    pub dropped_outliers: usize,
}

pub struct CrimeReader {
    min_population: u64,
}

impl CrimeReader {
    pub fn new() -> Self {
        Self {
            min_population: MIN_CITY_POPULATION,
        }
    }

    pub fn with_min_population(min_population: u64) -> Self {
        Self { min_population }
    }

    /// Read the crime dataset CSV
    pub fn read_records(&self, path: &Path) -> Result<CrimeReadResult> {
        let text = read_text(path)?;
        let result = self.parse_records(text.as_bytes())?;

        info!(
            path = %path.display(),
            records = result.records.len(),
            dropped = result.dropped_outliers,
            "Loaded crime records"
        );

        Ok(result)
    }

    /// Parse crime records from any CSV source
    pub fn parse_records<R: Read>(&self, source: R) -> Result<CrimeReadResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::InvalidFormat(format!(
                "Crime dataset is missing columns: {}",
                missing.join(", ")
            )));
        }

        let mut records = Vec::new();
        let mut dropped_outliers = 0;

        for (index, row) in reader.deserialize::<RawCrimeRow>().enumerate() {
            let row = row?;

            // Small locations give unstable per-100k rates; the sentinel population lands here too
            if row.population < self.min_population as i64 {
                dropped_outliers += 1;
                continue;
            }

            records.push(self.convert_row(row, index + 2)?);
        }

        debug!(
            kept = records.len(),
            dropped = dropped_outliers,
            "Parsed crime dataset"
        );

        Ok(CrimeReadResult {
            records,
            dropped_outliers,
        })
    }

    fn convert_row(&self, row: RawCrimeRow, line: usize) -> Result<CrimeRecord> {
        Ok(CrimeRecord {
            year: row.year,
            population: row.population as u64,
            violent_crime: parse_count(row.violent_crime, COL_VIOLENT_CRIME, line)?,
            property_crime: parse_count(row.property_crime, COL_PROPERTY_CRIME, line)?,
            violent_crime_per_100k: normalize_measurement(row.violent_crime_per_100k),
            property_crime_per_100k: normalize_measurement(row.property_crime_per_100k),
            violent_to_property_ratio: normalize_measurement(row.violent_to_property_ratio),
            state: row.state,
            city: row.city,
        })
    }
}

impl Default for CrimeReader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_count(value: i64, column: &str, line: usize) -> Result<Option<u64>> {
    if value as f64 == MISSING_SENTINEL {
        return Ok(None);
    }
    if value < 0 {
        return Err(DashboardError::InvalidFormat(format!(
            "Negative {} '{}' on line {}",
            column, value, line
        )));
    }
    Ok(Some(value as u64))
}
