use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::{DashboardError, Result};
use crate::models::AbbreviationMap;
use crate::readers::decode::read_text;
use crate::utils::constants::{COL_ABBRV, COL_STATE};

#[derive(Debug, Deserialize)]
struct RawAbbreviationRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Abbrv")]
    abbrv: String,
}

pub struct AbbreviationReader;

impl AbbreviationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the state abbreviation lookup CSV
    pub fn read_abbreviations(&self, path: &Path) -> Result<AbbreviationMap> {
        let text = read_text(path)?;
        let map = self.parse_abbreviations(text.as_bytes())?;

        info!(
            path = %path.display(),
            states = map.len(),
            "Loaded state abbreviations"
        );

        Ok(map)
    }

    pub fn parse_abbreviations<R: Read>(&self, source: R) -> Result<AbbreviationMap> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        for column in [COL_STATE, COL_ABBRV] {
            if !headers.iter().any(|h| h == column) {
                return Err(DashboardError::InvalidFormat(format!(
                    "Abbreviation table is missing column: {}",
                    column
                )));
            }
        }

        let mut map = AbbreviationMap::new();
        for row in reader.deserialize::<RawAbbreviationRow>() {
            let row = row?;
            if row.abbrv.chars().count() != 2 {
                return Err(DashboardError::InvalidFormat(format!(
                    "State abbreviation must have two letters, got '{}' for {}",
                    row.abbrv, row.state
                )));
            }
            map.insert(row.abbrv, row.state);
        }

        Ok(map)
    }
}

impl Default for AbbreviationReader {
    fn default() -> Self {
        Self::new()
    }
}
