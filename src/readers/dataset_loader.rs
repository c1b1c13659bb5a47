use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::error::{DashboardError, Result};
use crate::models::Dataset;
use crate::readers::{AbbreviationReader, CrimeReader};
use crate::utils::constants::MIN_CITY_POPULATION;
use crate::utils::progress::ProgressReporter;

/// Builds the shared dataset from the crime CSV and the abbreviation CSV
pub struct DatasetLoader {
    data_file: PathBuf,
    abbreviation_file: PathBuf,
    min_population: u64,
}

impl DatasetLoader {
    pub fn new(data_file: impl Into<PathBuf>, abbreviation_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            abbreviation_file: abbreviation_file.into(),
            min_population: MIN_CITY_POPULATION,
        }
    }

    pub fn with_min_population(mut self, min_population: u64) -> Self {
        self.min_population = min_population;
        self
    }

    /// Load both inputs; any failure aborts so no partial dataset is ever used
    pub fn load(&self, progress: Option<&ProgressReporter>) -> Result<Arc<Dataset>> {
        ensure_exists(&self.data_file)?;
        ensure_exists(&self.abbreviation_file)?;

        if let Some(p) = progress {
            p.set_message("Reading crime records...");
        }
        let crime = CrimeReader::with_min_population(self.min_population)
            .read_records(&self.data_file)?;

        if let Some(p) = progress {
            p.set_message("Reading state abbreviations...");
        }
        let abbreviations = AbbreviationReader::new().read_abbreviations(&self.abbreviation_file)?;

        if crime.records.is_empty() {
            return Err(DashboardError::MissingData(format!(
                "No crime records at or above population {} in {}",
                self.min_population,
                self.data_file.display()
            )));
        }

        let dataset = Dataset::new(crime.records, abbreviations, crime.dropped_outliers);
        info!(
            records = dataset.len(),
            cities = dataset.cities().len(),
            "Dataset ready"
        );

        Ok(Arc::new(dataset))
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(DashboardError::MissingData(format!(
            "Input file not found: {}",
            path.display()
        )));
    }
    Ok(())
}
