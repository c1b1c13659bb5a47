use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid year range: {start} > {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("No state abbreviation '{code}' for city '{city}'")]
    StateLookup { city: String, code: String },

    #[error("City '{city}' not found in working table")]
    CityNotFound { city: String },

    #[error("Missing required data: {0}")]
    MissingData(String),
}

impl DashboardError {
    /// Ranking failures the dashboard cycle recovers from with the fallback city
    pub fn is_ranking_miss(&self) -> bool {
        matches!(
            self,
            DashboardError::StateLookup { .. } | DashboardError::CityNotFound { .. }
        )
    }
}
