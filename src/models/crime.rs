use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::utils::constants::*;

/// Numeric columns of the crime dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Population,
    ViolentCrime,
    PropertyCrime,
    ViolentCrimePer100k,
    PropertyCrimePer100k,
    ViolentToPropertyRatio,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Population,
        Metric::ViolentCrime,
        Metric::PropertyCrime,
        Metric::ViolentCrimePer100k,
        Metric::PropertyCrimePer100k,
        Metric::ViolentToPropertyRatio,
    ];

    /// Column name in the source CSV
    pub fn column_name(&self) -> &'static str {
        match self {
            Metric::Population => COL_POPULATION,
            Metric::ViolentCrime => COL_VIOLENT_CRIME,
            Metric::PropertyCrime => COL_PROPERTY_CRIME,
            Metric::ViolentCrimePer100k => COL_VIOLENT_PER_100K,
            Metric::PropertyCrimePer100k => COL_PROPERTY_PER_100K,
            Metric::ViolentToPropertyRatio => COL_VIOLENT_TO_PROPERTY,
        }
    }
}

/// Toggle between raw counts and population-normalised rates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum MetricCategory {
    #[serde(rename = "Original_Value")]
    RawCount,
    #[default]
    #[serde(rename = "Per_100k_Pop")]
    #[value(name = "per-100k")]
    Per100k,
}

impl MetricCategory {
    pub const ALL: [MetricCategory; 2] = [MetricCategory::Per100k, MetricCategory::RawCount];

    pub fn violent_metric(&self) -> Metric {
        match self {
            MetricCategory::RawCount => Metric::ViolentCrime,
            MetricCategory::Per100k => Metric::ViolentCrimePer100k,
        }
    }

    pub fn property_metric(&self) -> Metric {
        match self {
            MetricCategory::RawCount => Metric::PropertyCrime,
            MetricCategory::Per100k => Metric::PropertyCrimePer100k,
        }
    }

    /// Label shown in the category selector
    pub fn label(&self) -> &'static str {
        match self {
            MetricCategory::RawCount => "Number of crime",
            MetricCategory::Per100k => "Crime rate/100k population",
        }
    }

    pub fn violent_text(&self) -> &'static str {
        match self {
            MetricCategory::RawCount => "violent crimes",
            MetricCategory::Per100k => "violent crime rate",
        }
    }

    pub fn property_text(&self) -> &'static str {
        match self {
            MetricCategory::RawCount => "property crimes",
            MetricCategory::Per100k => "property crime rate",
        }
    }
}

/// Mask the missing-value sentinel and non-finite values
pub fn normalize_measurement(value: f64) -> Option<f64> {
    if value == MISSING_SENTINEL || !value.is_finite() {
        None
    } else {
        Some(value)
    }
}

/// One city-year row of the crime dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeRecord {
    pub year: i32,
    pub state: String,
    pub city: String,
    pub population: u64,
    pub violent_crime: Option<u64>,
    pub property_crime: Option<u64>,
    pub violent_crime_per_100k: Option<f64>,
    pub property_crime_per_100k: Option<f64>,
    pub violent_to_property_ratio: Option<f64>,
}

impl CrimeRecord {
    /// Value of a metric column, `None` when the measurement is missing
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Population => Some(self.population as f64),
            Metric::ViolentCrime => self.violent_crime.map(|v| v as f64),
            Metric::PropertyCrime => self.property_crime.map(|v| v as f64),
            Metric::ViolentCrimePer100k => self.violent_crime_per_100k,
            Metric::PropertyCrimePer100k => self.property_crime_per_100k,
            Metric::ViolentToPropertyRatio => self.violent_to_property_ratio,
        }
    }

    pub fn has_missing_data(&self) -> bool {
        Metric::ALL.iter().any(|m| self.value(*m).is_none())
    }
}

pub struct CrimeRecordBuilder {
    year: Option<i32>,
    state: Option<String>,
    city: Option<String>,
    population: Option<u64>,
    violent_crime: Option<u64>,
    property_crime: Option<u64>,
    violent_crime_per_100k: Option<f64>,
    property_crime_per_100k: Option<f64>,
    violent_to_property_ratio: Option<f64>,
}

impl Default for CrimeRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CrimeRecordBuilder {
    pub fn new() -> Self {
        Self {
            year: None,
            state: None,
            city: None,
            population: None,
            violent_crime: None,
            property_crime: None,
            violent_crime_per_100k: None,
            property_crime_per_100k: None,
            violent_to_property_ratio: None,
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn violent_crime(mut self, count: u64) -> Self {
        self.violent_crime = Some(count);
        self
    }

    pub fn property_crime(mut self, count: u64) -> Self {
        self.property_crime = Some(count);
        self
    }

    pub fn violent_crime_per_100k(mut self, rate: f64) -> Self {
        self.violent_crime_per_100k = normalize_measurement(rate);
        self
    }

    pub fn property_crime_per_100k(mut self, rate: f64) -> Self {
        self.property_crime_per_100k = normalize_measurement(rate);
        self
    }

    pub fn violent_to_property_ratio(mut self, ratio: f64) -> Self {
        self.violent_to_property_ratio = normalize_measurement(ratio);
        self
    }

    /// Fill both per-100k rates from the counts and population when not set
    pub fn derive_rates(mut self) -> Self {
        if let Some(population) = self.population.filter(|p| *p > 0) {
            let scale = 100_000.0 / population as f64;
            if self.violent_crime_per_100k.is_none() {
                self.violent_crime_per_100k = self.violent_crime.map(|v| v as f64 * scale);
            }
            if self.property_crime_per_100k.is_none() {
                self.property_crime_per_100k = self.property_crime.map(|v| v as f64 * scale);
            }
        }
        if self.violent_to_property_ratio.is_none() {
            if let (Some(v), Some(p)) = (self.violent_crime, self.property_crime) {
                if p > 0 {
                    self.violent_to_property_ratio = Some(v as f64 / p as f64);
                }
            }
        }
        self
    }

    pub fn build(self) -> Result<CrimeRecord> {
        Ok(CrimeRecord {
            year: self
                .year
                .ok_or_else(|| DashboardError::MissingData("year".to_string()))?,
            state: self
                .state
                .ok_or_else(|| DashboardError::MissingData("state".to_string()))?,
            city: self
                .city
                .ok_or_else(|| DashboardError::MissingData("city".to_string()))?,
            population: self
                .population
                .ok_or_else(|| DashboardError::MissingData("population".to_string()))?,
            violent_crime: self.violent_crime,
            property_crime: self.property_crime,
            violent_crime_per_100k: self.violent_crime_per_100k,
            property_crime_per_100k: self.property_crime_per_100k,
            violent_to_property_ratio: self.violent_to_property_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_masked() {
        assert_eq!(normalize_measurement(-1000.0), None);
        assert_eq!(normalize_measurement(f64::NAN), None);
        assert_eq!(normalize_measurement(12.5), Some(12.5));
        assert_eq!(normalize_measurement(0.0), Some(0.0));
    }

    #[test]
    fn test_category_metrics() {
        assert_eq!(
            MetricCategory::RawCount.violent_metric(),
            Metric::ViolentCrime
        );
        assert_eq!(
            MetricCategory::Per100k.property_metric(),
            Metric::PropertyCrimePer100k
        );
        assert_eq!(MetricCategory::default(), MetricCategory::Per100k);
    }

    #[test]
    fn test_category_wire_values() {
        assert_eq!(
            serde_json::to_string(&MetricCategory::RawCount).unwrap(),
            "\"Original_Value\""
        );
        assert_eq!(
            serde_json::from_str::<MetricCategory>("\"Per_100k_Pop\"").unwrap(),
            MetricCategory::Per100k
        );
        assert!(serde_json::from_str::<MetricCategory>("\"Per_Capita\"").is_err());
    }

    #[test]
    fn test_builder_derives_rates() {
        let record = CrimeRecordBuilder::new()
            .year(2010)
            .state("New York")
            .city("Albany, NY")
            .population(200_000)
            .violent_crime(1000)
            .property_crime(4000)
            .derive_rates()
            .build()
            .unwrap();

        assert_eq!(record.violent_crime_per_100k, Some(500.0));
        assert_eq!(record.property_crime_per_100k, Some(2000.0));
        assert_eq!(record.violent_to_property_ratio, Some(0.25));
        assert!(!record.has_missing_data());
    }

    #[test]
    fn test_builder_requires_identity() {
        let result = CrimeRecordBuilder::new().year(2010).population(5000).build();
        assert!(matches!(result, Err(DashboardError::MissingData(_))));
    }

    #[test]
    fn test_missing_value_lookup() {
        let record = CrimeRecordBuilder::new()
            .year(2005)
            .state("Ohio")
            .city("Dayton, OH")
            .population(150_000)
            .property_crime(900)
            .build()
            .unwrap();

        assert_eq!(record.value(Metric::ViolentCrime), None);
        assert_eq!(record.value(Metric::PropertyCrime), Some(900.0));
        assert_eq!(record.value(Metric::Population), Some(150_000.0));
        assert!(record.has_missing_data());
    }
}
