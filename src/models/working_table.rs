use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{DashboardError, Result};
use crate::models::crime::Metric;
use crate::utils::constants::{YEAR_MAX, YEAR_MIN};

/// Inclusive year range selected on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_year_order"))]
pub struct YearRange {
    #[validate(range(min = 2001, max = 2019))]
    pub start: i32,

    #[validate(range(min = 2001, max = 2019))]
    pub end: i32,
}

fn validate_year_order(range: &YearRange) -> std::result::Result<(), ValidationError> {
    if range.start > range.end {
        return Err(ValidationError::new("year_range_order"));
    }
    Ok(())
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whole dataset coverage
    pub fn full() -> Self {
        Self {
            start: YEAR_MIN,
            end: YEAR_MAX,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::full()
    }
}

/// One (city, state) group averaged over the active year range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingRow {
    pub city: String,
    pub state: String,
    pub years_observed: usize,
    pub population: f64,
    pub violent_crime: Option<f64>,
    pub property_crime: Option<f64>,
    pub violent_crime_per_100k: Option<f64>,
    pub property_crime_per_100k: Option<f64>,
    pub violent_to_property_ratio: Option<f64>,
}

impl WorkingRow {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Population => Some(self.population),
            Metric::ViolentCrime => self.violent_crime,
            Metric::PropertyCrime => self.property_crime,
            Metric::ViolentCrimePer100k => self.violent_crime_per_100k,
            Metric::PropertyCrimePer100k => self.property_crime_per_100k,
            Metric::ViolentToPropertyRatio => self.violent_to_property_ratio,
        }
    }
}

/// Year-range-filtered, city/state-grouped, mean-aggregated view of the dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingTable {
    pub years: Option<YearRange>,
    rows: Vec<WorkingRow>,
}

impl WorkingTable {
    pub fn new(years: Option<YearRange>, rows: Vec<WorkingRow>) -> Self {
        Self { years, rows }
    }

    pub fn rows(&self) -> &[WorkingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row for a city, in table order
    pub fn find_city(&self, city: &str) -> Option<&WorkingRow> {
        self.rows.iter().find(|row| row.city == city)
    }

    /// Rows belonging to one full state name, in table order
    pub fn state_rows(&self, state: &str) -> Vec<&WorkingRow> {
        self.rows.iter().filter(|row| row.state == state).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_order() {
        assert!(YearRange::new(2005, 2010).is_ok());
        assert!(YearRange::new(2010, 2010).is_ok());
        assert!(matches!(
            YearRange::new(2011, 2010),
            Err(DashboardError::InvalidYearRange {
                start: 2011,
                end: 2010
            })
        ));
    }

    #[test]
    fn test_year_range_validation() {
        assert!(YearRange::full().validate().is_ok());
        assert!(YearRange { start: 1999, end: 2005 }.validate().is_err());
        assert!(YearRange { start: 2010, end: 2003 }.validate().is_err());
    }

    #[test]
    fn test_year_range_contains() {
        let range = YearRange::new(2003, 2005).unwrap();
        assert!(range.contains(2003));
        assert!(range.contains(2005));
        assert!(!range.contains(2006));
        assert!(!range.contains(2002));
    }
}
