use std::collections::HashSet;

use crate::models::{AbbreviationMap, CrimeRecord};

/// Read-only crime dataset, built once at startup and shared by reference
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CrimeRecord>,
    abbreviations: AbbreviationMap,
    dropped_outliers: usize,
}

impl Dataset {
    pub fn new(
        records: Vec<CrimeRecord>,
        abbreviations: AbbreviationMap,
        dropped_outliers: usize,
    ) -> Self {
        Self {
            records,
            abbreviations,
            dropped_outliers,
        }
    }

    pub fn records(&self) -> &[CrimeRecord] {
        &self.records
    }

    pub fn abbreviations(&self) -> &AbbreviationMap {
        &self.abbreviations
    }

    /// Rows removed at load for falling under the population threshold
    pub fn dropped_outliers(&self) -> usize {
        self.dropped_outliers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct city names in first-seen order
    pub fn cities(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.city.as_str()))
            .map(|r| r.city.as_str())
            .collect()
    }

    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Crime Dataset ===\n");
        summary.push_str(&format!("Records: {}\n", self.records.len()));
        summary.push_str(&format!(
            "Dropped outliers (population below threshold): {}\n",
            self.dropped_outliers
        ));
        summary.push_str(&format!("Cities: {}\n", self.cities().len()));
        summary.push_str(&format!(
            "State abbreviations: {}\n",
            self.abbreviations.len()
        ));
        match self.year_bounds() {
            Some((min, max)) => summary.push_str(&format!("Years: {} - {}\n", min, max)),
            None => summary.push_str("Years: none\n"),
        }
        summary
    }
}
