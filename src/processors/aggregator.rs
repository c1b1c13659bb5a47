use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{CrimeRecord, Metric, WorkingRow, WorkingTable, YearRange};

#[derive(Debug, Default, Clone, Copy)]
struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    rows: usize,
    metrics: [RunningMean; Metric::ALL.len()],
}

impl GroupAccumulator {
    fn push(&mut self, record: &CrimeRecord) {
        self.rows += 1;
        for (slot, metric) in self.metrics.iter_mut().zip(Metric::ALL) {
            slot.push(record.value(metric));
        }
    }

    fn mean(&self, metric: Metric) -> Option<f64> {
        Metric::ALL
            .iter()
            .position(|m| *m == metric)
            .and_then(|i| self.metrics[i].mean())
    }

    fn into_row(self, city: String, state: String) -> WorkingRow {
        WorkingRow {
            years_observed: self.rows,
            population: self.mean(Metric::Population).unwrap_or(0.0),
            violent_crime: self.mean(Metric::ViolentCrime),
            property_crime: self.mean(Metric::PropertyCrime),
            violent_crime_per_100k: self.mean(Metric::ViolentCrimePer100k),
            property_crime_per_100k: self.mean(Metric::PropertyCrimePer100k),
            violent_to_property_ratio: self.mean(Metric::ViolentToPropertyRatio),
            city,
            state,
        }
    }
}

/// Filters records to a year range and averages each (city, state) group
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// Build the working table; rows come out ordered by (city, state)
    pub fn aggregate(&self, records: &[CrimeRecord], years: YearRange) -> WorkingTable {
        let mut groups: BTreeMap<(&str, &str), GroupAccumulator> = BTreeMap::new();

        for record in records.iter().filter(|r| years.contains(r.year)) {
            groups
                .entry((record.city.as_str(), record.state.as_str()))
                .or_default()
                .push(record);
        }

        let rows: Vec<WorkingRow> = groups
            .into_iter()
            .map(|((city, state), group)| group.into_row(city.to_string(), state.to_string()))
            .collect();

        debug!(
            start = years.start,
            end = years.end,
            groups = rows.len(),
            "Aggregated working table"
        );

        WorkingTable::new(Some(years), rows)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
