use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::abbreviation::state_code_suffix;
use crate::models::{Dataset, Metric};

#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    pub total_records: usize,
    pub dropped_outliers: usize,
    pub complete_records: usize,
    pub missing_values: BTreeMap<String, usize>,
    pub violations: Vec<DataViolation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataViolation {
    pub city: String,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    /// City string has no resolvable two-letter state suffix
    UnresolvedStateSuffix,
    /// Same city name recorded under several states
    MultipleStates,
    /// Suffix resolves to a state other than the one on the row
    StateMismatch,
}

/// Surfaces anomalies the ranking engine relies on being rare
pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, dataset: &Dataset) -> IntegrityReport {
        let mut report = IntegrityReport {
            total_records: dataset.len(),
            dropped_outliers: dataset.dropped_outliers(),
            complete_records: 0,
            missing_values: BTreeMap::new(),
            violations: Vec::new(),
        };

        let mut city_states: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

        for record in dataset.records() {
            if !record.has_missing_data() {
                report.complete_records += 1;
            }

            for metric in Metric::ALL {
                if record.value(metric).is_none() {
                    *report
                        .missing_values
                        .entry(metric.column_name().to_string())
                        .or_default() += 1;
                }
            }

            city_states
                .entry(record.city.as_str())
                .or_default()
                .insert(record.state.as_str());
        }

        let abbreviations = dataset.abbreviations();
        for (city, states) in &city_states {
            match abbreviations.resolve_city_state(city) {
                Ok(resolved) => {
                    if !states.contains(resolved) {
                        report.violations.push(DataViolation {
                            city: city.to_string(),
                            violation_type: ViolationType::StateMismatch,
                            details: format!(
                                "suffix resolves to {} but rows say {}",
                                resolved,
                                join(states)
                            ),
                        });
                    }
                }
                Err(_) => {
                    report.violations.push(DataViolation {
                        city: city.to_string(),
                        violation_type: ViolationType::UnresolvedStateSuffix,
                        details: format!(
                            "suffix '{}' has no state abbreviation",
                            state_code_suffix(city).unwrap_or_default()
                        ),
                    });
                }
            }

            if states.len() > 1 {
                report.violations.push(DataViolation {
                    city: city.to_string(),
                    violation_type: ViolationType::MultipleStates,
                    details: format!("recorded under {}", join(states)),
                });
            }
        }

        report
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Dropped Outliers: {}\n",
            report.dropped_outliers
        ));
        summary.push_str(&format!(
            "Complete Records: {} ({:.1}%)\n",
            report.complete_records,
            percentage(report.complete_records, report.total_records)
        ));

        if !report.missing_values.is_empty() {
            summary.push_str("\nMissing Values:\n");
            for (column, count) in &report.missing_values {
                summary.push_str(&format!("  {}: {}\n", column, count));
            }
        }

        summary.push_str(&format!("\nViolations: {}\n", report.violations.len()));

        if !report.violations.is_empty() {
            summary.push_str("\nTop 10 Violations:\n");
            for (i, violation) in report.violations.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. {} ({:?}): {}\n",
                    i + 1,
                    violation.city,
                    violation.violation_type,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn join(states: &BTreeSet<&str>) -> String {
    states.iter().copied().collect::<Vec<_>>().join(", ")
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AbbreviationMap, CrimeRecord, CrimeRecordBuilder};

    fn record(city: &str, state: &str, violent: Option<u64>) -> CrimeRecord {
        let builder = CrimeRecordBuilder::new()
            .year(2001)
            .city(city)
            .state(state)
            .population(50_000)
            .property_crime(100);
        let builder = match violent {
            Some(v) => builder.violent_crime(v),
            None => builder,
        };
        builder.derive_rates().build().unwrap()
    }

    fn dataset() -> Dataset {
        let abbreviations: AbbreviationMap = [
            ("NY".to_string(), "New York".to_string()),
            ("MO".to_string(), "Missouri".to_string()),
        ]
        .into_iter()
        .collect();

        Dataset::new(
            vec![
                record("Albany, NY", "New York", Some(10)),
                record("Kansas City, MO", "Missouri", Some(10)),
                record("Kansas City, MO", "Kansas", Some(10)),
                record("Springfield, XX", "Nowhere", None),
            ],
            abbreviations,
            3,
        )
    }

    #[test]
    fn test_detects_anomalies() {
        let report = IntegrityChecker::new().check(&dataset());

        assert_eq!(report.total_records, 4);
        assert_eq!(report.dropped_outliers, 3);
        assert_eq!(report.complete_records, 3);
        assert_eq!(report.missing_values.get("Violent_crime"), Some(&1));
        assert_eq!(report.missing_values.get("Violent_crime_per_100k"), Some(&1));

        let kinds: Vec<(&str, ViolationType)> = report
            .violations
            .iter()
            .map(|v| (v.city.as_str(), v.violation_type))
            .collect();

        assert!(kinds.contains(&("Kansas City, MO", ViolationType::MultipleStates)));
        assert!(kinds.contains(&("Springfield, XX", ViolationType::UnresolvedStateSuffix)));
        assert!(!kinds.iter().any(|(city, _)| *city == "Albany, NY"));
    }

    #[test]
    fn test_state_mismatch() {
        let abbreviations: AbbreviationMap = [("NY".to_string(), "New York".to_string())]
            .into_iter()
            .collect();
        let dataset = Dataset::new(vec![record("Albany, NY", "Vermont", Some(1))], abbreviations, 0);

        let report = IntegrityChecker::new().check(&dataset);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].violation_type, ViolationType::StateMismatch);
    }

    #[test]
    fn test_summary_text() {
        let checker = IntegrityChecker::new();
        let summary = checker.generate_summary(&checker.check(&dataset()));

        assert!(summary.contains("Total Records: 4"));
        assert!(summary.contains("Complete Records: 3 (75.0%)"));
        assert!(summary.contains("Springfield, XX"));
    }

    #[test]
    fn test_empty_dataset_summary() {
        let checker = IntegrityChecker::new();
        let summary = checker.generate_summary(&checker.check(&Dataset::default()));
        assert!(summary.contains("Complete Records: 0 (0.0%)"));
    }
}
