use std::cmp::Ordering;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{AbbreviationMap, CityRanking, Metric, MetricCategory, WorkingRow, WorkingTable};

/// Descending order with missing values after every present value
fn compare_descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 1-based rank of the first row for `city` when `rows` are sorted descending by `metric`
pub fn rank_within(rows: &[&WorkingRow], metric: Metric, city: &str) -> Option<usize> {
    let mut order: Vec<&WorkingRow> = rows.to_vec();
    // Stable: ties keep table order
    order.sort_by(|a, b| compare_descending(a.value(metric), b.value(metric)));

    order
        .iter()
        .position(|row| row.city == city)
        .map(|position| position + 1)
}

/// Places one city by population and crime metrics, nationally and within its state
pub struct RankingEngine<'a> {
    abbreviations: &'a AbbreviationMap,
}

impl<'a> RankingEngine<'a> {
    pub fn new(abbreviations: &'a AbbreviationMap) -> Self {
        Self { abbreviations }
    }

    pub fn rank_city(
        &self,
        table: &WorkingTable,
        city: &str,
        category: MetricCategory,
    ) -> Result<CityRanking> {
        let violent = category.violent_metric();
        let property = category.property_metric();

        let state_name = self.abbreviations.resolve_city_state(city)?;

        let national: Vec<&WorkingRow> = table.rows().iter().collect();
        let [national_pop_rank, national_violent_rank, national_property_rank] =
            rank_all(&national, [Metric::Population, violent, property], city)?;

        let state_rows = table.state_rows(state_name);
        let [state_pop_rank, state_violent_rank, state_property_rank] =
            rank_all(&state_rows, [Metric::Population, violent, property], city)?;

        debug!(
            city,
            state = state_name,
            national = national.len(),
            state_rows = state_rows.len(),
            "Ranked city"
        );

        Ok(CityRanking {
            city: city.to_string(),
            state_name: state_name.to_string(),
            category,
            national_pop_rank,
            national_violent_rank,
            national_property_rank,
            state_pop_rank,
            state_violent_rank,
            state_property_rank,
            national_count: national.len(),
            state_count: state_rows.len(),
        })
    }
}

fn rank_all(rows: &[&WorkingRow], metrics: [Metric; 3], city: &str) -> Result<[usize; 3]> {
    let mut ranks = [0usize; 3];
    for (slot, metric) in ranks.iter_mut().zip(metrics) {
        *slot = rank_within(rows, metric, city).ok_or_else(|| DashboardError::CityNotFound {
            city: city.to_string(),
        })?;
    }
    Ok(ranks)
}
