use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{
    CityRanking, DashboardCharts, Dataset, MetricCategory, RankingPanels, WorkingTable, YearRange,
};
use crate::processors::{Aggregator, ChartBuilder, RankingEngine};
use crate::settings::DashboardSettings;

/// Everything the dashboard controls currently say
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub cities: Vec<String>,
    pub category: MetricCategory,
    pub years: YearRange,
    /// City picked by a chart click; the default city is ranked when absent
    pub target_city: Option<String>,
}

/// Output of one recomputation cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub query: DashboardQuery,
    pub working_rows: usize,
    pub charts: DashboardCharts,
    pub ranking: Option<CityRanking>,
    pub panels: Option<RankingPanels>,
    pub fallback_used: bool,
}

/// Runs filter, chart and ranking stages over the shared dataset
pub struct Dashboard {
    dataset: Arc<Dataset>,
    default_city: String,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, settings: &DashboardSettings) -> Self {
        Self {
            dataset,
            default_city: settings.default_city.clone(),
        }
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// Options for the city multi-select
    pub fn city_options(&self) -> Vec<&str> {
        self.dataset.cities()
    }

    pub fn working_table(&self, years: YearRange) -> WorkingTable {
        Aggregator::new().aggregate(self.dataset.records(), years)
    }

    /// Rank a single city; errors are returned to the caller untouched
    pub fn rank(
        &self,
        city: &str,
        category: MetricCategory,
        years: YearRange,
    ) -> Result<CityRanking> {
        let table = self.working_table(years);
        RankingEngine::new(self.dataset.abbreviations()).rank_city(&table, city, category)
    }

    /// One full cycle; never fails, ranking falls back to the default city
    pub fn render(&self, query: &DashboardQuery) -> DashboardView {
        let table = self.working_table(query.years);
        let charts = ChartBuilder::new(&query.cities, query.category)
            .build(&table, self.dataset.records());

        let (ranking, fallback_used) = self.rank_with_fallback(&table, query);
        let panels = ranking.as_ref().map(RankingPanels::from_ranking);

        info!(
            start = query.years.start,
            end = query.years.end,
            rows = table.len(),
            selected = query.cities.len(),
            ranked = ranking.as_ref().map(|r| r.city.as_str()).unwrap_or("-"),
            fallback_used,
            "Rendered dashboard"
        );

        DashboardView {
            query: query.clone(),
            working_rows: table.len(),
            charts,
            ranking,
            panels,
            fallback_used,
        }
    }

    fn rank_with_fallback(
        &self,
        table: &WorkingTable,
        query: &DashboardQuery,
    ) -> (Option<CityRanking>, bool) {
        let engine = RankingEngine::new(self.dataset.abbreviations());

        let target = query
            .target_city
            .as_deref()
            .filter(|c| !c.trim().is_empty());

        if let Some(city) = target {
            match engine.rank_city(table, city, query.category) {
                Ok(ranking) => return (Some(ranking), false),
                Err(e) => warn!(city, error = %e, "Falling back to default city"),
            }
        }

        let fallback_used = target.is_some();
        match engine.rank_city(table, &self.default_city, query.category) {
            Ok(ranking) => (Some(ranking), fallback_used),
            Err(e) => {
                warn!(
                    city = %self.default_city,
                    error = %e,
                    "Default city could not be ranked"
                );
                (None, fallback_used)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AbbreviationMap, CrimeRecord, CrimeRecordBuilder};

    fn record(year: i32, city: &str, state: &str, population: u64, violent: u64) -> CrimeRecord {
        CrimeRecordBuilder::new()
            .year(year)
            .city(city)
            .state(state)
            .population(population)
            .violent_crime(violent)
            .property_crime(violent * 4)
            .derive_rates()
            .build()
            .unwrap()
    }

    fn dashboard() -> Dashboard {
        let records = vec![
            record(2001, "New York, NY", "New York", 8_000_000, 50_000),
            record(2001, "Albany, NY", "New York", 100_000, 500),
            record(2001, "Springfield, XX", "Nowhere", 60_000, 100),
            record(2010, "Dayton, OH", "Ohio", 140_000, 1400),
        ];
        let abbreviations: AbbreviationMap = [
            ("NY".to_string(), "New York".to_string()),
            ("OH".to_string(), "Ohio".to_string()),
        ]
        .into_iter()
        .collect();

        Dashboard::new(
            Arc::new(Dataset::new(records, abbreviations, 0)),
            &DashboardSettings::default(),
        )
    }

    fn query(target: Option<&str>, years: YearRange) -> DashboardQuery {
        DashboardQuery {
            cities: vec!["Albany, NY".to_string()],
            category: MetricCategory::RawCount,
            years,
            target_city: target.map(str::to_string),
        }
    }

    #[test]
    fn test_default_city_when_no_target() {
        let view = dashboard().render(&query(None, YearRange::full()));

        let ranking = view.ranking.unwrap();
        assert_eq!(ranking.city, "New York, NY");
        assert_eq!(ranking.national_pop_rank, 1);
        assert!(!view.fallback_used);
        assert!(view.panels.unwrap().left.starts_with("New York, NY is......"));
    }

    #[test]
    fn test_target_override() {
        let view = dashboard().render(&query(Some("Albany, NY"), YearRange::full()));

        let ranking = view.ranking.unwrap();
        assert_eq!(ranking.city, "Albany, NY");
        assert_eq!(ranking.state_pop_rank, 2);
        assert!(!view.fallback_used);
        assert_eq!(view.charts.scatter_violent.highlight.points.len(), 1);
    }

    #[test]
    fn test_unresolvable_target_falls_back() {
        let view = dashboard().render(&query(Some("Springfield, XX"), YearRange::full()));

        assert_eq!(view.ranking.unwrap().city, "New York, NY");
        assert!(view.fallback_used);
    }

    #[test]
    fn test_absent_target_falls_back() {
        let view = dashboard().render(&query(Some("Dayton, OH"), YearRange::new(2001, 2005).unwrap()));

        assert_eq!(view.ranking.unwrap().city, "New York, NY");
        assert!(view.fallback_used);
    }

    #[test]
    fn test_default_city_outside_range() {
        let view = dashboard().render(&query(None, YearRange::new(2010, 2012).unwrap()));

        assert!(view.ranking.is_none());
        assert!(view.panels.is_none());
        assert_eq!(view.working_rows, 1);
        assert_eq!(view.charts.scatter_violent.background.points.len(), 1);
    }

    #[test]
    fn test_rank_reports_errors() {
        let dashboard = dashboard();
        let result = dashboard.rank("Springfield, XX", MetricCategory::Per100k, YearRange::full());
        assert!(matches!(
            result,
            Err(crate::error::DashboardError::StateLookup { .. })
        ));
    }

    #[test]
    fn test_city_options() {
        let dashboard = dashboard();
        assert_eq!(
            dashboard.city_options(),
            vec!["New York, NY", "Albany, NY", "Springfield, XX", "Dayton, OH"]
        );
    }
}
