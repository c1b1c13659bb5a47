use std::collections::HashSet;
use tracing::debug;

use crate::models::{
    BarChart, BarSeries, ChartLayout, CrimeRecord, DashboardCharts, LineChart, LinePoint,
    LineSeries, Metric, MetricCategory, ScatterChart, ScatterPoint, WorkingRow, WorkingTable,
};

/// Turns a working table and a city selection into the five dashboard charts
pub struct ChartBuilder<'a> {
    selected: HashSet<&'a str>,
    category: MetricCategory,
}

impl<'a> ChartBuilder<'a> {
    /// Blank entries in the selection are ignored
    pub fn new(selected: &'a [String], category: MetricCategory) -> Self {
        Self {
            selected: selected
                .iter()
                .map(|c| c.as_str())
                .filter(|c| !c.trim().is_empty())
                .collect(),
            category,
        }
    }

    pub fn is_selected(&self, city: &str) -> bool {
        self.selected.contains(city)
    }

    /// `records` is the unaggregated dataset; line charts ignore the year range
    pub fn build(&self, table: &WorkingTable, records: &[CrimeRecord]) -> DashboardCharts {
        let violent = self.category.violent_metric();
        let property = self.category.property_metric();

        let charts = DashboardCharts {
            scatter_violent: self.scatter(table, violent),
            scatter_property: self.scatter(table, property),
            bar: self.bar(table, violent, property),
            line_violent: self.line(records, violent),
            line_property: self.line(records, property),
        };

        debug!(
            selected = self.selected.len(),
            highlighted = charts.scatter_violent.highlight.points.len(),
            bars = charts.bar.cities.len(),
            lines = charts.line_violent.series.len(),
            "Built chart data"
        );

        charts
    }

    fn scatter(&self, table: &WorkingTable, metric: Metric) -> ScatterChart {
        let mut chart = ScatterChart::new(metric);

        for row in table.rows() {
            let point = scatter_point(row, metric);
            if self.is_selected(&row.city) {
                chart.highlight.points.push(point);
            } else {
                chart.background.points.push(point);
            }
        }

        chart
    }

    fn bar(&self, table: &WorkingTable, violent: Metric, property: Metric) -> BarChart {
        let rows: Vec<&WorkingRow> = table
            .rows()
            .iter()
            .filter(|row| self.is_selected(&row.city))
            .collect();

        let series = [property, violent]
            .into_iter()
            .map(|metric| BarSeries {
                field: metric.column_name().to_string(),
                values: rows.iter().map(|row| row.value(metric)).collect(),
            })
            .collect();

        BarChart {
            cities: rows.iter().map(|row| row.city.clone()).collect(),
            series,
            layout: ChartLayout::default(),
        }
    }

    fn line(&self, records: &[CrimeRecord], metric: Metric) -> LineChart {
        let mut chart = LineChart::new(metric);

        for record in records.iter().filter(|r| self.is_selected(&r.city)) {
            let point = LinePoint {
                year: record.year,
                value: record.value(metric),
            };

            match chart.series.iter_mut().find(|s| s.city == record.city) {
                Some(series) => series.points.push(point),
                None => chart.series.push(LineSeries {
                    city: record.city.clone(),
                    points: vec![point],
                }),
            }
        }

        chart
    }
}

fn scatter_point(row: &WorkingRow, metric: Metric) -> ScatterPoint {
    ScatterPoint {
        city: row.city.clone(),
        state: row.state.clone(),
        population: row.population,
        value: row.value(metric),
    }
}
