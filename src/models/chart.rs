use serde::{Deserialize, Serialize};

use crate::models::Metric;
use crate::utils::constants::*;

/// Canvas hints shared by every chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub template: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            template: CHART_TEMPLATE.to_string(),
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: String,
    pub opacity: f64,
    pub size: Option<u32>,
    pub symbol: Option<String>,
}

impl MarkerStyle {
    pub fn background() -> Self {
        Self {
            color: BACKGROUND_COLOR.to_string(),
            opacity: BACKGROUND_OPACITY,
            size: None,
            symbol: None,
        }
    }

    pub fn highlight() -> Self {
        Self {
            color: HIGHLIGHT_COLOR.to_string(),
            opacity: 1.0,
            size: Some(HIGHLIGHT_SIZE),
            symbol: Some(HIGHLIGHT_SYMBOL.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub city: String,
    pub state: String,
    pub population: f64,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub points: Vec<ScatterPoint>,
    pub marker: MarkerStyle,
}

/// Population against one crime metric, selected cities drawn on top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub x_field: String,
    pub y_field: String,
    pub background: ScatterSeries,
    pub highlight: ScatterSeries,
    pub layout: ChartLayout,
}

impl ScatterChart {
    pub fn new(metric: Metric) -> Self {
        Self {
            x_field: Metric::Population.column_name().to_string(),
            y_field: metric.column_name().to_string(),
            background: ScatterSeries {
                points: Vec::new(),
                marker: MarkerStyle::background(),
            },
            highlight: ScatterSeries {
                points: Vec::new(),
                marker: MarkerStyle::highlight(),
            },
            layout: ChartLayout::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub field: String,
    pub values: Vec<Option<f64>>,
}

/// Grouped bars over the selected cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub cities: Vec<String>,
    pub series: Vec<BarSeries>,
    pub layout: ChartLayout,
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub year: i32,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub city: String,
    pub points: Vec<LinePoint>,
}

/// One line per selected city over the full year coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub field: String,
    pub series: Vec<LineSeries>,
    pub markers: bool,
    pub layout: ChartLayout,
}

impl LineChart {
    pub fn new(metric: Metric) -> Self {
        Self {
            field: metric.column_name().to_string(),
            series: Vec::new(),
            markers: true,
            layout: ChartLayout::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// The five linked charts of one dashboard cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCharts {
    pub scatter_violent: ScatterChart,
    pub scatter_property: ScatterChart,
    pub bar: BarChart,
    pub line_violent: LineChart,
    pub line_property: LineChart,
}
