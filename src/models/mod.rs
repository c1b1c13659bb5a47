pub mod abbreviation;
pub mod chart;
pub mod crime;
pub mod dataset;
pub mod ranking;
pub mod working_table;

pub use abbreviation::AbbreviationMap;
pub use chart::{
    BarChart, BarSeries, ChartLayout, DashboardCharts, LineChart, LinePoint, LineSeries,
    MarkerStyle, ScatterChart, ScatterPoint, ScatterSeries,
};
pub use crime::{CrimeRecord, CrimeRecordBuilder, Metric, MetricCategory};
pub use dataset::Dataset;
pub use ranking::{CityRanking, RankingPanels};
pub use working_table::{WorkingRow, WorkingTable, YearRange};
