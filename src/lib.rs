pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod utils;
pub mod writers;

pub use error::{DashboardError, Result};
pub use models::{Dataset, MetricCategory, WorkingTable, YearRange};
pub use processors::{Dashboard, DashboardQuery, DashboardView};
pub use settings::DashboardSettings;
