pub mod aggregator;
pub mod charts;
pub mod dashboard;
pub mod integrity_checker;
pub mod ranking;

pub use aggregator::Aggregator;
pub use charts::ChartBuilder;
pub use dashboard::{Dashboard, DashboardQuery, DashboardView};
pub use integrity_checker::{DataViolation, IntegrityChecker, IntegrityReport, ViolationType};
pub use ranking::{rank_within, RankingEngine};
