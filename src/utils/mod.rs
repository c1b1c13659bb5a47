pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{generate_default_export_filename, generate_export_filename_for_range};
pub use progress::ProgressReporter;
