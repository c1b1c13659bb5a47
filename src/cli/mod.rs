pub mod args;
pub mod commands;

pub use args::{Cli, Commands, YearArgs};
pub use commands::run;
