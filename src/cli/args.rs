use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::MetricCategory;
use crate::utils::constants::{YEAR_MAX, YEAR_MIN};

#[derive(Parser)]
#[command(name = "crime-dashboard")]
#[command(about = "Explore US city crime statistics from 2001-2019")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file [default: crime-dashboard.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Crime dataset CSV [default: df_for_dash.csv]")]
    pub data_file: Option<PathBuf>,

    #[arg(long, global = true, help = "State abbreviation CSV [default: ABBRV.csv]")]
    pub abbrv_file: Option<PathBuf>,
}

/// Year range slider
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct YearArgs {
    #[arg(long = "from", default_value_t = YEAR_MIN)]
    pub from: i32,

    #[arg(long = "to", default_value_t = YEAR_MAX)]
    pub to: i32,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one dashboard cycle and emit charts and rankings as JSON
    Render {
        #[arg(short = 'c', long = "city", help = "Selected city, repeatable")]
        cities: Vec<String>,

        #[arg(long, value_enum, default_value_t = MetricCategory::Per100k)]
        category: MetricCategory,

        #[command(flatten)]
        years: YearArgs,

        #[arg(short, long, help = "City picked on a chart (ranked instead of the default city)")]
        target: Option<String>,

        #[arg(short, long, help = "Write JSON here instead of stdout")]
        output_file: Option<PathBuf>,

        #[arg(long, default_value = "false")]
        compact: bool,
    },

    /// Print the national and state ranking panels for one city
    Rank {
        #[arg(short = 'c', long)]
        city: Option<String>,

        #[arg(long, value_enum, default_value_t = MetricCategory::Per100k)]
        category: MetricCategory,

        #[command(flatten)]
        years: YearArgs,
    },

    /// Export the aggregated working table to Parquet
    Export {
        #[command(flatten)]
        years: YearArgs,

        #[arg(
            short,
            long,
            help = "Output Parquet file path [default: output/crime-working-table-[{FROM}-{TO}-]{YYMMDD}.parquet]"
        )]
        output_file: Option<PathBuf>,

        #[arg(long, default_value = "snappy")]
        compression: String,
    },

    /// List the cities available for selection
    Cities,

    /// Check the dataset for anomalies
    Validate,

    /// Display information about an exported Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },
}
