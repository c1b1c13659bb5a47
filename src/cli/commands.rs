use std::path::PathBuf;
use std::sync::Arc;
use validator::Validate;

use crate::cli::args::{Cli, Commands, YearArgs};
use crate::error::Result;
use crate::models::{Dataset, YearRange};
use crate::processors::{Dashboard, DashboardQuery, IntegrityChecker};
use crate::readers::DatasetLoader;
use crate::settings::DashboardSettings;
use crate::utils::filename::{
    generate_default_export_filename, generate_export_filename_for_range,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::{JsonWriter, ParquetWriter};

impl YearArgs {
    /// Year range as the slider would report it, checked against dataset coverage
    pub fn to_range(self) -> Result<YearRange> {
        let range = YearRange::new(self.from, self.to)?;
        range.validate()?;
        Ok(range)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = DashboardSettings::load(cli.config.as_deref())?
        .with_data_file(cli.data_file)
        .with_abbreviation_file(cli.abbrv_file);

    match cli.command {
        Commands::Render {
            cities,
            category,
            years,
            target,
            output_file,
            compact,
        } => {
            let dashboard = Dashboard::new(load_dataset(&settings, true)?, &settings);
            let query = DashboardQuery {
                cities,
                category,
                years: years.to_range()?,
                target_city: target,
            };

            let view = dashboard.render(&query);
            let writer = JsonWriter::new().with_pretty(!compact);
            match output_file {
                Some(path) => writer.write_file(&view, &path)?,
                None => writer.write_stdout(&view)?,
            }
        }

        Commands::Rank {
            city,
            category,
            years,
        } => {
            let dashboard = Dashboard::new(load_dataset(&settings, false)?, &settings);
            let city = city.unwrap_or_else(|| dashboard.default_city().to_string());

            match dashboard.rank(&city, category, years.to_range()?) {
                Ok(ranking) => {
                    println!("{} ({}-{})\n", category.label(), years.from, years.to);
                    let panels = crate::models::RankingPanels::from_ranking(&ranking);
                    println!("{}", panels.left);
                    println!("{}", panels.right);
                }
                Err(e) if e.is_ranking_miss() => {
                    println!("Cannot rank {}: {}", city, e);
                    println!(
                        "Try a city present in {}-{}, e.g. {}",
                        years.from,
                        years.to,
                        dashboard.default_city()
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Export {
            years,
            output_file,
            compression,
        } => {
            let range = years.to_range()?;
            let output_file = output_file.unwrap_or_else(|| default_export_path(range));

            let dashboard = Dashboard::new(load_dataset(&settings, false)?, &settings);
            let table = dashboard.working_table(range);
            println!(
                "Exporting {} city groups for {}-{} to {}",
                table.len(),
                range.start,
                range.end,
                output_file.display()
            );

            if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }

            let writer = ParquetWriter::new().with_compression(&compression)?;
            writer.write_table(&table, &output_file)?;

            let file_info = writer.get_file_info(&output_file)?;
            println!("\n{}", file_info.summary());
        }

        Commands::Cities => {
            let dataset = load_dataset(&settings, true)?;
            for city in dataset.cities() {
                println!("{}", city);
            }
        }

        Commands::Validate => {
            let dataset = load_dataset(&settings, false)?;
            println!("{}", dataset.summary());

            let checker = IntegrityChecker::new();
            let report = checker.check(&dataset);
            println!("{}", checker.generate_summary(&report));

            if report.violations.is_empty() {
                println!("✅ All cities resolve to a single known state");
            } else {
                println!("⚠️  Found {} data anomalies", report.violations.len());
            }
        }

        Commands::Info { file, sample } => {
            println!("Analyzing Parquet file: {}", file.display());

            let writer = ParquetWriter::new();
            let file_info = writer.get_file_info(&file)?;
            println!("\n{}", file_info.summary());

            if sample > 0 {
                println!("\nSample Rows (showing up to {}):", sample);
                match writer.read_rows(&file, sample) {
                    Ok(rows) => {
                        for (i, row) in rows.iter().enumerate() {
                            println!(
                                "{}. {} ({}): population={:.0}, violent={}, property={} over {} years",
                                i + 1,
                                row.city,
                                row.state,
                                row.population,
                                format_value(row.violent_crime),
                                format_value(row.property_crime),
                                row.years_observed
                            );
                        }
                    }
                    Err(e) => println!("Error reading sample data: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn load_dataset(settings: &DashboardSettings, silent: bool) -> Result<Arc<Dataset>> {
    let progress = ProgressReporter::new_spinner("Loading crime dataset...", silent);

    let dataset = DatasetLoader::new(&settings.data_file, &settings.abbreviation_file)
        .with_min_population(settings.min_population)
        .load(Some(&progress))?;

    progress.finish_with_message(&format!("Loaded {} records", dataset.len()));
    Ok(dataset)
}

/// Full-coverage exports keep the plain date-stamped name
fn default_export_path(range: YearRange) -> PathBuf {
    if range == YearRange::full() {
        generate_default_export_filename()
    } else {
        generate_export_filename_for_range(range)
    }
}

fn format_value(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_args_validation() {
        assert!(YearArgs { from: 2001, to: 2019 }.to_range().is_ok());
        assert!(YearArgs { from: 2010, to: 2005 }.to_range().is_err());
        assert!(YearArgs { from: 1995, to: 2005 }.to_range().is_err());
    }

    #[test]
    fn test_default_export_path() {
        let full = default_export_path(YearRange::full());
        let narrow = default_export_path(YearRange::new(2005, 2010).unwrap());

        assert!(full.starts_with("output"));
        assert!(!full.to_string_lossy().contains("2001-2019"));
        assert!(narrow
            .to_string_lossy()
            .contains("crime-working-table-2005-2010-"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(12.345)), "12.3");
        assert_eq!(format_value(None), "n/a");
    }
}
