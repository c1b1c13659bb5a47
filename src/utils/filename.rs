use chrono::{Datelike, Local, NaiveDate};
use std::path::PathBuf;

use crate::models::YearRange;

/// Default export path: output/crime-working-table-{YYMMDD}.parquet
pub fn generate_default_export_filename() -> PathBuf {
    export_filename_for(Local::now().date_naive(), None)
}

/// Export path that also records the aggregated year range
pub fn generate_export_filename_for_range(years: YearRange) -> PathBuf {
    export_filename_for(Local::now().date_naive(), Some(years))
}

fn export_filename_for(date: NaiveDate, years: Option<YearRange>) -> PathBuf {
    let stamp = format!(
        "{:02}{:02}{:02}",
        date.year() % 100,
        date.month(),
        date.day()
    );

    let filename = match years {
        Some(range) => format!(
            "crime-working-table-{}-{}-{}.parquet",
            range.start, range.end, stamp
        ),
        None => format!("crime-working-table-{}.parquet", stamp),
    };
    PathBuf::from("output").join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_export_filename() {
        let filename = generate_default_export_filename();
        let filename_str = filename.to_string_lossy();

        assert!(filename_str.starts_with("output/crime-working-table-"));
        assert!(filename_str.ends_with(".parquet"));
    }

    #[test]
    fn test_filename_stamp() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        assert_eq!(
            export_filename_for(date, None),
            PathBuf::from("output/crime-working-table-240307.parquet")
        );
        assert_eq!(
            export_filename_for(date, Some(YearRange::new(2005, 2010).unwrap())),
            PathBuf::from("output/crime-working-table-2005-2010-240307.parquet")
        );
    }
}
