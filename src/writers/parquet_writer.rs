use crate::error::{DashboardError, Result};
use crate::models::{Metric, WorkingRow, WorkingTable};
use crate::utils::constants::*;
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Nullable metric columns after the identity columns, in schema order
const METRIC_COLUMNS: [Metric; 5] = [
    Metric::ViolentCrime,
    Metric::PropertyCrime,
    Metric::ViolentCrimePer100k,
    Metric::PropertyCrimePer100k,
    Metric::ViolentToPropertyRatio,
];

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    pub fn with_compression(mut self, compression: &str) -> Result<Self> {
        self.compression = match compression.to_lowercase().as_str() {
            COMPRESSION_SNAPPY => Compression::SNAPPY,
            COMPRESSION_GZIP => Compression::GZIP(GzipLevel::default()),
            COMPRESSION_LZ4 => Compression::LZ4,
            COMPRESSION_ZSTD => Compression::ZSTD(parquet::basic::ZstdLevel::default()),
            COMPRESSION_NONE => Compression::UNCOMPRESSED,
            _ => {
                return Err(DashboardError::Config(format!(
                    "Unsupported compression: {}",
                    compression
                )))
            }
        };
        Ok(self)
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Write a working table to a Parquet file
    pub fn write_table(&self, table: &WorkingTable, path: &Path) -> Result<()> {
        if table.is_empty() {
            return Err(DashboardError::MissingData(
                "Working table is empty, nothing to export".to_string(),
            ));
        }

        let schema = self.create_schema();
        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        for chunk in table.rows().chunks(self.row_group_size.max(1)) {
            let batch = self.rows_to_batch(chunk, schema.clone())?;
            writer.write(&batch)?;
        }

        writer.close()?;

        info!(path = %path.display(), rows = table.len(), "Exported working table");
        Ok(())
    }

    /// Create Arrow schema for the working table
    fn create_schema(&self) -> Arc<Schema> {
        let mut fields = vec![
            Field::new("city", DataType::Utf8, false),
            Field::new("state", DataType::Utf8, false),
            Field::new("years_observed", DataType::UInt32, false),
            Field::new(Metric::Population.column_name(), DataType::Float64, false),
        ];
        fields.extend(
            METRIC_COLUMNS
                .iter()
                .map(|m| Field::new(m.column_name(), DataType::Float64, true)),
        );

        Arc::new(Schema::new(fields))
    }

    fn rows_to_batch(&self, rows: &[WorkingRow], schema: Arc<Schema>) -> Result<RecordBatch> {
        let cities: Vec<&str> = rows.iter().map(|r| r.city.as_str()).collect();
        let states: Vec<&str> = rows.iter().map(|r| r.state.as_str()).collect();
        let years: Vec<u32> = rows.iter().map(|r| r.years_observed as u32).collect();
        let populations: Vec<f64> = rows.iter().map(|r| r.population).collect();

        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(cities)),
            Arc::new(StringArray::from(states)),
            Arc::new(UInt32Array::from(years)),
            Arc::new(Float64Array::from(populations)),
        ];
        for metric in METRIC_COLUMNS {
            let values: Vec<Option<f64>> = rows.iter().map(|r| r.value(metric)).collect();
            columns.push(Arc::new(Float64Array::from(values)));
        }

        Ok(RecordBatch::try_new(schema, columns)?)
    }

    /// Read rows back from an exported working table
    pub fn read_rows(&self, path: &Path, limit: usize) -> Result<Vec<WorkingRow>> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

        let file = File::open(path)?;
        let parquet_reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(limit.clamp(1, 8192))
            .build()?;

        let mut rows = Vec::new();

        for batch_result in parquet_reader {
            let batch = batch_result?;

            let cities = column::<StringArray>(&batch, 0, "city")?;
            let states = column::<StringArray>(&batch, 1, "state")?;
            let years = column::<UInt32Array>(&batch, 2, "years_observed")?;
            let populations = column::<Float64Array>(&batch, 3, "population")?;
            let mut metrics = Vec::with_capacity(METRIC_COLUMNS.len());
            for (offset, metric) in METRIC_COLUMNS.iter().enumerate() {
                metrics.push(column::<Float64Array>(&batch, 4 + offset, metric.column_name())?);
            }

            for i in 0..batch.num_rows() {
                if rows.len() >= limit {
                    return Ok(rows);
                }

                let value = |array: &Float64Array| {
                    if array.is_null(i) {
                        None
                    } else {
                        Some(array.value(i))
                    }
                };

                rows.push(WorkingRow {
                    city: cities.value(i).to_string(),
                    state: states.value(i).to_string(),
                    years_observed: years.value(i) as usize,
                    population: populations.value(i),
                    violent_crime: value(metrics[0]),
                    property_crime: value(metrics[1]),
                    violent_crime_per_100k: value(metrics[2]),
                    property_crime_per_100k: value(metrics[3]),
                    violent_to_property_ratio: value(metrics[4]),
                });
            }
        }

        Ok(rows)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let row_groups = metadata.num_row_groups();
        let total_rows = metadata.file_metadata().num_rows();
        let file_size = std::fs::metadata(path)?.len();

        let row_group_sizes = (0..row_groups)
            .map(|i| metadata.row_group(i).num_rows())
            .collect();

        // Codec as written in the file, not this writer's setting
        let compression = if row_groups > 0 && metadata.row_group(0).num_columns() > 0 {
            metadata.row_group(0).column(0).compression()
        } else {
            Compression::UNCOMPRESSED
        };

        Ok(ParquetFileInfo {
            total_rows,
            row_groups: row_groups as i32,
            row_group_sizes,
            file_size,
            compression,
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn column<'a, T: 'static>(batch: &'a RecordBatch, index: usize, name: &str) -> Result<&'a T> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| DashboardError::InvalidFormat(format!("Invalid {} column type", name)))
}

#[derive(Debug)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: i32,
    pub row_group_sizes: Vec<i64>,
    pub file_size: u64,
    pub compression: Compression,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Parquet File Summary:\n\
            - Total rows: {}\n\
            - Row groups: {}\n\
            - File size: {:.2} MB\n\
            - Compression: {:?}\n\
            - Avg rows per group: {:.0}",
            self.total_rows,
            self.row_groups,
            self.file_size as f64 / 1_048_576.0,
            self.compression,
            self.total_rows as f64 / self.row_groups.max(1) as f64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn table() -> WorkingTable {
        WorkingTable::new(
            None,
            vec![
                WorkingRow {
                    city: "Albany, NY".to_string(),
                    state: "New York".to_string(),
                    years_observed: 3,
                    population: 98_000.5,
                    violent_crime: None,
                    property_crime: Some(2500.0),
                    violent_crime_per_100k: None,
                    property_crime_per_100k: Some(2551.0),
                    violent_to_property_ratio: None,
                },
                WorkingRow {
                    city: "Buffalo, NY".to_string(),
                    state: "New York".to_string(),
                    years_observed: 1,
                    population: 300_000.0,
                    violent_crime: Some(400.0),
                    property_crime: Some(9000.0),
                    violent_crime_per_100k: Some(133.3),
                    property_crime_per_100k: Some(3000.0),
                    violent_to_property_ratio: Some(0.044),
                },
            ],
        )
    }

    #[test]
    fn test_write_empty_table() {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new().unwrap();

        let result = writer.write_table(&WorkingTable::default(), temp_file.path());
        assert!(matches!(result, Err(DashboardError::MissingData(_))));
    }

    #[test]
    fn test_nullable_columns_survive_export() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;
        let table = table();

        writer.write_table(&table, temp_file.path())?;
        let rows = writer.read_rows(temp_file.path(), 10)?;

        assert_eq!(rows.as_slice(), table.rows());

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 2);
        Ok(())
    }

    #[test]
    fn test_read_limit() -> Result<()> {
        let writer = ParquetWriter::new().with_row_group_size(1);
        let temp_file = NamedTempFile::new()?;

        writer.write_table(&table(), temp_file.path())?;

        assert_eq!(writer.read_rows(temp_file.path(), 1)?.len(), 1);
        assert_eq!(writer.get_file_info(temp_file.path())?.row_groups, 2);
        Ok(())
    }

    #[test]
    fn test_different_compressions() -> Result<()> {
        for compression in ["snappy", "gzip", "lz4", "zstd", "none"] {
            let writer = ParquetWriter::new().with_compression(compression)?;
            let temp_file = NamedTempFile::new()?;

            let result = writer.write_table(&table(), temp_file.path());
            assert!(result.is_ok(), "Failed with compression: {}", compression);
        }

        assert!(ParquetWriter::new().with_compression("brotli-9").is_err());
        Ok(())
    }

    #[test]
    fn test_file_info_reports_written_codec() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        ParquetWriter::new()
            .with_compression("zstd")?
            .write_table(&table(), temp_file.path())?;

        let info = ParquetWriter::new().get_file_info(temp_file.path())?;

        assert!(matches!(info.compression, Compression::ZSTD(_)));
        assert!(info.summary().contains("Compression: ZSTD"));
        Ok(())
    }
}
