use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Serialises dashboard payloads for a rendering front end
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }

    pub fn write<T: Serialize, W: Write>(&self, value: &T, mut out: W) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut out, value)?;
        } else {
            serde_json::to_writer(&mut out, value)?;
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_file<T: Serialize>(&self, value: &T, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.write(value, BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), "Wrote JSON output");
        Ok(())
    }

    pub fn write_stdout<T: Serialize>(&self, value: &T) -> Result<()> {
        self.write(value, io::stdout().lock())
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricCategory, RankingPanels};
    use tempfile::TempDir;

    #[test]
    fn test_category_wire_names() -> Result<()> {
        let writer = JsonWriter::new().with_pretty(false);
        assert_eq!(writer.to_json(&MetricCategory::Per100k)?, "\"Per_100k_Pop\"");
        assert_eq!(writer.to_json(&MetricCategory::RawCount)?, "\"Original_Value\"");
        Ok(())
    }

    #[test]
    fn test_write_file_creates_parent() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("panels.json");
        let panels = RankingPanels {
            left: "left".to_string(),
            right: "right".to_string(),
        };

        JsonWriter::new().write_file(&panels, &path)?;

        let parsed: RankingPanels = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(parsed, panels);
        Ok(())
    }
}
