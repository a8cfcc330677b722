use chrono::Utc;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{output_columns, COL_JOB_ID};
use crate::error::Result;
use crate::types::InternshipTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write the table as CSV, header first, even when there are no rows.
pub fn write_csv<W: Write>(table: &InternshipTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(std::iter::once(COL_JOB_ID).chain(output_columns()))?;
    for row in table.iter() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(table: &InternshipTable, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, table.rows())?;
    Ok(())
}

pub fn write_table<W: Write>(table: &InternshipTable, format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(table, writer),
        ExportFormat::Json => write_json(table, writer),
    }
}

/// Persist to `path`, creating parent directories.
pub fn export_to_path(table: &InternshipTable, format: ExportFormat, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_table(table, format, &mut writer)?;
    writer.flush()?;
    info!("💾 Saved {} internships to {}", table.len(), path.display());
    Ok(())
}

/// Persist under `output_dir` with a timestamped filename.
pub fn export_to_dir(table: &InternshipTable, format: ExportFormat, output_dir: &Path) -> Result<PathBuf> {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("internships_{timestamp}.{}", format.extension());
    let filepath = output_dir.join(filename);
    export_to_path(table, format, &filepath)?;
    Ok(filepath)
}
