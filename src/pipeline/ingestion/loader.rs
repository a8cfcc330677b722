use csv::ReaderBuilder;
use metrics::counter;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{error, info, instrument};

use crate::constants::is_null_token;
use crate::error::LoadError;

/// The source table exactly as read: header names plus one cell per header
/// for every row. Blank cells and missing-value markers are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Outcome of a degrade-gracefully load.
#[derive(Debug)]
pub struct LoadReport {
    pub table: RawTable,
    pub rows: usize,
    /// Set when the source could not be read; `table` is then empty.
    pub failure: Option<LoadError>,
}

impl LoadReport {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

pub struct Loader;

impl Loader {
    /// Reads a delimited file, failing on any problem with the source.
    pub fn read(path: &Path) -> Result<RawTable, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::read_from(file)
    }

    /// Reads a delimited table from any source handle.
    pub fn read_from<R: Read>(reader: R) -> Result<RawTable, LoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let mut row: Vec<Option<String>> = record
                .iter()
                .take(width)
                .map(|cell| if is_null_token(cell) { None } else { Some(cell.to_string()) })
                .collect();
            row.resize(width, None);
            rows.push(row);
        }

        Ok(RawTable { headers, rows })
    }

    /// Reads `path`, reporting the row count on success. On failure the cause
    /// is logged and returned alongside an empty table instead of an error.
    #[instrument(skip_all, fields(source = %path.display()))]
    pub fn load(path: &Path) -> LoadReport {
        Self::report(Self::read(path))
    }

    /// Same as [`Loader::load`] for an already-open source handle.
    pub fn load_from<R: Read>(reader: R) -> LoadReport {
        Self::report(Self::read_from(reader))
    }

    fn report(result: Result<RawTable, LoadError>) -> LoadReport {
        match result {
            Ok(table) => {
                let rows = table.len();
                info!(rows, "CSV loaded");
                counter!("intern_rows_loaded_total").increment(rows as u64);
                LoadReport { table, rows, failure: None }
            }
            Err(e) => {
                error!("Failed to load dataset: {}", e);
                counter!("intern_load_failures_total").increment(1);
                LoadReport {
                    table: RawTable::default(),
                    rows: 0,
                    failure: Some(e),
                }
            }
        }
    }
}
