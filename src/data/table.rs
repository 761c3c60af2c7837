use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{SpiralError, SpiralResult};

/// Column-ordered table of raw string cells as exported by the usage tool.
///
/// Rows shorter than the header read as empty cells in the missing columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells);
        self
    }

    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Reads a CSV document with a mandatory header row.
    ///
    /// `source_name` only labels load errors.
    pub fn from_csv_reader<R: Read>(reader: R, source_name: &str) -> SpiralResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| source_load_error(source_name, &err))?;
        let mut table = Self::new(headers.iter());

        for record in csv_reader.records() {
            let record = record.map_err(|err| source_load_error(source_name, &err))?;
            table.push_row(record.iter());
        }

        debug!(
            source = source_name,
            columns = table.columns.len(),
            rows = table.rows.len(),
            "loaded raw table"
        );
        Ok(table)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> SpiralResult<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let file = File::open(path).map_err(|err| source_load_error(&source_name, &err))?;
        Self::from_csv_reader(file, &source_name)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cell at (`row`, `column`), or `""` when either is out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

fn source_load_error(source_name: &str, err: &dyn std::fmt::Display) -> SpiralError {
    SpiralError::SourceLoad {
        source_name: source_name.to_owned(),
        message: err.to_string(),
    }
}
