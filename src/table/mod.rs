// src/table/mod.rs
pub mod cells;

use arrow::{
    array::{Array, ArrayRef, StringArray, StringBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tracing::{debug, trace, warn};

pub use cells::{mangle_duplicate_headers, NaTokens, DEFAULT_NA_VALUES};

/// Errors raised while loading or querying a [`Table`].
#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {}{}: {reason}", .path.display(), at_line(.line))]
    Format {
        path: PathBuf,
        line: Option<u64>,
        reason: String,
    },

    #[error(
        "column '{column}' not found in {} (columns: {})",
        .path.display(),
        .available.join(", ")
    )]
    ColumnNotFound {
        column: String,
        path: PathBuf,
        available: Vec<String>,
    },
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

/// What to do with a row carrying more fields than the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadRowPolicy {
    /// Abort the load with [`TableError::Format`].
    #[default]
    Error,
    /// Log the row at `warn` and drop it.
    Warn,
    /// Drop the row quietly.
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub na_values: NaTokens,
    pub on_bad_rows: BadRowPolicy,
}

/// An all-text table: every column is a nullable `Utf8` array, null being
/// the missing-value marker.
#[derive(Debug, Clone)]
pub struct Table {
    /// Where the rows came from; used in error messages.
    source: PathBuf,
    batch: RecordBatch,
}

impl Table {
    fn from_columns(
        source: PathBuf,
        headers: Vec<String>,
        columns: Vec<ArrayRef>,
        rows: usize,
    ) -> Result<Self, TableError> {
        let fields: Vec<Field> = headers
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();
        let options = RecordBatchOptions::new().with_row_count(Some(rows));
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new_with_options(schema, columns, &options).map_err(|e| {
            TableError::Format {
                path: source.clone(),
                line: None,
                reason: e.to_string(),
            }
        })?;
        Ok(Self { source, batch })
    }

    /// Builds a table from in-memory rows. `None` is a missing cell; rows
    /// shorter than the header are padded with missing cells.
    pub fn from_rows(
        source: impl Into<PathBuf>,
        headers: &[&str],
        rows: &[Vec<Option<&str>>],
    ) -> Result<Self, TableError> {
        let source = source.into();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() > headers.len()) {
            return Err(TableError::Format {
                path: source,
                line: Some(idx as u64 + 2),
                reason: format!("expected {} fields, saw {}", headers.len(), row.len()),
            });
        }

        let headers = mangle_duplicate_headers(headers.iter().copied());
        let columns = (0..headers.len())
            .map(|i| {
                let values: StringArray = rows.iter().map(|r| r.get(i).copied().flatten()).collect();
                Arc::new(values) as ArrayRef
            })
            .collect();
        Self::from_columns(source, headers, columns, rows.len())
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> Vec<String> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// Data rows; the header line is not a row.
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    pub fn column(&self, name: &str) -> Result<&StringArray, TableError> {
        let idx = self
            .batch
            .schema_ref()
            .index_of(name)
            .map_err(|_| TableError::ColumnNotFound {
                column: name.to_string(),
                path: self.source.clone(),
                available: self.headers(),
            })?;
        self.batch
            .column(idx)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| TableError::Format {
                path: self.source.clone(),
                line: None,
                reason: format!("column '{}' is not text", name),
            })
    }
}

fn csv_error(path: &Path, err: csv::Error) -> TableError {
    let line = err.position().map(|p| p.line());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => TableError::FileAccess {
            path: path.to_path_buf(),
            source,
        },
        _ => TableError::Format {
            path: path.to_path_buf(),
            line,
            reason,
        },
    }
}

fn is_whitespace_line(record: &csv::StringRecord) -> bool {
    record.len() == 1 && !record[0].is_empty() && record[0].chars().all(|c| c == ' ')
}

/// Load a tab-separated file whose first line names the columns.
///
/// - Every cell is kept as text; cells matching `options.na_values` load as null.
/// - Rows shorter than the header are padded with nulls.
/// - Rows longer than the header follow `options.on_bad_rows`.
/// - Blank lines, and lines holding only spaces, are ignored.
#[tracing::instrument(level = "debug", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Table, TableError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TableError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true) // field-count checks are done per row below
        .from_reader(BufReader::new(file));

    let headers = mangle_duplicate_headers(rdr.headers().map_err(|e| csv_error(path, e))?.iter());
    if headers.is_empty() {
        return Err(TableError::Format {
            path: path.to_path_buf(),
            line: Some(1),
            reason: "missing header row".into(),
        });
    }

    let width = headers.len();
    let mut builders: Vec<StringBuilder> = (0..width).map(|_| StringBuilder::new()).collect();
    let mut rows = 0usize;
    let mut skipped = 0usize;

    for result in rdr.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map(|p| p.line());

        if is_whitespace_line(&record) {
            trace!(?line, "skipping whitespace-only line");
            continue;
        }

        if record.len() > width {
            let reason = format!("expected {} fields, saw {}", width, record.len());
            match options.on_bad_rows {
                BadRowPolicy::Error => {
                    return Err(TableError::Format {
                        path: path.to_path_buf(),
                        line,
                        reason,
                    });
                }
                BadRowPolicy::Warn => {
                    warn!(path = %path.display(), ?line, %reason, "skipping bad row");
                }
                BadRowPolicy::Skip => {
                    trace!(?line, %reason, "skipping bad row");
                }
            }
            skipped += 1;
            continue;
        }

        for (i, builder) in builders.iter_mut().enumerate() {
            match record.get(i).and_then(|raw| options.na_values.cell(raw)) {
                Some(value) => builder.append_value(value),
                None => builder.append_null(),
            }
        }
        rows += 1;
    }
    // release the file handle before building the batch
    drop(rdr);

    let columns = builders
        .into_iter()
        .map(|mut b| Arc::new(b.finish()) as ArrayRef)
        .collect();
    let table = Table::from_columns(path.to_path_buf(), headers, columns, rows)?;
    debug!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        skipped,
        "loaded table"
    );
    Ok(table)
}
