//! Locality table loading.
//!
//! Reads a CSV or `.xlsx` table with a header row. Header names are trimmed
//! before lookup, since spreadsheet exports often pad them, and a leading
//! byte-order mark is ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use region_map_theme_models::LocalityRecord;
use serde::{Deserialize, Serialize};

use crate::LoadError;

/// Which table columns hold the locality name and the region label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalityColumns {
    /// Header of the locality name column.
    pub name: String,
    /// Header of the region label column.
    pub region: String,
}

impl LocalityColumns {
    /// Default locality name header.
    pub const DEFAULT_NAME: &'static str = "Cidade";

    /// Default region label header.
    pub const DEFAULT_REGION: &'static str = "Região";
}

impl Default for LocalityColumns {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            region: Self::DEFAULT_REGION.to_string(),
        }
    }
}

/// Parses locality records from CSV.
///
/// Cell values are trimmed. Rows with an empty name are skipped. Extra
/// columns are ignored and short rows are tolerated.
///
/// # Errors
///
/// * [`LoadError::MissingColumn`] if either configured column is absent
/// * [`LoadError::Csv`] if the input is not valid CSV
pub fn load_localities<R: Read>(
    reader: R,
    columns: &LocalityColumns,
) -> Result<Vec<LocalityRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();

    let rows = reader.records().map(|result| {
        result
            .map(|row| row.iter().map(str::to_owned).collect())
            .map_err(LoadError::from)
    });

    collect_records(&headers, rows, columns)
}

/// Opens `path` and parses it as a workbook if it has an `.xlsx`
/// extension, otherwise as CSV.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be opened, otherwise the
/// same errors as [`load_localities`] or
/// [`load_localities_xlsx`](crate::workbook::load_localities_xlsx).
pub fn load_localities_from_path(
    path: &Path,
    columns: &LocalityColumns,
) -> Result<Vec<LocalityRecord>, LoadError> {
    log::info!("Reading locality table from {}", path.display());
    let file = File::open(path)?;

    match TableFormat::from_path(path) {
        TableFormat::Xlsx => crate::workbook::load_localities_xlsx(BufReader::new(file), columns),
        TableFormat::Csv => load_localities(file, columns),
    }
}

/// Locality table file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values.
    Csv,
    /// Office Open XML workbook (first sheet).
    Xlsx,
}

impl TableFormat {
    /// Picks the format from the file extension. Anything that is not
    /// `.xlsx` is read as CSV.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Self::Xlsx,
            _ => Self::Csv,
        }
    }
}

pub(crate) fn clean_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_owned()
}

/// Turns raw rows into records using the configured columns.
pub(crate) fn collect_records<I>(
    headers: &[String],
    rows: I,
    columns: &LocalityColumns,
) -> Result<Vec<LocalityRecord>, LoadError>
where
    I: IntoIterator<Item = Result<Vec<String>, LoadError>>,
{
    let name_idx = column_index(headers, &columns.name)?;
    let region_idx = column_index(headers, &columns.region)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in rows {
        let row = row?;
        let name = row.get(name_idx).map_or("", |cell| cell.trim());
        if name.is_empty() {
            skipped += 1;
            continue;
        }
        let region = row.get(region_idx).map_or("", |cell| cell.trim());
        records.push(LocalityRecord::new(name, region));
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} locality rows with an empty name");
    }
    log::info!("Loaded {} localities", records.len());

    Ok(records)
}

fn column_index(headers: &[String], column: &str) -> Result<usize, LoadError> {
    let column = column.trim();
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: column.to_owned(),
            available: headers.to_vec(),
        })
}
