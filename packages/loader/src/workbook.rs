//! `.xlsx` locality table loading.
//!
//! Only the first worksheet is read. Its first row is the header row, and
//! every cell is turned into text before the same column lookup the CSV
//! loader uses.

use std::io::{Read, Seek};

use calamine::{Data, Reader, Xlsx};
use region_map_theme_models::LocalityRecord;

use crate::LoadError;
use crate::localities::{LocalityColumns, clean_header, collect_records};

/// Parses locality records from the first sheet of an `.xlsx` workbook.
///
/// Numeric cells are written without a trailing `.0`, so a municipal code
/// stored as a number reads the same as one stored as text.
///
/// # Errors
///
/// * [`LoadError::Xlsx`] if the input is not a readable workbook
/// * [`LoadError::EmptyWorkbook`] if the workbook has no worksheets
/// * [`LoadError::MissingColumn`] if either configured column is absent
pub fn load_localities_xlsx<RS: Read + Seek>(
    reader: RS,
    columns: &LocalityColumns,
) -> Result<Vec<LocalityRecord>, LoadError> {
    let mut workbook: Xlsx<RS> = Xlsx::new(reader)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|cell| clean_header(&cell_text(cell))).collect())
        .unwrap_or_default();

    collect_records(
        &headers,
        rows.map(|row| Ok(row.iter().map(cell_text).collect())),
        columns,
    )
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
