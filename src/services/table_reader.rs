use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use thiserror::Error;
use tracing::debug;

use crate::domain::raw_table::RawTable;

const WORKBOOK_EXTENSIONS: [&str; 5] = [".xlsx", ".xlsm", ".xlsb", ".xls", ".ods"];

#[derive(Error, Debug)]
pub enum TableReadError {
    #[error("unsupported file type: {0}, only .csv and Excel workbooks are accepted")]
    UnsupportedFileType(String),
    #[error("failed to read table: {0}")]
    Read(#[from] io::Error),
    #[error("failed to decode csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to decode workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("file contains no header row")]
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Csv,
    Workbook,
}

impl TableFormat {
    fn detect(file_name: &str) -> Result<Self, TableReadError> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".csv") {
            Ok(Self::Csv)
        } else if WORKBOOK_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Ok(Self::Workbook)
        } else {
            Err(TableReadError::UnsupportedFileType(file_name.to_string()))
        }
    }
}

pub fn read_table_from_path(path: &Path) -> Result<RawTable, TableReadError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = TableFormat::detect(&file_name)?;
    let bytes = fs::read(path)?;
    decode(format, bytes)
}

/// Decodes an uploaded file; `file_name` decides the format.
pub fn read_table_from_bytes(file_name: &str, bytes: &[u8]) -> Result<RawTable, TableReadError> {
    let format = TableFormat::detect(file_name)?;
    decode(format, bytes.to_vec())
}

fn decode(format: TableFormat, bytes: Vec<u8>) -> Result<RawTable, TableReadError> {
    let table = match format {
        TableFormat::Csv => decode_csv(bytes.as_slice())?,
        TableFormat::Workbook => decode_workbook(bytes)?,
    };
    debug!(
        ?format,
        rows = table.len(),
        columns = table.columns.len(),
        "table decoded"
    );
    Ok(table)
}

fn clean_cell(cell: &str) -> Option<String> {
    let cell = cell.trim();
    (!cell.is_empty()).then(|| cell.to_string())
}

/// Cells that are not valid UTF-8 are decoded lossily.
fn decode_csv<R: Read>(input: R) -> Result<RawTable, TableReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(input);

    let headers = reader.byte_headers()?.clone();
    if headers.is_empty() {
        return Err(TableReadError::EmptyInput);
    }

    let mut table = RawTable::new(
        headers
            .iter()
            .map(|header| String::from_utf8_lossy(header).trim().to_string())
            .collect(),
    );
    for record in reader.byte_records() {
        let record = record?;
        table.push_cells(
            record
                .iter()
                .map(|cell| clean_cell(&String::from_utf8_lossy(cell))),
        );
    }
    Ok(table)
}

/// Reads the first worksheet; its first row is the header.
fn decode_workbook(bytes: Vec<u8>) -> Result<RawTable, TableReadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(TableReadError::EmptyInput)??;
    table_from_range(&range)
}

fn table_from_range(range: &Range<Data>) -> Result<RawTable, TableReadError> {
    let mut rows = range.rows();
    let headers = rows.next().ok_or(TableReadError::EmptyInput)?;

    let mut table = RawTable::new(
        headers
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect(),
    );
    for row in rows {
        table.push_cells(row.iter().map(cell_text));
    }
    Ok(table)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(v) | Data::DateTimeIso(v) | Data::DurationIso(v) => clean_cell(v),
        Data::Float(v) => Some(v.to_string()),
        Data::Int(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        Data::DateTime(v) => Some(v.as_f64().to_string()),
        Data::Error(_) | Data::Empty => None,
    }
}
