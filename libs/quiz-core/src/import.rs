//! Import adapters for question bank files.
//!
//! Three formats are accepted:
//! - spreadsheet exports (`.csv`), first row is the header
//! - workbooks (`.xlsx`, `.xlsm`, `.xls`), first worksheet, first row is the header
//! - structured documents (`.json`), a top-level array of objects
//!
//! All produce [`RawRecord`]s that go through the normalizer.

use crate::error::{QuizError, Result};
use crate::normalize::{normalize_batch, RawRecord};
use crate::types::Question;
use calamine::{Data, Reader};
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;
use tracing::info;

/// Declared format of an import file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Spreadsheet,
    Workbook,
    Document,
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spreadsheet => write!(f, "spreadsheet"),
            Self::Workbook => write!(f, "workbook"),
            Self::Document => write!(f, "document"),
        }
    }
}

impl ImportFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Ok(Self::Spreadsheet),
            "xlsx" | "xlsm" | "xls" => Ok(Self::Workbook),
            "json" => Ok(Self::Document),
            _ => Err(QuizError::Format { extension }),
        }
    }
}

/// Questions parsed from a file, named after the file.
#[derive(Debug, Clone)]
pub struct ImportedLibrary {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Read raw records in the given format.
pub fn read_records<R: Read>(reader: R, format: ImportFormat) -> Result<Vec<RawRecord>> {
    match format {
        ImportFormat::Spreadsheet => read_spreadsheet(reader),
        ImportFormat::Workbook => read_workbook(reader),
        ImportFormat::Document => read_document(reader),
    }
}

/// Read, validate and normalize a question bank file.
///
/// Fails without side effects; the caller adds the library to a session.
pub fn load_library_file(path: &Path) -> Result<ImportedLibrary> {
    let format = ImportFormat::from_path(path)?;
    let file = File::open(path).map_err(|source| QuizError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(BufReader::new(file), format)?;
    let questions = normalize_batch(&records)?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("library")
        .to_string();

    info!(path = %path.display(), %format, questions = questions.len(), "loaded question bank");
    Ok(ImportedLibrary { name, questions })
}

fn read_spreadsheet<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| QuizError::parse(ImportFormat::Spreadsheet, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| QuizError::parse(ImportFormat::Spreadsheet, e))?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        if !record.is_empty() {
            records.push(record);
        }
    }
    Ok(records)
}

fn read_workbook<R: Read>(mut reader: R) -> Result<Vec<RawRecord>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| QuizError::parse(ImportFormat::Workbook, e))?;

    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| QuizError::parse(ImportFormat::Workbook, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| QuizError::parse(ImportFormat::Workbook, "workbook has no worksheets"))?
        .map_err(|e| QuizError::parse(ImportFormat::Workbook, e))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();

    let records = rows
        .map(|row| {
            headers
                .iter()
                .zip(row.iter())
                .filter(|(header, _)| !header.is_empty())
                .filter_map(|(header, cell)| {
                    let text = cell_text(cell);
                    (!text.is_empty()).then(|| (header.clone(), text))
                })
                .collect::<RawRecord>()
        })
        .filter(|record| !record.is_empty())
        .collect();
    Ok(records)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn read_document<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let value: Value =
        serde_json::from_reader(reader).map_err(|e| QuizError::parse(ImportFormat::Document, e))?;

    let Value::Array(rows) = value else {
        return Err(QuizError::parse(
            ImportFormat::Document,
            "expected a top-level array of question objects",
        ));
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(fields) => Ok(object_record(fields)),
            _ => Err(QuizError::parse(
                ImportFormat::Document,
                format!("entry {} is not an object", index + 1),
            )),
        })
        .collect()
}

fn object_record(fields: serde_json::Map<String, Value>) -> RawRecord {
    fields
        .into_iter()
        .filter_map(|(key, value)| scalar_text(value).map(|text| (key, text)))
        .collect()
}

/// Text of a JSON field. Arrays of scalars (e.g. `["A", "C"]`) are joined.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(items.into_iter().filter_map(scalar_text).collect()),
    }
}
