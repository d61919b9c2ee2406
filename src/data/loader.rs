use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};
use crate::error::LoadError;

/// Extensions handled by the spreadsheet reader.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first sheet, header in row 1
/// * `.csv`     – header row followed by data rows
/// * `.json`    – `[{ "col": value, ... }, ...]`
/// * `.parquet` – flat table of scalar columns
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let result = read_file(path);
    finish(result, &path.display().to_string())
}

/// Load a dataset from in-memory file content, `extension` selecting the format.
pub fn load_bytes(bytes: &[u8], extension: &str) -> Result<Dataset, LoadError> {
    let result = parse_bytes(bytes, &extension.to_ascii_lowercase());
    finish(result, &format!("<{} bytes>", bytes.len()))
}

fn finish(result: Result<Dataset>, source: &str) -> Result<Dataset, LoadError> {
    let result = result.and_then(|dataset| {
        if dataset.columns().is_empty() {
            bail!("input has no columns");
        }
        Ok(dataset)
    });
    match result {
        Ok(dataset) => {
            log::info!(
                "Loaded {source}: {} rows, columns {:?}",
                dataset.len(),
                dataset.column_names()
            );
            Ok(dataset)
        }
        Err(e) => {
            log::error!("Failed to load {source}: {e:#}");
            Err(LoadError::from_anyhow(&e))
        }
    }
}

fn read_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if matches!(ext.as_str(), "parquet" | "pq") {
        let file = std::fs::File::open(path).context("opening parquet file")?;
        return load_parquet(file);
    }
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_bytes(&bytes, &ext)
}

fn parse_bytes(bytes: &[u8], ext: &str) -> Result<Dataset> {
    match ext {
        e if SPREADSHEET_EXTENSIONS.contains(&e) => load_spreadsheet(bytes),
        "csv" => load_csv(bytes),
        "json" => load_json(bytes),
        "parquet" | "pq" => bail!("parquet input must be read from a file path"),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Parse the first sheet of a workbook. Row 1 is the header.
fn load_spreadsheet(bytes: &[u8]) -> Result<Dataset> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no sheets")?
        .context("reading first sheet")?;
    range_to_dataset(&range)
}

/// Convert a sheet range into a dataset. Fully empty rows are skipped.
pub(crate) fn range_to_dataset(range: &Range<Data>) -> Result<Dataset> {
    let mut rows = range
        .rows()
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)));

    let header_row = rows.next().context("sheet is empty")?;
    let header: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(cell, i))
        .collect();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_from_sheet).collect())
        .collect();
    if data.is_empty() {
        bail!("sheet has a header but no data rows");
    }

    Dataset::from_rows(header, data).context("assembling columns")
}

fn header_name(cell: &Data, index: usize) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {index}"),
        Data::String(s) => s.clone(),
        other => cell_from_sheet(other).to_string(),
    }
}

/// Map a spreadsheet cell to a [`CellValue`]. Integral floats become integers,
/// since most writers store every number as a double.
fn cell_from_sheet(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => number_cell(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) if d.time() == chrono::NaiveTime::MIN => {
                CellValue::Date(d.format("%Y-%m-%d").to_string())
            }
            Some(d) => CellValue::Date(d.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Date(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(bytes: &[u8]) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();
    if headers.is_empty() {
        bail!("CSV has no header");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }
    if rows.is_empty() {
        bail!("CSV has a header but no data rows");
    }

    Dataset::from_rows(headers, rows).context("assembling columns")
}

/// Tokens read as missing, as dataframe CSV readers do by default.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() || NA_TOKENS.contains(&s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return number_cell(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

/// Integral floats become integers so `1` and `1.0` count as one value.
/// Non-finite numbers are treated as missing.
fn number_cell(f: f64) -> CellValue {
    if !f.is_finite() {
        CellValue::Null
    } else if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        CellValue::Integer(f as i64)
    } else {
        CellValue::Float(f)
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "hari": 1, "tanggal": 3, "kegiatan": 0, "curah_hujan": 12.5, "Penjualan (pcs)": 40 },
///   ...
/// ]
/// ```
///
/// Column order follows first appearance across the records.
fn load_json(bytes: &[u8]) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_slice(bytes).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;
    if records.is_empty() {
        bail!("JSON array has no records");
    }

    let mut header: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !header.contains(key) {
                header.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            header
                .iter()
                .map(|key| obj.get(key).map_or(CellValue::Null, json_to_cell))
                .collect()
        })
        .collect();

    Dataset::from_rows(header, rows).context("assembling columns")
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                number_cell(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(file: std::fs::File) -> Result<Dataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let header: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell_value(col, row))
                    .collect(),
            );
        }
    }
    if rows.is_empty() {
        bail!("parquet file has no rows");
    }

    Dataset::from_rows(header, rows).context("assembling columns")
}

/// Float columns keep their type; only NaN and infinities become nulls.
fn float_cell(f: f64) -> CellValue {
    if f.is_finite() {
        CellValue::Float(f)
    } else {
        CellValue::Null
    }
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let value = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| CellValue::String(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| float_cell(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| float_cell(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            array_value_to_string(col.as_ref(), row).ok().map(CellValue::Date)
        }
        _ => None,
    };
    value.unwrap_or_else(|| {
        array_value_to_string(col.as_ref(), row)
            .map(CellValue::String)
            .unwrap_or_else(|_| CellValue::String(format!("{:?}", col.data_type())))
    })
}
