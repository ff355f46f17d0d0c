use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    DeviceCollection, DeviceRecord, BATTERY_CAPACITY, COMPANY_NAME, INTERNAL_STORAGE,
    MISSING_CELL, MOBILE_WEIGHT, MODEL_NAME, PROCESSOR, RAM, REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a device table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the device columns (recommended)
/// * `.json`    – `[{ "Model Name": "...", "RAM": "8 GB", ... }, ...]`
/// * `.parquet` – one column per field, any scalar type
/// * `.xlsx` / `.xls` / `.ods` – first sheet, header row first
///
/// Every cell is read as text; numeric meaning is recovered later by the
/// normalizer. A null or empty cell becomes empty text, so only a missing
/// column fails the load.
pub fn load_file(path: &Path) -> Result<DeviceCollection> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let collection = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json_records(&text)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        "xlsx" | "xlsm" | "xls" | "ods" => load_spreadsheet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    log::info!("Loaded {} devices from {}", collection.len(), path.display());
    Ok(collection)
}

// ---------------------------------------------------------------------------
// Row → DeviceRecord
// ---------------------------------------------------------------------------

fn check_required_columns<'a>(headers: impl IntoIterator<Item = &'a str> + Clone) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.clone().into_iter().any(|h| h == column) {
            bail!("Missing required column '{column}'");
        }
    }
    Ok(())
}

/// Build a record from one row of `column → text` cells.
///
/// Empty or `"nan"` optional cells count as missing. Unknown columns go to
/// `extra`.
fn record_from_fields(mut fields: BTreeMap<String, String>, row: usize) -> Result<DeviceRecord> {
    let mut required = |column: &str| {
        fields
            .remove(column)
            .with_context(|| format!("Row {row}: missing '{column}'"))
    };
    let model_name = required(MODEL_NAME)?;
    let company_name = required(COMPANY_NAME)?;
    let processor = required(PROCESSOR)?;
    let ram = required(RAM)?;
    let battery_capacity = required(BATTERY_CAPACITY)?;

    let mut optional = |column: &str| {
        fields
            .remove(column)
            .filter(|v| !v.is_empty() && v != MISSING_CELL)
    };
    let mobile_weight = optional(MOBILE_WEIGHT);
    let internal_storage = optional(INTERNAL_STORAGE);

    Ok(DeviceRecord {
        model_name,
        company_name,
        processor,
        ram,
        battery_capacity,
        mobile_weight,
        internal_storage,
        extra: fields,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<DeviceCollection> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    check_required_columns(headers.iter().map(String::as_str))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let fields = headers
            .iter()
            .cloned()
            .zip(row.iter().map(|cell| cell.trim().to_string()))
            .collect();
        records.push(record_from_fields(fields, row_no)?);
    }

    Ok(DeviceCollection::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON array, the shape served by `GET /get-devices`:
///
/// ```json
/// [
///   { "Model Name": "Pixel 8", "RAM": "8 GB", "Battery Capacity": "4575 mAh", ... },
///   ...
/// ]
/// ```
///
/// Non-string scalars are turned into text; `null` cells become empty text.
pub fn parse_json_records(text: &str) -> Result<DeviceCollection> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let fields = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_text(val)))
            .collect();
        records.push(record_from_fields(fields, i)?);
    }

    Ok(DeviceCollection::from_records(records))
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per device field.
///
/// Works with files written by **Pandas** (`df.to_parquet()`) and **Polars**;
/// numeric columns (e.g. a `RAM` column holding plain integers) are rendered
/// to text like any other cell.
fn load_parquet(path: &Path) -> Result<DeviceCollection> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    check_required_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let mut fields = BTreeMap::new();
            for (field, column) in schema.fields().iter().zip(batch.columns()) {
                fields.insert(field.name().clone(), cell_to_text(column, row)?);
            }
            records.push(record_from_fields(fields, records.len())?);
        }
    }

    Ok(DeviceCollection::from_records(records))
}

fn cell_to_text(column: &Arc<dyn Array>, row: usize) -> Result<String> {
    if column.is_null(row) {
        return Ok(String::new());
    }
    array_value_to_string(column.as_ref(), row)
        .with_context(|| format!("Row {row}: unreadable {:?} cell", column.data_type()))
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Load the first sheet of a workbook. The first row holds the column
/// names; numbers, dates and booleans are rendered to text.
fn load_spreadsheet(path: &Path) -> Result<DeviceCollection> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("Workbook has no sheets")?
        .context("reading first sheet")?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .context("Sheet is empty")?
        .iter()
        .map(sheet_cell_to_text)
        .collect();
    check_required_columns(headers.iter().map(String::as_str))?;

    let mut records = Vec::new();
    for (row_no, row) in rows.enumerate() {
        let fields = headers
            .iter()
            .cloned()
            .zip(row.iter().map(sheet_cell_to_text))
            .collect();
        records.push(record_from_fields(fields, row_no)?);
    }

    Ok(DeviceCollection::from_records(records))
}

fn sheet_cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
