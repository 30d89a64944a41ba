use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one design option per line
/// * `.json`    – `[{ "col": value, ... }, ...]`
/// * `.parquet` – flat scalar columns
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.column_names().count(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if h.is_empty() {
                format!("unnamed_{i}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Table::from_rows(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "index": 0, "embodied carbon (kgCO2e)": 5120.4, "label": "A" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            names
                .iter()
                .map(|name| obj.get(name).map_or(CellValue::Null, json_to_cell))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(names, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
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

/// Load a Parquet file with flat scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Nested or exotic column types are kept
/// as their display string.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Vec<CellValue>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = batch
            .columns()
            .iter()
            .zip(&names)
            .map(|(col, name)| {
                column_cells(col).with_context(|| format!("reading column '{name}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            rows.push(columns.iter().map(|col| col[row].clone()).collect());
        }
    }

    Ok(Table::from_rows(names, rows))
}

// -- Parquet / Arrow helpers --

fn downcast<'a, T: 'static>(col: &'a ArrayRef) -> Result<&'a T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}

/// Convert a whole Arrow column into cells.
fn column_cells(col: &ArrayRef) -> Result<Vec<CellValue>> {
    let len = col.len();
    let cell = |row: usize, value: CellValue| {
        if col.is_null(row) {
            CellValue::Null
        } else {
            value
        }
    };

    let cells = match col.data_type() {
        DataType::Utf8 => {
            let arr = downcast::<StringArray>(col)?;
            (0..len)
                .map(|r| cell(r, CellValue::String(arr.value(r).to_string())))
                .collect()
        }
        DataType::LargeUtf8 => {
            let arr = downcast::<LargeStringArray>(col)?;
            (0..len)
                .map(|r| cell(r, CellValue::String(arr.value(r).to_string())))
                .collect()
        }
        DataType::Int32 => {
            let arr = downcast::<Int32Array>(col)?;
            (0..len)
                .map(|r| cell(r, CellValue::Integer(arr.value(r) as i64)))
                .collect()
        }
        DataType::Int64 => {
            let arr = downcast::<Int64Array>(col)?;
            (0..len)
                .map(|r| cell(r, CellValue::Integer(arr.value(r))))
                .collect()
        }
        DataType::Float32 => {
            let arr = downcast::<Float32Array>(col)?;
            (0..len)
                .map(|r| cell(r, CellValue::Float(arr.value(r) as f64)))
                .collect()
        }
        DataType::Float64 => {
            let arr = downcast::<Float64Array>(col)?;
            (0..len)
                .map(|r| cell(r, CellValue::Float(arr.value(r))))
                .collect()
        }
        DataType::Boolean => {
            let arr = downcast::<BooleanArray>(col)?;
            (0..len)
                .map(|r| cell(r, CellValue::Bool(arr.value(r))))
                .collect()
        }
        _ => (0..len)
            .map(|r| {
                if col.is_null(r) {
                    Ok(CellValue::Null)
                } else {
                    array_value_to_string(col.as_ref(), r).map(CellValue::String)
                }
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("formatting column values")?,
    };

    Ok(cells)
}
