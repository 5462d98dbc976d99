use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Cell, PointSet, RawTable};
use super::table;
use crate::error::SourceUnreadable;

/// Workbook extensions read through calamine.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];
/// Every extension accepted by [`read_table`].
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["xlsx", "xlsm", "xls", "ods", "csv", "parquet", "pq", "json"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a file and clean it into a point set in one step.
pub fn load_path(path: &Path) -> Result<PointSet, SourceUnreadable> {
    let raw = read_table(path)?;
    table::load(&raw).map_err(|e| SourceUnreadable::at(path, e.reason))
}

/// Read a tabular file into a [`RawTable`].  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet, first row is the header
/// * `.csv`     – header row, then data rows
/// * `.parquet` – flat columns, one per table column
/// * `.json`    – `{"columns": [...], "data": [[...], ...]}` (pandas "split")
pub fn read_table(path: &Path) -> Result<RawTable, SourceUnreadable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let result = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path),
        "csv" => std::fs::File::open(path)
            .context("opening CSV file")
            .and_then(read_csv),
        "parquet" | "pq" => read_parquet(path),
        "json" => std::fs::read_to_string(path)
            .context("reading JSON file")
            .and_then(|text| read_json(&text)),
        other => Err(anyhow::anyhow!("unsupported file extension: .{other}")),
    };
    result.map_err(|e| SourceUnreadable::at(path, e))
}

// ---------------------------------------------------------------------------
// Spreadsheet workbooks
// ---------------------------------------------------------------------------

fn read_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook has no sheets")?;
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading sheet '{sheet}'"))?;

    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|c| workbook_cell(c).to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(RawTable::new(columns, rows))
}

/// Literal cell value; dates and durations are kept as text, not coordinates.
fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// CSV layout: a header row, then data rows of any length.
/// Fields are kept as text; numeric coercion happens when the table is loaded.
/// Bytes that are not valid UTF-8 are replaced rather than failing the file.
pub fn read_csv<R: Read>(source: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);
    let columns: Vec<String> = reader
        .byte_headers()
        .context("reading CSV header")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(
            record
                .iter()
                .map(|field| Cell::from_text(&String::from_utf8_lossy(field)))
                .collect(),
        );
    }

    Ok(RawTable::new(columns, rows))
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat (non-list) columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(batch.columns().iter().map(|col| arrow_cell(col, row)).collect());
        }
    }

    Ok(RawTable::new(columns, rows))
}

fn arrow_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Empty;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Cell::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => Cell::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => Cell::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Cell::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        other => Cell::Text(format!("{other:?}")),
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// `df.to_json(orient='split')`; the `index` key, if present, is ignored.
#[derive(Debug, Deserialize)]
struct SplitTable {
    columns: Vec<JsonValue>,
    data: Vec<Vec<JsonValue>>,
}

/// Expected JSON schema:
///
/// ```json
/// {
///   "columns": ["param", "x", "y"],
///   "data": [["p1", 0.0, 1.5], ["p2", 0.5, "n/a"]]
/// }
/// ```
pub fn read_json(text: &str) -> Result<RawTable> {
    let split: SplitTable = serde_json::from_str(text).context("parsing JSON table")?;
    if split.columns.is_empty() && split.data.is_empty() {
        bail!("JSON table has neither columns nor data");
    }
    let columns: Vec<String> = split
        .columns
        .iter()
        .map(|c| json_cell(c).to_string())
        .collect();
    let rows: Vec<Vec<Cell>> = split
        .data
        .iter()
        .map(|row| row.iter().map(json_cell).collect())
        .collect();
    Ok(RawTable::new(columns, rows))
}

fn json_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Empty,
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => Cell::Number(f),
            None => Cell::Text(n.to_string()),
        },
        JsonValue::String(s) => Cell::from_text(s),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Point;

    #[test]
    fn csv_header_is_split_off() {
        let raw = read_csv("param,x,y\na,0,0\nb,1,1\n".as_bytes()).unwrap();
        assert_eq!(raw.columns, ["param", "x", "y"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[1], [Cell::Text("b".into()), Cell::Text("1".into()), Cell::Text("1".into())]);
    }

    #[test]
    fn csv_blank_fields_and_short_rows() {
        let raw = read_csv("x,y\n1,\n2\n3,4\n".as_bytes()).unwrap();
        assert_eq!(raw.rows[0], [Cell::Text("1".into()), Cell::Empty]);
        assert_eq!(raw.rows[1], [Cell::Text("2".into())]);
        let points = table::load(&raw).unwrap();
        assert_eq!(points, vec![Point::new("0", 3.0, 4.0)]);
    }

    #[test]
    fn empty_csv_has_no_columns() {
        let raw = read_csv("".as_bytes()).unwrap();
        assert_eq!(raw.width(), 0);
        assert!(table::load(&raw).is_err());
    }

    #[test]
    fn csv_with_invalid_utf8_keeps_every_row() {
        let raw = read_csv(&b"param,x,y\nok,1,1\ncaf\xe9,2,2\n"[..]).unwrap();
        let points = table::load(&raw).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0], Point::new("ok", 1.0, 1.0));
        assert_eq!(points[1].label, "caf\u{FFFD}");
        assert_eq!((points[1].x, points[1].y), (2.0, 2.0));
    }

    #[test]
    fn json_split_orientation() {
        let raw = read_json(
            r#"{"columns":["param","x","y"],"index":[0,1],"data":[["a",1,2.5],["b",null,true]]}"#,
        )
        .unwrap();
        assert_eq!(raw.columns, ["param", "x", "y"]);
        assert_eq!(raw.rows[0], [Cell::Text("a".into()), Cell::Number(1.0), Cell::Number(2.5)]);
        assert_eq!(raw.rows[1], [Cell::Text("b".into()), Cell::Empty, Cell::Bool(true)]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(read_json("[1, 2, 3]").is_err());
        assert!(read_json("{\"columns\": [], \"data\": []}").is_err());
    }

    #[test]
    fn workbook_cells_keep_literal_values() {
        assert_eq!(workbook_cell(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(workbook_cell(&Data::Float(0.5)), Cell::Number(0.5));
        assert_eq!(workbook_cell(&Data::String("p1".into())), Cell::Text("p1".into()));
        assert_eq!(workbook_cell(&Data::String(String::new())), Cell::Empty);
        assert_eq!(workbook_cell(&Data::Empty), Cell::Empty);
        assert_eq!(workbook_cell(&Data::Bool(false)), Cell::Bool(false));
    }

    fn temp_workbook(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("scatterpick-{}-{name}.xlsx", std::process::id()))
    }

    #[test]
    fn workbook_first_sheet_with_header_split_off() {
        let path = temp_workbook("mixed");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in ["param", "x", "y"].into_iter().enumerate() {
            sheet.write(0, col as u16, name).unwrap();
        }
        sheet.write(1, 0, "a").unwrap();
        sheet.write(1, 1, "x").unwrap();
        sheet.write(1, 2, 1.0).unwrap();
        sheet.write(2, 0, "b").unwrap();
        sheet.write(2, 1, 2.0).unwrap();
        sheet.write(2, 2, 3.0).unwrap();
        sheet.write(3, 0, 7.0).unwrap();
        sheet.write(3, 1, "4.5").unwrap();
        sheet.write(3, 2, 5.0).unwrap();
        let other = workbook.add_worksheet();
        other.write(0, 0, "ignored").unwrap();
        workbook.save(&path).unwrap();

        let raw = read_table(&path).unwrap();
        let points = load_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(raw.columns, ["param", "x", "y"]);
        assert_eq!(raw.rows.len(), 3);
        assert_eq!(raw.rows[2][1], Cell::Text("4.5".into()));
        assert_eq!(points, vec![Point::new("b", 2.0, 3.0), Point::new("7", 4.5, 5.0)]);
    }

    #[test]
    fn workbook_with_empty_first_sheet_is_unreadable() {
        let path = temp_workbook("empty-first");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        workbook.add_worksheet();
        let second = workbook.add_worksheet();
        second.write(0, 0, "x").unwrap();
        second.write(0, 1, "y").unwrap();
        second.write(1, 0, 1.0).unwrap();
        second.write(1, 1, 2.0).unwrap();
        workbook.save(&path).unwrap();

        let result = load_path(&path);
        let _ = std::fs::remove_file(&path);
        let err = result.unwrap_err();
        assert_eq!(err.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn corrupt_workbook_is_unreadable() {
        let path = temp_workbook("corrupt");
        std::fs::write(&path, b"not a zip archive").unwrap();
        let result = read_table(&path);
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn unsupported_extension_is_unreadable() {
        let err = read_table(Path::new("points.txt")).unwrap_err();
        assert_eq!(err.path.as_deref(), Some(Path::new("points.txt")));
        assert!(err.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let path = std::env::temp_dir().join("scatterpick-does-not-exist.csv");
        assert!(load_path(&path).is_err());
    }
}
