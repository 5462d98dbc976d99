use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;

use super::model::{Cell, RawTable};

/// Default location of the generated sample, relative to the working directory.
pub const DEFAULT_SAMPLE_PATH: &str = "sample_data.xlsx";

const SAMPLE_ROWS: usize = 20;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// `n` evenly spaced values from `start` to `end`, both inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// The deterministic 20-row sample: a sine wave over a gentle linear trend.
///
/// Columns are `param`, `x`, `y` with labels `p1`..`p20`, `x` spaced evenly
/// over `0..=10` and `y = 3·sin(x) + t`, `t` spaced evenly over `-1..=1`.
pub fn sample_table() -> RawTable {
    let xs = linspace(0.0, 10.0, SAMPLE_ROWS);
    let trend = linspace(-1.0, 1.0, SAMPLE_ROWS);

    let rows = xs
        .iter()
        .zip(&trend)
        .enumerate()
        .map(|(i, (&x, &t))| {
            vec![
                Cell::Text(format!("p{}", i + 1)),
                Cell::Number(x),
                Cell::Number(x.sin() * 3.0 + t),
            ]
        })
        .collect();

    RawTable::new(vec!["param".into(), "x".into(), "y".into()], rows)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write the sample table to `path` as `.xlsx`, `.csv` or `.parquet`.
/// Returns the number of data rows written.
pub fn write_sample(path: &Path) -> Result<usize> {
    let table = sample_table();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let written = match ext.as_str() {
        "xlsx" => write_xlsx(&table, path),
        "csv" => write_csv(&table, path),
        "parquet" | "pq" => write_parquet(&table, path),
        other => bail!("cannot write sample as .{other} (use .xlsx, .csv or .parquet)"),
    };
    written.with_context(|| format!("writing sample to {}", path.display()))?;

    log::debug!("Wrote {} sample rows to {}", table.rows.len(), path.display());
    Ok(table.rows.len())
}

/// Write the sample only if nothing exists at `path` yet.
/// Returns whether a file was written.
pub fn ensure_sample(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_sample(path)?;
    Ok(true)
}

/// Header in the first row, one sheet, numbers stored as numbers.
fn write_xlsx(table: &RawTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in table.columns.iter().enumerate() {
        sheet.write(0, col as u16, name.as_str())?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet.write(r, col, s.as_str())?;
                }
                Cell::Number(v) => {
                    sheet.write(r, col, *v)?;
                }
                Cell::Bool(b) => {
                    sheet.write(r, col, *b)?;
                }
            }
        }
    }
    workbook.save(path).context("saving workbook")?;
    Ok(())
}

fn write_csv(table: &RawTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(table: &RawTable, path: &Path) -> Result<()> {
    let labels: Vec<String> = table.rows.iter().map(|r| r[0].to_string()).collect();
    let number = |cell: &Cell| cell.to_number().unwrap_or(f64::NAN);
    let xs: Vec<f64> = table.rows.iter().map(|r| number(&r[1])).collect();
    let ys: Vec<f64> = table.rows.iter().map(|r| number(&r[2])).collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new(&table.columns[0], DataType::Utf8, false),
        Field::new(&table.columns[1], DataType::Float64, false),
        Field::new(&table.columns[2], DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(labels)),
            Arc::new(Float64Array::from(xs)),
            Arc::new(Float64Array::from(ys)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
