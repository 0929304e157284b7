use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use atomic_write_file::AtomicWriteFile;
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Map, Number, Value as JsonValue};

use super::model::{CellValue, Table};

/// Extension used when the chosen destination has none.
pub const DEFAULT_EXTENSION: &str = "xlsx";

/// Destination path with the default extension filled in.
pub fn resolve_destination(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Write a table to `path`, choosing the format from the extension.
///
/// The file is written to a temporary sibling and renamed into place on
/// success, so a failed export never leaves a truncated file behind.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let bytes = match ext.as_str() {
        "xlsx" => to_xlsx(table)?,
        "csv" => to_csv(table)?,
        "json" => to_json(table)?,
        other => bail!("Unsupported export format: .{other} (use .xlsx, .csv or .json)"),
    };

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    file.write_all(&bytes).context("Failed to write output")?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

/// Single worksheet with a bold header row. Empty cells are left blank.
fn to_xlsx(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string_with_format(0, xlsx_col(col)?, header, &bold)?;
    }
    for (i, row) in table.rows.iter().enumerate() {
        let r = u32::try_from(i + 1).context("too many rows for a worksheet")?;
        for (col, cell) in row.iter().enumerate() {
            let c = xlsx_col(col)?;
            match cell {
                CellValue::String(s) => {
                    sheet.write_string(r, c, s)?;
                }
                CellValue::Integer(v) => {
                    sheet.write_number(r, c, *v as f64)?;
                }
                CellValue::Float(v) if v.is_finite() => {
                    sheet.write_number(r, c, *v)?;
                }
                CellValue::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                CellValue::Float(_) | CellValue::Null => {}
            }
        }
    }

    workbook.save_to_buffer().context("building workbook")
}

fn xlsx_col(col: usize) -> Result<u16> {
    u16::try_from(col).context("too many columns for a worksheet")
}

fn to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers).context("writing CSV header")?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|cell| cell.to_string()))
            .context("writing CSV row")?;
    }
    writer.into_inner().context("flushing CSV output")
}

/// Records-oriented JSON, one object per row with keys in column order.
fn to_json(table: &Table) -> Result<Vec<u8>> {
    let records: Vec<JsonValue> = table
        .rows
        .iter()
        .map(|row| {
            let obj: Map<String, JsonValue> = table
                .headers
                .iter()
                .cloned()
                .zip(row.iter().map(cell_to_json))
                .collect();
            JsonValue::Object(obj)
        })
        .collect();
    serde_json::to_vec_pretty(&records).context("serializing JSON")
}

fn cell_to_json(cell: &CellValue) -> JsonValue {
    match cell {
        CellValue::String(s) => JsonValue::String(s.clone()),
        CellValue::Integer(i) => JsonValue::Number((*i).into()),
        CellValue::Float(v) => Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        CellValue::Bool(b) => JsonValue::Bool(*b),
        CellValue::Null => JsonValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_table;

    fn table() -> Table {
        Table::new(
            vec!["Index Number".into(), "Name".into(), "Grade".into(), "Eligibility".into()],
            vec![
                vec![
                    CellValue::Integer(7),
                    CellValue::String("Lee, Ann".into()),
                    CellValue::Float(2.1 / 3.0 * 100.0),
                    CellValue::String("Eligible".into()),
                ],
                vec![
                    CellValue::String("00012".into()),
                    CellValue::Null,
                    CellValue::Float(0.0),
                    CellValue::String("Not Eligible".into()),
                ],
            ],
        )
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_table(&path, &table()).unwrap();

        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded.headers, table().headers);
        assert_eq!(loaded.rows[0][1], CellValue::String("Lee, Ann".into()));
        assert_eq!(loaded.rows[0][2].as_f64(), Some(2.1 / 3.0 * 100.0));
        assert_eq!(loaded.rows[1][0], CellValue::String("00012".into()));
        assert_eq!(loaded.rows[1][2].as_f64(), Some(0.0));
    }

    #[test]
    fn test_json_round_trip_keeps_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_table(&path, &table()).unwrap();

        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded.headers, table().headers);
        assert_eq!(loaded.rows[0][2], CellValue::Float(2.1 / 3.0 * 100.0));
        assert_eq!(loaded.rows[1][1], CellValue::Null);
    }

    #[test]
    fn test_xlsx_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        write_table(&path, &table()).unwrap();

        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded.headers, table().headers);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.rows[0][0].as_f64(), Some(7.0));
        assert_eq!(loaded.rows[0][1], CellValue::String("Lee, Ann".into()));
        assert_eq!(loaded.rows[0][2].as_f64(), Some(2.1 / 3.0 * 100.0));
        assert_eq!(loaded.rows[1][0], CellValue::String("00012".into()));
        assert_eq!(loaded.rows[1][1], CellValue::Null);
        assert_eq!(loaded.rows[1][3], CellValue::String("Not Eligible".into()));
    }

    #[test]
    fn test_unsupported_format_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        assert!(write_table(&path, &table()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_resolve_destination_adds_default_extension() {
        assert_eq!(resolve_destination(Path::new("/tmp/list")), PathBuf::from("/tmp/list.xlsx"));
        assert_eq!(resolve_destination(Path::new("/tmp/list.json")), PathBuf::from("/tmp/list.json"));
    }
}
