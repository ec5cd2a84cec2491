use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{columns, RawRecord, RawValue, SalaryDataset};
use crate::errors::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize a salary dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names (recommended)
/// * `.json`    – `[{ "GPA": 3.4, "Education_PhD": true, ... }, ...]`
/// * `.parquet` – one column per source column
///
/// The load is all-or-nothing: a single unreadable row fails the whole file.
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let raw = read_raw_records(path)?;
    if raw.is_empty() {
        return Err(DatasetError::NoRecords)
            .with_context(|| format!("loading {}", path.display()));
    }
    warn_missing_columns(&raw[0]);

    let dataset = SalaryDataset::from_raw(&raw).with_source(path);
    log::info!(
        "Loaded {} records from {} ({} with imputed categories)",
        dataset.len(),
        path.display(),
        dataset.imputed_count()
    );
    Ok(dataset)
}

/// Read untyped rows from a file without normalizing them.
pub fn read_raw_records(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
}

fn warn_missing_columns(first: &RawRecord) {
    let missing: Vec<&str> = columns::EXPECTED
        .iter()
        .copied()
        .filter(|c| !first.contains_key(*c))
        .collect();
    if !missing.is_empty() {
        log::warn!("Missing expected columns, defaults will be used: {missing:?}");
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; every cell is kept as text
/// (empty cells become `Null`) and typed later by the normalizer.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

pub(crate) fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRecord>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| {
                let value = if cell.is_empty() {
                    RawValue::Null
                } else {
                    RawValue::String(cell.to_string())
                };
                (name.clone(), value)
            })
            .collect();

        rows.push(row);
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Work_Experience": 4,
///     "GPA": 3.4,
///     "Skills": ["Python", "SQL"],
///     "Education_PhD": true,
///     "Salary_at_30": 92000.0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub(crate) fn parse_json(text: &str) -> Result<Vec<RawRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRecord> {
            let obj = rec.as_object().ok_or(DatasetError::MalformedRow {
                row: i,
                reason: "not a JSON object".to_string(),
            })?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.clone(), json_to_raw(val)))
                .collect())
        })
        .collect()
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => RawValue::Bool(*b),
        JsonValue::Null => RawValue::Null,
        JsonValue::Array(items) => RawValue::List(
            items
                .iter()
                .map(|item| match item {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        other => RawValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by **Pandas** (`df.to_parquet()`) or
/// **Polars** (`df.write_parquet()`). Every column is read as a raw cell.
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let record: RawRecord = schema
                .fields()
                .iter()
                .zip(batch.columns())
                .map(|(field, column)| (field.name().clone(), extract_raw_value(column, row)))
                .collect();
            rows.push(record);
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_raw_value(col: &ArrayRef, row: usize) -> RawValue {
    if col.is_null(row) {
        return RawValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map_or(RawValue::Null, |s| RawValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map_or(RawValue::Null, |s| RawValue::String(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map_or(RawValue::Null, |a| RawValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map_or(RawValue::Null, |a| RawValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map_or(RawValue::Null, |a| RawValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map_or(RawValue::Null, |a| RawValue::Float(a.value(row))),
        DataType::Boolean => col
            .as_boolean_opt()
            .map_or(RawValue::Null, |a| RawValue::Bool(a.value(row))),
        DataType::List(_) => col
            .as_list_opt::<i32>()
            .map_or(RawValue::Null, |l| string_list(&l.value(row))),
        DataType::LargeList(_) => col
            .as_list_opt::<i64>()
            .map_or(RawValue::Null, |l| string_list(&l.value(row))),
        other => RawValue::String(format!("{other:?}")),
    }
}

/// List<Utf8> cells become `RawValue::List`; other element types are unusable.
fn string_list(values: &ArrayRef) -> RawValue {
    match values.as_string_opt::<i32>() {
        Some(strings) => RawValue::List(
            strings
                .iter()
                .flatten()
                .map(|s| s.to_string())
                .collect(),
        ),
        None => RawValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_cells_stay_textual() {
        let data = "GPA,Education_PhD,Skills\n3.5,True,\"['SQL']\"\n,False,\n";
        let rows = read_csv(csv::Reader::from_reader(data.as_bytes())).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["GPA"], RawValue::String("3.5".into()));
        assert_eq!(rows[0]["Skills"], RawValue::String("['SQL']".into()));
        assert_eq!(rows[1]["GPA"], RawValue::Null);
    }

    #[test]
    fn csv_ragged_row_fails_whole_load() {
        let data = "GPA,Salary_at_30\n3.5,1000\n3.1\n";
        assert!(read_csv(csv::Reader::from_reader(data.as_bytes())).is_err());
    }

    #[test]
    fn json_maps_native_types() {
        let text = r#"[{"GPA": 3.2, "Certifications": 2, "Education_PhD": true,
                        "Skills": ["Rust"], "Salary_at_30": null}]"#;
        let rows = parse_json(text).unwrap();
        assert_eq!(rows[0]["GPA"], RawValue::Float(3.2));
        assert_eq!(rows[0]["Certifications"], RawValue::Integer(2));
        assert_eq!(rows[0]["Education_PhD"], RawValue::Bool(true));
        assert_eq!(rows[0]["Skills"], RawValue::List(vec!["Rust".into()]));
        assert_eq!(rows[0]["Salary_at_30"], RawValue::Null);
    }

    #[test]
    fn json_non_object_row_is_rejected() {
        let err = parse_json("[{}, 3]").unwrap_err();
        assert!(format!("{err:#}").contains("row 1"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_raw_records(Path::new("salaries.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }
}
