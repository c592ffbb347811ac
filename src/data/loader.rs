use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use arrow::array::{ArrayRef, AsArray};
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{
    EmployeeDataset, EmployeeRecord, DEPARTMENT_COLUMN, EMPLOYEE_TYPE_COLUMN,
    PERFORMANCE_SCORE_COLUMN, RATING_COLUMN, REQUIRED_COLUMNS, STATUS_COLUMN,
};

/// Cell spellings read as an empty value, on top of the empty string.
const NA_TOKENS: [&str; 9] = ["NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "#N/A"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an employee dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one record per line (recommended)
/// * `.json`    – `[{ "DepartmentType": "...", ... }, ...]`
/// * `.parquet` – flat table with the five expected columns
///
/// Columns other than the five expected ones are ignored.
pub fn load_file(path: &Path) -> Result<EmployeeDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} employee records from {}",
        dataset.len(),
        path.display()
    );
    let incomplete = dataset.incomplete_rows();
    if incomplete > 0 {
        log::warn!("{incomplete} records have an empty department, status or rating and never pass the filters");
    }
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn require_columns<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<(), LoadError> {
    let present: HashSet<&str> = names.into_iter().collect();
    match REQUIRED_COLUMNS.iter().find(|col| !present.contains(*col)) {
        Some(missing) => Err(LoadError::MissingColumn(missing.to_string())),
        None => Ok(()),
    }
}

fn is_na(s: &str) -> bool {
    s.is_empty() || NA_TOKENS.contains(&s)
}

fn text_cell(value: Option<&str>) -> Option<String> {
    value.filter(|v| !is_na(v)).map(str::to_string)
}

/// Parse one rating cell. NA spellings and non-finite numbers (`NAN`,
/// `inf`, ...) are nulls; any other non-numeric text is an error.
fn parse_rating(value: Option<&str>, row: usize) -> Result<Option<f64>, LoadError> {
    let raw = value.unwrap_or("").trim();
    if is_na(raw) {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(finite)
        .map_err(|_| LoadError::InvalidRating {
            row,
            value: raw.to_string(),
        })
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, comma-delimited.
fn load_csv(path: &Path) -> Result<EmployeeDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers = reader.headers()?.clone();
    require_columns(headers.iter())?;

    let index_of = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let dept_idx = index_of(DEPARTMENT_COLUMN)?;
    let status_idx = index_of(STATUS_COLUMN)?;
    let type_idx = index_of(EMPLOYEE_TYPE_COLUMN)?;
    let rating_idx = index_of(RATING_COLUMN)?;
    let score_idx = index_of(PERFORMANCE_SCORE_COLUMN)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        records.push(EmployeeRecord {
            department: text_cell(row.get(dept_idx)),
            status: text_cell(row.get(status_idx)),
            employee_type: text_cell(row.get(type_idx)),
            rating: parse_rating(row.get(rating_idx), row_no)?,
            performance_score: text_cell(row.get(score_idx)),
        });
    }

    Ok(EmployeeDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "DepartmentType": "Sales",
///     "EmployeeStatus": "Active",
///     "EmployeeType": "Full-Time",
///     "Current Employee Rating": 3,
///     "Performance Score": "Fully Meets"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<EmployeeDataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(LoadError::NotAnObject(i))?;
        require_columns(obj.keys().map(String::as_str))?;

        records.push(EmployeeRecord {
            department: json_text(&obj[DEPARTMENT_COLUMN]),
            status: json_text(&obj[STATUS_COLUMN]),
            employee_type: json_text(&obj[EMPLOYEE_TYPE_COLUMN]),
            rating: json_rating(&obj[RATING_COLUMN], i)?,
            performance_score: json_text(&obj[PERFORMANCE_SCORE_COLUMN]),
        });
    }

    Ok(EmployeeDataset::from_records(records))
}

fn json_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => text_cell(Some(s.as_str())),
        other => Some(other.to_string()),
    }
}

fn json_rating(val: &JsonValue, row: usize) -> Result<Option<f64>, LoadError> {
    match val {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => Ok(n.as_f64().and_then(finite)),
        JsonValue::String(s) => parse_rating(Some(s.as_str()), row),
        other => Err(LoadError::InvalidRating {
            row,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Categorical columns may be any type castable to Utf8 (plain strings,
/// dictionary-encoded strings); the rating may be any numeric type or text
/// holding numbers and NA spellings.
fn load_parquet(path: &Path) -> Result<EmployeeDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    require_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let departments = text_column(&batch, DEPARTMENT_COLUMN)?;
        let statuses = text_column(&batch, STATUS_COLUMN)?;
        let types = text_column(&batch, EMPLOYEE_TYPE_COLUMN)?;
        let ratings = rating_column(&batch, RATING_COLUMN, records.len())?;
        let scores = text_column(&batch, PERFORMANCE_SCORE_COLUMN)?;

        let rows = departments
            .into_iter()
            .zip(statuses)
            .zip(types)
            .zip(ratings)
            .zip(scores)
            .map(
                |((((department, status), employee_type), rating), performance_score)| {
                    EmployeeRecord {
                        department,
                        status,
                        employee_type,
                        rating,
                        performance_score,
                    }
                },
            );
        records.extend(rows);
    }

    Ok(EmployeeDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn named_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn text_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<String>>, LoadError> {
    let utf8 = cast(named_column(batch, name)?.as_ref(), &DataType::Utf8)?;
    Ok(utf8
        .as_string::<i32>()
        .iter()
        .map(text_cell)
        .collect())
}

fn is_text(data_type: &DataType) -> bool {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => true,
        DataType::Dictionary(_, values) => is_text(values),
        _ => false,
    }
}

/// `first_row` is the dataset row of the batch's first element, used in
/// `InvalidRating` errors.
fn rating_column(
    batch: &RecordBatch,
    name: &str,
    first_row: usize,
) -> Result<Vec<Option<f64>>, LoadError> {
    let column = named_column(batch, name)?;

    // Text goes through the same NA handling as CSV cells.
    if is_text(column.data_type()) {
        let utf8 = cast(column.as_ref(), &DataType::Utf8)?;
        return utf8
            .as_string::<i32>()
            .iter()
            .enumerate()
            .map(|(i, cell)| parse_rating(cell, first_row + i))
            .collect();
    }

    // Unsafe casts fail instead of silently nulling unparsable values.
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    let floats = cast_with_options(column.as_ref(), &DataType::Float64, &options)?;
    Ok(floats
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| v.and_then(finite))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn na_tokens_become_nulls() {
        assert_eq!(text_cell(Some("")), None);
        assert_eq!(text_cell(Some("N/A")), None);
        assert_eq!(text_cell(Some("Sales")), Some("Sales".to_string()));
        assert_eq!(parse_rating(Some(" nan "), 0).unwrap(), None);
        assert_eq!(parse_rating(Some("4"), 0).unwrap(), Some(4.0));
    }

    #[test]
    fn non_finite_ratings_are_nulls() {
        for raw in ["NAN", "inf", "-infinity", "+Inf"] {
            assert_eq!(parse_rating(Some(raw), 0).unwrap(), None, "{raw}");
        }
        let json: JsonValue = serde_json::json!(2.5);
        assert_eq!(json_rating(&json, 0).unwrap(), Some(2.5));
    }

    #[test]
    fn text_types_are_recognised_through_dictionaries() {
        assert!(is_text(&DataType::LargeUtf8));
        assert!(is_text(&DataType::Dictionary(
            Box::new(DataType::Int32),
            Box::new(DataType::Utf8)
        )));
        assert!(!is_text(&DataType::Int64));
    }

    #[test]
    fn bad_rating_reports_its_row() {
        match parse_rating(Some("excellent"), 7) {
            Err(LoadError::InvalidRating { row, value }) => {
                assert_eq!(row, 7);
                assert_eq!(value, "excellent");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn first_missing_column_is_named() {
        let err = require_columns(["DepartmentType", "EmployeeStatus", "EmployeeType"])
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(c) if c == RATING_COLUMN));
        assert!(require_columns(REQUIRED_COLUMNS).is_ok());
    }
}
