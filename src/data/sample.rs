//! Deterministic synthetic employee tables for demos and tests.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::model::{
    EmployeeRecord, DEPARTMENT_COLUMN, EMPLOYEE_TYPE_COLUMN, PERFORMANCE_SCORE_COLUMN,
    RATING_COLUMN, REQUIRED_COLUMNS, STATUS_COLUMN,
};

const DEPARTMENTS: [(&str, u64); 6] = [
    ("Production", 45),
    ("IT/IS", 15),
    ("Sales", 12),
    ("Software Engineering", 12),
    ("Admin Offices", 10),
    ("Executive Office", 6),
];

const STATUSES: [(&str, u64); 5] = [
    ("Active", 60),
    ("Voluntarily Terminated", 18),
    ("Terminated for Cause", 8),
    ("Future Start", 8),
    ("Leave of Absence", 6),
];

const EMPLOYEE_TYPES: [(&str, u64); 3] = [("Full-Time", 55), ("Contract", 25), ("Part-Time", 20)];

/// Minimal deterministic PRNG (xoshiro256**)
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Pick from `(value, weight)` pairs proportionally to weight.
    fn weighted<'a>(&mut self, choices: &[(&'a str, u64)]) -> &'a str {
        let total: u64 = choices.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_u64() % total.max(1);
        for &(value, weight) in choices {
            if roll < weight {
                return value;
            }
            roll -= weight;
        }
        choices[choices.len() - 1].0
    }
}

/// Performance score band for a 1–5 rating.
fn score_for(rating: f64) -> &'static str {
    match rating as u8 {
        5 => "Exceeds",
        3 | 4 => "Fully Meets",
        2 => "Needs Improvement",
        _ => "PIP",
    }
}

/// Generate `rows` employees. The same seed always yields the same table.
pub fn generate_records(rows: usize, seed: u64) -> Vec<EmployeeRecord> {
    let mut rng = SimpleRng::new(seed);
    (0..rows)
        .map(|_| {
            // Ratings cluster around 3, like a typical review cycle.
            let rating = match rng.next_u64() % 20 {
                0 => 1.0,
                1..=3 => 2.0,
                4..=12 => 3.0,
                13..=17 => 4.0,
                _ => 5.0,
            };
            EmployeeRecord {
                department: Some(rng.weighted(&DEPARTMENTS).to_string()),
                status: Some(rng.weighted(&STATUSES).to_string()),
                employee_type: Some(rng.weighted(&EMPLOYEE_TYPES).to_string()),
                rating: Some(rating),
                performance_score: Some(score_for(rating).to_string()),
            }
        })
        .collect()
}

/// Columnar form of `records`, with nullable columns.
pub fn record_batch(records: &[EmployeeRecord]) -> Result<RecordBatch> {
    let text = |f: fn(&EmployeeRecord) -> Option<&str>| {
        StringArray::from(records.iter().map(f).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(DEPARTMENT_COLUMN, DataType::Utf8, true),
        Field::new(STATUS_COLUMN, DataType::Utf8, true),
        Field::new(EMPLOYEE_TYPE_COLUMN, DataType::Utf8, true),
        Field::new(RATING_COLUMN, DataType::Float64, true),
        Field::new(PERFORMANCE_SCORE_COLUMN, DataType::Utf8, true),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(text(|r| r.department.as_deref())),
            Arc::new(text(|r| r.status.as_deref())),
            Arc::new(text(|r| r.employee_type.as_deref())),
            Arc::new(Float64Array::from(
                records.iter().map(|r| r.rating).collect::<Vec<_>>(),
            )),
            Arc::new(text(|r| r.performance_score.as_deref())),
        ],
    )
    .context("building record batch")
}

/// Write `records` to `path`; the format follows the extension.
pub fn write_file(path: &Path, records: &[EmployeeRecord]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let create = || File::create(path).with_context(|| format!("creating {}", path.display()));
    match ext.as_str() {
        "csv" => {
            // Header written up front so an empty table still has one.
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(create()?);
            writer
                .write_record(REQUIRED_COLUMNS)
                .context("writing CSV header")?;
            for record in records {
                writer.serialize(record).context("writing CSV row")?;
            }
            writer.flush().context("flushing CSV")?;
        }
        "json" => {
            serde_json::to_writer_pretty(BufWriter::new(create()?), records)
                .context("writing JSON")?;
        }
        "parquet" | "pq" => {
            let batch = record_batch(records)?;
            let mut writer = ArrowWriter::try_new(create()?, batch.schema(), None)
                .context("creating parquet writer")?;
            writer.write(&batch).context("writing parquet batch")?;
            writer.close().context("closing parquet writer")?;
        }
        other => bail!("Unsupported output extension: .{other}"),
    }
    Ok(())
}
