use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub const DEPARTMENT_COLUMN: &str = "DepartmentType";
pub const STATUS_COLUMN: &str = "EmployeeStatus";
pub const EMPLOYEE_TYPE_COLUMN: &str = "EmployeeType";
pub const RATING_COLUMN: &str = "Current Employee Rating";
pub const PERFORMANCE_SCORE_COLUMN: &str = "Performance Score";

/// Every column the loader requires, in drill-down table order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    DEPARTMENT_COLUMN,
    STATUS_COLUMN,
    EMPLOYEE_TYPE_COLUMN,
    RATING_COLUMN,
    PERFORMANCE_SCORE_COLUMN,
];

/// The categorical (string-valued) columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryColumn {
    Department,
    Status,
    EmployeeType,
    PerformanceScore,
}

impl CategoryColumn {
    pub const ALL: [CategoryColumn; 4] = [
        CategoryColumn::Department,
        CategoryColumn::Status,
        CategoryColumn::EmployeeType,
        CategoryColumn::PerformanceScore,
    ];
}

// ---------------------------------------------------------------------------
// RatingRange – inclusive numeric interval
// ---------------------------------------------------------------------------

/// Inclusive `[lo, hi]` interval over `Current Employee Rating`.
///
/// `lo > hi` is a legal, empty interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRange {
    pub lo: f64,
    pub hi: f64,
}

impl RatingRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }
}

impl fmt::Display for RatingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

// ---------------------------------------------------------------------------
// EmployeeRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single employee (one row of the source table). `None` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EmployeeRecord {
    #[serde(rename = "DepartmentType")]
    pub department: Option<String>,
    #[serde(rename = "EmployeeStatus")]
    pub status: Option<String>,
    #[serde(rename = "EmployeeType")]
    pub employee_type: Option<String>,
    #[serde(rename = "Current Employee Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Performance Score")]
    pub performance_score: Option<String>,
}

impl EmployeeRecord {
    /// Value of a categorical column, if present.
    pub fn category(&self, column: CategoryColumn) -> Option<&str> {
        match column {
            CategoryColumn::Department => self.department.as_deref(),
            CategoryColumn::Status => self.status.as_deref(),
            CategoryColumn::EmployeeType => self.employee_type.as_deref(),
            CategoryColumn::PerformanceScore => self.performance_score.as_deref(),
        }
    }

    /// Whether any of the three filtered fields is empty.
    pub fn has_null_filter_field(&self) -> bool {
        self.department.is_none() || self.status.is_none() || self.rating.is_none()
    }
}

// ---------------------------------------------------------------------------
// EmployeeDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed filter options.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDataset {
    /// All records in file order.
    pub records: Vec<EmployeeRecord>,
    /// For each categorical column, its distinct non-null values in
    /// first-observed order.
    pub unique_values: BTreeMap<CategoryColumn, Vec<String>>,
    /// Observed `[min, max]` of non-null ratings; `None` if there are none.
    pub rating_bounds: Option<RatingRange>,
}

impl EmployeeDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        let unique_values = CategoryColumn::ALL
            .iter()
            .map(|&col| (col, distinct_in_order(&records, col)))
            .collect();

        let rating_bounds = records
            .iter()
            .filter_map(|r| r.rating)
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<RatingRange>, v| match acc {
                None => Some(RatingRange::new(v, v)),
                Some(r) => Some(RatingRange::new(r.lo.min(v), r.hi.max(v))),
            });

        EmployeeDataset {
            records,
            unique_values,
            rating_bounds,
        }
    }

    /// Distinct values of `column`, first-observed order.
    pub fn values(&self, column: CategoryColumn) -> &[String] {
        self.unique_values
            .get(&column)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn departments(&self) -> &[String] {
        self.values(CategoryColumn::Department)
    }

    pub fn statuses(&self) -> &[String] {
        self.values(CategoryColumn::Status)
    }

    /// Number of records with an empty department, status or rating.
    pub fn incomplete_rows(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.has_null_filter_field())
            .count()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct_in_order(records: &[EmployeeRecord], column: CategoryColumn) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.category(column))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
