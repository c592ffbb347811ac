use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::{CategoryColumn, EmployeeDataset, EmployeeRecord};

/// Status value counted as "active".
pub const ACTIVE_STATUS: &str = "Active";

// ---------------------------------------------------------------------------
// Scalar aggregates
// ---------------------------------------------------------------------------

pub fn count<'a>(records: impl IntoIterator<Item = &'a EmployeeRecord>) -> usize {
    records.into_iter().count()
}

/// Rows whose status equals `status` exactly.
pub fn count_with_status<'a>(
    records: impl IntoIterator<Item = &'a EmployeeRecord>,
    status: &str,
) -> usize {
    records
        .into_iter()
        .filter(|r| r.status.as_deref() == Some(status))
        .count()
}

/// Arithmetic mean of the non-empty ratings; `None` when there are none.
pub fn mean_rating<'a>(records: impl IntoIterator<Item = &'a EmployeeRecord>) -> Option<f64> {
    let (sum, n) = records
        .into_iter()
        .filter_map(|r| r.rating)
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ---------------------------------------------------------------------------
// ValueCounts – distinct value → occurrences
// ---------------------------------------------------------------------------

/// Occurrence count of each distinct non-null value of a column.
///
/// Entries are ordered by count (descending); equal counts keep the order in
/// which the values were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueCounts {
    entries: Vec<(String, usize)>,
}

impl ValueCounts {
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn value_counts<'a>(
    records: impl IntoIterator<Item = &'a EmployeeRecord>,
    column: CategoryColumn,
) -> ValueCounts {
    let mut entries: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for value in records.into_iter().filter_map(|r| r.category(column)) {
        match slot.get(value) {
            Some(&i) => entries[i].1 += 1,
            None => {
                slot.insert(value, entries.len());
                entries.push((value.to_string(), 1));
            }
        }
    }

    // Stable sort: ties stay in first-observed order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    ValueCounts { entries }
}

// ---------------------------------------------------------------------------
// GroupMeans – mean rating per group
// ---------------------------------------------------------------------------

/// Mean rating per distinct group value, ordered by group key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupMeans {
    entries: Vec<(String, f64)>,
}

impl GroupMeans {
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn get(&self, group: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, m)| *m)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mean rating for each value of `group`. Rows with an empty group or rating
/// are skipped, so groups without a rated row never appear.
pub fn mean_rating_by<'a>(
    records: impl IntoIterator<Item = &'a EmployeeRecord>,
    group: CategoryColumn,
) -> GroupMeans {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        if let (Some(key), Some(rating)) = (r.category(group), r.rating) {
            let acc = sums.entry(key).or_insert((0.0, 0));
            acc.0 += rating;
            acc.1 += 1;
        }
    }
    GroupMeans {
        entries: sums
            .into_iter()
            .map(|(key, (sum, n))| (key.to_string(), sum / n as f64))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Summary – every aggregate the dashboard shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub active: usize,
    pub mean_rating: Option<f64>,
    pub by_department: ValueCounts,
    pub by_employee_type: ValueCounts,
    pub by_performance_score: ValueCounts,
    pub rating_by_department: GroupMeans,
}

impl Summary {
    pub fn compute(dataset: &EmployeeDataset, view: &FilteredView) -> Self {
        Summary {
            total: count(view.records(dataset)),
            active: count_with_status(view.records(dataset), ACTIVE_STATUS),
            mean_rating: mean_rating(view.records(dataset)),
            by_department: value_counts(view.records(dataset), CategoryColumn::Department),
            by_employee_type: value_counts(view.records(dataset), CategoryColumn::EmployeeType),
            by_performance_score: value_counts(
                view.records(dataset),
                CategoryColumn::PerformanceScore,
            ),
            rating_by_department: mean_rating_by(
                view.records(dataset),
                CategoryColumn::Department,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterState};
    use crate::data::model::tests::record;
    use crate::data::model::RatingRange;

    fn scenario() -> EmployeeDataset {
        EmployeeDataset::from_records(vec![
            record("Sales", "Active", 2.0),
            record("Sales", "Active", 3.0),
            record("Sales", "Leave of Absence", 4.0),
            record("Eng", "Active", 5.0),
            record("Eng", "Voluntarily Terminated", 1.0),
        ])
    }

    #[test]
    fn sales_scenario() {
        let ds = scenario();
        let mut filters = FilterState::initial(&ds);
        filters.departments = ["Sales".to_string()].into();
        filters.rating = RatingRange::new(0.0, 5.0);
        let summary = Summary::compute(&ds, &filter(&ds, &filters));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.mean_rating, Some(3.0));
        assert_eq!(summary.rating_by_department.entries(), [("Sales".to_string(), 3.0)]);
    }

    #[test]
    fn empty_view_is_zero_and_undefined() {
        let ds = scenario();
        let summary = Summary::compute(&ds, &FilteredView::default());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.active, 0);
        assert_eq!(summary.mean_rating, None);
        assert!(summary.by_department.is_empty());
        assert!(summary.rating_by_department.is_empty());
    }

    #[test]
    fn value_counts_break_ties_by_first_seen() {
        let ds = EmployeeDataset::from_records(vec![
            record("Eng", "Active", 1.0),
            record("Sales", "Active", 1.0),
            record("Admin Offices", "Active", 1.0),
            record("Sales", "Active", 1.0),
            record("Eng", "Active", 1.0),
            record("Sales", "Active", 1.0),
        ]);
        let counts = value_counts(&ds.records, CategoryColumn::Department);
        assert_eq!(
            counts.entries(),
            [
                ("Sales".to_string(), 3),
                ("Eng".to_string(), 2),
                ("Admin Offices".to_string(), 1),
            ]
        );
    }

    #[test]
    fn total_equals_sum_of_counts() {
        let ds = scenario();
        let view = FilteredView::all(&ds);
        let summary = Summary::compute(&ds, &view);
        assert_eq!(summary.total, summary.by_department.total());
        assert_eq!(summary.total, summary.by_employee_type.total());
        assert_eq!(summary.total, summary.by_performance_score.total());
    }

    #[test]
    fn group_means_skip_unrated_rows() {
        let mut unrated = record("HR", "Active", 0.0);
        unrated.rating = None;
        let ds = EmployeeDataset::from_records(vec![
            unrated,
            record("Sales", "Active", 2.0),
            record("Eng", "Active", 4.0),
            record("Sales", "Active", 5.0),
        ]);
        let means = mean_rating_by(&ds.records, CategoryColumn::Department);
        assert_eq!(means.get("HR"), None);
        assert_eq!(means.get("Sales"), Some(3.5));
        // Ordered by group key.
        assert_eq!(means.entries()[0].0, "Eng");
        assert_eq!(mean_rating(&ds.records), Some(11.0 / 3.0));
    }
}
