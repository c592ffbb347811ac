use std::collections::BTreeSet;

use super::model::{EmployeeDataset, EmployeeRecord, RatingRange};

// ---------------------------------------------------------------------------
// Filter predicates: selected departments, selected statuses, rating range
// ---------------------------------------------------------------------------

/// The three active predicates. All must hold for a record to pass.
///
/// Unlike a "no filter" convention, an empty selection set matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub departments: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
    pub rating: RatingRange,
}

impl FilterState {
    /// Everything selected, full observed rating range.
    pub fn initial(dataset: &EmployeeDataset) -> Self {
        FilterState {
            departments: dataset.departments().iter().cloned().collect(),
            statuses: dataset.statuses().iter().cloned().collect(),
            rating: dataset
                .rating_bounds
                .unwrap_or(RatingRange::new(0.0, 0.0)),
        }
    }

    /// Whether `record` satisfies all three predicates.
    ///
    /// An empty department, status or rating never matches.
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        let department = record
            .department
            .as_ref()
            .is_some_and(|d| self.departments.contains(d));
        let status = record
            .status
            .as_ref()
            .is_some_and(|s| self.statuses.contains(s));
        let rating = record.rating.is_some_and(|r| self.rating.contains(r));
        department && status && rating
    }
}

// ---------------------------------------------------------------------------
// FilteredView – positions of the records passing a FilterState
// ---------------------------------------------------------------------------

/// Indices (into `EmployeeDataset::records`) of the records passing the
/// filters, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// A view over every record.
    pub fn all(dataset: &EmployeeDataset) -> Self {
        FilteredView {
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The records of this view, in dataset order.
    pub fn records<'a>(
        &'a self,
        dataset: &'a EmployeeDataset,
    ) -> impl Iterator<Item = &'a EmployeeRecord> + 'a {
        self.indices.iter().filter_map(|&i| dataset.records.get(i))
    }

    /// Apply `filters` again on top of this view.
    pub fn refine(&self, dataset: &EmployeeDataset, filters: &FilterState) -> FilteredView {
        FilteredView {
            indices: self
                .indices
                .iter()
                .copied()
                .filter(|&i| dataset.records.get(i).is_some_and(|r| filters.matches(r)))
                .collect(),
        }
    }
}

/// Reduce the dataset to the records passing all active filters.
pub fn filter(dataset: &EmployeeDataset, filters: &FilterState) -> FilteredView {
    if filters.departments.is_empty() || filters.statuses.is_empty() || filters.rating.is_inverted()
    {
        return FilteredView::default();
    }
    FilteredView {
        indices: dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| filters.matches(r))
            .map(|(i, _)| i)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn scenario() -> EmployeeDataset {
        EmployeeDataset::from_records(vec![
            record("Sales", "Active", 2.0),
            record("Sales", "Active", 3.0),
            record("Sales", "Leave of Absence", 4.0),
            record("Eng", "Active", 5.0),
            record("Eng", "Voluntarily Terminated", 1.0),
        ])
    }

    fn varied() -> EmployeeDataset {
        let depts = ["Sales", "Eng", "Production", "IT/IS"];
        let statuses = ["Active", "Future Start", "Terminated for Cause"];
        let mut records: Vec<_> = (0..60)
            .map(|i| {
                record(
                    depts[i % depts.len()],
                    statuses[(i / 2) % statuses.len()],
                    (i % 5) as f64 + 1.0,
                )
            })
            .collect();
        records[7].department = None;
        records[11].status = None;
        records[13].rating = None;
        EmployeeDataset::from_records(records)
    }

    fn sample_states(ds: &EmployeeDataset) -> Vec<FilterState> {
        let full = FilterState::initial(ds);
        let mut sales_only = full.clone();
        sales_only.departments = ["Sales".to_string()].into();
        let mut narrow = full.clone();
        narrow.rating = RatingRange::new(2.0, 3.5);
        let mut mixed = narrow.clone();
        mixed.statuses = ["Active".to_string(), "Future Start".to_string()].into();
        mixed.departments = ["Eng".to_string(), "IT/IS".to_string()].into();
        vec![full, sales_only, narrow, mixed]
    }

    #[test]
    fn sales_only_keeps_three_rows() {
        let ds = scenario();
        let mut filters = FilterState::initial(&ds);
        filters.departments = ["Sales".to_string()].into();
        filters.rating = RatingRange::new(0.0, 5.0);
        let view = filter(&ds, &filters);
        assert_eq!(view.indices(), [0, 1, 2]);
    }

    #[test]
    fn empty_status_selection_yields_nothing() {
        let ds = scenario();
        let mut filters = FilterState::initial(&ds);
        filters.statuses.clear();
        assert!(filter(&ds, &filters).is_empty());
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let ds = scenario();
        let mut filters = FilterState::initial(&ds);
        filters.rating = RatingRange::new(4.0, 1.0);
        assert!(filter(&ds, &filters).is_empty());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = scenario();
        let mut filters = FilterState::initial(&ds);
        filters.rating = RatingRange::new(2.0, 4.0);
        assert_eq!(filter(&ds, &filters).indices(), [0, 1, 2]);
    }

    #[test]
    fn null_fields_never_match() {
        let ds = varied();
        let filters = FilterState::initial(&ds);
        let view = filter(&ds, &filters);
        for i in [7, 11, 13] {
            assert!(!view.indices().contains(&i));
        }
        assert_eq!(view.len(), ds.len() - 3);
    }

    #[test]
    fn view_is_sound_and_complete() {
        let ds = varied();
        for filters in sample_states(&ds) {
            let view = filter(&ds, &filters);
            for r in view.records(&ds) {
                assert!(filters.matches(r));
            }
            for (i, r) in ds.records.iter().enumerate() {
                assert_eq!(filters.matches(r), view.indices().contains(&i));
            }
        }
    }

    #[test]
    fn refiltering_is_idempotent() {
        let ds = varied();
        for filters in sample_states(&ds) {
            let view = filter(&ds, &filters);
            assert_eq!(view.refine(&ds, &filters), view);
        }
    }

    #[test]
    fn initial_state_shows_complete_dataset() {
        let ds = scenario();
        let view = filter(&ds, &FilterState::initial(&ds));
        assert_eq!(view, FilteredView::all(&ds));
    }
}
