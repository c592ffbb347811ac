use std::sync::Arc;

use crate::data::aggregate::Summary;
use crate::data::filter::{filter, FilterState, FilteredView};
use crate::data::model::EmployeeDataset;
use crate::present::DashboardModel;

// ---------------------------------------------------------------------------
// Control-change events
// ---------------------------------------------------------------------------

/// One user interaction with the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    ToggleDepartment(String),
    SelectAllDepartments,
    SelectNoDepartments,
    ToggleStatus(String),
    SelectAllStatuses,
    SelectNoStatuses,
    SetRatingLow(f64),
    SetRatingHigh(f64),
    /// Back to everything selected and the full rating range.
    Reset,
}

// ---------------------------------------------------------------------------
// Session – one user's filters and derived outputs
// ---------------------------------------------------------------------------

/// Filter state plus everything derived from it, for one shared dataset.
///
/// Outputs are recomputed synchronously, once per applied event batch that
/// changed something.
pub struct Session {
    dataset: Arc<EmployeeDataset>,
    filters: FilterState,
    view: FilteredView,
    summary: Summary,
    model: DashboardModel,
    recomputations: u64,
}

impl Session {
    pub fn new(dataset: Arc<EmployeeDataset>) -> Self {
        let filters = FilterState::initial(&dataset);
        let view = filter(&dataset, &filters);
        let summary = Summary::compute(&dataset, &view);
        let model = DashboardModel::build(&dataset, &view, &summary);
        Session {
            dataset,
            filters,
            view,
            summary,
            model,
            recomputations: 0,
        }
    }

    pub fn dataset(&self) -> &Arc<EmployeeDataset> {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    /// How many times the filter → aggregate → present pipeline re-ran.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn apply(&mut self, event: DashboardEvent) -> bool {
        self.apply_all([event])
    }

    /// Apply a batch of events, then recompute once if any of them counted.
    /// Returns whether a recompute happened.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = DashboardEvent>) -> bool {
        let mut changed = false;
        for event in events {
            changed |= self.update_filters(event);
        }
        if changed {
            self.recompute();
        }
        changed
    }

    fn update_filters(&mut self, event: DashboardEvent) -> bool {
        let before = self.filters.clone();
        match event {
            DashboardEvent::ToggleDepartment(d) => toggle(&mut self.filters.departments, d),
            DashboardEvent::SelectAllDepartments => {
                self.filters.departments = self.dataset.departments().iter().cloned().collect();
            }
            DashboardEvent::SelectNoDepartments => self.filters.departments.clear(),
            DashboardEvent::ToggleStatus(s) => toggle(&mut self.filters.statuses, s),
            DashboardEvent::SelectAllStatuses => {
                self.filters.statuses = self.dataset.statuses().iter().cloned().collect();
            }
            DashboardEvent::SelectNoStatuses => self.filters.statuses.clear(),
            DashboardEvent::SetRatingLow(lo) => self.filters.rating.lo = lo,
            DashboardEvent::SetRatingHigh(hi) => self.filters.rating.hi = hi,
            DashboardEvent::Reset => {
                self.filters = FilterState::initial(&self.dataset);
                log::debug!("Filters reset");
                // Reset always re-evaluates, even from the initial state.
                return true;
            }
        }
        self.filters != before
    }

    fn recompute(&mut self) {
        self.view = filter(&self.dataset, &self.filters);
        self.summary = Summary::compute(&self.dataset, &self.view);
        self.model = DashboardModel::build(&self.dataset, &self.view, &self.summary);
        self.recomputations += 1;
        log::debug!(
            "Recomputed dashboard: {} of {} employees visible",
            self.view.len(),
            self.dataset.len()
        );
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::RatingRange;

    fn session() -> Session {
        Session::new(Arc::new(EmployeeDataset::from_records(vec![
            record("Sales", "Active", 2.0),
            record("Sales", "Active", 3.0),
            record("Sales", "Leave of Absence", 4.0),
            record("Eng", "Active", 5.0),
            record("Eng", "Voluntarily Terminated", 1.0),
        ])))
    }

    #[test]
    fn starts_with_full_view() {
        let s = session();
        assert_eq!(s.view().len(), 5);
        assert_eq!(s.filters().rating, RatingRange::new(1.0, 5.0));
        assert_eq!(s.recomputations(), 0);
    }

    #[test]
    fn toggling_a_department_recomputes_once() {
        let mut s = session();
        assert!(s.apply(DashboardEvent::ToggleDepartment("Eng".to_string())));
        assert_eq!(s.summary().total, 3);
        assert_eq!(s.summary().mean_rating, Some(3.0));
        assert_eq!(s.recomputations(), 1);

        s.apply(DashboardEvent::ToggleDepartment("Eng".to_string()));
        assert_eq!(s.summary().total, 5);
    }

    #[test]
    fn batch_recomputes_once() {
        let mut s = session();
        s.apply_all([
            DashboardEvent::SetRatingLow(2.0),
            DashboardEvent::SetRatingHigh(4.0),
            DashboardEvent::ToggleStatus("Leave of Absence".to_string()),
        ]);
        assert_eq!(s.recomputations(), 1);
        assert_eq!(s.summary().total, 2);
    }

    #[test]
    fn unchanged_filters_do_not_recompute() {
        let mut s = session();
        assert!(!s.apply(DashboardEvent::SelectAllStatuses));
        assert!(!s.apply(DashboardEvent::SetRatingLow(1.0)));
        assert_eq!(s.recomputations(), 0);
    }

    #[test]
    fn no_statuses_means_no_rows() {
        let mut s = session();
        s.apply(DashboardEvent::SelectNoStatuses);
        assert_eq!(s.summary().total, 0);
        assert_eq!(s.model().metrics[2].value, "N/A");
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let mut s = session();
        s.apply_all([
            DashboardEvent::SetRatingLow(4.0),
            DashboardEvent::SetRatingHigh(1.0),
        ]);
        assert_eq!(s.summary().total, 0);
        assert_eq!(s.summary().mean_rating, None);
        assert_eq!(s.model().metrics[2].value, "N/A");
    }

    #[test]
    fn reset_restores_everything_with_one_recompute() {
        let mut s = session();
        s.apply_all([
            DashboardEvent::SelectNoDepartments,
            DashboardEvent::SetRatingHigh(2.5),
        ]);
        assert_eq!(s.view().len(), 0);

        assert!(s.apply(DashboardEvent::Reset));
        assert_eq!(s.recomputations(), 2);
        assert_eq!(s.view(), &FilteredView::all(s.dataset()));
        assert_eq!(s.filters(), &FilterState::initial(s.dataset()));
        assert_eq!(s.filters().rating, RatingRange::new(1.0, 5.0));
    }

    #[test]
    fn sessions_share_one_dataset() {
        let a = session();
        let mut b = Session::new(Arc::clone(a.dataset()));
        b.apply(DashboardEvent::SelectNoDepartments);
        assert_eq!(a.view().len(), 5);
        assert_eq!(b.view().len(), 0);
        assert_eq!(Arc::strong_count(a.dataset()), 2);
    }
}
