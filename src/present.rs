//! Render-ready dashboard model.
//!
//! Everything the central panel draws is computed here, so the egui code in
//! `ui` only lays out widgets. Identical inputs always produce an identical
//! model.

use eframe::egui::Color32;

use crate::color::ColorMap;
use crate::data::aggregate::{GroupMeans, Summary, ValueCounts};
use crate::data::filter::FilteredView;
use crate::data::model::{CategoryColumn, EmployeeDataset, EmployeeRecord, REQUIRED_COLUMNS};

/// Inner radius of the donut as a fraction of its outer radius.
pub const DONUT_HOLE: f32 = 0.4;

/// Shown where a mean is undefined.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Text drawn on top of the bar.
    pub text: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    /// Share of the whole, in `[0, 1]`.
    pub fraction: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutSeries {
    pub title: &'static str,
    pub slices: Vec<Slice>,
    pub hole: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailTable {
    pub title: &'static str,
    pub columns: [&'static str; 5],
    pub rows: Vec<[String; 5]>,
}

/// The whole central panel, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModel {
    pub metrics: [MetricCard; 3],
    pub department_bars: BarSeries,
    pub performance_donut: DonutSeries,
    pub type_bars: BarSeries,
    pub rating_bars: BarSeries,
    pub details: DetailTable,
}

/// Mean rating rounded to two decimals, or "N/A" when undefined.
pub fn format_rating(mean: Option<f64>) -> String {
    match mean {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

impl DashboardModel {
    pub fn build(dataset: &EmployeeDataset, view: &FilteredView, summary: &Summary) -> Self {
        let departments = ColorMap::new(dataset.departments().iter().map(String::as_str));
        let colors_of = |column| ColorMap::new(dataset.values(column).iter().map(String::as_str));

        DashboardModel {
            metrics: [
                MetricCard {
                    label: "Total Employees",
                    value: summary.total.to_string(),
                },
                MetricCard {
                    label: "Active Employees",
                    value: summary.active.to_string(),
                },
                MetricCard {
                    label: "Avg Performance Rating",
                    value: format_rating(summary.mean_rating),
                },
            ],
            department_bars: count_bars(
                "Employees by Department",
                "Department",
                &summary.by_department,
                &departments,
            ),
            performance_donut: donut(
                "Performance Score Distribution",
                &summary.by_performance_score,
                &colors_of(CategoryColumn::PerformanceScore),
            ),
            type_bars: count_bars(
                "Employee Type Breakdown",
                "Employee Type",
                &summary.by_employee_type,
                &colors_of(CategoryColumn::EmployeeType),
            ),
            rating_bars: mean_bars(
                "Average Performance Rating by Department",
                &summary.rating_by_department,
                &departments,
            ),
            details: DetailTable {
                title: "Employee Details (Drill-Down View)",
                columns: REQUIRED_COLUMNS,
                rows: view.records(dataset).map(detail_row).collect(),
            },
        }
    }
}

fn count_bars(
    title: &'static str,
    x_label: &'static str,
    counts: &ValueCounts,
    colors: &ColorMap,
) -> BarSeries {
    BarSeries {
        title,
        x_label,
        y_label: "Employees",
        bars: counts
            .entries()
            .iter()
            .map(|(label, n)| Bar {
                label: label.clone(),
                value: *n as f64,
                text: n.to_string(),
                color: colors.color_for(label),
            })
            .collect(),
    }
}

fn mean_bars(title: &'static str, means: &GroupMeans, colors: &ColorMap) -> BarSeries {
    BarSeries {
        title,
        x_label: "DepartmentType",
        y_label: "Current Employee Rating",
        bars: means
            .entries()
            .iter()
            .map(|(label, mean)| Bar {
                label: label.clone(),
                value: *mean,
                text: format!("{mean:.2}"),
                color: colors.color_for(label),
            })
            .collect(),
    }
}

fn donut(title: &'static str, counts: &ValueCounts, colors: &ColorMap) -> DonutSeries {
    let total = counts.total();
    DonutSeries {
        title,
        hole: DONUT_HOLE,
        slices: counts
            .entries()
            .iter()
            .map(|(label, n)| Slice {
                label: label.clone(),
                count: *n,
                fraction: if total == 0 { 0.0 } else { *n as f64 / total as f64 },
                color: colors.color_for(label),
            })
            .collect(),
    }
}

fn detail_row(record: &EmployeeRecord) -> [String; 5] {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        text(&record.department),
        text(&record.status),
        text(&record.employee_type),
        record.rating.map(|r| r.to_string()).unwrap_or_default(),
        text(&record.performance_score),
    ]
}
