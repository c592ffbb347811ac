//! egui rendering of the sidebar, top bar and dashboard.

pub mod charts;
pub mod dashboard;
pub mod panels;
pub mod table;
