//! Employee analytics dashboard: load an employee table once, filter it by
//! department, status and rating, and chart the aggregates.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod present;
pub mod session;
pub mod state;
pub mod ui;
