//! Charts module - chart specifications, builders and rendering

mod builder;
mod plotter;
mod spec;

pub use builder::build_dashboard;
pub use plotter::ChartPlotter;
pub use spec::{Dashboard, DashboardCell};
