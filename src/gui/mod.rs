//! GUI module - User interface components

mod app;
mod chart_viewer;
mod fonts;
pub mod header;

pub use app::DashboardApp;
pub use chart_viewer::ChartViewer;
