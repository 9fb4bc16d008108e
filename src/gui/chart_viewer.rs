//! Chart Viewer Widget
//! Central scrollable panel showing the dashboard as a fixed 3x2 grid of cards.

use crate::charts::{ChartPlotter, Dashboard, DashboardCell};
use egui::{RichText, ScrollArea};

/// Grid of chart cards for the current dashboard.
#[derive(Default)]
pub struct ChartViewer {
    pub dashboard: Option<Dashboard>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dashboard(&mut self, dashboard: Dashboard) {
        self.dashboard = Some(dashboard);
    }

    /// Draw every grid row; each cell takes an equal share of the width.
    pub fn show(&self, ui: &mut egui::Ui, plot_height: f32, spacing: f32) {
        let Some(dashboard) = &self.dashboard else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("데이터 없음").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.x = spacing;

                for row in 0..dashboard.rows {
                    ui.columns(dashboard.columns, |columns| {
                        for (column_ui, cell) in columns.iter_mut().zip(dashboard.row(row)) {
                            Self::draw_chart_card(column_ui, cell, plot_height);
                        }
                    });
                    ui.add_space(spacing);
                }

                ui.separator();
                ui.label(RichText::new(&dashboard.caption).size(11.0).weak());
            });
    }

    /// Subheading plus a full-width plot
    fn draw_chart_card(ui: &mut egui::Ui, cell: &DashboardCell, plot_height: f32) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&cell.subheading).size(16.0).strong());
                ui.add_space(8.0);

                let id = format!("cell_{}_{}", cell.row, cell.col);
                ChartPlotter::draw_chart(ui, &id, &cell.spec, plot_height);
            });
    }
}
