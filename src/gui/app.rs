//! Sales Dashboard Main Application
//! Header on top, chart grid in the center. The dashboard is rebuilt
//! explicitly on refresh events instead of on every frame.

use crate::charts::build_dashboard;
use crate::config::DashboardConfig;
use crate::data::DatasetRegistry;
use crate::gui::fonts;
use crate::gui::header::{self, Header, HeaderAction};
use crate::gui::ChartViewer;

/// Main application window.
pub struct DashboardApp {
    registry: DatasetRegistry,
    config: DashboardConfig,
    header: Header,
    chart_viewer: ChartViewer,

    last_screen_size: Option<egui::Vec2>,
    refresh_count: u64,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        registry: DatasetRegistry,
        config: DashboardConfig,
    ) -> Self {
        fonts::install_font_chain(&cc.egui_ctx, &config.font_family);

        let mut app = Self {
            header: Header::new(&config.page_title),
            registry,
            config,
            chart_viewer: ChartViewer::new(),
            last_screen_size: None,
            refresh_count: 0,
        };
        app.refresh("startup");
        app
    }

    /// Rebuild all chart specifications from the registry.
    fn refresh(&mut self, reason: &str) {
        match build_dashboard(&self.registry, &self.config) {
            Ok(dashboard) => {
                self.refresh_count += 1;
                let cells = dashboard.cells.len();
                let points: usize = dashboard.cells.iter().map(|c| c.spec.point_count()).sum();
                tracing::debug!(
                    reason,
                    refresh = self.refresh_count,
                    cells,
                    points,
                    "dashboard rebuilt"
                );
                self.chart_viewer.set_dashboard(dashboard);
                self.header
                    .set_status(&header::ready_status(cells, self.refresh_count));
            }
            Err(e) => {
                tracing::error!(reason, error = %e, "dashboard build failed");
                self.header.set_error(&e.to_string());
            }
        }
    }

    /// Copy the current dashboard specification to the clipboard as JSON
    fn handle_copy_spec_json(&mut self, ctx: &egui::Context) {
        let Some(dashboard) = &self.chart_viewer.dashboard else {
            self.header.set_error(header::NOTHING_TO_COPY);
            return;
        };

        match dashboard.to_json() {
            Ok(json) => {
                tracing::info!(bytes = json.len(), "spec JSON copied to clipboard");
                ctx.copy_text(json);
                self.header.set_status(header::SPEC_COPIED);
            }
            Err(e) => {
                tracing::error!(error = %e, "spec serialization failed");
                self.header.set_error(&e.to_string());
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Window resize counts as a refresh event
        let screen_size = ctx.screen_rect().size();
        if self.last_screen_size != Some(screen_size) {
            if self.last_screen_size.is_some() {
                self.refresh("resize");
            }
            self.last_screen_size = Some(screen_size);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            match self.header.show(ui) {
                HeaderAction::Refresh => self.refresh("button"),
                HeaderAction::CopySpecJson => self.handle_copy_spec_json(ctx),
                HeaderAction::None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, self.config.plot_height, self.config.card_spacing);
        });
    }
}
