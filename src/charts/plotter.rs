//! Chart Plotter Module
//! Draws chart specifications as interactive egui_plot plots.

use crate::charts::spec::{AxisSide, ChartKind, ChartSpec, Series, SeriesMode, XValues};
use egui::{Color32, RichText, Stroke};
use egui_plot::{
    AxisHints, Bar, BarChart, GridMark, HPlacement, Legend, Line, MarkerShape, Plot, PlotPoint,
    PlotPoints, PlotUi, Points, Polygon, Text,
};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

/// Plotly's default qualitative palette
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(239, 85, 59),
    Color32::from_rgb(0, 204, 150),
    Color32::from_rgb(171, 99, 250),
    Color32::from_rgb(255, 161, 90),
    Color32::from_rgb(25, 211, 243),
    Color32::from_rgb(255, 102, 146),
    Color32::from_rgb(182, 232, 128),
    Color32::from_rgb(255, 151, 255),
    Color32::from_rgb(254, 203, 82),
];

const BAR_WIDTH: f64 = 0.6;
const LINE_WIDTH: f32 = 2.0;
const MARKER_RADIUS: f32 = 3.5;
const SECONDARY_TICKS: usize = 10;
/// Arc segments for a full pie
const PIE_SEGMENTS: usize = 96;
const MAX_WEDGE_SWEEP: f64 = FRAC_PI_4;

/// Creates egui_plot visualizations from chart specifications.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw `spec` at the given height, filling the available width.
    pub fn draw_chart(ui: &mut egui::Ui, id: &str, spec: &ChartSpec, height: f32) {
        match spec.kind {
            ChartKind::Pie => Self::draw_pie_chart(ui, id, spec, height),
            ChartKind::Bar
            | ChartKind::Line
            | ChartKind::Scatter
            | ChartKind::Pareto
            | ChartKind::Bubble => Self::draw_cartesian_chart(ui, id, spec, height),
        }
    }

    /// Upper bound of the primary y range when a secondary axis is overlaid.
    ///
    /// Rounded up to ten "nice" steps so secondary ticks land on whole tenths.
    pub fn primary_top(max: f64) -> f64 {
        if !(max.is_finite() && max > 0.0) {
            return 1.0;
        }
        Self::nice_step(max, SECONDARY_TICKS) * SECONDARY_TICKS as f64
    }

    /// Map a secondary-axis value onto the primary coordinate system.
    pub fn to_primary(value: f64, range: [f64; 2], top: f64) -> f64 {
        (value - range[0]) / (range[1] - range[0]) * top
    }

    /// Inverse of [`Self::to_primary`].
    pub fn to_secondary(value: f64, range: [f64; 2], top: f64) -> f64 {
        range[0] + value / top * (range[1] - range[0])
    }

    fn nice_step(range: f64, target_steps: usize) -> f64 {
        let raw_step = range / target_steps as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let normalized = raw_step / magnitude;

        let nice = if normalized <= 1.0 {
            1.0
        } else if normalized <= 2.0 {
            2.0
        } else if normalized <= 5.0 {
            5.0
        } else {
            10.0
        };

        nice * magnitude
    }

    /// Outline of one pie wedge, counter-clockwise from `start` (radians).
    /// A positive `inner` radius gives a ring sector.
    pub fn pie_wedge(start: f64, sweep: f64, inner: f64, outer: f64) -> Vec<[f64; 2]> {
        let steps = ((sweep / TAU) * PIE_SEGMENTS as f64).ceil().max(1.0) as usize;
        let arc = |radius: f64, i: usize| {
            let angle = start + sweep * i as f64 / steps as f64;
            [radius * angle.cos(), radius * angle.sin()]
        };

        let mut points = Vec::with_capacity(2 * steps + 2);
        if inner <= 0.0 {
            points.push([0.0, 0.0]);
        }
        points.extend((0..=steps).map(|i| arc(outer, i)));
        if inner > 0.0 {
            points.extend((0..=steps).rev().map(|i| arc(inner, i)));
        }
        points
    }

    /// Slice order for a pie: largest first, ties in input order.
    pub fn pie_order(values: &[f64]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by(|&a, &b| {
            values[b]
                .partial_cmp(&values[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }

    /// Solid pie drawn as polygons, clockwise from twelve o'clock
    fn draw_pie_chart(ui: &mut egui::Ui, id: &str, spec: &ChartSpec, height: f32) {
        let Some(series) = spec.series.first() else {
            return;
        };
        let labels = match &series.x {
            XValues::Categories(c) => c.clone(),
            XValues::Numbers(n) => n.iter().map(|v| v.to_string()).collect(),
        };
        let total: f64 = series.y.iter().filter(|v| **v > 0.0).sum();
        let hole = spec.hole.clamp(0.0, 0.95);

        let mut plot = Plot::new(format!("pie_{}", id))
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(-1.1)
            .include_x(1.1)
            .include_y(-1.1)
            .include_y(1.1);
        if spec.show_legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            if total <= 0.0 {
                return;
            }

            let mut start = FRAC_PI_2;
            for idx in Self::pie_order(&series.y) {
                let value = series.y[idx].max(0.0);
                let share = value / total;
                let sweep = share * TAU;
                let color = Self::series_color(idx);

                // egui fills polygons as convex shapes, so wide slices go in chunks
                let chunks = (sweep / MAX_WEDGE_SWEEP).ceil().max(1.0) as usize;
                let chunk_sweep = sweep / chunks as f64;
                for c in 0..chunks {
                    let chunk_start = start - sweep + chunk_sweep * c as f64;
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(Self::pie_wedge(
                            chunk_start,
                            chunk_sweep,
                            hole,
                            1.0,
                        )))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, color))
                        .name(&labels[idx]),
                    );
                }

                if share > 0.03 {
                    let mid = start - sweep / 2.0;
                    let r = 0.5 + hole / 2.0;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(r * mid.cos(), r * mid.sin()),
                            RichText::new(format!("{:.1}%", share * 100.0))
                                .color(Color32::WHITE)
                                .strong(),
                        ),
                    );
                }
                start -= sweep;
            }
        });
    }

    /// Bar, line, scatter, bubble and Pareto charts
    fn draw_cartesian_chart(ui: &mut egui::Ui, id: &str, spec: &ChartSpec, height: f32) {
        let categories = spec.series.first().and_then(|s| match &s.x {
            XValues::Categories(c) => Some(c.clone()),
            XValues::Numbers(_) => None,
        });

        let x_title = spec.x_axis.title.clone().unwrap_or_default();
        let y_title = spec.y_axis.title.clone().unwrap_or_default();

        // Secondary values are drawn in primary coordinates scaled to `top`
        let secondary = spec.secondary_y_axis.as_ref().map(|axis| {
            let range = axis.range.unwrap_or([0.0, 100.0]);
            let primary_max = spec
                .series
                .iter()
                .filter(|s| s.y_axis == AxisSide::Left)
                .flat_map(|s| s.y.iter().copied())
                .fold(0.0, f64::max);
            (
                axis.title.clone().unwrap_or_default(),
                range,
                Self::primary_top(primary_max),
            )
        });

        let mut plot = Plot::new(format!("{:?}_{}", spec.kind, id))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(x_title.clone());

        if spec.show_legend {
            plot = plot.legend(Legend::default());
        }

        if let Some(labels) = categories.clone() {
            let n = labels.len();
            plot = plot
                .include_x(-0.5)
                .include_x(n as f64 - 0.5)
                .x_grid_spacer(move |_input| {
                    (0..n)
                        .map(|i| GridMark {
                            value: i as f64,
                            step_size: 1.0,
                        })
                        .collect()
                })
                .x_axis_formatter(move |mark, _range| {
                    let idx = mark.value.round();
                    if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                        labels.get(idx as usize).cloned().unwrap_or_default()
                    } else {
                        String::new()
                    }
                });
        }

        if spec.kind == ChartKind::Bar || spec.kind == ChartKind::Pareto {
            plot = plot.include_y(0.0);
        }

        match &secondary {
            Some((right_title, range, top)) => {
                let (range, top) = (*range, *top);
                plot = plot
                    .custom_y_axes(vec![
                        AxisHints::new_y().label(y_title.clone()),
                        AxisHints::new_y()
                            .label(right_title.clone())
                            .placement(HPlacement::Right)
                            .formatter(move |mark, _range| {
                                format!("{:.0}", Self::to_secondary(mark.value, range, top))
                            }),
                    ])
                    .y_grid_spacer(move |_input| {
                        (0..=SECONDARY_TICKS)
                            .map(|k| GridMark {
                                value: top * k as f64 / SECONDARY_TICKS as f64,
                                step_size: top / SECONDARY_TICKS as f64,
                            })
                            .collect()
                    })
                    .include_y(top)
                    .allow_zoom(false)
                    .allow_drag(false);
            }
            None => {
                plot = plot.y_axis_label(y_title.clone());
            }
        }

        let hover_categories = categories.clone();
        let hover_secondary = spec
            .series
            .iter()
            .find(|s| s.y_axis == AxisSide::Right)
            .map(|s| s.name.clone())
            .zip(secondary.clone());
        plot = plot.label_formatter(move |name, value| {
            let x = match &hover_categories {
                Some(c) if value.x >= -0.5 => c
                    .get(value.x.round() as usize)
                    .cloned()
                    .unwrap_or_default(),
                Some(_) => String::new(),
                None => format!("{:.0}", value.x),
            };
            let (y_label, y) = match &hover_secondary {
                Some((series, (right_title, range, top))) if series == name => (
                    right_title.as_str(),
                    Self::to_secondary(value.y, *range, *top),
                ),
                _ => (y_title.as_str(), value.y),
            };
            if name.is_empty() {
                format!("{}: {}\n{}: {:.2}", x_title, x, y_label, y)
            } else {
                format!("{}\n{}: {}\n{}: {:.2}", name, x_title, x, y_label, y)
            }
        });

        plot.show(ui, |plot_ui| {
            for (i, series) in spec.series.iter().enumerate() {
                let color = Self::series_color(i);
                let scale = match (&secondary, series.y_axis) {
                    (Some((_, range, top)), AxisSide::Right) => Some((*range, *top)),
                    _ => None,
                };
                let points: Vec<[f64; 2]> = (0..series.len())
                    .map(|j| {
                        let y = series.y[j];
                        let y = scale.map_or(y, |(range, top)| Self::to_primary(y, range, top));
                        [series.x.position(j), y]
                    })
                    .collect();

                Self::draw_series(plot_ui, series, points, color);
            }
        });
    }

    fn draw_series(plot_ui: &mut PlotUi, series: &Series, points: Vec<[f64; 2]>, color: Color32) {
        match series.mode {
            SeriesMode::Bars => {
                let bars: Vec<Bar> = points
                    .iter()
                    .map(|&[x, y]| Bar::new(x, y).width(BAR_WIDTH))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&series.name));
            }
            SeriesMode::LinesMarkers => {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(color)
                        .width(LINE_WIDTH)
                        .name(&series.name),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(MARKER_RADIUS)
                        .color(color)
                        .name(&series.name),
                );
            }
            SeriesMode::Markers => match (&series.marker_sizes, &series.hover_labels) {
                (Some(sizes), labels) => {
                    // One item per bubble so hover can name it
                    for (j, point) in points.into_iter().enumerate() {
                        let name = labels
                            .as_ref()
                            .and_then(|l| l.get(j).cloned())
                            .unwrap_or_else(|| series.name.clone());
                        let diameter = sizes.get(j).copied().unwrap_or(0.0) as f32;
                        plot_ui.points(
                            Points::new(PlotPoints::from(vec![point]))
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(diameter / 2.0)
                                .color(color.gamma_multiply(0.7))
                                .name(name),
                        );
                    }
                }
                (None, _) => {
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(MARKER_RADIUS + 1.0)
                            .color(color)
                            .name(&series.name),
                    );
                }
            },
            // Slices only make sense in a pie; draw them as bars elsewhere
            SeriesMode::Slices => {
                let bars: Vec<Bar> = points
                    .iter()
                    .map(|&[x, y]| Bar::new(x, y).width(BAR_WIDTH))
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&series.name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_top_is_round() {
        assert_eq!(ChartPlotter::primary_top(954.0), 1000.0);
        assert_eq!(ChartPlotter::primary_top(1641.0), 2000.0);
        assert_eq!(ChartPlotter::primary_top(0.0), 1.0);
    }

    #[test]
    fn test_secondary_mapping_round_trip() {
        let top = ChartPlotter::primary_top(954.0);
        let range = [0.0, 100.0];
        assert_eq!(ChartPlotter::to_primary(100.0, range, top), top);
        assert_eq!(ChartPlotter::to_primary(0.0, range, top), 0.0);
        let mapped = ChartPlotter::to_primary(60.12, range, top);
        assert!((ChartPlotter::to_secondary(mapped, range, top) - 60.12).abs() < 1e-9);
    }

    #[test]
    fn test_pie_wedge_closes_on_center() {
        let wedge = ChartPlotter::pie_wedge(0.0, FRAC_PI_2, 0.0, 1.0);
        assert_eq!(wedge[0], [0.0, 0.0]);
        let first = wedge[1];
        let last = *wedge.last().unwrap();
        assert!((first[0] - 1.0).abs() < 1e-12 && first[1].abs() < 1e-12);
        assert!(last[0].abs() < 1e-12 && (last[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ring_sector_has_no_center() {
        let wedge = ChartPlotter::pie_wedge(0.0, FRAC_PI_2, 0.5, 1.0);
        assert!(wedge.iter().all(|[x, y]| (x * x + y * y).sqrt() >= 0.5 - 1e-12));
        let last = *wedge.last().unwrap();
        assert!((last[0] - 0.5).abs() < 1e-12 && last[1].abs() < 1e-12);
    }

    #[test]
    fn test_pie_order_largest_first() {
        let order = ChartPlotter::pie_order(&[3595.0, 2018.0, 3353.0, 2928.0, 2073.0]);
        assert_eq!(order, [0, 2, 3, 4, 1]);
    }
}
