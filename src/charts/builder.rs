//! Chart Builder Module
//! Turns registry tables into chart specifications and places them in the grid.

use crate::charts::spec::{
    Axis, AxisSide, ChartKind, ChartSpec, Dashboard, DashboardCell, MarkerShape, Series,
    SeriesMode, XValues,
};
use crate::config::DashboardConfig;
use crate::data::registry::{
    COST, CUSTOMERS, DEPARTMENT, MARGIN, MONTH, PRODUCT, PRODUCT_A_REVENUE, PRODUCT_COST,
    QUARTER_REVENUE, REVENUE, TOTAL_REVENUE,
};
use crate::data::{DataError, DataProcessor, DatasetRegistry, CUMULATIVE_PCT};
use polars::prelude::DataFrame;
use thiserror::Error;

pub const GRID_ROWS: usize = 2;
pub const GRID_COLUMNS: usize = 3;

/// Secondary axis range of the Pareto chart, independent of the data
pub const PARETO_PCT_RANGE: [f64; 2] = [0.0, 100.0];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Data error: {0}")]
    DataError(#[from] DataError),
    #[error("Series '{series}' has {x} x values but {y} y values")]
    LengthMismatch { series: String, x: usize, y: usize },
    #[error("Bubble sizes need a positive maximum, got {0}")]
    InvalidSizes(f64),
}

/// Builds each of the six dashboard charts.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Bar chart of total revenue per month
    pub fn bar_chart(df: &DataFrame, config: &DashboardConfig) -> Result<ChartSpec, ChartError> {
        let months = DataProcessor::str_column(df, MONTH)?;
        let totals = DataProcessor::f64_column(df, TOTAL_REVENUE)?;

        let mut spec = ChartSpec::new(ChartKind::Bar, &config.font_family_css());
        spec.x_axis = Axis::titled(MONTH);
        spec.y_axis = Axis::titled(TOTAL_REVENUE);
        spec.series.push(checked(Series::new(
            TOTAL_REVENUE,
            SeriesMode::Bars,
            XValues::Categories(months),
            totals,
        ))?);
        Ok(spec)
    }

    /// One line+marker series per product column
    pub fn line_chart(df: &DataFrame, config: &DashboardConfig) -> Result<ChartSpec, ChartError> {
        let months = DataProcessor::str_column(df, MONTH)?;

        let mut spec = ChartSpec::new(ChartKind::Line, &config.font_family_css());
        spec.x_axis = Axis::titled(MONTH);
        spec.y_axis = Axis::titled(REVENUE);
        spec.show_legend = true;

        for product in DataProcessor::value_columns(df, MONTH) {
            let values = DataProcessor::f64_column(df, &product)?;
            spec.series.push(checked(
                Series::new(
                    &product,
                    SeriesMode::LinesMarkers,
                    XValues::Categories(months.clone()),
                    values,
                )
                .with_marker(MarkerShape::Circle),
            )?);
        }
        Ok(spec)
    }

    /// Solid pie, one slice per product
    pub fn pie_chart(df: &DataFrame, config: &DashboardConfig) -> Result<ChartSpec, ChartError> {
        let products = DataProcessor::str_column(df, PRODUCT)?;
        let values = DataProcessor::f64_column(df, QUARTER_REVENUE)?;

        let mut spec = ChartSpec::new(ChartKind::Pie, &config.font_family_css());
        spec.show_legend = true;
        spec.hole = 0.0;
        spec.series.push(checked(Series::new(
            QUARTER_REVENUE,
            SeriesMode::Slices,
            XValues::Categories(products),
            values,
        ))?);
        Ok(spec)
    }

    /// Product A revenue against cost, circles only
    pub fn scatter_chart(
        df: &DataFrame,
        config: &DashboardConfig,
    ) -> Result<ChartSpec, ChartError> {
        let revenue = DataProcessor::f64_column(df, PRODUCT_A_REVENUE)?;
        let cost = DataProcessor::f64_column(df, COST)?;

        let mut spec = ChartSpec::new(ChartKind::Scatter, &config.font_family_css());
        spec.x_axis = Axis::titled(PRODUCT_A_REVENUE);
        spec.y_axis = Axis::titled(COST);
        spec.series.push(checked(
            Series::new(COST, SeriesMode::Markers, XValues::Numbers(revenue), cost)
                .with_marker(MarkerShape::Circle),
        )?);
        Ok(spec)
    }

    /// Revenue bars plus cumulative share on a right-hand 0..100 axis.
    ///
    /// `df` must already be in Pareto order (see [`DatasetRegistry::pareto`]).
    pub fn pareto_chart(df: &DataFrame, config: &DashboardConfig) -> Result<ChartSpec, ChartError> {
        let departments = DataProcessor::str_column(df, DEPARTMENT)?;
        let revenue = DataProcessor::f64_column(df, REVENUE)?;
        let cumulative = DataProcessor::f64_column(df, CUMULATIVE_PCT)?;

        let mut spec = ChartSpec::new(ChartKind::Pareto, &config.font_family_css());
        spec.x_axis = Axis::titled(DEPARTMENT);
        spec.y_axis = Axis::titled(REVENUE);
        spec.secondary_y_axis = Some(Axis {
            title: Some(CUMULATIVE_PCT.to_string()),
            side: AxisSide::Right,
            range: Some(PARETO_PCT_RANGE),
        });
        spec.show_legend = true;

        spec.series.push(checked(Series::new(
            REVENUE,
            SeriesMode::Bars,
            XValues::Categories(departments.clone()),
            revenue,
        ))?);
        spec.series.push(checked(
            Series::new(
                CUMULATIVE_PCT,
                SeriesMode::LinesMarkers,
                XValues::Categories(departments),
                cumulative,
            )
            .with_marker(MarkerShape::Circle)
            .on_axis(AxisSide::Right),
        )?);
        Ok(spec)
    }

    /// Cost vs margin; marker area follows customer count.
    pub fn bubble_chart(df: &DataFrame, config: &DashboardConfig) -> Result<ChartSpec, ChartError> {
        let products = DataProcessor::str_column(df, PRODUCT)?;
        let cost = DataProcessor::f64_column(df, PRODUCT_COST)?;
        let margin = DataProcessor::f64_column(df, MARGIN)?;
        let customers = DataProcessor::f64_column(df, CUSTOMERS)?;

        let mut spec = ChartSpec::new(ChartKind::Bubble, &config.font_family_css());
        spec.x_axis = Axis::titled(PRODUCT_COST);
        spec.y_axis = Axis::titled(MARGIN);

        let mut series = Series::new(MARGIN, SeriesMode::Markers, XValues::Numbers(cost), margin)
            .with_marker(MarkerShape::Circle);
        series.marker_sizes = Some(area_scaled_sizes(&customers, config.bubble_size_max)?);
        series.hover_labels = Some(products);
        spec.series.push(checked(series)?);
        Ok(spec)
    }
}

/// Diameters whose areas are proportional to `values`; the largest value
/// gets `size_max`.
pub fn area_scaled_sizes(values: &[f64], size_max: f64) -> Result<Vec<f64>, ChartError> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(max.is_finite() && max > 0.0) {
        return Err(ChartError::InvalidSizes(max));
    }

    Ok(values
        .iter()
        .map(|v| size_max * (v.max(0.0) / max).sqrt())
        .collect())
}

fn checked(series: Series) -> Result<Series, ChartError> {
    let x = series.x.len();
    let y = series.y.len();
    let extra_mismatch = [
        series.marker_sizes.as_ref().map(Vec::len),
        series.hover_labels.as_ref().map(Vec::len),
    ]
    .into_iter()
    .flatten()
    .any(|n| n != y);

    if x != y || extra_mismatch {
        return Err(ChartError::LengthMismatch {
            series: series.name,
            x,
            y,
        });
    }
    Ok(series)
}

/// Build all six charts and place them in the fixed 2x3 grid.
pub fn build_dashboard(
    registry: &DatasetRegistry,
    config: &DashboardConfig,
) -> Result<Dashboard, ChartError> {
    let charts = [
        (
            "바차트 · 월별 총 매출",
            ChartBuilder::bar_chart(registry.monthly_revenue(), config)?,
        ),
        (
            "시계열 · 제품별 월간 매출 추세",
            ChartBuilder::line_chart(registry.product_trends(), config)?,
        ),
        (
            "파이차트 · 1분기 제품별 매출 비중",
            ChartBuilder::pie_chart(registry.quarterly_share(), config)?,
        ),
        (
            "산점도 · 제품 A 매출 vs 비용",
            ChartBuilder::scatter_chart(registry.cost_scatter(), config)?,
        ),
        (
            "파레토차트 · 부서별 매출",
            ChartBuilder::pareto_chart(registry.pareto(), config)?,
        ),
        (
            "버블차트 · 비용·마진·고객수 (동그라미)",
            ChartBuilder::bubble_chart(registry.bubble_points(), config)?,
        ),
    ];

    let cells = charts
        .into_iter()
        .enumerate()
        .map(|(i, (subheading, spec))| DashboardCell {
            row: i / GRID_COLUMNS,
            col: i % GRID_COLUMNS,
            subheading: subheading.to_string(),
            spec,
        })
        .collect();

    Ok(Dashboard {
        title: config.page_title.clone(),
        caption: config.caption.clone(),
        rows: GRID_ROWS,
        columns: GRID_COLUMNS,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::Column;

    fn dashboard() -> Dashboard {
        let registry = DatasetRegistry::new().unwrap();
        build_dashboard(&registry, &DashboardConfig::default()).unwrap()
    }

    #[test]
    fn test_grid_order() {
        let dashboard = dashboard();
        let kinds: Vec<(usize, usize, ChartKind)> = dashboard
            .cells
            .iter()
            .map(|c| (c.row, c.col, c.spec.kind))
            .collect();
        assert_eq!(
            kinds,
            [
                (0, 0, ChartKind::Bar),
                (0, 1, ChartKind::Line),
                (0, 2, ChartKind::Pie),
                (1, 0, ChartKind::Scatter),
                (1, 1, ChartKind::Pareto),
                (1, 2, ChartKind::Bubble),
            ]
        );
        assert_eq!(dashboard.row(1).count(), 3);
        assert_eq!(dashboard.title, "매출 대시보드");
    }

    #[test]
    fn test_subheadings_live_on_cells() {
        let dashboard = dashboard();
        let subheadings: Vec<&str> = dashboard
            .cells
            .iter()
            .map(|c| c.subheading.as_str())
            .collect();
        assert_eq!(
            subheadings,
            [
                "바차트 · 월별 총 매출",
                "시계열 · 제품별 월간 매출 추세",
                "파이차트 · 1분기 제품별 매출 비중",
                "산점도 · 제품 A 매출 vs 비용",
                "파레토차트 · 부서별 매출",
                "버블차트 · 비용·마진·고객수 (동그라미)",
            ]
        );

        let json = dashboard.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let cell = &value["cells"][0];
        assert_eq!(cell["subheading"], "바차트 · 월별 총 매출");
        assert!(cell["spec"].get("title").is_none());
    }

    #[test]
    fn test_series_counts_match_tables() {
        let dashboard = dashboard();
        let spec = |r, c| &dashboard.cell(r, c).unwrap().spec;

        assert_eq!(spec(0, 0).series.len(), 1);
        assert_eq!(spec(0, 0).point_count(), 12);

        assert_eq!(spec(0, 1).series.len(), 5);
        assert!(spec(0, 1).series.iter().all(|s| s.len() == 12));
        assert!(spec(0, 1).show_legend);

        assert_eq!(spec(0, 2).point_count(), 5);
        assert_eq!(spec(0, 2).hole, 0.0);

        assert_eq!(spec(1, 0).point_count(), 12);
        assert_eq!(spec(1, 0).series[0].marker, Some(MarkerShape::Circle));

        assert_eq!(spec(1, 1).series.len(), 2);

        assert_eq!(spec(1, 2).series.len(), 1);
        assert_eq!(spec(1, 2).point_count(), 10);
    }

    #[test]
    fn test_pareto_chart_shares_sorted_categories() {
        let dashboard = dashboard();
        let spec = &dashboard.cell(1, 1).unwrap().spec;
        let expected = XValues::Categories(
            ["기획부", "마케팅부", "영업부", "인사부", "개발부"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        assert_eq!(spec.series[0].x, expected);
        assert_eq!(spec.series[1].x, expected);
        assert_eq!(spec.series[0].mode, SeriesMode::Bars);
        assert_eq!(spec.series[1].y_axis, AxisSide::Right);

        let axis = spec.secondary_y_axis.as_ref().unwrap();
        assert_eq!(axis.side, AxisSide::Right);
        assert_eq!(axis.range, Some([0.0, 100.0]));
    }

    #[test]
    fn test_pareto_axis_range_ignores_magnitude() {
        let df = DataFrame::new(vec![
            Column::new(DEPARTMENT.into(), vec!["a", "b"]),
            Column::new(REVENUE.into(), vec![5.0e9, 1.0e9]),
        ])
        .unwrap();
        let pareto = DataProcessor::pareto_frame(&df, REVENUE).unwrap();
        let spec = ChartBuilder::pareto_chart(&pareto, &DashboardConfig::default()).unwrap();
        assert_eq!(spec.secondary_y_axis.unwrap().range, Some(PARETO_PCT_RANGE));
    }

    #[test]
    fn test_bubble_area_follows_customers() {
        let dashboard = dashboard();
        let series = &dashboard.cell(1, 2).unwrap().spec.series[0];
        let sizes = series.marker_sizes.as_ref().unwrap();
        let labels = series.hover_labels.as_ref().unwrap();
        assert_eq!(labels[0], "제품 1");
        assert_eq!(labels[9], "제품 10");

        // 제품 7 has the most customers (293)
        assert!((sizes[6] - 20.0).abs() < 1e-9);
        // area ratio == customer ratio: 127 / 293 for 제품 1
        let area_ratio = (sizes[0] / sizes[6]).powi(2);
        assert!((area_ratio - 127.0 / 293.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_scaled_sizes_rejects_zero_max() {
        assert!(matches!(
            area_scaled_sizes(&[0.0, 0.0], 20.0),
            Err(ChartError::InvalidSizes(_))
        ));
        assert!(area_scaled_sizes(&[], 20.0).is_err());
    }

    #[test]
    fn test_all_charts_carry_font_chain() {
        let dashboard = dashboard();
        let font = DashboardConfig::default().font_family_css();
        assert!(dashboard.cells.iter().all(|c| c.spec.font_family == font));
    }

    #[test]
    fn test_rebuild_is_byte_identical() {
        let first = dashboard().to_json().unwrap();
        let second = dashboard().to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let series = Series::new(
            "broken",
            SeriesMode::Markers,
            XValues::Numbers(vec![1.0, 2.0]),
            vec![1.0],
        );
        assert!(matches!(
            checked(series),
            Err(ChartError::LengthMismatch { x: 2, y: 1, .. })
        ));
    }
}
