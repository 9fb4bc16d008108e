//! Chart Specification Module
//! Declarative chart descriptions handed to the plotter, plus the 3x2 layout.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Pareto,
    Bubble,
}

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMode {
    Bars,
    LinesMarkers,
    Markers,
    Slices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Option<String>,
    pub side: AxisSide,
    /// Fixed `[min, max]`; `None` lets the plot fit the data
    pub range: Option<[f64; 2]>,
}

impl Axis {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            side: AxisSide::Left,
            range: None,
        }
    }

    pub fn untitled() -> Self {
        Self {
            title: None,
            side: AxisSide::Left,
            range: None,
        }
    }
}

/// X coordinates: categorical labels or plain numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XValues {
    Categories(Vec<String>),
    Numbers(Vec<f64>),
}

impl XValues {
    pub fn len(&self) -> usize {
        match self {
            XValues::Categories(c) => c.len(),
            XValues::Numbers(n) => n.len(),
        }
    }

    /// Plot coordinate of point `i`; categories sit at their index.
    pub fn position(&self, i: usize) -> f64 {
        match self {
            XValues::Categories(_) => i as f64,
            XValues::Numbers(n) => n.get(i).copied().unwrap_or(f64::NAN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub mode: SeriesMode,
    pub x: XValues,
    pub y: Vec<f64>,
    /// Which y axis the values are measured against
    pub y_axis: AxisSide,
    pub marker: Option<MarkerShape>,
    /// Per-point marker diameters
    pub marker_sizes: Option<Vec<f64>>,
    /// Per-point hover names
    pub hover_labels: Option<Vec<String>>,
}

impl Series {
    pub fn new(name: &str, mode: SeriesMode, x: XValues, y: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            mode,
            x,
            y,
            y_axis: AxisSide::Left,
            marker: None,
            marker_sizes: None,
            hover_labels: None,
        }
    }

    pub fn with_marker(mut self, marker: MarkerShape) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn on_axis(mut self, side: AxisSide) -> Self {
        self.y_axis = side;
        self
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub secondary_y_axis: Option<Axis>,
    pub show_legend: bool,
    /// Pie hole as a fraction of the radius; 0 is a solid pie
    pub hole: f64,
    pub font_family: String,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, font_family: &str) -> Self {
        Self {
            kind,
            x_axis: Axis::untitled(),
            y_axis: Axis::untitled(),
            secondary_y_axis: None,
            show_legend: false,
            hole: 0.0,
            font_family: font_family.to_string(),
            series: Vec::new(),
        }
    }

    /// Total number of points over all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}

/// One grid cell: its position, subheading and chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCell {
    pub row: usize,
    pub col: usize,
    pub subheading: String,
    pub spec: ChartSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub caption: String,
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<DashboardCell>,
}

impl Dashboard {
    pub fn cell(&self, row: usize, col: usize) -> Option<&DashboardCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Cells of one grid row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = &DashboardCell> {
        (0..self.columns).filter_map(move |col| self.cell(row, col))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
