//! Dataset Registry
//! The dashboard's seven literal tables, built once as Polars DataFrames.

use crate::data::processor::{DataError, DataProcessor};
use polars::prelude::*;

// Column names double as axis titles
pub const MONTH: &str = "월";
pub const TOTAL_REVENUE: &str = "총 매출";
pub const PRODUCT: &str = "제품";
pub const QUARTER_REVENUE: &str = "1분기 매출";
pub const PRODUCT_A_REVENUE: &str = "제품 A 매출";
pub const COST: &str = "비용";
pub const DEPARTMENT: &str = "부서";
pub const REVENUE: &str = "매출";
pub const PRODUCT_COST: &str = "제품별 비용";
pub const MARGIN: &str = "마진";
pub const CUSTOMERS: &str = "고객 수";

const MONTHS: [&str; 12] = [
    "2023-01", "2023-02", "2023-03", "2023-04", "2023-05", "2023-06", "2023-07", "2023-08",
    "2023-09", "2023-10", "2023-11", "2023-12",
];

const MONTHLY_TOTALS: [f64; 12] = [
    885.0, 918.0, 887.0, 1148.0, 1436.0, 1131.0, 1217.0, 1094.0, 1188.0, 1079.0, 1343.0, 1641.0,
];

const PRODUCT_SERIES: [(&str, [f64; 12]); 5] = [
    (
        "제품 A 매출",
        [272.0, 147.0, 217.0, 292.0, 423.0, 351.0, 295.0, 459.0, 109.0, 311.0, 377.0, 342.0],
    ),
    (
        "제품 B 매출",
        [86.0, 137.0, 120.0, 266.0, 138.0, 190.0, 108.0, 243.0, 280.0, 89.0, 137.0, 224.0],
    ),
    (
        "제품 C 매출",
        [158.0, 407.0, 235.0, 95.0, 403.0, 142.0, 335.0, 185.0, 313.0, 267.0, 405.0, 408.0],
    ),
    (
        "제품 D 매출",
        [222.0, 97.0, 167.0, 242.0, 373.0, 301.0, 245.0, 59.0, 261.0, 327.0, 292.0, 342.0],
    ),
    (
        "제품 E 매출",
        [147.0, 130.0, 148.0, 253.0, 99.0, 147.0, 234.0, 148.0, 225.0, 85.0, 132.0, 325.0],
    ),
];

const SHARE_PRODUCTS: [&str; 5] = ["제품 A", "제품 B", "제품 C", "제품 D", "제품 E"];
const SHARE_VALUES: [f64; 5] = [3595.0, 2018.0, 3353.0, 2928.0, 2073.0];

const SCATTER_REVENUE: [f64; 12] = [
    272.0, 147.0, 217.0, 292.0, 423.0, 351.0, 295.0, 459.0, 109.0, 311.0, 377.0, 342.0,
];
const SCATTER_COST: [f64; 12] = [
    149.0, 227.0, 293.0, 335.0, 197.0, 197.0, 338.0, 315.0, 235.0, 177.0, 82.0, 81.0,
];

const DEPARTMENTS: [&str; 5] = ["기획부", "마케팅부", "영업부", "인사부", "개발부"];
const DEPARTMENT_REVENUE: [f64; 5] = [954.0, 923.0, 559.0, 477.0, 209.0];

/// (product, cost, margin, customer count)
const BUBBLE_POINTS: [(&str, f64, f64, i64); 10] = [
    ("제품 1", 884.0, 699.0, 127),
    ("제품 2", 759.0, 170.0, 122),
    ("제품 3", 829.0, 572.0, 59),
    ("제품 4", 392.0, 496.0, 198),
    ("제품 5", 963.0, 414.0, 165),
    ("제품 6", 907.0, 586.0, 258),
    ("제품 7", 559.0, 651.0, 293),
    ("제품 8", 209.0, 187.0, 247),
    ("제품 9", 923.0, 274.0, 129),
    ("제품 10", 477.0, 637.0, 225),
];

/// Read-only holder for every table the dashboard draws from.
pub struct DatasetRegistry {
    monthly_revenue: DataFrame,
    product_trends: DataFrame,
    quarterly_share: DataFrame,
    cost_scatter: DataFrame,
    pareto: DataFrame,
    bubble_points: DataFrame,
}

impl DatasetRegistry {
    /// Build all tables from literals, deriving the Pareto column.
    pub fn new() -> Result<Self, DataError> {
        let monthly_revenue = DataFrame::new(vec![
            Column::new(MONTH.into(), MONTHS.to_vec()),
            Column::new(TOTAL_REVENUE.into(), MONTHLY_TOTALS.to_vec()),
        ])?;

        let mut trend_columns = vec![Column::new(MONTH.into(), MONTHS.to_vec())];
        trend_columns.extend(
            PRODUCT_SERIES
                .iter()
                .map(|(name, values)| Column::new((*name).into(), values.to_vec())),
        );
        let product_trends = DataFrame::new(trend_columns)?;

        let quarterly_share = DataFrame::new(vec![
            Column::new(PRODUCT.into(), SHARE_PRODUCTS.to_vec()),
            Column::new(QUARTER_REVENUE.into(), SHARE_VALUES.to_vec()),
        ])?;

        let cost_scatter = DataFrame::new(vec![
            Column::new(PRODUCT_A_REVENUE.into(), SCATTER_REVENUE.to_vec()),
            Column::new(COST.into(), SCATTER_COST.to_vec()),
        ])?;

        let departments = DataFrame::new(vec![
            Column::new(DEPARTMENT.into(), DEPARTMENTS.to_vec()),
            Column::new(REVENUE.into(), DEPARTMENT_REVENUE.to_vec()),
        ])?;
        let pareto = DataProcessor::pareto_frame(&departments, REVENUE)?;

        let bubble_points = DataFrame::new(vec![
            Column::new(
                PRODUCT.into(),
                BUBBLE_POINTS.iter().map(|p| p.0).collect::<Vec<_>>(),
            ),
            Column::new(
                PRODUCT_COST.into(),
                BUBBLE_POINTS.iter().map(|p| p.1).collect::<Vec<_>>(),
            ),
            Column::new(
                MARGIN.into(),
                BUBBLE_POINTS.iter().map(|p| p.2).collect::<Vec<_>>(),
            ),
            Column::new(
                CUSTOMERS.into(),
                BUBBLE_POINTS.iter().map(|p| p.3).collect::<Vec<_>>(),
            ),
        ])?;

        tracing::debug!(
            months = monthly_revenue.height(),
            products = product_trends.width() - 1,
            departments = pareto.height(),
            bubbles = bubble_points.height(),
            "dataset registry built"
        );

        Ok(Self {
            monthly_revenue,
            product_trends,
            quarterly_share,
            cost_scatter,
            pareto,
            bubble_points,
        })
    }

    /// Columns: [`MONTH`], [`TOTAL_REVENUE`]
    pub fn monthly_revenue(&self) -> &DataFrame {
        &self.monthly_revenue
    }

    /// Columns: [`MONTH`] followed by one revenue column per product
    pub fn product_trends(&self) -> &DataFrame {
        &self.product_trends
    }

    /// Columns: [`PRODUCT`], [`QUARTER_REVENUE`]
    pub fn quarterly_share(&self) -> &DataFrame {
        &self.quarterly_share
    }

    /// Columns: [`PRODUCT_A_REVENUE`], [`COST`]
    pub fn cost_scatter(&self) -> &DataFrame {
        &self.cost_scatter
    }

    /// Departments sorted by revenue, with the cumulative share column.
    pub fn pareto(&self) -> &DataFrame {
        &self.pareto
    }

    /// Columns: [`PRODUCT`], [`PRODUCT_COST`], [`MARGIN`], [`CUSTOMERS`]
    pub fn bubble_points(&self) -> &DataFrame {
        &self.bubble_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::processor::CUMULATIVE_PCT;

    #[test]
    fn test_table_shapes() {
        let registry = DatasetRegistry::new().unwrap();
        assert_eq!(registry.monthly_revenue().shape(), (12, 2));
        assert_eq!(registry.product_trends().shape(), (12, 6));
        assert_eq!(registry.quarterly_share().shape(), (5, 2));
        assert_eq!(registry.cost_scatter().shape(), (12, 2));
        assert_eq!(registry.pareto().shape(), (5, 3));
        assert_eq!(registry.bubble_points().shape(), (10, 4));
    }

    #[test]
    fn test_pareto_table() {
        let registry = DatasetRegistry::new().unwrap();
        let labels = DataProcessor::str_column(registry.pareto(), DEPARTMENT).unwrap();
        assert_eq!(labels, ["기획부", "마케팅부", "영업부", "인사부", "개발부"]);

        let cumulative = DataProcessor::f64_column(registry.pareto(), CUMULATIVE_PCT).unwrap();
        let expected = [30.56, 60.12, 78.03, 93.31, 100.0];
        for (got, want) in cumulative.iter().zip(expected) {
            assert!((got - want).abs() <= 0.01, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_pareto_revenue_is_sorted_input() {
        let registry = DatasetRegistry::new().unwrap();
        let revenue = DataProcessor::f64_column(registry.pareto(), REVENUE).unwrap();
        let mut expected = DEPARTMENT_REVENUE.to_vec();
        expected.sort_by(|a, b| b.total_cmp(a));
        assert_eq!(revenue, expected);
    }

    #[test]
    fn test_trend_columns_in_product_order() {
        let registry = DatasetRegistry::new().unwrap();
        let names = DataProcessor::value_columns(registry.product_trends(), MONTH);
        let expected: Vec<&str> = PRODUCT_SERIES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_scatter_revenue_matches_product_a() {
        let registry = DatasetRegistry::new().unwrap();
        let scatter = DataProcessor::f64_column(registry.cost_scatter(), PRODUCT_A_REVENUE).unwrap();
        let trend = DataProcessor::f64_column(registry.product_trends(), PRODUCT_A_REVENUE).unwrap();
        assert_eq!(scatter, trend);
    }
}
