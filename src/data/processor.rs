//! Data Processor Module
//! Column extraction and the Pareto derivation (sort + cumulative share).

use crate::stats::{cumulative_percentages, ParetoError};
use polars::prelude::*;
use thiserror::Error;

/// Name of the derived cumulative percentage column
pub const CUMULATIVE_PCT: &str = "누적 비율 (%)";

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Pareto error: {0}")]
    ParetoError(#[from] ParetoError),
    #[error("Column '{0}' has missing values")]
    MissingValues(String),
}

/// Handles column access and derived-column operations on registry tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Read a numeric column as `f64`, casting integer columns.
    pub fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, DataError> {
        let column = df.column(name)?.cast(&DataType::Float64)?;
        let values = column.f64()?;

        values
            .into_iter()
            .map(|v| v.ok_or_else(|| DataError::MissingValues(name.to_string())))
            .collect()
    }

    /// Read a string column.
    pub fn str_column(df: &DataFrame, name: &str) -> Result<Vec<String>, DataError> {
        let column = df.column(name)?;
        let values = column.as_materialized_series().str()?;

        values
            .into_iter()
            .map(|v| {
                v.map(|s| s.to_string())
                    .ok_or_else(|| DataError::MissingValues(name.to_string()))
            })
            .collect()
    }

    /// Column names other than `key`, in table order.
    pub fn value_columns(df: &DataFrame, key: &str) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| name != key)
            .collect()
    }

    /// Sort by `value_col` descending (ties keep their order) and append
    /// [`CUMULATIVE_PCT`].
    pub fn pareto_frame(df: &DataFrame, value_col: &str) -> Result<DataFrame, DataError> {
        let mut sorted = df.sort(
            [value_col],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )?;

        let values = Self::f64_column(&sorted, value_col)?;
        let cumulative = cumulative_percentages(&values)?;
        sorted.with_column(Column::new(CUMULATIVE_PCT.into(), cumulative))?;

        Ok(sorted)
    }
}
