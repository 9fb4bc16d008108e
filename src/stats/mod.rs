//! Statistics module - Pareto ordering and cumulative shares

mod pareto;

pub use pareto::{cumulative_percentages, ParetoError};
