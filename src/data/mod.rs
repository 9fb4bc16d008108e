//! Data module - literal tables and derived columns

mod processor;
pub mod registry;

pub use processor::{DataError, DataProcessor, CUMULATIVE_PCT};
pub use registry::DatasetRegistry;
