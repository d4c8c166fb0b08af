//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Output sinks for rendered tables

pub mod error;
pub mod sink;

// Re-export commonly used items
pub use error::{TableError, TableResult};
pub use sink::{FileSink, MemorySink, TableSink, WriteMode, WriteOptions};
