//! CLI library components for the retail data ETL.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
