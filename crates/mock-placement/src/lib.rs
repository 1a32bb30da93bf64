//! Mock exam scoring, school placement prediction, and roster analytics.

pub mod config;
pub mod error;
pub mod placement;
pub mod roster;
pub mod spreadsheet;
pub mod telemetry;

pub use error::AppError;
