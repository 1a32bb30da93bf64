//! Student roster: records, filters, analytics, imports, and the HTTP surface.

pub mod domain;
pub mod filter;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{MockTestResult, MockTestSubmission, StudentRecord};
pub use filter::RosterFilter;
pub use report::views::{DashboardView, ReportView};
pub use report::RosterAnalytics;
pub use repository::{StoreError, StudentStore};
pub use router::roster_router;
pub use service::{RosterService, RosterServiceError};
