//! Export domain module - text rendering of completed sessions.

mod report;

pub use report::ReportSerializer;
