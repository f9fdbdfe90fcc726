//! Report structures and output formatting

pub mod formatter;
pub mod report;

pub use formatter::{formatter_for, OutputFormatter};
pub use report::{ExplainReport, RankReport, ReportMetadata};
