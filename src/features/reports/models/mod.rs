mod report;

pub use report::{CreateReport, Report, ReportCounts, ReportFilter, ReportStatus, ReportType};
