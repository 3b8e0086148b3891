pub mod report_dto;

pub use report_dto::{
    CreateReportDto, CreateReportResponseDto, ReportQueryParams, ReportResponseDto,
    ReportSummaryDto, TrackReportResponseDto, UpdateReportStatusDto,
};
