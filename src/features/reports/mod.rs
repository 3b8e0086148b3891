pub mod dtos;
pub mod handlers;
pub mod identifier;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgReportRepository;
pub use services::ReportService;
