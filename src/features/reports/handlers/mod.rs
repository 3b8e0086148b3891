pub mod report_handler;

pub use report_handler::{
    __path_create_report, __path_get_report, __path_get_summary, __path_list_reports,
    __path_track_report, __path_update_report_status, create_report, get_report, get_summary,
    list_reports, track_report, update_report_status,
};
