pub mod detect_and_export_use_case;
pub mod detect_and_stream_use_case;
pub mod pipeline_reporter;
pub mod use_case_error;
