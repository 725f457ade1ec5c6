mod error_log;

pub use error_log::log_errors;
