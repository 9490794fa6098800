pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod sql;
pub mod time;
pub mod validate;

pub use extractor::{
    SafeEventIdI64, SafeIDI64, SafeReplyIdI64, SafeStudentIdI64, SafeSubjectIdI64,
    SafeThreadIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
