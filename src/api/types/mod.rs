//! Request and response types shared by every endpoint

pub mod error;
pub mod json;
pub mod query;
pub mod response;

pub use error::{ApiError, ApiErrorResponse};
pub use json::{Json, ValidatedJson, double_option};
pub use query::{ListParams, Query, date_range, parse_optional};
pub use response::{ApiResponse, Created};
