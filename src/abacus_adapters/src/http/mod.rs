pub mod envelope;
pub mod error;
pub mod extract;
pub mod routes;

pub use envelope::{ApiResponse, ResponseStatus};
pub use error::{ApiError, ApiFailure};
pub use extract::{ValidateRequest, ValidatedJson, Violations};
