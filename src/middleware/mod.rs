pub mod auth;
pub mod log;
pub mod response;

pub use auth::{require_auth, require_guest, AuthUser};
pub use response::{ApiResponse, ApiResult};
