pub mod auth;
pub mod request_tracking;

pub use auth::{require_admin, require_auth, AuthUserInfo, TokenService};
pub use request_tracking::{extract_request_id, request_tracking_middleware, REQUEST_ID_HEADER};
