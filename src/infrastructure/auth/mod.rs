pub mod request_id;
pub mod session;

pub use request_id::{RequestId, X_REQUEST_ID};
pub use session::AuthSession;
