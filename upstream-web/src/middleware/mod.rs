pub mod error_handler;
pub mod request_id;

pub use error_handler::{error_logging_middleware, handle_not_found};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
