//! Gateway payload models.

pub mod errors;
pub mod threads;

pub use errors::GatewayErrorBody;
pub use threads::{ThreadRecord, normalize_thread_detail, normalize_threads};
