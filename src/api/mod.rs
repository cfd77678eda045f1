pub mod jsonrpc;
pub mod models;
pub mod mympd;

pub use jsonrpc::{ApiError, ApiRequest, Method};
pub use models::*;
pub use mympd::MympdClient;
