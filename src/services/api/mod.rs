// Marketplace backend client
// Typed requests and responses for venues, studios, orders, cart and auth

mod client;
mod envelope;
mod error;

pub use client::ApiClient;
pub use envelope::{error_message, normalize_payload};
pub use error::ApiError;
