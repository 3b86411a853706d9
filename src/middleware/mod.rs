//! HTTP middleware: request tracing and security headers

mod security;
mod tracing;

pub use security::security_headers;
pub use tracing::request_tracing;
