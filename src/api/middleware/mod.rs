//! HTTP middleware for request processing and protection.
//!
//! Provides observability, rate limiting, CORS and timeout layers.

pub mod cors;
pub mod rate_limit;
pub mod timeout;
pub mod tracing;
