//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter layer keyed by the client's socket address.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP rate limiter for the management API.
///
/// Each client IP gets a bucket of `burst_size` requests, refilled at
/// `per_second` requests per second. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// The server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer address
/// is available.
///
/// # Errors
///
/// Returns an error if either parameter is zero.
pub fn layer(per_second: u64, burst_size: u32) -> Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .context("Rate limit parameters must be greater than zero")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_accepts_positive_limits() {
        assert!(layer(2, 100).is_ok());
    }

    #[test]
    fn test_layer_rejects_zero_burst() {
        assert!(layer(2, 0).is_err());
    }
}
