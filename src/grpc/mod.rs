//! gRPC client adapters for the three backend services.
//!
//! Each adapter owns one lazily-connected channel and one retry policy, and
//! presents the backend's operations as plain async calls with deadline,
//! retry, and error tagging already applied.

use tonic::transport::Channel;

use crate::config::BackendConfig;
use crate::error::GatewayError;
use crate::retry::{RetryConfig, RetryPolicy};

pub mod order;
pub mod product;
pub mod user;

pub use order::OrderClient;
pub use product::ProductClient;
pub use user::UserClient;

/// Creates a lazily-connected channel for a backend target.
///
/// Construction fails only when the target cannot be turned into a channel;
/// reachability is not verified here.
fn lazy_channel(config: &BackendConfig) -> Result<Channel, GatewayError> {
    let endpoint = Channel::from_shared(config.target.to_string()).map_err(|e| {
        GatewayError::InvalidTarget {
            target: config.target.to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(endpoint.connect_lazy())
}

/// Retry policy parameterized by a backend's budget and per-attempt timeout.
fn retry_policy(config: &BackendConfig) -> RetryPolicy {
    RetryPolicy::new(
        RetryConfig::default()
            .with_max_retries(config.retries)
            .with_per_attempt_timeout(config.timeout),
    )
}
