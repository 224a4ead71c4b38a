//! Ecom Gateway - JSON/HTTP edge over the user, order, and product services.
//!
//! The gateway exposes a small JSON surface and forwards every operation to
//! one of three gRPC backends, applying a uniform per-attempt timeout and
//! bounded retry policy to each outgoing call.

#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod grpc;
pub mod http;
pub mod jwt;
pub mod observability;
pub mod processor;
pub mod retry;
pub mod shutdown;

// Include generated protobuf code
pub mod proto {
    /// user-service stubs
    pub mod user {
        pub mod v1 {
            tonic::include_proto!("ecom.user.v1");
        }
    }

    /// order-service stubs
    pub mod order {
        pub mod v1 {
            tonic::include_proto!("ecom.order.v1");
        }
    }

    /// product-service stubs
    pub mod product {
        pub mod v1 {
            tonic::include_proto!("ecom.product.v1");
        }
    }
}

pub use config::Config;
pub use error::GatewayError;
pub use retry::{RetryConfig, RetryPolicy};
