//! Gateway error taxonomy.
//!
//! Every failed backend call is wrapped into a variant that carries the
//! operation tag of the failing call site, so callers and log readers can
//! tell which backend call failed without inspecting a stack trace. The
//! aggregation facade re-labels adapter errors with a domain-facing prefix
//! and never suppresses the underlying cause.

use thiserror::Error;
use tonic::{Code, Status};

/// Errors produced by the adapters and the aggregation facade.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A backend call failed after the retry budget was exhausted (or with a
    /// non-retryable status). The operation tag identifies the call site,
    /// e.g. `rpc.order.create_order`.
    #[error("{operation}: {status}")]
    Backend {
        /// Operation tag of the failing call site
        operation: &'static str,
        /// Terminal gRPC status observed by the retry policy
        status: Status,
    },

    /// A backend response was structurally missing a payload the domain
    /// requires (user lookups must always resolve to details).
    #[error("{operation}: {entity} details are empty")]
    EmptyDetails {
        /// Operation tag of the failing call site
        operation: &'static str,
        /// Which payload was absent
        entity: &'static str,
    },

    /// Backend target address could not be turned into a channel. The only
    /// construction-time failure; reachability is never checked eagerly.
    #[error("invalid backend target {target}: {reason}")]
    InvalidTarget {
        /// The configured target address
        target: String,
        /// Why the channel could not be created
        reason: String,
    },

    /// Stock check rejected an order item before the order backend was called.
    #[error("product {product_id} is out of stock")]
    OutOfStock {
        /// Product that failed the stock check
        product_id: i64,
    },

    /// User-backend failure relabelled by the facade.
    #[error("user service error: {0}")]
    UserService(#[source] Box<GatewayError>),

    /// Order-backend failure relabelled by the facade.
    #[error("order service error: {0}")]
    OrderService(#[source] Box<GatewayError>),

    /// Product-backend failure relabelled by the facade.
    #[error("product service error: {0}")]
    ProductService(#[source] Box<GatewayError>),
}

impl GatewayError {
    /// Wraps a terminal gRPC status with the tag of the failing operation.
    pub fn backend(operation: &'static str, status: Status) -> Self {
        debug_assert!(!operation.is_empty());
        Self::Backend { operation, status }
    }

    /// The operation tag, if this error originated at an adapter call site.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Backend { operation, .. } | Self::EmptyDetails { operation, .. } => {
                Some(operation)
            }
            Self::UserService(inner) | Self::OrderService(inner) | Self::ProductService(inner) => {
                inner.operation()
            }
            _ => None,
        }
    }

    /// The underlying gRPC status code, if the failure came from a backend.
    pub fn status_code(&self) -> Option<Code> {
        match self {
            Self::Backend { status, .. } => Some(status.code()),
            Self::UserService(inner) | Self::OrderService(inner) | Self::ProductService(inner) => {
                inner.status_code()
            }
            _ => None,
        }
    }
}
