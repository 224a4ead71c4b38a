//! Aggregation facade over the three backend adapters.
//!
//! The HTTP layer depends on the single [`Processor`] capability surface;
//! the facade composes the backend ports, re-labels failures with a
//! domain-facing prefix, and fans out across backends for composite
//! operations. It never suppresses the underlying error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::domain::{OrderDetails, OrderItem, ProductDetails, UserDetails};
use crate::error::GatewayError;

#[cfg(test)]
use mockall::automock;

/// Port onto the user service.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserBackend: Send + Sync {
    /// Registers a new account, returning the new user id.
    async fn register(&self, email: &str, login: &str, password: &str)
    -> Result<i64, GatewayError>;

    /// Authenticates a user, returning a signed token.
    async fn login(&self, login: &str, password: &str) -> Result<String, GatewayError>;

    /// Resolves a user id to account details.
    async fn get_user(&self, user_id: i64) -> Result<UserDetails, GatewayError>;
}

/// Port onto the order service.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Creates an order, returning `(order_id, total_price)`.
    async fn create_order(
        &self,
        user_id: i64,
        items: &[OrderItem],
    ) -> Result<(i64, i64), GatewayError>;

    /// Looks up one order; `None` when the backend has no details for it.
    async fn get_order(&self, order_id: i64) -> Result<Option<OrderDetails>, GatewayError>;

    /// Lists a user's orders.
    async fn list_user_orders(&self, user_id: i64) -> Result<Vec<OrderDetails>, GatewayError>;
}

/// Port onto the product service.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductBackend: Send + Sync {
    /// Looks up one product; `None` when the backend has no details for it.
    async fn get_product(&self, product_id: i64) -> Result<Option<ProductDetails>, GatewayError>;

    /// Lists catalogue entries matching a filter.
    async fn list_products(&self, filter: &str) -> Result<Vec<ProductDetails>, GatewayError>;

    /// Whether the requested quantity is available.
    async fn check_stock(&self, product_id: i64, quantity: i32) -> Result<bool, GatewayError>;

    /// Adjusts a product's stock by a signed delta.
    async fn update_stock(&self, product_id: i64, quantity_change: i32)
    -> Result<(), GatewayError>;
}

/// Capability surface consumed by the HTTP facade.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Registers a new user, returning the new user id.
    async fn register_user(
        &self,
        email: &str,
        password: &str,
        login: &str,
    ) -> Result<i64, GatewayError>;

    /// Authenticates a user, returning a signed token.
    async fn login_user(&self, login: &str, password: &str) -> Result<String, GatewayError>;

    /// Lists catalogue entries matching a filter.
    async fn list_products(&self, filter: &str) -> Result<Vec<ProductDetails>, GatewayError>;

    /// Creates an order after checking stock for every item.
    async fn create_order(
        &self,
        user_id: i64,
        items: &[OrderItem],
    ) -> Result<(i64, i64), GatewayError>;

    /// Lists a user's orders.
    async fn list_user_orders(&self, user_id: i64) -> Result<Vec<OrderDetails>, GatewayError>;
}

/// Facade implementation backed by the three adapters.
pub struct ProcessorService {
    user: Arc<dyn UserBackend>,
    order: Arc<dyn OrderBackend>,
    product: Arc<dyn ProductBackend>,
}

impl ProcessorService {
    /// Composes the facade from the three backend ports.
    pub fn new(
        user: Arc<dyn UserBackend>,
        order: Arc<dyn OrderBackend>,
        product: Arc<dyn ProductBackend>,
    ) -> Self {
        Self {
            user,
            order,
            product,
        }
    }
}

#[async_trait]
impl Processor for ProcessorService {
    async fn register_user(
        &self,
        email: &str,
        password: &str,
        login: &str,
    ) -> Result<i64, GatewayError> {
        self.user
            .register(email, login, password)
            .await
            .map_err(|err| {
                error!(error = %err, "error registering user");
                GatewayError::UserService(Box::new(err))
            })
    }

    async fn login_user(&self, login: &str, password: &str) -> Result<String, GatewayError> {
        self.user.login(login, password).await.map_err(|err| {
            error!(error = %err, "error logging in user");
            GatewayError::UserService(Box::new(err))
        })
    }

    async fn list_products(&self, filter: &str) -> Result<Vec<ProductDetails>, GatewayError> {
        self.product.list_products(filter).await.map_err(|err| {
            error!(error = %err, "error listing products");
            GatewayError::ProductService(Box::new(err))
        })
    }

    async fn create_order(
        &self,
        user_id: i64,
        items: &[OrderItem],
    ) -> Result<(i64, i64), GatewayError> {
        // Stock is checked per item before the order backend is touched.
        for item in items {
            let available = self
                .product
                .check_stock(item.product_id, item.quantity)
                .await
                .map_err(|err| {
                    error!(error = %err, product_id = item.product_id, "error checking stock");
                    GatewayError::ProductService(Box::new(err))
                })?;

            if !available {
                return Err(GatewayError::OutOfStock {
                    product_id: item.product_id,
                });
            }
        }

        self.order.create_order(user_id, items).await.map_err(|err| {
            error!(error = %err, user_id, "error creating order");
            GatewayError::OrderService(Box::new(err))
        })
    }

    async fn list_user_orders(&self, user_id: i64) -> Result<Vec<OrderDetails>, GatewayError> {
        self.order.list_user_orders(user_id).await.map_err(|err| {
            error!(error = %err, user_id, "error listing user orders");
            GatewayError::OrderService(Box::new(err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Status;

    fn service(
        user: MockUserBackend,
        order: MockOrderBackend,
        product: MockProductBackend,
    ) -> ProcessorService {
        ProcessorService::new(Arc::new(user), Arc::new(order), Arc::new(product))
    }

    #[tokio::test]
    async fn register_user_passes_through_the_new_id() {
        let mut user = MockUserBackend::new();
        user.expect_register()
            .withf(|email, login, password| {
                email == "a@b.c" && login == "alice" && password == "pw"
            })
            .returning(|_, _, _| Ok(42));

        let svc = service(user, MockOrderBackend::new(), MockProductBackend::new());
        let id = svc.register_user("a@b.c", "pw", "alice").await.unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn register_failure_is_relabelled_with_user_service_prefix() {
        let mut user = MockUserBackend::new();
        user.expect_register().returning(|_, _, _| {
            Err(GatewayError::backend(
                "rpc.user.register",
                Status::unavailable("down"),
            ))
        });

        let svc = service(user, MockOrderBackend::new(), MockProductBackend::new());
        let err = svc.register_user("a@b.c", "pw", "alice").await.unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("user service error:"));
        assert_eq!(err.operation(), Some("rpc.user.register"));
    }

    #[tokio::test]
    async fn login_returns_backend_token() {
        let mut user = MockUserBackend::new();
        user.expect_login().returning(|_, _| Ok("abc123".to_string()));

        let svc = service(user, MockOrderBackend::new(), MockProductBackend::new());
        let token = svc.login_user("alice", "pw").await.unwrap();
        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn create_order_rejects_unavailable_stock_before_ordering() {
        let mut product = MockProductBackend::new();
        product.expect_check_stock().returning(|product_id, _| Ok(product_id != 20));

        let mut order = MockOrderBackend::new();
        order.expect_create_order().never();

        let svc = service(MockUserBackend::new(), order, product);
        let items = [OrderItem::new(10, 1, 100), OrderItem::new(20, 2, 200)];

        let err = svc.create_order(1, &items).await.unwrap_err();
        assert!(matches!(err, GatewayError::OutOfStock { product_id: 20 }));
    }

    #[tokio::test]
    async fn create_order_forwards_items_when_stock_is_available() {
        let mut product = MockProductBackend::new();
        product.expect_check_stock().returning(|_, _| Ok(true));

        let mut order = MockOrderBackend::new();
        order
            .expect_create_order()
            .withf(|user_id, items| *user_id == 1 && items.len() == 2)
            .returning(|_, _| Ok((555, 500)));

        let svc = service(MockUserBackend::new(), order, product);
        let items = [OrderItem::new(10, 1, 100), OrderItem::new(20, 2, 200)];

        let (order_id, total) = svc.create_order(1, &items).await.unwrap();
        assert_eq!((order_id, total), (555, 500));
    }
}
