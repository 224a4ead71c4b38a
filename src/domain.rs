//! Domain value records passed between the facade and the client adapters.
//!
//! Plain immutable data, converted to and from the generated protobuf
//! messages at the adapter boundary.

use crate::proto::{order, product, user};

/// Resolved user account details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    /// User identifier
    pub user_id: i64,
    /// Login name
    pub login: String,
    /// Email address
    pub email: String,
}

impl From<user::v1::UserDetails> for UserDetails {
    fn from(details: user::v1::UserDetails) -> Self {
        Self {
            user_id: details.user_id,
            login: details.login,
            email: details.email,
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    /// Ordered product
    pub product_id: i64,
    /// Ordered quantity
    pub quantity: i32,
    /// Unit price in minor currency units
    pub price: i64,
}

impl OrderItem {
    /// Creates a new order item.
    #[must_use]
    pub const fn new(product_id: i64, quantity: i32, price: i64) -> Self {
        Self {
            product_id,
            quantity,
            price,
        }
    }
}

impl From<OrderItem> for order::v1::OrderItem {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

impl From<order::v1::OrderItem> for OrderItem {
    fn from(item: order::v1::OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Full order view as returned by the order service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    /// Order identifier
    pub order_id: i64,
    /// Owning user
    pub user_id: i64,
    /// Total price in minor currency units
    pub total_price: i64,
    /// Ordered items, in backend order
    pub items: Vec<OrderItem>,
    /// Order status as reported by the backend
    pub status: String,
}

impl From<order::v1::OrderDetails> for OrderDetails {
    fn from(details: order::v1::OrderDetails) -> Self {
        Self {
            order_id: details.order_id,
            user_id: details.user_id,
            total_price: details.total_price,
            items: details.items.into_iter().map(OrderItem::from).collect(),
            status: details.status,
        }
    }
}

/// Catalogue entry as returned by the product service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    /// Product identifier
    pub product_id: i64,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Unit price in minor currency units
    pub price: i64,
    /// Remaining stock
    pub stock_count: i32,
}

impl From<product::v1::ProductDetails> for ProductDetails {
    fn from(details: product::v1::ProductDetails) -> Self {
        Self {
            product_id: details.product_id,
            name: details.name,
            description: details.description,
            price: details.price,
            stock_count: details.stock_count,
        }
    }
}
