//! order-service client adapter.

use async_trait::async_trait;
use tonic::transport::Channel;

use crate::config::BackendConfig;
use crate::domain::{OrderDetails, OrderItem};
use crate::error::GatewayError;
use crate::processor::OrderBackend;
use crate::proto::order::v1::order_service_client::OrderServiceClient;
use crate::proto::order::v1::{CreateOrderRequest, GetOrderRequest, ListUserOrdersRequest};
use crate::retry::RetryPolicy;

/// Client adapter for the order service.
pub struct OrderClient {
    client: OrderServiceClient<Channel>,
    retry: RetryPolicy,
}

impl OrderClient {
    /// Creates an adapter from backend connection parameters.
    ///
    /// # Errors
    ///
    /// Fails only when the target address cannot be turned into a channel.
    pub fn new(config: &BackendConfig) -> Result<Self, GatewayError> {
        let channel = super::lazy_channel(config)?;
        Ok(Self::from_channel(channel, super::retry_policy(config)))
    }

    /// Creates an adapter over an existing channel. Test seam.
    #[must_use]
    pub fn from_channel(channel: Channel, retry: RetryPolicy) -> Self {
        Self {
            client: OrderServiceClient::new(channel),
            retry,
        }
    }
}

#[async_trait]
impl OrderBackend for OrderClient {
    async fn create_order(
        &self,
        user_id: i64,
        items: &[OrderItem],
    ) -> Result<(i64, i64), GatewayError> {
        const OP: &str = "rpc.order.create_order";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                let request = CreateOrderRequest {
                    user_id,
                    items: items.iter().copied().map(Into::into).collect(),
                };
                async move { client.create_order(request).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        let inner = response.into_inner();
        Ok((inner.order_id, inner.total_price))
    }

    async fn get_order(&self, order_id: i64) -> Result<Option<OrderDetails>, GatewayError> {
        const OP: &str = "rpc.order.get_order";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                async move { client.get_order(GetOrderRequest { order_id }).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        // Missing details are passed through as explicit absence.
        Ok(response.into_inner().order_details.map(Into::into))
    }

    async fn list_user_orders(&self, user_id: i64) -> Result<Vec<OrderDetails>, GatewayError> {
        const OP: &str = "rpc.order.list_user_orders";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                async move { client.list_user_orders(ListUserOrdersRequest { user_id }).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        Ok(response
            .into_inner()
            .orders
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
