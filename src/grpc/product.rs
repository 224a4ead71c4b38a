//! product-service client adapter.

use async_trait::async_trait;
use tonic::transport::Channel;

use crate::config::BackendConfig;
use crate::domain::ProductDetails;
use crate::error::GatewayError;
use crate::processor::ProductBackend;
use crate::proto::product::v1::product_service_client::ProductServiceClient;
use crate::proto::product::v1::{
    CheckStockRequest, GetProductRequest, ListProductsRequest, UpdateStockRequest,
};
use crate::retry::RetryPolicy;

/// Client adapter for the product service.
pub struct ProductClient {
    client: ProductServiceClient<Channel>,
    retry: RetryPolicy,
}

impl ProductClient {
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
            client: ProductServiceClient::new(channel),
            retry,
        }
    }
}

#[async_trait]
impl ProductBackend for ProductClient {
    async fn get_product(&self, product_id: i64) -> Result<Option<ProductDetails>, GatewayError> {
        const OP: &str = "rpc.product.get_product";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                async move { client.get_product(GetProductRequest { product_id }).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        Ok(response.into_inner().product_details.map(Into::into))
    }

    async fn list_products(&self, filter: &str) -> Result<Vec<ProductDetails>, GatewayError> {
        const OP: &str = "rpc.product.list_products";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                let request = ListProductsRequest {
                    filter: filter.to_owned(),
                };
                async move { client.list_products(request).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        Ok(response
            .into_inner()
            .products
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn check_stock(&self, product_id: i64, quantity: i32) -> Result<bool, GatewayError> {
        const OP: &str = "rpc.product.check_stock";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                let request = CheckStockRequest {
                    product_id,
                    quantity,
                };
                async move { client.check_stock(request).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        Ok(response.into_inner().is_available)
    }

    async fn update_stock(&self, product_id: i64, quantity_change: i32) -> Result<(), GatewayError> {
        const OP: &str = "rpc.product.update_stock";

        self.retry
            .execute(|| {
                let mut client = self.client.clone();
                let request = UpdateStockRequest {
                    product_id,
                    quantity_change,
                };
                async move { client.update_stock(request).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        Ok(())
    }
}
