//! user-service client adapter.

use async_trait::async_trait;
use tonic::transport::Channel;

use crate::config::BackendConfig;
use crate::domain::UserDetails;
use crate::error::GatewayError;
use crate::processor::UserBackend;
use crate::proto::user::v1::user_service_client::UserServiceClient;
use crate::proto::user::v1::{GetUserRequest, LoginRequest, RegisterRequest};
use crate::retry::RetryPolicy;

/// Client adapter for the user service.
///
/// Stateless apart from the channel and policy; safe for concurrent use by
/// any number of in-flight requests.
pub struct UserClient {
    client: UserServiceClient<Channel>,
    retry: RetryPolicy,
}

impl UserClient {
    /// Creates an adapter from backend connection parameters.
    ///
    /// # Errors
    ///
    /// Fails only when the target address cannot be turned into a channel;
    /// no handshake happens at construction time.
    pub fn new(config: &BackendConfig) -> Result<Self, GatewayError> {
        let channel = super::lazy_channel(config)?;
        Ok(Self::from_channel(channel, super::retry_policy(config)))
    }

    /// Creates an adapter over an existing channel. Test seam.
    #[must_use]
    pub fn from_channel(channel: Channel, retry: RetryPolicy) -> Self {
        Self {
            client: UserServiceClient::new(channel),
            retry,
        }
    }
}

#[async_trait]
impl UserBackend for UserClient {
    async fn register(
        &self,
        email: &str,
        login: &str,
        password: &str,
    ) -> Result<i64, GatewayError> {
        const OP: &str = "rpc.user.register";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                let request = RegisterRequest {
                    email: email.to_owned(),
                    login: login.to_owned(),
                    password: password.to_owned(),
                };
                async move { client.register(request).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        Ok(response.into_inner().user_id)
    }

    async fn login(&self, login: &str, password: &str) -> Result<String, GatewayError> {
        const OP: &str = "rpc.user.login";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                let request = LoginRequest {
                    login: login.to_owned(),
                    password: password.to_owned(),
                };
                async move { client.login(request).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        Ok(response.into_inner().token)
    }

    async fn get_user(&self, user_id: i64) -> Result<UserDetails, GatewayError> {
        const OP: &str = "rpc.user.get_user";

        let response = self
            .retry
            .execute(|| {
                let mut client = self.client.clone();
                async move { client.get_user(GetUserRequest { user_id }).await }
            })
            .await
            .map_err(|status| GatewayError::backend(OP, status))?;

        // A user must always resolve to details; unlike the order lookup,
        // an empty payload here is a domain-invariant violation.
        let details = response
            .into_inner()
            .user_details
            .ok_or(GatewayError::EmptyDetails {
                operation: OP,
                entity: "user",
            })?;

        Ok(details.into())
    }
}
