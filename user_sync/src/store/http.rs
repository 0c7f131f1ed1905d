use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::SyncConfig;

use super::errors::StoreError;
use super::traits::UserStore;
use super::types::{
    EMAIL_TAKEN_MESSAGE, ErrorEnvelope, NewUserRecord, Role, RolesEnvelope, UserRecord, UserUpdate,
};

/// Wire name of the external id column on the backend
const EXTERNAL_ID_FIELD: &str = "clerkId";
const EMAIL_FIELD: &str = "email";

/// [`UserStore`] over the backend's REST API.
///
/// Every request carries the API token as a bearer credential.
pub struct HttpUserStore {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl HttpUserStore {
    pub fn new(config: &SyncConfig) -> Result<Self, StoreError> {
        Ok(Self {
            client: build_client()?,
            base_url: config.base_url().to_string(),
            api_token: config.api_token().to_string(),
        })
    }

    fn users_url(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/api/users/{id}", self.base_url)
    }

    fn roles_url(&self) -> String {
        format!("{}/api/users-permissions/roles", self.base_url)
    }

    async fn find_first_by(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let filter = format!("filters[{field}][$eq]");
        tracing::debug!("Looking up user by {}: {}", field, value);

        let response = self
            .client
            .get(self.users_url())
            .bearer_auth(&self.api_token)
            .header(CACHE_CONTROL, "no-store")
            .query(&[(filter.as_str(), value)])
            .send()
            .await?;

        let users: Vec<UserRecord> = read_json(response).await?;
        Ok(users.into_iter().next())
    }
}

/// HTTP client for backend calls.
///
/// - `timeout`: 30 seconds, so a stalled backend cannot hang a sign-in forever.
/// - `pool_idle_timeout`: 90 seconds (reqwest default).
/// - `pool_max_idle_per_host`: 32.
fn build_client() -> Result<reqwest::Client, StoreError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()?;
    Ok(client)
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::debug!("User store error response ({}): {}", status, body);
        return Err(error_from_body(status.as_u16(), &body));
    }

    serde_json::from_str(&body)
        .map_err(|e| StoreError::Serde(format!("Failed to deserialize response body: {e}")))
}

/// Map an error response to a [`StoreError`], recognising the email conflict.
fn error_from_body(status: u16, body: &str) -> StoreError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if envelope.error.message == EMAIL_TAKEN_MESSAGE => StoreError::EmailTaken,
        Ok(envelope) => StoreError::Status {
            status,
            message: envelope.error.message,
        },
        Err(_) => StoreError::Status {
            status,
            message: body.to_string(),
        },
    }
}

#[async_trait]
impl UserStore for HttpUserStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        self.find_first_by(EXTERNAL_ID_FIELD, external_id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        self.find_first_by(EMAIL_FIELD, email).await
    }

    async fn authenticated_role(&self) -> Result<Option<Role>, StoreError> {
        let response = self
            .client
            .get(self.roles_url())
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let envelope: RolesEnvelope = read_json(response).await?;
        Ok(envelope.roles.into_iter().find(Role::is_authenticated))
    }

    async fn create_user(&self, new_user: &NewUserRecord) -> Result<UserRecord, StoreError> {
        tracing::debug!("Creating user: {:?}", new_user);

        let response = self
            .client
            .post(self.users_url())
            .bearer_auth(&self.api_token)
            .json(new_user)
            .send()
            .await?;

        read_json(response).await
    }

    async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<UserRecord, StoreError> {
        tracing::debug!("Updating user {}: {:?}", id, update);

        let response = self
            .client
            .put(self.user_url(id))
            .bearer_auth(&self.api_token)
            .json(update)
            .send()
            .await?;

        read_json(response).await
    }
}
