use async_trait::async_trait;

use super::errors::StoreError;
use super::types::{NewUserRecord, Role, UserRecord, UserUpdate};

/// Operations the reconciliation needs from the backend user store.
///
/// Each call is a single request with no retry. Lookups return the first
/// match; uniqueness is the backend's business.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str)
    -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// The role whose `type` is `authenticated`, if the backend defines one.
    async fn authenticated_role(&self) -> Result<Option<Role>, StoreError>;

    /// Create a record. Fails with [`StoreError::EmailTaken`] when the email is in use.
    async fn create_user(&self, new_user: &NewUserRecord) -> Result<UserRecord, StoreError>;

    async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<UserRecord, StoreError>;
}
