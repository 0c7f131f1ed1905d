use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::errors::StoreError;
use super::traits::UserStore;
use super::types::{AUTHENTICATED_ROLE_TYPE, NewUserRecord, Role, UserRecord, UserUpdate};

/// In-process [`UserStore`] that mimics the backend's behaviour closely
/// enough for local runs and tests: sequential ids, lowercased and unique
/// emails, unique usernames.
pub struct InMemoryUserStore {
    inner: Mutex<MemoryState>,
}

struct MemoryState {
    users: Vec<UserRecord>,
    roles: Vec<Role>,
    next_id: i64,
}

impl InMemoryUserStore {
    /// Empty store with the backend's two default roles
    pub fn new() -> Self {
        Self::with_roles(vec![
            Role::new(1, "Authenticated", AUTHENTICATED_ROLE_TYPE),
            Role::new(2, "Public", "public"),
        ])
    }

    pub fn with_roles(roles: Vec<Role>) -> Self {
        tracing::info!("Creating new in-memory user store");
        Self {
            inner: Mutex::new(MemoryState {
                users: Vec::new(),
                roles,
                next_id: 1,
            }),
        }
    }

    /// Insert a record directly, assigning the next id. The email is
    /// lowercased as on create. Returns the stored record.
    pub async fn insert(&self, mut record: UserRecord) -> UserRecord {
        record.email = record.email.to_lowercase();
        let mut state = self.inner.lock().await;
        record.id = state.next_id;
        state.next_id += 1;
        state.users.push(record.clone());
        record
    }

    /// Snapshot of all records, in insertion order
    pub async fn users(&self) -> Vec<UserRecord> {
        self.inner.lock().await.users.clone()
    }

    pub async fn get(&self, id: i64) -> Option<UserRecord> {
        self.inner
            .lock()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn conflict(message: &str) -> StoreError {
    StoreError::Status {
        status: 400,
        message: message.to_string(),
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let state = self.inner.lock().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.external_id.as_deref() == Some(external_id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let email = email.to_lowercase();
        let state = self.inner.lock().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn authenticated_role(&self) -> Result<Option<Role>, StoreError> {
        let state = self.inner.lock().await;
        Ok(state.roles.iter().find(|r| r.is_authenticated()).cloned())
    }

    async fn create_user(&self, new_user: &NewUserRecord) -> Result<UserRecord, StoreError> {
        let email = new_user.email.to_lowercase();
        let mut state = self.inner.lock().await;

        if state.users.iter().any(|u| u.email == email) {
            return Err(StoreError::EmailTaken);
        }
        if state.users.iter().any(|u| u.username == new_user.username) {
            return Err(conflict("Username already taken"));
        }
        let role = state
            .roles
            .iter()
            .find(|r| r.id == new_user.role)
            .cloned()
            .ok_or_else(|| conflict("Role not found"))?;

        let now = Utc::now();
        let record = UserRecord {
            id: state.next_id,
            document_id: None,
            username: new_user.username.clone(),
            email,
            provider: Some("local".to_string()),
            confirmed: new_user.confirmed,
            blocked: new_user.blocked,
            external_id: Some(new_user.external_id.clone()),
            first_name: Some(new_user.first_name.clone()),
            last_name: Some(new_user.last_name.clone()),
            image_url: Some(new_user.image_url.clone()),
            subscription_tier: Some(new_user.subscription_tier),
            role: Some(role),
            created_at: Some(now),
            updated_at: Some(now),
        };
        state.next_id += 1;
        state.users.push(record.clone());
        Ok(record)
    }

    async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<UserRecord, StoreError> {
        let mut state = self.inner.lock().await;
        let record = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::Status {
                status: 404,
                message: "Not Found".to_string(),
            })?;

        update.apply_to(record);
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }
}
