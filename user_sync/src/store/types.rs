use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role `type` the backend assigns to regular signed-in users
pub const AUTHENTICATED_ROLE_TYPE: &str = "authenticated";

/// Message the backend returns when a create collides on email
pub const EMAIL_TAKEN_MESSAGE: &str = "Email already taken";

/// Subscription tier mirrored from the identity provider's plan check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Pro,
}

impl SubscriptionTier {
    pub fn from_plan_membership(is_member: bool) -> Self {
        if is_member { Self::Pro } else { Self::Free }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend role as listed by `/api/users-permissions/roles`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub role_type: String,
}

impl Role {
    pub fn new(id: i64, name: impl Into<String>, role_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            role_type: role_type.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role_type == AUTHENTICATED_ROLE_TYPE
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RolesEnvelope {
    pub(super) roles: Vec<Role>,
}

/// User record held by the backend store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
    #[serde(default)]
    pub blocked: bool,
    /// Identity provider id, the reconciliation key
    #[serde(rename = "clerkId", default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Missing on rows created before tiers existed
    #[serde(default)]
    pub subscription_tier: Option<SubscriptionTier>,
    /// Only present when the backend populates the relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /api/users`
#[derive(Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRecord {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmed: bool,
    pub blocked: bool,
    pub role: i64,
    #[serde(rename = "clerkId")]
    pub external_id: String,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
    pub subscription_tier: SubscriptionTier,
}

impl fmt::Debug for NewUserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUserRecord")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("confirmed", &self.confirmed)
            .field("blocked", &self.blocked)
            .field("role", &self.role)
            .field("external_id", &self.external_id)
            .field("subscription_tier", &self.subscription_tier)
            .finish()
    }
}

/// Partial payload for `PUT /api/users/{id}`; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(rename = "clerkId", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<SubscriptionTier>,
}

impl UserUpdate {
    pub fn tier(tier: SubscriptionTier) -> Self {
        Self {
            external_id: None,
            subscription_tier: Some(tier),
        }
    }

    pub fn link(external_id: impl Into<String>, tier: SubscriptionTier) -> Self {
        Self {
            external_id: Some(external_id.into()),
            subscription_tier: Some(tier),
        }
    }

    pub(crate) fn apply_to(&self, record: &mut UserRecord) {
        if let Some(external_id) = &self.external_id {
            record.external_id = Some(external_id.clone());
        }
        if let Some(tier) = self.subscription_tier {
            record.subscription_tier = Some(tier);
        }
    }
}

/// Error envelope returned by the backend on 4xx/5xx
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub(super) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub(super) message: String,
}
