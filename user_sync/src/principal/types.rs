use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the identity provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Stable, opaque identifier issued by the identity provider
    pub id: String,
    /// Email addresses on file; the first one is treated as primary
    #[serde(default)]
    pub email_addresses: Vec<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email_addresses: vec![email.into()],
            ..Default::default()
        }
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses
            .first()
            .map(String::as_str)
            .filter(|email| !email.is_empty())
    }

    /// Primary email trimmed and lowercased, the form the backend stores
    pub fn normalized_email(&self) -> Option<String> {
        self.primary_email()
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
    }

    /// Username for a new backend record.
    ///
    /// Falls back to the local part of the primary email when the provider
    /// has no username (or an empty one).
    pub fn username_or_email_local_part(&self) -> Option<String> {
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return Some(username.to_string());
        }
        self.primary_email()
            .map(|email| email.split('@').next().unwrap_or(email).to_string())
    }
}
