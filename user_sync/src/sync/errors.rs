//! Error types for user reconciliation

use thiserror::Error;

use crate::config::ConfigError;
use crate::principal::SessionError;
use crate::store::StoreError;
use crate::utils::UtilError;

/// Why a sync did not produce a user record
#[derive(Error, Debug)]
pub enum SyncError {
    /// Backend settings missing or invalid
    #[error("Configuration error: {0}")]
    Config(ConfigError),

    /// The identity session could not be read
    #[error("Session error: {0}")]
    Session(SessionError),

    /// A backend request failed
    #[error("Store error: {0}")]
    Store(StoreError),

    /// The backend defines no role of type `authenticated`
    #[error("Authenticated role not found")]
    RoleNotFound,

    /// Principal has no email to match or create a record with
    #[error("Principal {0} has no email address")]
    MissingEmail(String),

    #[error("Utils error: {0}")]
    Utils(UtilError),
}

impl SyncError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::Config(err) => tracing::error!("Configuration error: {}", err),
            Self::Session(err) => tracing::error!("Session error: {}", err),
            Self::Store(err) => tracing::error!("Store error: {}", err),
            Self::RoleNotFound => tracing::error!("Authenticated role not found"),
            Self::MissingEmail(id) => tracing::error!("Principal {} has no email address", id),
            Self::Utils(err) => tracing::error!("Utils error: {}", err),
        }
        self
    }
}

// From implementations log as they convert

impl From<ConfigError> for SyncError {
    fn from(err: ConfigError) -> Self {
        let error = Self::Config(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for SyncError {
    fn from(err: SessionError) -> Self {
        let error = Self::Session(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        let error = Self::Store(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for SyncError {
    fn from(err: UtilError) -> Self {
        let error = Self::Utils(err);
        tracing::error!("{}", error);
        error
    }
}
