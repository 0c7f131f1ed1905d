//! user_sync - Identity provider to backend user store reconciliation
//!
//! This crate keeps a backend user record (a Strapi `users-permissions` style
//! REST API) in step with the principal authenticated by an external identity
//! provider. Records are matched by external id first, then by email, and the
//! subscription tier derived from the principal's plan membership is mirrored
//! onto the record.

mod config;
mod principal;
mod store;
mod sync;
mod utils;

pub use config::{
    ConfigError, DEFAULT_PRO_PLAN, DEFAULT_USER_STORE_URL, ENV_PRO_PLAN, ENV_USER_STORE_API_TOKEN,
    ENV_USER_STORE_URL, SyncConfig,
};

pub use principal::{IdentitySession, Principal, SessionError, StaticSession};

pub use store::{
    AUTHENTICATED_ROLE_TYPE, EMAIL_TAKEN_MESSAGE, HttpUserStore, InMemoryUserStore,
    NewUserRecord, Role, StoreError, SubscriptionTier, UserRecord, UserStore, UserUpdate,
};

pub use sync::{
    SyncAction, SyncError, SyncedUser, check_user, check_user_with, check_user_with_store,
    sync_current_user, sync_principal,
};

pub use utils::UtilError;
