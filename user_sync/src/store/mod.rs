//! Backend user store access
//!
//! - `types`: wire types for users, roles and payloads
//! - `traits`: the `UserStore` seam used by the reconciliation
//! - `http`: REST implementation with bearer-token auth
//! - `memory`: in-process implementation for local runs and tests

mod errors;
mod http;
mod memory;
mod traits;
mod types;

pub use errors::StoreError;
pub use http::HttpUserStore;
pub use memory::InMemoryUserStore;
pub use traits::UserStore;
pub use types::{
    AUTHENTICATED_ROLE_TYPE, EMAIL_TAKEN_MESSAGE, NewUserRecord, Role, SubscriptionTier,
    UserRecord, UserUpdate,
};
