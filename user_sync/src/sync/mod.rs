//! Reconciliation of identity provider principals with backend user records
//!
//! - `core`: the lookup, link and create sequence plus the `check_user` entry points
//! - `errors`: `SyncError`, distinguishing configuration, session and store failures

mod core;
mod errors;

pub use core::{
    SyncAction, SyncedUser, check_user, check_user_with, check_user_with_store,
    sync_current_user, sync_principal,
};
pub use errors::SyncError;
