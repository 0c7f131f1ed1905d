use crate::config::SyncConfig;
use crate::principal::{IdentitySession, Principal};
use crate::store::{
    HttpUserStore, NewUserRecord, StoreError, SubscriptionTier, UserRecord, UserStore, UserUpdate,
};
use crate::utils::gen_unusable_password;

use super::errors::SyncError;

/// What a sync did to reach its record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Matched by external id, tier already current
    Existing,
    /// Matched by external id, tier update issued
    TierUpdated,
    /// Matched by email and linked to the external id
    LinkedByEmail,
    /// New record created
    Created,
    /// Create hit an email conflict; the conflicting record was linked instead
    LinkedAfterConflict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncedUser {
    pub record: UserRecord,
    pub action: SyncAction,
}

/// Reconcile `principal` into the backend store and mirror `tier` onto it.
///
/// Lookup order is external id, then primary email, then create. Each step
/// is one request; nothing is retried and nothing spans requests atomically.
pub async fn sync_principal(
    store: &dyn UserStore,
    principal: &Principal,
    tier: SubscriptionTier,
) -> Result<SyncedUser, SyncError> {
    if let Some(existing) = store.find_by_external_id(&principal.id).await? {
        tracing::debug!(
            "Found user {} for external id {}",
            existing.id,
            principal.id
        );
        return Ok(refresh_tier(store, existing, tier).await);
    }

    let email = principal
        .normalized_email()
        .ok_or_else(|| SyncError::MissingEmail(principal.id.clone()).log())?;

    if let Some(record) = link_by_email(store, &principal.id, &email, tier).await? {
        tracing::info!(
            "Linked existing user {} to external id {}",
            record.id,
            principal.id
        );
        return Ok(SyncedUser {
            record,
            action: SyncAction::LinkedByEmail,
        });
    }

    create_user(store, principal, &email, tier).await
}

/// Bring the stored tier in line with `tier`.
///
/// The update is best-effort: a failure is logged and the caller still gets
/// the record with the computed tier, which the next sync will retry.
async fn refresh_tier(
    store: &dyn UserStore,
    mut record: UserRecord,
    tier: SubscriptionTier,
) -> SyncedUser {
    if record.subscription_tier == Some(tier) {
        return SyncedUser {
            record,
            action: SyncAction::Existing,
        };
    }

    match store.update_user(record.id, &UserUpdate::tier(tier)).await {
        Ok(_) => tracing::info!("Updated subscription tier of user {} to {}", record.id, tier),
        Err(e) => tracing::warn!(
            "Failed to update subscription tier of user {} to {}: {}",
            record.id,
            tier,
            e
        ),
    }

    record.subscription_tier = Some(tier);
    SyncedUser {
        record,
        action: SyncAction::TierUpdated,
    }
}

/// Find a record by email and attach the external id and tier to it.
///
/// `Ok(None)` when no record matches or the update is rejected; the caller
/// then goes on to create.
async fn link_by_email(
    store: &dyn UserStore,
    external_id: &str,
    email: &str,
    tier: SubscriptionTier,
) -> Result<Option<UserRecord>, SyncError> {
    let Some(existing) = store.find_by_email(email).await? else {
        tracing::debug!("No user found with email {}", email);
        return Ok(None);
    };

    match store
        .update_user(existing.id, &UserUpdate::link(external_id, tier))
        .await
    {
        Ok(updated) => Ok(Some(updated)),
        Err(e) => {
            tracing::warn!(
                "Failed to link user {} to external id {}: {}",
                existing.id,
                external_id,
                e
            );
            Ok(None)
        }
    }
}

async fn create_user(
    store: &dyn UserStore,
    principal: &Principal,
    email: &str,
    tier: SubscriptionTier,
) -> Result<SyncedUser, SyncError> {
    let role = store
        .authenticated_role()
        .await?
        .ok_or_else(|| SyncError::RoleNotFound.log())?;

    let new_user = NewUserRecord {
        username: principal
            .username_or_email_local_part()
            .unwrap_or_else(|| email.to_string()),
        email: email.to_string(),
        password: gen_unusable_password(&principal.id)?,
        confirmed: true,
        blocked: false,
        role: role.id,
        external_id: principal.id.clone(),
        first_name: principal.first_name.clone().unwrap_or_default(),
        last_name: principal.last_name.clone().unwrap_or_default(),
        image_url: principal.image_url.clone().unwrap_or_default(),
        subscription_tier: tier,
    };

    match store.create_user(&new_user).await {
        Ok(record) => {
            tracing::info!(
                "Created user {} for external id {}",
                record.id,
                principal.id
            );
            Ok(SyncedUser {
                record,
                action: SyncAction::Created,
            })
        }
        Err(StoreError::EmailTaken) => {
            // Someone created the record between our email lookup and the create
            tracing::info!("Email {} already taken, linking existing user", email);
            match link_by_email(store, &principal.id, email, tier).await? {
                Some(record) => {
                    tracing::info!(
                        "Linked existing user {} to external id {} after conflict",
                        record.id,
                        principal.id
                    );
                    Ok(SyncedUser {
                        record,
                        action: SyncAction::LinkedAfterConflict,
                    })
                }
                None => Err(StoreError::EmailTaken.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

/// Sync whoever is signed in to `session`.
///
/// `Ok(None)` means nobody is signed in. The tier is `pro` when the session
/// reports membership of `pro_plan`.
pub async fn sync_current_user(
    session: &dyn IdentitySession,
    store: &dyn UserStore,
    pro_plan: &str,
) -> Result<Option<SyncedUser>, SyncError> {
    let Some(principal) = session.current_principal().await? else {
        tracing::debug!("No user found in session");
        return Ok(None);
    };

    let tier = SubscriptionTier::from_plan_membership(session.has_plan(pro_plan).await);
    tracing::debug!("Syncing user {} with tier {}", principal.id, tier);

    sync_principal(store, &principal, tier).await.map(Some)
}

/// Sync the signed-in user against `store`, folding every failure into `None`.
pub async fn check_user_with_store(
    session: &dyn IdentitySession,
    store: &dyn UserStore,
    pro_plan: &str,
) -> Option<UserRecord> {
    match sync_current_user(session, store, pro_plan).await {
        Ok(synced) => synced.map(|s| s.record),
        // Already logged where the error was raised
        Err(e) => {
            tracing::debug!("User sync produced no record: {}", e);
            None
        }
    }
}

/// Sync the signed-in user against the HTTP backend described by `config`.
pub async fn check_user_with(
    session: &dyn IdentitySession,
    config: &SyncConfig,
) -> Option<UserRecord> {
    let store = match HttpUserStore::new(config) {
        Ok(store) => store,
        Err(e) => {
            SyncError::Store(e).log();
            return None;
        }
    };
    check_user_with_store(session, &store, config.pro_plan()).await
}

/// Sync the signed-in user using configuration from the environment.
///
/// Returns `None` when nobody is signed in, when `USER_STORE_API_TOKEN` is
/// missing, or when any backend call fails. Failures are logged. The session
/// is read before the environment, so anonymous callers need no
/// configuration.
pub async fn check_user(session: &dyn IdentitySession) -> Option<UserRecord> {
    match session.current_principal().await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::debug!("No user found in session");
            return None;
        }
        Err(e) => {
            SyncError::Session(e).log();
            return None;
        }
    }

    match SyncConfig::from_env() {
        Ok(config) => check_user_with(session, &config).await,
        Err(e) => {
            SyncError::Config(e).log();
            None
        }
    }
}
