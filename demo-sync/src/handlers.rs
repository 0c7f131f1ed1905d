use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use user_sync::{
    DEFAULT_PRO_PLAN, ENV_PRO_PLAN, InMemoryUserStore, Principal, StaticSession, UserRecord,
    check_user, check_user_with_store,
};

#[derive(Clone)]
pub(crate) enum Backend {
    /// Configuration is read from the environment on every request
    Http,
    Memory(Arc<InMemoryUserStore>),
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) backend: Backend,
}

/// What the identity provider's session would report
#[derive(Debug, Deserialize)]
pub(crate) struct SyncRequest {
    principal: Option<Principal>,
    #[serde(default)]
    plans: Vec<String>,
}

pub(crate) async fn health() -> &'static str {
    "ok"
}

pub(crate) async fn sync(
    State(state): State<AppState>,
    Json(request): Json<SyncRequest>,
) -> Result<Json<UserRecord>, (StatusCode, String)> {
    let session = StaticSession::new(request.principal).with_plans(request.plans);

    let record = match &state.backend {
        Backend::Http => check_user(&session).await,
        Backend::Memory(store) => {
            let pro_plan =
                std::env::var(ENV_PRO_PLAN).unwrap_or_else(|_| DEFAULT_PRO_PLAN.to_string());
            check_user_with_store(&session, store.as_ref(), &pro_plan).await
        }
    };

    record
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "No user".to_string()))
}
