use async_trait::async_trait;
use std::collections::HashSet;

use super::errors::SessionError;
use super::types::Principal;

/// Source of the currently authenticated principal.
///
/// Implemented over whatever session service the identity provider offers.
/// `has_plan` answers the provider's billing capability check.
#[async_trait]
pub trait IdentitySession: Send + Sync {
    /// The authenticated principal, or `None` when nobody is signed in.
    async fn current_principal(&self) -> Result<Option<Principal>, SessionError>;

    /// Whether the signed-in principal holds the named plan.
    async fn has_plan(&self, plan: &str) -> bool;
}

/// Session backed by values already in hand, e.g. decoded from a request.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    principal: Option<Principal>,
    plans: HashSet<String>,
}

impl StaticSession {
    pub fn new(principal: Option<Principal>) -> Self {
        Self {
            principal,
            plans: HashSet::new(),
        }
    }

    pub fn signed_in(principal: Principal) -> Self {
        Self::new(Some(principal))
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn with_plans<I, S>(mut self, plans: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plans.extend(plans.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl IdentitySession for StaticSession {
    async fn current_principal(&self) -> Result<Option<Principal>, SessionError> {
        Ok(self.principal.clone())
    }

    async fn has_plan(&self, plan: &str) -> bool {
        self.principal.is_some() && self.plans.contains(plan)
    }
}
