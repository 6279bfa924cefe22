// ABOUTME: Per-scope feature enablement
// ABOUTME: Tags only answer in the scopes (guilds) they were enabled for

use std::collections::HashSet;

use tracing::debug;

use crate::access::AccessError;

#[derive(Debug, Clone, Default)]
pub struct ScopeGate {
    allowed_scopes: HashSet<String>,
}

impl ScopeGate {
    pub fn new<I, S>(allowed_scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_scopes: allowed_scopes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_enabled(&self, scope: Option<&str>) -> bool {
        scope.is_some_and(|scope| self.allowed_scopes.contains(scope))
    }

    /// `AccessError::FeatureDisabled` outside an enabled scope, including
    /// requests with no scope at all
    pub fn check(&self, scope: Option<&str>) -> Result<(), AccessError> {
        if self.is_enabled(scope) {
            Ok(())
        } else {
            debug!("Tags are not enabled in scope {:?}", scope);
            Err(AccessError::FeatureDisabled)
        }
    }
}
