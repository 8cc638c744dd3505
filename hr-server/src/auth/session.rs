//! Session revocation
//!
//! Every account has a session epoch (0 until first revoked). Tokens carry the
//! epoch current at login; bumping it invalidates every token issued before.

use dashmap::DashMap;
use std::sync::Arc;

/// Signal from a service that the account's sessions must end
#[must_use = "a ForceLogout must be applied to the SessionRegistry"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceLogout {
    pub account_id: i64,
}

/// 会话版本管理器 (DashMap, 无锁)
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    epochs: Arc<DashMap<i64, u64>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Epoch to embed in a newly issued token
    pub fn current_epoch(&self, account_id: i64) -> u64 {
        self.epochs.get(&account_id).map(|e| *e).unwrap_or(0)
    }

    /// Invalidate all existing tokens of the account, returning the new epoch
    pub fn revoke(&self, account_id: i64) -> u64 {
        let mut entry = self.epochs.entry(account_id).or_insert(0);
        *entry += 1;
        *entry
    }

    pub fn apply(&self, signal: ForceLogout) {
        let epoch = self.revoke(signal.account_id);
        tracing::info!(account_id = signal.account_id, epoch, "Sessions revoked");
    }

    /// Whether a token carrying `epoch` is still valid for the account
    pub fn is_current(&self, account_id: i64, epoch: u64) -> bool {
        self.current_epoch(account_id) == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_account_epoch_zero() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.current_epoch(7), 0);
        assert!(registry.is_current(7, 0));
    }

    #[test]
    fn test_revoke_invalidates_older_tokens() {
        let registry = SessionRegistry::new();
        registry.apply(ForceLogout { account_id: 7 });
        assert!(!registry.is_current(7, 0));
        assert!(registry.is_current(7, 1));
        // other accounts untouched
        assert!(registry.is_current(8, 0));
    }

    #[test]
    fn test_clones_share_state() {
        let registry = SessionRegistry::new();
        let clone = registry.clone();
        clone.revoke(1);
        assert_eq!(registry.current_epoch(1), 1);
    }
}
