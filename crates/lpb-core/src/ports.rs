use async_trait::async_trait;

use crate::{
    domain::{GroupId, UserId},
    Result,
};

/// Hexagonal port for the remotely stored group roster.
///
/// The store only offers full-replace updates: callers must always send the
/// complete resulting member list. Duplicate handling on the store side is
/// unspecified, so callers deduplicate before writing.
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Current members, in the order the store reports them.
    async fn fetch_members(&self, group: &GroupId) -> Result<Vec<UserId>>;

    /// Replace the whole roster with `members`.
    async fn replace_members(&self, group: &GroupId, members: &[UserId]) -> Result<()>;
}

/// Best-effort private notifications (e.g. a Slack DM).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user: &UserId, text: &str) -> Result<()>;
}
