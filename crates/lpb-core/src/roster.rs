//! Read-modify-write protocol against the remote group roster.
//!
//! Every mutation fetches the roster fresh, decides locally, and writes the
//! complete new member list back in one full replace. The store offers no
//! compare-and-swap, so a write from another process (or a manual edit in
//! Slack) between our fetch and our replace is silently overwritten. Cycles
//! issued by this process are serialized by `cycle_lock`; cross-process races
//! remain a known gap.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{CommandOutcome, FailureReason, GroupId, UserId},
    ports::GroupStore,
    Result,
};

pub struct RosterMutator {
    store: Arc<dyn GroupStore>,
    group: GroupId,
    cycle_lock: Mutex<()>,
}

impl RosterMutator {
    pub fn new(store: Arc<dyn GroupStore>, group: GroupId) -> Self {
        Self {
            store,
            group,
            cycle_lock: Mutex::new(()),
        }
    }

    pub async fn add_member(&self, target: &UserId) -> Result<CommandOutcome> {
        let _guard = self.cycle_lock.lock().await;

        let mut members = self.store.fetch_members(&self.group).await?;
        if members.contains(target) {
            return Ok(CommandOutcome::Failure(FailureReason::AlreadyMember));
        }

        members.push(target.clone());
        self.store
            .replace_members(&self.group, &dedup(members))
            .await?;

        tracing::info!(group = %self.group, user = %target, "added member");
        Ok(CommandOutcome::Success)
    }

    pub async fn remove_member(&self, target: &UserId) -> Result<CommandOutcome> {
        let _guard = self.cycle_lock.lock().await;

        let members = self.store.fetch_members(&self.group).await?;
        if !members.contains(target) {
            return Ok(CommandOutcome::Failure(FailureReason::NotMember));
        }

        let remaining = dedup(members.into_iter().filter(|id| id != target).collect());
        // A usergroup must keep at least one member.
        if remaining.is_empty() {
            return Ok(CommandOutcome::Failure(FailureReason::LastMember));
        }

        self.store.replace_members(&self.group, &remaining).await?;

        tracing::info!(group = %self.group, user = %target, "removed member");
        Ok(CommandOutcome::Success)
    }
}

/// Drop repeated ids, keeping the first occurrence's position.
fn dedup(members: Vec<UserId>) -> Vec<UserId> {
    let mut out: Vec<UserId> = Vec::with_capacity(members.len());
    for id in members {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
