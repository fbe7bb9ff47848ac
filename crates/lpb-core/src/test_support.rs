//! In-memory fakes for the core ports.

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;

use crate::{
    domain::{GroupId, UserId},
    errors::Error,
    ports::{GroupStore, Notifier},
    Result,
};

pub fn ids(raw: &[&str]) -> Vec<UserId> {
    raw.iter().map(|s| UserId::new(*s)).collect()
}

pub fn group() -> GroupId {
    GroupId("S09M5G46ASW".to_string())
}

#[derive(Default)]
pub struct FakeStore {
    members: Mutex<Vec<UserId>>,
    replaces: Mutex<Vec<Vec<UserId>>>,
    fetches: Mutex<usize>,
    fail_fetch: bool,
    fail_replace: bool,
    fetch_delay: Option<Duration>,
}

impl FakeStore {
    pub fn with_members(raw: &[&str]) -> Self {
        Self {
            members: Mutex::new(ids(raw)),
            ..Self::default()
        }
    }

    pub fn failing_fetch(raw: &[&str]) -> Self {
        Self {
            fail_fetch: true,
            ..Self::with_members(raw)
        }
    }

    pub fn failing_replace(raw: &[&str]) -> Self {
        Self {
            fail_replace: true,
            ..Self::with_members(raw)
        }
    }

    /// Sleeps after every fetch so concurrent cycles overlap.
    pub fn slow_fetch(raw: &[&str], delay: Duration) -> Self {
        Self {
            fetch_delay: Some(delay),
            ..Self::with_members(raw)
        }
    }

    pub fn members(&self) -> Vec<UserId> {
        self.members.lock().unwrap().clone()
    }

    pub fn replace_calls(&self) -> Vec<Vec<UserId>> {
        self.replaces.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl GroupStore for FakeStore {
    async fn fetch_members(&self, _group: &GroupId) -> Result<Vec<UserId>> {
        *self.fetches.lock().unwrap() += 1;
        if self.fail_fetch {
            return Err(Error::Remote("usergroups.users.list: timed out".to_string()));
        }
        let members = self.members();
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(members)
    }

    async fn replace_members(&self, _group: &GroupId, members: &[UserId]) -> Result<()> {
        self.replaces.lock().unwrap().push(members.to_vec());
        if self.fail_replace {
            return Err(Error::Remote("usergroups.users.update: invalid_users".to_string()));
        }
        *self.members.lock().unwrap() = members.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    sent: Mutex<Vec<(UserId, String)>>,
    fail: bool,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn notify(&self, user: &UserId, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((user.clone(), text.to_string()));
        if self.fail {
            return Err(Error::Remote("conversations.open: cannot_dm_bot".to_string()));
        }
        Ok(())
    }
}
