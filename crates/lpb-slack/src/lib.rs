//! Slack adapter (Web API over reqwest, slash commands over actix-web).
//!
//! This crate implements the `lpb-core` GroupStore / Notifier ports over the
//! Slack Web API and serves the slash command endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub mod api;
pub mod handlers;
pub mod router;
pub mod signature;

use lpb_core::{
    domain::{GroupId, UserId},
    errors::Error,
    ports::{GroupStore, Notifier},
    Result,
};

use crate::api::{ConversationsOpen, Ignored, UsergroupUsers};

/// Delivers the deferred reply for a slash command via its `response_url`.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, response_url: &str, text: &str) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct SlackClient {
    token: String,
    api_base: String,
    http: reqwest::Client,
}

impl SlackClient {
    pub fn new(
        token: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("reqwest client build failed: {e}")))?;
        Ok(Self {
            token: token.into(),
            api_base: api_base.into(),
            http,
        })
    }

    fn map_err(method: &str, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            return Error::Remote(format!("{method}: request timed out"));
        }
        Error::Remote(format!("{method}: {e}"))
    }

    /// Call a Web API method with a form body. No retries: a failed call is
    /// reported to the caller as-is.
    async fn call<T: DeserializeOwned>(&self, method: &str, form: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{method}", self.api_base);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .form(form)
            .send()
            .await
            .map_err(|e| Self::map_err(method, e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Self::map_err(method, e))?;
        if !status.is_success() {
            return Err(Error::Remote(format!(
                "{method} failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        api::decode(method, &body)
    }
}

#[async_trait]
impl GroupStore for SlackClient {
    async fn fetch_members(&self, group: &GroupId) -> Result<Vec<UserId>> {
        let resp: UsergroupUsers = self
            .call("usergroups.users.list", &[("usergroup", group.0.as_str())])
            .await?;
        Ok(resp.users.into_iter().map(UserId).collect())
    }

    async fn replace_members(&self, group: &GroupId, members: &[UserId]) -> Result<()> {
        let users = api::join_users(members);
        let _: Ignored = self
            .call(
                "usergroups.users.update",
                &[("usergroup", group.0.as_str()), ("users", users.as_str())],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn notify(&self, user: &UserId, text: &str) -> Result<()> {
        let opened: ConversationsOpen = self
            .call("conversations.open", &[("users", user.as_str())])
            .await?;
        let _: Ignored = self
            .call(
                "chat.postMessage",
                &[("channel", opened.channel.id.as_str()), ("text", text)],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Responder for SlackClient {
    async fn respond(&self, response_url: &str, text: &str) -> Result<()> {
        let resp = self
            .http
            .post(response_url)
            .json(&api::EphemeralMessage::new(text))
            .send()
            .await
            .map_err(|e| Self::map_err("response_url", e))?;

        if !resp.status().is_success() {
            return Err(Error::Remote(format!(
                "response_url failed: {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
