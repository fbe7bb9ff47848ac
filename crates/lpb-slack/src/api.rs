//! Slack Web API payloads.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use lpb_core::{domain::UserId, errors::Error, Result};

/// `usergroups.users.list` body. A missing `users` field is treated as
/// malformed rather than as an empty roster.
#[derive(Clone, Debug, Deserialize)]
pub struct UsergroupUsers {
    pub users: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ConversationsOpen {
    pub channel: Channel,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Channel {
    pub id: String,
}

/// Body of a call whose payload we do not use.
#[derive(Clone, Debug, Deserialize)]
pub struct Ignored {}

/// Slash command reply visible only to the requester.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EphemeralMessage {
    pub response_type: &'static str,
    pub text: String,
}

impl EphemeralMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            response_type: "ephemeral",
            text: text.into(),
        }
    }
}

/// Decode a Web API response, turning `{"ok": false}` envelopes and
/// unexpected shapes into `Error::Remote`.
pub fn decode<T: DeserializeOwned>(method: &str, body: &str) -> Result<T> {
    let v: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::Remote(format!("{method}: invalid json: {e}")))?;

    let ok = v.get("ok").and_then(|o| o.as_bool()).unwrap_or(false);
    if !ok {
        let err = v
            .get("error")
            .and_then(|e| e.as_str())
            .unwrap_or("unknown_error");
        return Err(Error::Remote(format!("{method}: {err}")));
    }

    serde_json::from_value(v).map_err(|e| Error::Remote(format!("{method}: unexpected payload: {e}")))
}

/// `usergroups.users.update` takes a comma-separated id list.
pub fn join_users(members: &[UserId]) -> String {
    members
        .iter()
        .map(|u| u.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
