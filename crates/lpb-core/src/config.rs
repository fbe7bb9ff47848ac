use std::{env, fs, path::Path, time::Duration};

use crate::{
    domain::{GroupId, UserId},
    errors::Error,
    formatting::Messages,
    security::AdminAllowlist,
    Result,
};

/// Typed configuration, loaded once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct Config {
    // Slack credentials
    pub slack_bot_token: String,
    pub slack_signing_secret: String,
    pub slack_api_base: String,
    pub slack_api_timeout: Duration,

    // Managed group
    pub usergroup_id: GroupId,
    pub admins: AdminAllowlist,
    pub notify_targets: bool,

    // Presentation
    pub messages: Messages,

    // HTTP listener
    pub bind_addr: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (env vars in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let slack_bot_token = require(get("SLACK_BOT_TOKEN"), "SLACK_BOT_TOKEN")?;
        let slack_signing_secret = require(get("SLACK_SIGNING_SECRET"), "SLACK_SIGNING_SECRET")?;
        let usergroup_id = GroupId(require(
            get("LEADERS_USERGROUP_ID"),
            "LEADERS_USERGROUP_ID",
        )?);

        let admins = AdminAllowlist::new(parse_csv_ids(get("LEADERS_ADMIN_IDS")));

        let slack_api_base = get("SLACK_API_BASE")
            .unwrap_or_else(|| "https://slack.com/api".to_string())
            .trim_end_matches('/')
            .to_string();
        let slack_api_timeout = Duration::from_millis(
            parse_u64(get("SLACK_API_TIMEOUT_MS"), "SLACK_API_TIMEOUT_MS")?.unwrap_or(10_000),
        );

        let notify_targets = get("LEADERS_NOTIFY_TARGETS")
            .map(|v| parse_bool(&v))
            .unwrap_or(true);

        let defaults = Messages::default();
        let messages = Messages {
            command: get("LEADERS_COMMAND").unwrap_or(defaults.command),
            group_label: get("LEADERS_GROUP_LABEL").unwrap_or(defaults.group_label),
            group_handle: get("LEADERS_GROUP_HANDLE").unwrap_or(defaults.group_handle),
            contact: get("LEADERS_CONTACT").unwrap_or(defaults.contact),
        };

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        Ok(Self {
            slack_bot_token,
            slack_signing_secret,
            slack_api_base,
            slack_api_timeout,
            usergroup_id,
            admins,
            notify_targets,
            messages,
            bind_addr,
        })
    }
}

fn require(value: Option<String>, key: &str) -> Result<String> {
    value.ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_u64(v: Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(v) = v else {
        return Ok(None);
    };
    v.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key} must be a number: {e}")))
}

fn parse_csv_ids(v: Option<String>) -> Vec<UserId> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(UserId::new)
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
