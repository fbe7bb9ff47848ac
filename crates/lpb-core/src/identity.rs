use std::sync::OnceLock;

use regex::Regex;

use crate::domain::UserId;

/// `<@U12345>` or `<@U12345|display-name>`.
fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<@([A-Z0-9]+)(?:\|[^>]+)?>").expect("valid mention regex"))
}

/// Raw user id: `U` followed by at least eight alphanumerics, bounded by
/// ASCII word boundaries.
fn raw_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?-u:\b)(U[A-Z0-9]{8,})(?-u:\b)").expect("valid user id regex")
    })
}

/// Extract a user id from free-text command arguments.
///
/// Mention syntax is tried first; a bare id is the fallback. The first match
/// anywhere in the text wins.
pub fn resolve(text: &str) -> Option<UserId> {
    if let Some(caps) = mention_re().captures(text) {
        return Some(UserId::new(&caps[1]));
    }
    raw_id_re()
        .captures(text)
        .map(|caps| UserId::new(&caps[1]))
}
