use crate::domain::{CommandAction, CommandRequest, UserId};

/// Split slash-command text into `(subcommand, rest)`.
///
/// The subcommand is lower-cased; the rest keeps its original text with
/// surrounding whitespace trimmed.
pub fn split_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim().to_lowercase();
    let rest = parts.next().unwrap_or("").trim().to_string();
    (first, rest)
}

/// Map a subcommand word to an action. Unknown words fall back to help.
pub fn parse_action(word: &str) -> CommandAction {
    match word {
        "join" => CommandAction::Join,
        "leave" | "quit" => CommandAction::Leave,
        "add" => CommandAction::Add,
        "remove" | "kick" => CommandAction::Remove,
        _ => CommandAction::Help,
    }
}

pub fn parse_request(requester: UserId, text: &str) -> CommandRequest {
    let (word, args) = split_command(text);
    CommandRequest {
        requester,
        action: parse_action(&word),
        args,
    }
}
