//! Slack mrkdwn rendering for command replies.

use crate::{
    domain::{CommandAction, CommandOutcome, FailureReason, UserId},
    errors::Error,
    service::Reply,
};

/// Escape the three characters Slack treats as control sequences in mrkdwn.
pub fn escape_mrkdwn(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a user id as a Slack mention.
pub fn mention(user: &UserId) -> String {
    format!("<@{}>", escape_mrkdwn(user.as_str()))
}

/// Names that appear in user-facing text.
#[derive(Clone, Debug)]
pub struct Messages {
    /// Slash command, e.g. `/leaders`.
    pub command: String,
    /// Human label of the group, e.g. `Leader's Pings`.
    pub group_label: String,
    /// Slack handle of the group, e.g. `@leaders-ping`.
    pub group_handle: String,
    /// Who to ask when the bot cannot help.
    pub contact: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            command: "/leaders".to_string(),
            group_label: "Leader's Pings".to_string(),
            group_handle: "@leaders-ping".to_string(),
            contact: "@lynn".to_string(),
        }
    }
}

impl Messages {
    pub fn render(&self, reply: &Reply) -> String {
        match reply {
            Reply::Help { show_admin } => self.help(*show_admin),
            Reply::Outcome {
                action,
                target,
                outcome,
            } => self.outcome(*action, target.as_ref(), *outcome),
        }
    }

    pub fn help(&self, show_admin: bool) -> String {
        let cmd = &self.command;
        let handle = &self.group_handle;
        let mut lines = vec![
            "*Available commands:*".to_string(),
            String::new(),
            format!("`{cmd} join` - Add yourself to {handle}"),
            format!("`{cmd} leave` - Remove yourself from {handle}"),
        ];
        if show_admin {
            lines.push(String::new());
            lines.push("*Admin commands:*".to_string());
            lines.push(format!(
                "`{cmd} add @user/U12345ABC` - Add someone else to the group"
            ));
            lines.push(format!(
                "`{cmd} remove @user/U12345ABC` - Remove someone from the group"
            ));
        }
        lines.join("\n")
    }

    pub fn remote_error(&self, err: &Error) -> String {
        format!(":x: An error occurred: {}", escape_mrkdwn(&err.to_string()))
    }

    /// DM sent to a user that an admin added or removed.
    pub fn target_notice(&self, action: CommandAction, admin: &UserId) -> Option<String> {
        let label = &self.group_label;
        let cmd = &self.command;
        let by = mention(admin);
        match action {
            CommandAction::Add => Some(format!(
                ":wave: {by} added you to the {label} group. Use `{cmd} leave` to opt out."
            )),
            CommandAction::Remove => Some(format!(
                ":wave: {by} removed you from the {label} group. Use `{cmd} join` to opt back in."
            )),
            _ => None,
        }
    }

    fn outcome(
        &self,
        action: CommandAction,
        target: Option<&UserId>,
        outcome: CommandOutcome,
    ) -> String {
        let label = &self.group_label;
        let cmd = &self.command;
        let contact = &self.contact;
        let who = target.map(mention).unwrap_or_default();

        match (action, outcome) {
            (_, CommandOutcome::Failure(FailureReason::Unauthorized)) => {
                ":x: Only admins can do that. Nothing to see here.".to_string()
            }
            (CommandAction::Join, CommandOutcome::Success) => format!(
                ":white_check_mark: You've joined the {label} group! Use `{cmd} leave` to opt out at any time."
            ),
            (CommandAction::Join, CommandOutcome::Failure(FailureReason::AlreadyMember)) => {
                format!(
                    ":information_source: You're already a member of the {label} group. Use `{cmd} leave` to opt out."
                )
            }
            (CommandAction::Leave, CommandOutcome::Success) => format!(
                ":wave: You've left {label}. Join again anytime with `{cmd} join`."
            ),
            (CommandAction::Leave, CommandOutcome::Failure(FailureReason::NotMember)) => {
                format!(
                    ":information_source: You're not a member of the {label} group. Use `{cmd} join` to opt in!"
                )
            }
            (CommandAction::Leave, CommandOutcome::Failure(FailureReason::LastMember)) => {
                format!(":warning: You're the last member of the group and can't leave. DM {contact}!")
            }
            (CommandAction::Add, CommandOutcome::Success) => {
                format!(":white_check_mark: {who} has been added to {label}!")
            }
            (CommandAction::Add, CommandOutcome::Failure(FailureReason::AlreadyMember)) => {
                format!(":information_source: {who} is already a member of the {label} group.")
            }
            (CommandAction::Remove, CommandOutcome::Success) => {
                format!(":white_check_mark: {who} has been removed from the {label} group.")
            }
            (CommandAction::Remove, CommandOutcome::Failure(FailureReason::NotMember)) => {
                format!(":information_source: {who} is not a member of the {label} group.")
            }
            (CommandAction::Remove, CommandOutcome::Failure(FailureReason::LastMember)) => {
                format!(":warning: Cannot remove {who}, they are the last member. Try DMing {contact}.")
            }
            (CommandAction::Add, CommandOutcome::Failure(FailureReason::MissingTarget)) => {
                format!(
                    ":x: Please specify a user to add. Usage: `{cmd} add @user` or `{cmd} add U12345ABC`"
                )
            }
            (CommandAction::Remove, CommandOutcome::Failure(FailureReason::MissingTarget)) => {
                format!(
                    ":x: Please specify a user to remove. Usage: `{cmd} remove @user` or `{cmd} remove U12345ABC`"
                )
            }
            (action, CommandOutcome::Failure(reason)) => format!(
                ":information_source: `{cmd} {}` finished with `{}`.",
                action.as_str(),
                reason.as_str()
            ),
            (action, CommandOutcome::Success) => {
                format!(":white_check_mark: `{cmd} {}` done.", action.as_str())
            }
        }
    }
}
