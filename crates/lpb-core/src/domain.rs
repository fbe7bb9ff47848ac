use std::fmt;

/// Slack user id (e.g. `U07ULNFPQ4T`). Equality is exact string match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slack usergroup id (e.g. `S09M5G46ASW`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub String);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the requester asked the bot to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandAction {
    Join,
    Leave,
    Add,
    Remove,
    Help,
}

impl CommandAction {
    /// Add/remove act on someone other than the requester and need an admin.
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Add | Self::Remove)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Help => "help",
        }
    }
}

/// One inbound slash command, already split into action + argument text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRequest {
    pub requester: UserId,
    pub action: CommandAction,
    pub args: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    AlreadyMember,
    NotMember,
    LastMember,
    MissingTarget,
    Unauthorized,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyMember => "already_member",
            Self::NotMember => "not_member",
            Self::LastMember => "last_member",
            Self::MissingTarget => "missing_target",
            Self::Unauthorized => "unauthorized",
        }
    }
}

/// Result of a roster mutation. Failures here are expected outcomes, not
/// malfunctions; remote errors travel separately as `Error::Remote`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    Failure(FailureReason),
}

impl CommandOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure(reason) => reason.as_str(),
        }
    }
}
