//! Command pipeline: parse → authorize → resolve target → mutate → reply.

use std::sync::Arc;

use crate::{
    commands::parse_request,
    domain::{CommandAction, CommandOutcome, CommandRequest, FailureReason, UserId},
    formatting::Messages,
    identity,
    ports::Notifier,
    roster::RosterMutator,
    security::AdminAllowlist,
    Result,
};

/// Structured result of one command, before rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Help {
        show_admin: bool,
    },
    Outcome {
        action: CommandAction,
        target: Option<UserId>,
        outcome: CommandOutcome,
    },
}

pub struct CommandService {
    roster: RosterMutator,
    admins: AdminAllowlist,
    notifier: Option<Arc<dyn Notifier>>,
    messages: Messages,
}

impl CommandService {
    pub fn new(roster: RosterMutator, admins: AdminAllowlist, messages: Messages) -> Self {
        Self {
            roster,
            admins,
            notifier: None,
            messages,
        }
    }

    /// DM targets of admin add/remove commands.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run a command and always produce exactly one response text.
    pub async fn handle(&self, requester: UserId, text: &str) -> String {
        let req = parse_request(requester, text);
        match self.execute(&req).await {
            Ok(reply) => self.messages.render(&reply),
            Err(e) => {
                tracing::error!(
                    requester = %req.requester,
                    action = req.action.as_str(),
                    error = %e,
                    "command failed"
                );
                self.messages.remote_error(&e)
            }
        }
    }

    /// Run a parsed command. Remote store failures are returned as `Err`;
    /// every domain outcome is `Ok`.
    pub async fn execute(&self, req: &CommandRequest) -> Result<Reply> {
        let requester = &req.requester;
        let is_admin = self.admins.is_authorized(requester);

        let (target, outcome) = match req.action {
            CommandAction::Help => {
                return Ok(Reply::Help {
                    show_admin: is_admin,
                })
            }
            CommandAction::Join => (requester.clone(), self.roster.add_member(requester).await?),
            CommandAction::Leave => (
                requester.clone(),
                self.roster.remove_member(requester).await?,
            ),
            CommandAction::Add | CommandAction::Remove => {
                if !is_admin {
                    tracing::warn!(requester = %requester, action = req.action.as_str(), "unauthorized");
                    return Ok(failure(req.action, None, FailureReason::Unauthorized));
                }
                let Some(target) = identity::resolve(&req.args) else {
                    return Ok(failure(req.action, None, FailureReason::MissingTarget));
                };
                let outcome = if req.action == CommandAction::Add {
                    self.roster.add_member(&target).await?
                } else {
                    self.roster.remove_member(&target).await?
                };
                (target, outcome)
            }
        };

        tracing::info!(
            requester = %requester,
            action = req.action.as_str(),
            user = %target,
            outcome = outcome.as_str(),
            "command handled"
        );

        if outcome.is_success() && req.action.is_privileged() && &target != requester {
            self.notify_target(req.action, &target, requester).await;
        }

        Ok(Reply::Outcome {
            action: req.action,
            target: Some(target),
            outcome,
        })
    }

    async fn notify_target(&self, action: CommandAction, target: &UserId, admin: &UserId) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        let Some(text) = self.messages.target_notice(action, admin) else {
            return;
        };
        if let Err(e) = notifier.notify(target, &text).await {
            tracing::warn!(user = %target, error = %e, "target notification failed");
        }
    }
}

fn failure(action: CommandAction, target: Option<UserId>, reason: FailureReason) -> Reply {
    Reply::Outcome {
        action,
        target,
        outcome: CommandOutcome::Failure(reason),
    }
}
