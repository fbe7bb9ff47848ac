use std::sync::Arc;

use actix_web::{web, App, HttpServer};

use lpb_core::{config::Config, roster::RosterMutator, service::CommandService};

use crate::{handlers, Responder, SlackClient};

pub struct AppState {
    pub service: Arc<CommandService>,
    pub responder: Arc<dyn Responder>,
    pub signing_secret: String,
    /// Slash command this deployment answers to, e.g. `/leaders`.
    pub command: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/slack/commands", web::post().to(handlers::slash_command))
        .route("/health", web::get().to(handlers::health));
}

/// Wire the Slack client into the command service and serve slash commands
/// until the server stops.
pub async fn run_server(cfg: Arc<Config>) -> anyhow::Result<()> {
    let slack = Arc::new(SlackClient::new(
        cfg.slack_bot_token.clone(),
        cfg.slack_api_base.clone(),
        cfg.slack_api_timeout,
    )?);

    let roster = RosterMutator::new(slack.clone(), cfg.usergroup_id.clone());
    let mut service = CommandService::new(roster, cfg.admins.clone(), cfg.messages.clone());
    if cfg.notify_targets {
        service = service.with_notifier(slack.clone());
    }

    let state = web::Data::new(AppState {
        service: Arc::new(service),
        responder: slack,
        signing_secret: cfg.slack_signing_secret.clone(),
        command: cfg.messages.command.clone(),
    });

    let admins = cfg
        .admins
        .iter()
        .map(|u| u.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    tracing::info!(
        group = %cfg.usergroup_id,
        command = %cfg.messages.command,
        bind = %cfg.bind_addr,
        "leaders ping bot starting"
    );
    if admins.is_empty() {
        tracing::warn!("no admins configured; add/remove are disabled");
    } else {
        tracing::info!(admins = %admins, "admins loaded");
    }

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(cfg.bind_addr.as_str())?
        .run()
        .await?;

    Ok(())
}
