//! HTTP handlers.
//!
//! The slash command handler:
//! - verifies the Slack request signature
//! - decodes the form body
//! - acks right away and replies through `response_url` once the command
//!   has run

use actix_web::{http::header, HttpResponse};

mod commands;

pub use commands::{slash_command, SlashCommand};

/// Liveness probe.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body("ok")
}
