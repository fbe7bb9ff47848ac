use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;

use lpb_core::domain::UserId;

use crate::{api::EphemeralMessage, router::AppState, signature};

const TIMESTAMP_HEADER: &str = "X-Slack-Request-Timestamp";
const SIGNATURE_HEADER: &str = "X-Slack-Signature";

/// The slash command fields we use from Slack's form payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlashCommand {
    pub command: String,
    pub text: String,
    pub user_id: String,
    pub response_url: String,
}

impl SlashCommand {
    /// Decode an `application/x-www-form-urlencoded` body. Returns `None`
    /// when the requester or the reply URL is missing.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let mut out = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "command" => out.command = value.into_owned(),
                "text" => out.text = value.into_owned(),
                "user_id" => out.user_id = value.into_owned(),
                "response_url" => out.response_url = value.into_owned(),
                _ => {}
            }
        }
        if out.user_id.trim().is_empty() || out.response_url.trim().is_empty() {
            return None;
        }
        Some(out)
    }
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub async fn slash_command(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> HttpResponse {
    if let Err(e) = signature::verify(
        &state.signing_secret,
        header(&req, TIMESTAMP_HEADER),
        &body,
        header(&req, SIGNATURE_HEADER),
        Utc::now().timestamp(),
    ) {
        tracing::warn!(error = %e, "rejected slash command");
        return HttpResponse::Unauthorized().finish();
    }

    let Some(cmd) = SlashCommand::parse(&body) else {
        return HttpResponse::BadRequest().body("missing user_id or response_url");
    };

    if cmd.command != state.command {
        return HttpResponse::Ok().json(EphemeralMessage::new(format!(
            ":x: Unknown command `{}`.",
            lpb_core::formatting::escape_mrkdwn(&cmd.command)
        )));
    }

    // Ack now; Slack gives us three seconds before it shows a timeout.
    let state = state.clone();
    actix_web::rt::spawn(async move {
        let text = state
            .service
            .handle(UserId::new(cmd.user_id.clone()), &cmd.text)
            .await;
        if let Err(e) = state.responder.respond(&cmd.response_url, &text).await {
            tracing::error!(user = %cmd.user_id, error = %e, "failed to deliver reply");
        }
    });

    HttpResponse::Ok().finish()
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use actix_web::{http::StatusCode, test as actix_test, App};
    use async_trait::async_trait;

    use lpb_core::{
        domain::GroupId,
        formatting::Messages,
        ports::GroupStore,
        roster::RosterMutator,
        security::AdminAllowlist,
        service::CommandService,
        Result,
    };

    use super::*;
    use crate::{router::configure, Responder};

    const SECRET: &str = "test-signing-secret";

    struct MemoryStore {
        members: Mutex<Vec<UserId>>,
    }

    #[async_trait]
    impl GroupStore for MemoryStore {
        async fn fetch_members(&self, _group: &GroupId) -> Result<Vec<UserId>> {
            Ok(self.members.lock().unwrap().clone())
        }

        async fn replace_members(&self, _group: &GroupId, members: &[UserId]) -> Result<()> {
            *self.members.lock().unwrap() = members.to_vec();
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingResponder {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingResponder {
        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Responder for RecordingResponder {
        async fn respond(&self, response_url: &str, text: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((response_url.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn app_state(
        members: &[&str],
        responder: Arc<RecordingResponder>,
    ) -> (web::Data<AppState>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore {
            members: Mutex::new(members.iter().map(|s| UserId::new(*s)).collect()),
        });
        let service = CommandService::new(
            RosterMutator::new(store.clone(), GroupId("S1".to_string())),
            AdminAllowlist::new([UserId::new("U9")]),
            Messages::default(),
        );
        let state = web::Data::new(AppState {
            service: Arc::new(service),
            responder,
            signing_secret: SECRET.to_string(),
            command: "/leaders".to_string(),
        });
        (state, store)
    }

    fn signed_post(body: &str) -> actix_test::TestRequest {
        let ts = Utc::now().timestamp().to_string();
        let sig = signature::sign(SECRET, &ts, body.as_bytes()).unwrap();
        actix_test::TestRequest::post()
            .uri("/slack/commands")
            .insert_header((TIMESTAMP_HEADER, ts))
            .insert_header((SIGNATURE_HEADER, sig))
            .insert_header(("content-type", "application/x-www-form-urlencoded"))
            .set_payload(body.to_string())
    }

    async fn wait_for(responder: &RecordingResponder, n: usize) -> Vec<(String, String)> {
        for _ in 0..200 {
            let sent = responder.sent();
            if sent.len() >= n {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        responder.sent()
    }

    #[test]
    fn parses_form_body() {
        let cmd = SlashCommand::parse(
            b"command=%2Fleaders&text=add+%3C%40U12345ABC%7Clynn%3E&user_id=U9&response_url=https%3A%2F%2Fhooks.slack.com%2Fx",
        )
        .unwrap();
        assert_eq!(cmd.command, "/leaders");
        assert_eq!(cmd.text, "add <@U12345ABC|lynn>");
        assert_eq!(cmd.user_id, "U9");
        assert_eq!(cmd.response_url, "https://hooks.slack.com/x");
    }

    #[test]
    fn rejects_form_without_requester() {
        assert!(SlashCommand::parse(b"command=%2Fleaders&text=join&response_url=x").is_none());
        assert!(SlashCommand::parse(b"command=%2Fleaders&text=join&user_id=U1").is_none());
    }

    #[actix_web::test]
    async fn join_is_acked_then_answered_via_response_url() {
        let responder = Arc::new(RecordingResponder::default());
        let (state, store) = app_state(&["U1"], responder.clone());
        let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;

        let body = "command=%2Fleaders&text=join&user_id=U5&response_url=https%3A%2F%2Fhooks.slack.com%2Fr1";
        let resp = actix_test::call_service(&app, signed_post(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let sent = wait_for(&responder, 1).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "https://hooks.slack.com/r1");
        assert!(sent[0].1.contains("You've joined"));
        assert_eq!(
            *store.members.lock().unwrap(),
            vec![UserId::new("U1"), UserId::new("U5")]
        );
    }

    #[actix_web::test]
    async fn non_admin_add_is_refused() {
        let responder = Arc::new(RecordingResponder::default());
        let (state, store) = app_state(&["U1", "U2"], responder.clone());
        let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;

        let body = "command=%2Fleaders&text=add+%3C%40U4%3E&user_id=U3&response_url=https%3A%2F%2Fhooks.slack.com%2Fr2";
        let resp = actix_test::call_service(&app, signed_post(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let sent = wait_for(&responder, 1).await;
        assert!(sent[0].1.starts_with(":x: Only admins"));
        assert_eq!(
            *store.members.lock().unwrap(),
            vec![UserId::new("U1"), UserId::new("U2")]
        );
    }

    #[actix_web::test]
    async fn bad_signature_is_unauthorized() {
        let responder = Arc::new(RecordingResponder::default());
        let (state, _store) = app_state(&["U1"], responder.clone());
        let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = actix_test::TestRequest::post()
            .uri("/slack/commands")
            .insert_header((TIMESTAMP_HEADER, Utc::now().timestamp().to_string()))
            .insert_header((SIGNATURE_HEADER, "v0=deadbeef"))
            .set_payload("command=%2Fleaders&text=join&user_id=U5&response_url=x")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(responder.sent().is_empty());
    }

    #[actix_web::test]
    async fn other_commands_get_inline_ephemeral_reply() {
        let responder = Arc::new(RecordingResponder::default());
        let (state, _store) = app_state(&["U1"], responder.clone());
        let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;

        let body = "command=%2Fother&text=join&user_id=U5&response_url=https%3A%2F%2Fhooks.slack.com%2Fr3";
        let resp: serde_json::Value =
            actix_test::call_and_read_body_json(&app, signed_post(body).to_request()).await;
        assert_eq!(resp["response_type"], "ephemeral");
        assert!(resp["text"].as_str().unwrap_or("").contains("/other"));
        assert!(responder.sent().is_empty());
    }

    #[actix_web::test]
    async fn health_is_ok() {
        let responder = Arc::new(RecordingResponder::default());
        let (state, _store) = app_state(&[], responder);
        let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = actix_test::TestRequest::get().uri("/health").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
