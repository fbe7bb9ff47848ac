use std::sync::Arc;

use lpb_core::config::Config;

#[actix_web::main]
async fn main() -> Result<(), lpb_core::Error> {
    lpb_core::logging::init("lpb")?;

    let cfg = Arc::new(Config::load()?);

    lpb_slack::router::run_server(cfg)
        .await
        .map_err(|e| lpb_core::Error::External(format!("slack bot failed: {e}")))?;

    tracing::info!("server stopped");
    Ok(())
}
