//! Servidor web `tag-viewer-server` para visualização de registros NER.

use std::sync::Arc;

use clap::Parser;
use tag_viewer_web::cli::ConfigArgs;
use tag_viewer_web::server::{serve, AppState};
use tag_viewer_web::telemetry::init_tracing;

/// Serve a renderização de registros JSON com tags NER via HTTP.
#[derive(Debug, Parser)]
#[command(name = "tag-viewer-server", version, about)]
struct ServerArgs {
    /// Endereço de escuta
    #[arg(long, env = "TAG_VIEWER_ADDR", default_value = "0.0.0.0:3000")]
    addr: String,

    #[command(flatten)]
    config: ConfigArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = ServerArgs::parse();

    let state = Arc::new(AppState {
        config: args.config.load()?,
    });
    serve(&args.addr, state).await
}
