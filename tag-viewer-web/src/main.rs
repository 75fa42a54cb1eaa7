//! CLI `tag-viewer`: imprime em stdout o HTML de cada arquivo JSON recebido.

use std::process::ExitCode;

use clap::Parser;
use tag_viewer_web::cli::{run, Cli};
use tag_viewer_web::telemetry::init_tracing;
use tracing::error;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let outcome = cli
        .config
        .load()
        .and_then(|config| run(&cli, &config, &mut std::io::stdout().lock()));

    match outcome {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(summary) => {
            error!(failed = summary.failed, rendered = summary.rendered, "alguns arquivos falharam");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
