//! Serve command: run the MCP server on stdio.

use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use sylba_core::config::{Config, ConfigSources};

use super::{LexiconArgs, open_counter};
use crate::server::SyllableServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub lexicon: LexiconArgs,
}

/// Load reference data, then answer MCP requests until the client
/// disconnects.
///
/// Stdout carries the protocol, so no spinner is shown.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    args: ServeArgs,
    config: Config,
    sources: ConfigSources,
) -> anyhow::Result<()> {
    let counter = open_counter(&args.lexicon, &config, &sources, false)?;
    info!(
        entries = counter.store().entries().len(),
        words = counter.store().word_count(),
        "starting MCP server on stdio"
    );

    let service = SyllableServer::new(counter).serve(stdio()).await?;
    service.waiting().await?;

    info!("MCP server stopped");
    Ok(())
}
