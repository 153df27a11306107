//! `fraudeye serve` - Run the fraud-check HTTP server.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use colored::Colorize;
use fraudeye::{server, FraudCheckService, FraudEyeConfig, MemoryStore};
use tracing::{debug, info};

use super::Context;
use crate::cli::args::ServeArgs;

pub async fn execute(ctx: Context, args: ServeArgs) -> Result<()> {
    let config = server_config(&ctx, &args)?;

    if !config.has_api_key() {
        eprintln!(
            "{} no API key configured; every check will return a failure response",
            "Warning:".yellow().bold()
        );
    }

    let client = config.build_client()?;
    let service = FraudCheckService::new(Arc::new(client), Arc::new(MemoryStore::new()))
        .with_settings(config.settings());

    info!(
        listen = %config.listen,
        record = config.record_transactions,
        base_url = %config.ipqs_base_url,
        "starting fraud-check server"
    );
    eprintln!(
        "{} http://{} (Ctrl-C to stop)",
        "Listening on".green().bold(),
        config.listen
    );

    server::serve(service, config.listen).await?;
    Ok(())
}

/// Server config: the `--service-config` file when given, else the CLI
/// config's `[service]` table, then the command-line overrides.
///
/// A service file without a key takes `IPQS_API_KEY`, then the key the CLI
/// resolved.
fn server_config(ctx: &Context, args: &ServeArgs) -> Result<FraudEyeConfig> {
    let mut config = match &args.service_config {
        Some(path) => {
            debug!(path = %path.display(), "loading service config");
            let loaded = FraudEyeConfig::load(path)
                .with_context(|| format!("loading service config {}", path.display()))?
                .with_env_overrides();
            if loaded.has_api_key() {
                loaded
            } else {
                loaded.with_api_key(ctx.service.ipqs_api_key.clone())
            }
        }
        None => ctx.service.clone(),
    };

    if let Some(listen) = args.listen {
        config.listen = listen;
    }
    if args.no_record {
        config.record_transactions = false;
    }

    Ok(config)
}
