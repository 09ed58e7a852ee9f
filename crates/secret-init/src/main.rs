mod cli;
mod logging;
mod supervisor;

use std::collections::HashMap;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use secret_init_core::resolver::{merge_entries, render_entries, snapshot_from_pairs};
use secret_init_core::{create_provider, CancellationToken, Provider, SharedLogger, TracingLogger};
use tracing::{debug, error, info, warn};

use cli::Cli;
use supervisor::Supervisor;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            if logging::is_initialized() {
                error!("{:#}", err);
            } else {
                // Failed before the config was loaded, so no subscriber yet
                eprintln!("secret-init: {:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Non-UTF-8 variables cannot hold references; they are left out
    let environ: HashMap<String, String> = snapshot_from_pairs(
        std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
    );

    let config = cli.load_config(&environ)?;
    logging::init(&config.log_level, config.json_log);
    debug!(provider = %config.provider, daemon = config.daemon, "configuration loaded");

    let provider = create_provider(&config.provider, &config)
        .with_context(|| format!("failed to create provider '{}'", config.provider))?;

    if !provider.duplicates().is_empty() {
        warn!(
            names = %provider.duplicates().join(", "),
            "secrets defined more than once, the last definition wins"
        );
    }

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let resolved = provider
        .load_secrets(&cancel, &environ)
        .await
        .context("failed to load secrets")?;
    let candidates = environ
        .values()
        .filter(|value| secret_init_core::is_reference(provider.marker(), value))
        .count();
    info!(provider = provider.name(), resolved = candidates, "secrets loaded");

    let env = merge_entries(&environ, &resolved)?;

    if cli.print {
        interrupt.abort();
        let mut stdout = std::io::stdout().lock();
        for entry in render_entries(&env) {
            writeln!(stdout, "{}", entry)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let logger: SharedLogger = Arc::new(TracingLogger::with_component("supervisor"));
    let supervisor = Supervisor::new(&cli.command, env, logger)?;

    if !config.delay().is_zero() {
        info!(seconds = config.delay_secs, "delaying start");
        tokio::select! {
            _ = tokio::time::sleep(config.delay()) => {}
            _ = cancel.cancelled() => anyhow::bail!("interrupted during startup delay"),
        }
    }
    interrupt.abort();

    if config.daemon {
        let code = supervisor.run().await?;
        return Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)));
    }

    #[cfg(unix)]
    {
        Err(supervisor.exec())
    }
    #[cfg(not(unix))]
    {
        let code = supervisor.run().await?;
        Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
    }
}
