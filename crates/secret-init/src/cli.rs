use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use secret_init_core::SecretInitConfig;

#[derive(Parser, Debug)]
#[command(
    name = "secret-init",
    version,
    about = "Resolve secret references in the environment, then run a command"
)]
pub struct Cli {
    /// YAML settings file
    #[arg(short, long, env = "SECRET_INIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Provider used to resolve references [env: PROVIDER]
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Secrets file for the file provider [env: SECRETS_FILE_PATH]
    #[arg(short = 'f', long)]
    pub secrets_file: Option<PathBuf>,

    /// Supervise the command and forward signals instead of exec-ing it [env: SECRET_INIT_DAEMON]
    #[arg(short, long)]
    pub daemon: bool,

    /// Seconds to wait before starting the command [env: SECRET_INIT_DELAY]
    #[arg(long)]
    pub delay: Option<u64>,

    /// trace, debug, info, warn or error [env: SECRET_INIT_LOG_LEVEL]
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit JSON log lines [env: SECRET_INIT_JSON_LOG]
    #[arg(long)]
    pub json_log: bool,

    /// Print the resolved environment instead of running a command
    #[arg(long)]
    pub print: bool,

    /// Command to run, with its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Build settings: defaults < YAML file < environment < flags
    pub fn load_config(&self, environ: &HashMap<String, String>) -> anyhow::Result<SecretInitConfig> {
        let mut config = match &self.config {
            Some(path) => SecretInitConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SecretInitConfig::default(),
        };

        config
            .apply_env(environ)
            .context("invalid secret-init environment")?;

        if let Some(provider) = &self.provider {
            config.provider = provider.to_lowercase();
        }
        if let Some(path) = &self.secrets_file {
            config.secrets_file_path = Some(path.clone());
        }
        if self.daemon {
            config.daemon = true;
        }
        if let Some(delay) = self.delay {
            config.delay_secs = delay;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.to_lowercase();
        }
        if self.json_log {
            config.json_log = true;
        }

        config.validate().context("invalid secret-init flags")?;
        Ok(config)
    }
}
