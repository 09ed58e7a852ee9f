//! Hands the resolved environment to the target command
//!
//! Two modes:
//! - exec: replace the current process with the command (default)
//! - daemon: spawn the command as a child, forward termination signals and
//!   exit with the child's status

use std::collections::HashMap;
use std::process::ExitStatus;

use anyhow::{bail, Context};
use secret_init_core::{log_debug, log_info, log_warn, SharedLogger};
use tokio::process::Command;

/// The command to start and the environment to start it with
pub struct Supervisor {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    logger: SharedLogger,
}

impl Supervisor {
    /// `command` is the program followed by its arguments
    pub fn new(command: &[String], env: HashMap<String, String>, logger: SharedLogger) -> anyhow::Result<Self> {
        let Some((program, args)) = command.split_first() else {
            bail!("no command given");
        };
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            env,
            logger,
        })
    }

    fn command(&self) -> std::process::Command {
        let mut command = std::process::Command::new(&self.program);
        command.args(&self.args).env_clear().envs(&self.env);
        command
    }

    /// Replace the current process with the command
    ///
    /// Only returns if the exec failed.
    #[cfg(unix)]
    pub fn exec(self) -> anyhow::Error {
        use std::os::unix::process::CommandExt;

        log_info!(self.logger, "exec {} with {} variables", self.program, self.env.len());
        let err = self.command().exec();
        anyhow::Error::new(err).context(format!("failed to exec {}", self.program))
    }

    /// Run the command as a child and return its exit code
    pub async fn run(self) -> anyhow::Result<i32> {
        // Registered before spawning so an early signal is forwarded, not fatal
        let mut signals = ForwardedSignals::register()?;

        let mut child = Command::from(self.command())
            .spawn()
            .with_context(|| format!("failed to start {}", self.program))?;

        log_info!(
            self.logger,
            "started {} (pid {})",
            self.program,
            child.id().map_or_else(|| "?".to_string(), |pid| pid.to_string())
        );

        let status = signals.wait(&mut child, &self.logger).await?;
        let code = exit_code(status);
        log_debug!(self.logger, "{} exited with {}", self.program, code);
        if code != 0 {
            log_warn!(self.logger, "{} exited with non-zero status {}", self.program, code);
        }
        Ok(code)
    }
}

/// Termination signals relayed to the child in daemon mode
#[cfg(unix)]
struct ForwardedSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ForwardedSignals {
    fn register() -> anyhow::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?,
            terminate: signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?,
            hangup: signal(SignalKind::hangup()).context("failed to install SIGHUP handler")?,
            quit: signal(SignalKind::quit()).context("failed to install SIGQUIT handler")?,
        })
    }

    async fn wait(
        &mut self,
        child: &mut tokio::process::Child,
        logger: &SharedLogger,
    ) -> anyhow::Result<ExitStatus> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        loop {
            let forward = tokio::select! {
                status = child.wait() => return Ok(status?),
                _ = self.interrupt.recv() => Signal::SIGINT,
                _ = self.terminate.recv() => Signal::SIGTERM,
                _ = self.hangup.recv() => Signal::SIGHUP,
                _ = self.quit.recv() => Signal::SIGQUIT,
            };

            let Some(pid) = child.id() else {
                continue;
            };
            let Ok(pid) = i32::try_from(pid) else {
                continue;
            };
            log_debug!(logger, "forwarding {} to pid {}", forward, pid);
            if let Err(err) = kill(Pid::from_raw(pid), forward) {
                log_warn!(logger, "failed to forward {}: {}", forward, err);
            }
        }
    }
}

#[cfg(not(unix))]
struct ForwardedSignals;

#[cfg(not(unix))]
impl ForwardedSignals {
    fn register() -> anyhow::Result<Self> {
        Ok(Self)
    }

    async fn wait(
        &mut self,
        child: &mut tokio::process::Child,
        _logger: &SharedLogger,
    ) -> anyhow::Result<ExitStatus> {
        Ok(child.wait().await?)
    }
}

/// Shell convention: 128 + signal number when the child was killed
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
