use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::Config;

// ── Invocation outcome ───────────────────────────────────────────────────────

/// Captured streams and exit status of one collaborator invocation. The
/// runner does not interpret these; classification happens in `interpret`.
#[derive(Debug, Clone)]
pub struct ScraperOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ScraperOutput {
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to spawn scraper process: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("scraper did not finish within {0:?}")]
    TimedOut(Duration),
}

// ── Runner trait ─────────────────────────────────────────────────────────────

/// Seam for collaborator invocation so the pipeline can be driven by a fake
/// in tests without spawning real processes.
#[async_trait]
pub trait ScraperRunner: Send + Sync {
    async fn run(&self, url: &str) -> Result<ScraperOutput, RunnerError>;
}

// ── Production runner ────────────────────────────────────────────────────────

/// Runs the configured collaborator command with the target URL appended as
/// the single final argument. Never goes through a shell.
pub struct ScriptRunner {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ScriptRunner {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        ScriptRunner {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        ScriptRunner::new(
            config.scraper_program.clone(),
            config.scraper_args.clone(),
            config.scrape_timeout,
        )
    }
}

#[async_trait]
impl ScraperRunner for ScriptRunner {
    async fn run(&self, url: &str) -> Result<ScraperOutput, RunnerError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the wait future (timeout below, or the client hanging
            // up on the request) must terminate the child, not leak it.
            .kill_on_drop(true);

        let child = command.spawn()?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::error!(program = %self.program, timeout = ?self.timeout, "scraper timed out");
                RunnerError::TimedOut(self.timeout)
            })??;

        Ok(ScraperOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
