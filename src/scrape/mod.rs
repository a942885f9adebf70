pub mod interpret;
pub mod runner;

use std::time::Instant;

use url::Url;

use crate::models::ScrapeResult;
use runner::{RunnerError, ScraperRunner};

// ── Error type ───────────────────────────────────────────────────────────────

/// One variant per failure family; the HTTP handler maps each variant to a
/// status code. Messages are already client-safe by the time they land here.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("{0}")]
    InvalidUrl(String),
    /// The collaborator could not run, crashed, or timed out.
    #[error("{0}")]
    ScraperFailed(String),
    /// The collaborator ran cleanly and deliberately reported a failure.
    #[error("{0}")]
    ScraperReported(String),
    /// The collaborator's success output violated the contract.
    #[error("{0}")]
    UnparseableOutput(String),
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// Validate → invoke → classify, one collaborator run per call, no state
/// kept across calls.
pub async fn scrape_listing(
    runner: &dyn ScraperRunner,
    url: &str,
) -> Result<ScrapeResult, ScrapeError> {
    validate_url(url)?;

    let started = Instant::now();
    let output = match runner.run(url).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(url, error = %e, "scraper invocation failed");
            return Err(match e {
                RunnerError::Spawn(_) => ScrapeError::ScraperFailed(
                    "Script execution failed and could not parse error output.".to_string(),
                ),
                RunnerError::TimedOut(_) => {
                    ScrapeError::ScraperFailed("Scraper timed out".to_string())
                }
            });
        }
    };

    let outcome = interpret::classify(&output);
    tracing::info!(
        url,
        exit_code = ?output.exit_code,
        elapsed_ms = started.elapsed().as_millis() as u64,
        ok = outcome.is_ok(),
        "scrape finished"
    );
    outcome
}

// ── URL validation ───────────────────────────────────────────────────────────

/// Syntactic check only: the string must parse as an absolute URL. The
/// collaborator receives the caller's original string, not a re-serialized
/// form.
pub fn validate_url(url: &str) -> Result<(), ScrapeError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|_| ScrapeError::InvalidUrl("Invalid URL format".to_string()))
}
