use serde::Deserialize;

use super::ScrapeError;
use crate::models::ScrapeResult;
use crate::scrape::runner::ScraperOutput;

// ── Generic client-facing messages ───────────────────────────────────────────

const MSG_EXEC_FAILED: &str = "Script execution failed and could not parse error output.";
const MSG_UNKNOWN_SCRIPT_ERROR: &str = "An unknown error occurred in the script";
const MSG_UNPARSEABLE_OUTPUT: &str = "Failed to parse scraper output";

/// The collaborator's structured error payload on stderr.
#[derive(Debug, Deserialize)]
struct ScriptError {
    error: String,
}

// ── Classification ───────────────────────────────────────────────────────────

/// Classifies one captured invocation. Priority order is a contract:
/// abnormal exit beats a stderr report, which beats any stdout parse attempt,
/// so a crash is never masked by whatever happens to be on the other channel.
pub fn classify(output: &ScraperOutput) -> Result<ScrapeResult, ScrapeError> {
    if !output.exited_cleanly() {
        return Err(match parse_script_error(&output.stderr) {
            Some(err) => ScrapeError::ScraperFailed(err.error),
            None => {
                tracing::warn!(
                    exit_code = ?output.exit_code,
                    stderr = %truncated_lossy(&output.stderr),
                    "scraper exited abnormally without a structured error"
                );
                ScrapeError::ScraperFailed(MSG_EXEC_FAILED.to_string())
            }
        });
    }

    if !output.stderr.is_empty() {
        return Err(match parse_script_error(&output.stderr) {
            Some(err) => ScrapeError::ScraperReported(err.error),
            None => {
                tracing::warn!(
                    stderr = %truncated_lossy(&output.stderr),
                    "scraper wrote non-JSON output to its error channel"
                );
                ScrapeError::ScraperReported(MSG_UNKNOWN_SCRIPT_ERROR.to_string())
            }
        });
    }

    serde_json::from_slice::<ScrapeResult>(&output.stdout).map_err(|e| {
        tracing::warn!(
            error = %e,
            stdout = %truncated_lossy(&output.stdout),
            "scraper stdout did not parse as a result object"
        );
        ScrapeError::UnparseableOutput(MSG_UNPARSEABLE_OUTPUT.to_string())
    })
}

fn parse_script_error(stderr: &[u8]) -> Option<ScriptError> {
    serde_json::from_slice(stderr).ok()
}

fn truncated_lossy(bytes: &[u8]) -> String {
    const LIMIT: usize = 512;
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= LIMIT {
        return text.into_owned();
    }
    let mut cut = LIMIT;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…", &text[..cut])
}
