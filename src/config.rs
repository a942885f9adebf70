use std::time::Duration;

// ── Defaults ─────────────────────────────────────────────────────────────────

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_SCRAPER: &str = "scrape-mercari";
const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 60;

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    Empty(&'static str),
    #[error("{0}: expected a non-zero number of seconds, got {1:?}")]
    BadTimeout(&'static str, String),
}

// ── Config ───────────────────────────────────────────────────────────────────

/// Startup configuration, read once from `PRICE_CHECKER_*` environment
/// variables before the listener binds.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    /// Collaborator program plus any leading arguments; the target URL is
    /// appended as the final argument at invocation time.
    pub scraper_program: String,
    pub scraper_args: Vec<String>,
    pub scrape_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind = std::env::var("PRICE_CHECKER_BIND").unwrap_or_else(|_| DEFAULT_BIND.into());

        let command = std::env::var("PRICE_CHECKER_SCRAPER")
            .unwrap_or_else(|_| DEFAULT_SCRAPER.into());
        let (scraper_program, scraper_args) = split_command(&command)
            .ok_or(ConfigError::Empty("PRICE_CHECKER_SCRAPER"))?;

        let scrape_timeout = match std::env::var("PRICE_CHECKER_SCRAPE_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)
                .ok_or(ConfigError::BadTimeout("PRICE_CHECKER_SCRAPE_TIMEOUT_SECS", raw))?,
            Err(_) => Duration::from_secs(DEFAULT_SCRAPE_TIMEOUT_SECS),
        };

        Ok(Config {
            bind,
            scraper_program,
            scraper_args,
            scrape_timeout,
        })
    }
}

// ── Parsing helpers ──────────────────────────────────────────────────────────

fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

fn parse_timeout_secs(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_command_separates_program_and_args() {
        let (program, args) = split_command("python3 scripts/scrape_mercari.py").unwrap();
        assert_eq!(program, "python3");
        assert_eq!(args, vec!["scripts/scrape_mercari.py"]);
    }

    #[test]
    fn split_command_bare_program_has_no_args() {
        let (program, args) = split_command("scrape-mercari").unwrap();
        assert_eq!(program, "scrape-mercari");
        assert!(args.is_empty());
    }

    #[test]
    fn split_command_rejects_blank() {
        assert!(split_command("   ").is_none());
    }

    #[test]
    fn timeout_must_be_a_nonzero_integer() {
        assert_eq!(parse_timeout_secs("30"), Some(Duration::from_secs(30)));
        assert_eq!(parse_timeout_secs(" 5 "), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout_secs("0"), None);
        assert_eq!(parse_timeout_secs("soon"), None);
    }
}
