//! Bundled extraction collaborator: fetches one Mercari product page and
//! writes the result contract to stdout, or `{"error": …}` to stderr.
//!
//! The server treats this binary as an opaque external process; it can be
//! swapped for any program honoring the same calling convention.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::json;

// ── Constants ────────────────────────────────────────────────────────────────

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";
const SOURCE: &str = "Mercari";

// ── Lazy static selectors ────────────────────────────────────────────────────

static TITLE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

static PRICE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[data-testid="price"]"#).unwrap());

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
enum FetchError {
    /// Handled failure: reported on stderr with a clean exit.
    #[error("Listing not found")]
    NotFound,
    /// Crash-level failure: reported on stderr with exit 1.
    #[error("Network request failed: {0}")]
    Network(String),
}

// ── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let url = match (args.next(), args.next()) {
        (Some(url), None) => url,
        _ => {
            report_error("Invalid arguments");
            std::process::exit(1);
        }
    };

    match fetch_page(&url).await {
        Ok(html) => {
            let result = extract_listing(&html, &url);
            println!("{}", result);
        }
        Err(e @ FetchError::NotFound) => {
            // Clean exit: the server classifies this as a reported failure.
            report_error(&e.to_string());
        }
        Err(e) => {
            report_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn report_error(message: &str) {
    eprintln!("{}", json!({"error": message}));
}

// ── HTTP fetch ───────────────────────────────────────────────────────────────

async fn fetch_page(url: &str) -> Result<String, FetchError> {
    let client = reqwest::ClientBuilder::new()
        .connect_timeout(std::time::Duration::from_secs(5))
        .timeout(std::time::Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
        return Err(FetchError::NotFound);
    }
    if !status.is_success() {
        return Err(FetchError::Network(format!("HTTP status {}", status)));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))
}

// ── Extraction ───────────────────────────────────────────────────────────────

fn extract_listing(html: &str, url: &str) -> serde_json::Value {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SEL)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No title found".to_string());

    let price = document
        .select(&PRICE_SEL)
        .next()
        .map(|el| el.text().collect::<String>())
        .map(|text| extract_price(&text))
        .unwrap_or_else(|| json!("N/A"));

    json!({
        "title": title,
        "price": price,
        "url": url,
        "source": SOURCE,
    })
}

/// Keeps the digits of the rendered price text; anything without digits
/// (or too large to represent) becomes the "N/A" marker.
fn extract_price(text: &str) -> serde_json::Value {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(n) => json!(n),
        Err(_) => json!("N/A"),
    }
}
