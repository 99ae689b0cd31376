use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};

use vitrina_core::error::AppError;
use vitrina_core::traits::Fetcher;

/// Identification headers rotated across requests.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0 Safari/537.36",
    "VitrinaBot/0.1 (+https://example.com)",
];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// HTTP fetcher using reqwest.
///
/// Downloads raw HTML with a bounded timeout and a User-Agent rotated per
/// request. A timeout expiry surfaces as `AppError::Timeout` and is treated
/// by the worker like any other transport failure.
#[derive(Clone)]
pub struct RotatingFetcher {
    client: Client,
    timeout_secs: u64,
}

impl RotatingFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

/// Pick a User-Agent by wall-clock second, cycling through the pool.
fn pick_user_agent() -> &'static str {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    USER_AGENTS[(secs as usize) % USER_AGENTS.len()]
}

impl Fetcher for RotatingFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, pick_user_agent())
            .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
    }
}
