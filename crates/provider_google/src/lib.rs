mod languages;

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use core_types::{AUTO_DETECT_CODE, TranslationBackend};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

pub use languages::GOOGLE_LANGUAGES;

pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";
pub const DEFAULT_USER_AGENT: &str = concat!("polyglot/", env!("CARGO_PKG_VERSION"));
pub const MAX_TEXT_CHARS: usize = 5000;
/// Longest slice of an error body carried into a user-facing message.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct GoogleBackendOptions {
    pub base_url: String,
    pub user_agent: String,
    /// `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for GoogleBackendOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Client for the keyless `translate_a/single?client=gtx` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslateBackend {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateBackend {
    pub fn new() -> Result<Self> {
        Self::with_options(GoogleBackendOptions::default())
    }

    pub fn with_options(options: GoogleBackendOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build http client")?;
        Ok(Self {
            client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_a/single", self.base_url)
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateBackend {
    async fn supported_languages(&self) -> Result<Vec<(String, String)>> {
        Ok(GOOGLE_LANGUAGES
            .iter()
            .map(|(name, code)| (name.to_string(), code.to_string()))
            .collect())
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            bail!("text is {chars} characters long, at most {MAX_TEXT_CHARS} are accepted");
        }
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        if source != AUTO_DETECT_CODE && source.eq_ignore_ascii_case(target) {
            return Ok(text.to_string());
        }

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .context("failed to reach google translate")?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(%status, error = %err, "failed to read google translate error body");
                    String::new()
                }
            };
            return Err(status_error(status, &body));
        }

        let payload: Value = response
            .json()
            .await
            .context("invalid google translate response json")?;
        if let Some(detected) = detected_source(&payload) {
            debug!(detected, target_code = target, "google translate detected source language");
        }
        parse_translation(&payload)
    }
}

/// The response is a nested array; `[0]` holds one `[translated, original, ..]`
/// entry per sentence.
fn parse_translation(payload: &Value) -> Result<String> {
    let sentences = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("unexpected google translate response shape"))?;
    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();
    if translated.is_empty() {
        bail!("no translation found in google translate response");
    }
    Ok(translated)
}

fn status_error(status: StatusCode, body: &str) -> anyhow::Error {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return anyhow!("too many requests to google translate, try again later");
    }
    let body = body.trim();
    let mut snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if snippet.len() < body.len() {
        snippet.push_str("...");
    }
    anyhow!("google translate request failed: {status} {snippet}")
}

fn detected_source(payload: &Value) -> Option<&str> {
    payload.get(2).and_then(Value::as_str)
}
