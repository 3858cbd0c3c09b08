use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

use super::sign::{generate_salt, sign};
use super::throttle::Throttle;

/// Default Baidu general translation endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://api.fanyi.baidu.com/api/trans/vip/translate";

/// One span of text to translate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub from: String,
    pub to: String,
}

impl TranslationRequest {
    pub fn new(source_text: impl Into<String>, from: &str, to: &str) -> Self {
        Self {
            source_text: source_text.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Compute the cache key for this request against a given endpoint.
    pub fn cache_key(&self, endpoint: &str) -> String {
        let cache_input = serde_json::json!({
            "source_text": self.source_text,
            "from": self.from,
            "to": self.to,
            "endpoint": endpoint,
        });

        let mut hasher = Sha256::new();
        hasher.update(cache_input.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// A text-to-text translation backend.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates one span. Transport, API and parse failures are returned as
    /// errors; callers decide whether to skip or abort.
    async fn translate(&self, request: &TranslationRequest) -> Result<String>;
}

/// Baidu application credentials.
#[derive(Clone)]
pub struct Credentials {
    pub app_id: String,
    pub secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    trans_result: Vec<TranslateResult>,
    #[serde(default)]
    error_code: Option<serde_json::Value>,
    #[serde(default)]
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslateResult {
    dst: String,
}

/// Client for the Baidu general translation API.
///
/// Every request is preceded by a throttle wait.
pub struct BaiduClient {
    client: Client,
    endpoint: String,
    credentials: Credentials,
    throttle: Throttle,
}

impl BaiduClient {
    pub fn new(
        endpoint: String,
        credentials: Credentials,
        delay: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            credentials,
            throttle: Throttle::new(delay),
        })
    }

    fn request_url(&self, request: &TranslationRequest, salt: u32) -> Result<Url> {
        let salt_str = salt.to_string();
        let signature = sign(
            &self.credentials.app_id,
            &request.source_text,
            salt,
            &self.credentials.secret_key,
        );

        Url::parse_with_params(
            &self.endpoint,
            &[
                ("appid", self.credentials.app_id.as_str()),
                ("q", request.source_text.as_str()),
                ("from", request.from.as_str()),
                ("to", request.to.as_str()),
                ("salt", salt_str.as_str()),
                ("sign", signature.as_str()),
            ],
        )
        .with_context(|| format!("Invalid translation endpoint: {}", self.endpoint))
    }
}

#[async_trait]
impl Translator for BaiduClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        self.throttle.wait().await;

        let url = self.request_url(request, generate_salt())?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to connect to translation API: {}", self.endpoint))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("API request failed with status {status}: {body}");
        }

        let body = response
            .text()
            .await
            .context("Failed to read translation API response")?;

        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<String> {
    let response: TranslateResponse =
        serde_json::from_str(body).context("Malformed translation API response")?;

    if let Some(code) = response.error_code {
        let code = code.as_str().map_or_else(|| code.to_string(), str::to_string);
        // 52000 is Baidu's success code
        if code != "52000" {
            bail!(
                "Translation API error {code}: {}",
                response.error_msg.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let dst = response
        .trans_result
        .into_iter()
        .next()
        .map(|result| result.dst)
        .context("Translation API response has no 'trans_result'")?;

    if dst.is_empty() {
        bail!("Translation API returned an empty translation");
    }

    Ok(dst)
}
