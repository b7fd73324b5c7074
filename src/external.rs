//! External signal providers: optional per-category score boosters.
//!
//! A provider is a capability injected into a detector. `None` from
//! `classify` means "no signal" — whether because the provider is disabled,
//! the remote call failed, or it timed out. Detectors treat all three the
//! same way: keep the rule-based score and move on. No provider condition
//! ever fails an analysis.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::report::Category;

/// Supplementary score returned by a provider, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalScore {
    pub score: f32,
}

/// Capability interface for external classifiers (text boosters today,
/// vision classifiers when image support lands).
#[async_trait]
pub trait ExternalSignalProvider: Send + Sync {
    /// Classify the text, returning a supplementary 0..=100 score, or `None`
    /// when no usable signal is available. Implementations log their own
    /// failures; they never propagate errors.
    async fn classify(&self, text: &str) -> Option<ExternalScore>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

pub type DynProvider = Arc<dyn ExternalSignalProvider>;

/// Default per-call timeout for provider calls.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(800);

/// Run a provider call under an explicit timeout. Timeouts degrade to `None`
/// with a warning; sibling detectors are unaffected.
pub async fn classify_with_timeout(
    provider: &dyn ExternalSignalProvider,
    category: Category,
    text: &str,
    timeout: Duration,
) -> Option<f32> {
    match tokio::time::timeout(timeout, provider.classify(text)).await {
        Ok(Some(ext)) => Some(ext.score.clamp(0.0, 100.0)),
        Ok(None) => None,
        Err(_) => {
            warn!(
                provider = provider.provider_name(),
                category = category.as_str(),
                timeout_ms = timeout.as_millis() as u64,
                "external classifier timed out; falling back to rule-based score"
            );
            None
        }
    }
}

/// Returns `None` always; used when external signals are disabled.
pub struct DisabledProvider;

#[async_trait]
impl ExternalSignalProvider for DisabledProvider {
    async fn classify(&self, _text: &str) -> Option<ExternalScore> {
        None
    }
    fn provider_name(&self) -> &'static str {
        "disabled"
    }
}

/// Deterministic provider for tests/local runs.
#[derive(Clone)]
pub struct MockProvider {
    pub fixed: f32,
}

#[async_trait]
impl ExternalSignalProvider for MockProvider {
    async fn classify(&self, _text: &str) -> Option<ExternalScore> {
        Some(ExternalScore { score: self.fixed })
    }
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// HTTP provider: `POST {"text": ...}` → `{"score": 0..100}`.
pub struct HttpProvider {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpProvider {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("content-risk-engine/0.1")
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(5))
            .build()
            .expect("reqwest client");
        Self {
            http,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl ExternalSignalProvider for HttpProvider {
    async fn classify(&self, text: &str) -> Option<ExternalScore> {
        #[derive(Serialize)]
        struct Req<'a> {
            text: &'a str,
        }
        #[derive(Deserialize)]
        struct Resp {
            score: f32,
        }

        let resp = match self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&Req { text })
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "external classifier request failed");
                return None;
            }
        };

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "external classifier returned non-success");
            return None;
        }

        let body: Resp = match resp.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "external classifier returned invalid body");
                return None;
            }
        };

        Some(ExternalScore {
            score: body.score.clamp(0.0, 100.0),
        })
    }
    fn provider_name(&self) -> &'static str {
        "http"
    }
}

/// Config loaded from `config/signals.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    pub enabled: bool,
    /// "http" | "mock"
    pub provider: Option<String>,
    pub endpoint: Option<String>,
    /// "ENV" means: read from RISK_SIGNAL_API_KEY.
    pub api_key: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: None,
            endpoint: None,
            api_key: None,
            timeout_ms: Some(DEFAULT_CALL_TIMEOUT.as_millis() as u64),
        }
    }
}

/// Load config from `config/signals.json`. Missing or unparsable file yields
/// the disabled default.
pub fn load_signal_config() -> SignalConfig {
    let path = Path::new("config/signals.json");
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => SignalConfig::default(),
    }
}

/// Factory: build a provider according to config and environment.
///
/// * If `RISK_SIGNAL_MODE=mock`, returns a deterministic mock provider.
/// * Else if `config.enabled==false`, returns a disabled provider.
/// * Else builds the HTTP provider.
pub fn build_provider_from_config(config: &SignalConfig) -> DynProvider {
    if std::env::var("RISK_SIGNAL_MODE")
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        return Arc::new(MockProvider { fixed: 50.0 });
    }

    if !config.enabled {
        return Arc::new(DisabledProvider);
    }

    match config.provider.as_deref() {
        Some("http") => {
            let endpoint = config.endpoint.clone().unwrap_or_default();
            let api_key = match config.api_key.as_deref() {
                Some(k) if k.eq_ignore_ascii_case("env") => {
                    std::env::var("RISK_SIGNAL_API_KEY").unwrap_or_default()
                }
                Some(k) => k.to_string(),
                None => String::new(),
            };
            Arc::new(HttpProvider::new(&endpoint, &api_key))
        }
        Some("mock") => Arc::new(MockProvider { fixed: 50.0 }),
        _ => Arc::new(DisabledProvider),
    }
}

/// Timeout from config, with the default as a floor against zero values.
pub fn call_timeout(config: &SignalConfig) -> Duration {
    config
        .timeout_ms
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_CALL_TIMEOUT)
}
