use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::env;
use std::time::Duration;

use super::models::{LogRetention, SpamAction, TimeoutAction};

pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MIN_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SCORE_THRESHOLD: u8 = 40;
pub const DEFAULT_LOG_RETENTION_DAYS: i64 = 90;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a spam comment detection system. Your ONLY task is to output a single number between 0 and 100.

SCORING RULES:
- 0-20: Obvious spam (ads, malicious links, gibberish)
- 21-40: Likely spam (suspicious links, bot-like comments)
- 41-60: Uncertain (short comments, borderline content)
- 61-80: Likely legitimate (relevant, thoughtful)
- 81-100: Clearly legitimate (detailed, helpful, on-topic)

CRITICAL INSTRUCTIONS:
1. Output ONLY a number (0-100)
2. NO explanations
3. NO additional text
4. NO punctuation
5. Just the number

Example valid outputs: 85
Example INVALID outputs: \"Score: 85\", \"85 points\", \"I think it's 85\"

If you output anything other than a single number, the system will fail.";

#[must_use]
pub fn clamp_temperature(temperature: f64) -> f64 {
    if temperature.is_nan() {
        0.0
    } else {
        temperature.clamp(0.0, 2.0)
    }
}

/// Per-call client configuration. Temperature stays in `[0, 2]` and the
/// timeout never drops below five seconds.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    endpoint: String,
    api_key: String,
    model_id: String,
    temperature: f64,
    system_prompt: String,
    timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model_id: model_id.into(),
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = clamp_temperature(temperature);
        self
    }

    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs.max(MIN_TIMEOUT_SECS);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Full moderation settings as a host would persist them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_endpoint: String,
    pub api_key: String,
    pub model_id: String,
    pub temperature: f64,
    pub system_prompt: String,
    pub timeout: u64,
    #[serde(deserialize_with = "lenient_threshold")]
    pub score_threshold: u8,
    #[serde(deserialize_with = "lenient_spam_action")]
    pub spam_action: SpamAction,
    #[serde(deserialize_with = "lenient_timeout_action")]
    pub timeout_action: TimeoutAction,
    pub log_retention: i64,
    pub spam_message: String,
    pub error_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            api_key: String::new(),
            model_id: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            spam_action: SpamAction::default(),
            timeout_action: TimeoutAction::default(),
            log_retention: DEFAULT_LOG_RETENTION_DAYS,
            spam_message: String::new(),
            error_message: String::new(),
        }
    }
}

impl Settings {
    /// Parses a stored settings document; missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(raw).map(Self::sanitized)
    }

    /// Reads `SPAMJUDGE_*` variables. Endpoint, key and model are required.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let settings = Self {
            api_endpoint: env::var("SPAMJUDGE_API_ENDPOINT")
                .map_err(|e| format!("SPAMJUDGE_API_ENDPOINT: {e}"))?,
            api_key: env::var("SPAMJUDGE_API_KEY")
                .map_err(|e| format!("SPAMJUDGE_API_KEY: {e}"))?,
            model_id: env::var("SPAMJUDGE_MODEL_ID")
                .map_err(|e| format!("SPAMJUDGE_MODEL_ID: {e}"))?,
            temperature: parse_var("SPAMJUDGE_TEMPERATURE")?.unwrap_or(defaults.temperature),
            system_prompt: env::var("SPAMJUDGE_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt),
            timeout: parse_var("SPAMJUDGE_TIMEOUT")?.unwrap_or(defaults.timeout),
            score_threshold: parse_var::<i64>("SPAMJUDGE_SCORE_THRESHOLD")?.map_or(
                defaults.score_threshold,
                |t| u8::try_from(t.clamp(0, 100)).unwrap_or(DEFAULT_SCORE_THRESHOLD),
            ),
            spam_action: match env::var("SPAMJUDGE_SPAM_ACTION").ok().as_deref() {
                Some("hold") => SpamAction::Hold,
                _ => SpamAction::Spam,
            },
            timeout_action: match env::var("SPAMJUDGE_TIMEOUT_ACTION").ok().as_deref() {
                Some("approve") => TimeoutAction::Approve,
                _ => TimeoutAction::Hold,
            },
            log_retention: parse_var("SPAMJUDGE_LOG_RETENTION")?
                .unwrap_or(defaults.log_retention),
            spam_message: env::var("SPAMJUDGE_SPAM_MESSAGE").unwrap_or_default(),
            error_message: env::var("SPAMJUDGE_ERROR_MESSAGE").unwrap_or_default(),
        };
        Ok(settings.sanitized())
    }

    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.temperature = clamp_temperature(self.temperature);
        self.timeout = self.timeout.max(MIN_TIMEOUT_SECS);
        self.score_threshold = self.score_threshold.min(100);
        self
    }

    /// Checks are skipped entirely until key, endpoint and model are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_endpoint.is_empty() && !self.model_id.is_empty()
    }

    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_endpoint, &self.api_key, &self.model_id)
            .with_temperature(self.temperature)
            .with_system_prompt(&self.system_prompt)
            .with_timeout_secs(self.timeout)
    }

    #[must_use]
    pub fn log_retention(&self) -> LogRetention {
        LogRetention::from_days(self.log_retention)
    }
}

/// Integer-ish threshold clamped to 0..=100. Unparseable values read as 0.
fn lenient_threshold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        Value::Bool(b) => i64::from(b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    };
    Ok(u8::try_from(raw.clamp(0, 100)).unwrap_or(DEFAULT_SCORE_THRESHOLD))
}

fn action_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s.trim().to_string()),
        _ => None,
    })
}

/// Anything other than `hold` falls back to `spam`.
fn lenient_spam_action<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpamAction, D::Error> {
    Ok(match action_str(deserializer)?.as_deref() {
        Some("hold") => SpamAction::Hold,
        _ => SpamAction::Spam,
    })
}

/// Anything other than `approve` falls back to `hold`.
fn lenient_timeout_action<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<TimeoutAction, D::Error> {
    Ok(match action_str(deserializer)?.as_deref() {
        Some("approve") => TimeoutAction::Approve,
        _ => TimeoutAction::Hold,
    })
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, String>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("{name}: {e}")),
        Err(_) => Ok(None),
    }
}
