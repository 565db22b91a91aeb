use std::env;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_CONSULT_MODEL: &str = "us.anthropic.claude-haiku-4-5-20251001-v1:0";
pub const DEFAULT_CONSULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONSULT_MAX_TOKENS: i32 = 1024;

/// Host settings, read from the environment.
///
/// AWS credentials are not part of this: the consult client resolves them
/// through the default provider chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub region: String,
    pub consult_enabled: bool,
    pub consult_model: String,
    pub consult_timeout: Duration,
    pub consult_max_tokens: i32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            region: DEFAULT_REGION.to_string(),
            consult_enabled: true,
            consult_model: DEFAULT_CONSULT_MODEL.to_string(),
            consult_timeout: Duration::from_secs(DEFAULT_CONSULT_TIMEOUT_SECS),
            consult_max_tokens: DEFAULT_CONSULT_MAX_TOKENS,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or unparseable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            bind_addr: get("MEDCALC_BIND_ADDR").unwrap_or(defaults.bind_addr),
            region: get("AWS_REGION").unwrap_or(defaults.region),
            consult_enabled: get("MEDCALC_CONSULT_ENABLED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.consult_enabled),
            consult_model: get("MEDCALC_CONSULT_MODEL").unwrap_or(defaults.consult_model),
            consult_timeout: get("MEDCALC_CONSULT_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.consult_timeout),
            consult_max_tokens: get("MEDCALC_CONSULT_MAX_TOKENS")
                .and_then(|v| v.parse::<i32>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.consult_max_tokens),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
