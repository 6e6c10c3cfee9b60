use std::env;

/// Backend address used when nothing is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Environment variable holding the backend base URL.
pub const API_BASE_ENV: &str = "QUIZ_API_BASE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
}

impl BackendConfig {
    #[must_use]
    pub fn new(raw_base: &str) -> Self {
        Self {
            base_url: normalize_api_base(raw_base),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        env::var(API_BASE_ENV)
            .map(|value| Self::new(&value))
            .unwrap_or_default()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Blank → default; scheme-less hosts get `https://`; trailing slashes dropped.
#[must_use]
pub fn normalize_api_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE.to_string();
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
