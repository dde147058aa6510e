use anyhow::{Result, bail};
use serde::Serialize;
use std::env;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Bundled config for builds that have no process environment (web, mobile).
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

/// Look a key up in the bundled `config.env`.
fn bundled(key: &str) -> Option<String> {
    dotenvy::from_read_iter(BUNDLED_CONFIG.as_bytes())
        .filter_map(|item| match item {
            Ok(pair) => Some(pair),
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed bundled config line");
                None
            }
        })
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Which feature modules the main view is composed of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureSet {
    pub notes: bool,
    pub tasks: bool,
    pub assistant: bool,
}

impl FeatureSet {
    pub const fn full() -> Self {
        Self {
            notes: true,
            tasks: true,
            assistant: true,
        }
    }

    pub const fn notes_only() -> Self {
        Self {
            notes: true,
            tasks: false,
            assistant: false,
        }
    }

    /// Parse a comma-separated module list such as `notes,assistant`.
    pub fn parse(raw: &str) -> Self {
        let mut features = Self {
            notes: false,
            tasks: false,
            assistant: false,
        };
        let mut any = false;
        for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match name.to_ascii_lowercase().as_str() {
                "notes" => features.notes = true,
                "tasks" => features.tasks = true,
                "assistant" | "chat" => features.assistant = true,
                other => {
                    tracing::warn!(feature = other, "ignoring unknown feature module");
                    continue;
                }
            }
            any = true;
        }
        if any { features } else { Self::full() }
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::full()
    }
}

/// Web SDK settings handed to the identity provider verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub app_id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub backend_url: String,
    pub features: FeatureSet,
    pub firebase: FirebaseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            features: FeatureSet::full(),
            firebase: FirebaseConfig::default(),
        }
    }
}

impl AppConfig {
    /// Process environment first, then the bundled config.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok().or_else(|| bundled(key)))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend_url = lookup("TASKMIND_BACKEND_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            bail!("TASKMIND_BACKEND_URL must be an http(s) origin, got {backend_url:?}");
        }

        let features = lookup("TASKMIND_FEATURES")
            .map(|raw| FeatureSet::parse(&raw))
            .unwrap_or_default();

        let firebase = FirebaseConfig {
            api_key: lookup("FIREBASE_API_KEY").unwrap_or_default(),
            auth_domain: lookup("FIREBASE_AUTH_DOMAIN").unwrap_or_default(),
            project_id: lookup("FIREBASE_PROJECT_ID").unwrap_or_default(),
            app_id: lookup("FIREBASE_APP_ID").unwrap_or_default(),
        };
        if firebase.api_key.is_empty() {
            tracing::warn!("FIREBASE_API_KEY is not set; sign-in will fail");
        }

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            features,
            firebase,
        })
    }
}
