use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use core_types::{DEFAULT_SWAP_FALLBACK, DEFAULT_TARGET, UiLanguage};
use provider_google::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: String,
    pub user_agent: String,
    /// `0` and absent both mean no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub schema_version: u32,
    #[serde(default)]
    pub ui_language: UiLanguage,
    /// Target language for new sessions when the catalog has it.
    #[serde(default = "default_target")]
    pub default_target: String,
    /// Target picked when swapping away from auto-detect.
    #[serde(default = "default_swap_fallback")]
    pub swap_fallback: String,
    #[serde(default)]
    pub backend: BackendConfig,
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_swap_fallback() -> String {
    DEFAULT_SWAP_FALLBACK.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            ui_language: UiLanguage::EnUs,
            default_target: default_target(),
            swap_fallback: default_swap_fallback(),
            backend: BackendConfig::default(),
        }
    }
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("config.json"),
        }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_default_location() -> Result<Self> {
        let mut dir = dirs::config_dir().context("failed to resolve config_dir")?;
        dir.push("polyglot");
        Ok(Self::from_dir(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            let config = AppConfig::default();
            self.save(&config)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let mut config: AppConfig =
            serde_json::from_str(&raw).context("failed to parse app config json")?;
        let migrated = self.migrate(&mut config);
        let normalized = normalize(&mut config);
        if migrated || normalized {
            self.save(&config)?;
        }
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let text = serde_json::to_string_pretty(config).context("failed to serialize config")?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Returns whether anything changed.
    fn migrate(&self, config: &mut AppConfig) -> bool {
        if config.schema_version >= CURRENT_SCHEMA_VERSION {
            return false;
        }

        warn!(
            from = config.schema_version,
            to = CURRENT_SCHEMA_VERSION,
            "migrating app config schema"
        );

        if config.default_target.trim().is_empty() {
            config.default_target = default_target();
        }
        if config.swap_fallback.trim().is_empty() {
            config.swap_fallback = default_swap_fallback();
        }
        if config.backend.base_url.trim().is_empty() {
            config.backend.base_url = DEFAULT_BASE_URL.to_string();
        }
        config.schema_version = CURRENT_SCHEMA_VERSION;
        true
    }
}

/// Fixes values any schema version can carry. Returns whether anything changed.
fn normalize(config: &mut AppConfig) -> bool {
    if config.backend.timeout_ms == Some(0) {
        warn!("backend.timeout_ms is 0, treating it as no timeout");
        config.backend.timeout_ms = None;
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn creates_default_config_when_missing() {
        let dir = tempdir().expect("tempdir");
        let store = ConfigStore::from_dir(dir.path());
        let config = store.load_or_init().expect("load default");
        assert_eq!(config.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(config.default_target, "Urdu");
        assert_eq!(config.swap_fallback, "English");
        assert_eq!(config.backend.timeout(), None);
        assert!(store.path().exists());
    }

    #[test]
    fn migrates_old_schema_and_fills_blanks() {
        let dir = tempdir().expect("tempdir");
        let store = ConfigStore::from_file(dir.path().join("custom.json"));
        fs::write(
            store.path(),
            r#"{
                "schema_version": 0,
                "ui_language": "zh_cn",
                "default_target": "",
                "backend": { "base_url": " ", "user_agent": "test", "timeout_ms": 1500 }
            }"#,
        )
        .expect("write old config");

        let config = store.load_or_init().expect("load");
        assert_eq!(config.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(config.ui_language, UiLanguage::ZhCn);
        assert_eq!(config.default_target, "Urdu");
        assert_eq!(config.swap_fallback, "English");
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.backend.timeout(), Some(Duration::from_millis(1500)));

        let reloaded = store.load_or_init().expect("reload");
        assert_eq!(reloaded, config);
    }

    #[test]
    fn rejects_malformed_json() {
        let dir = tempdir().expect("tempdir");
        let store = ConfigStore::from_dir(dir.path());
        fs::write(store.path(), "{ not json").expect("write");
        assert!(store.load_or_init().is_err());
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let dir = tempdir().expect("tempdir");
        let store = ConfigStore::from_dir(dir.path());
        fs::write(
            store.path(),
            r#"{
                "schema_version": 1,
                "backend": { "base_url": "http://localhost:8080", "user_agent": "test", "timeout_ms": 0 }
            }"#,
        )
        .expect("write config");

        let config = store.load_or_init().expect("load");
        assert_eq!(config.backend.timeout_ms, None);
        assert_eq!(config.backend.timeout(), None);
        assert_eq!(config.backend.base_url, "http://localhost:8080");

        let saved = fs::read_to_string(store.path()).expect("read back");
        assert!(!saved.contains("timeout_ms"));

        let unnormalized = BackendConfig {
            timeout_ms: Some(0),
            ..BackendConfig::default()
        };
        assert_eq!(unnormalized.timeout(), None);
    }
}
