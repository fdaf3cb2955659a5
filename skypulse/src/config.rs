//! User configuration for skypulse.
//!
//! Read from `$XDG_CONFIG_HOME/skypulse/config.toml` (or
//! `~/.config/skypulse/config.toml`). Every key is optional and every error is
//! soft: a missing or malformed file yields the defaults and a logged warning.
//!
//! ```toml
//! brand = "meridian"
//! theme = "catppuccin-mocha"
//! model = "gemini-3-pro-preview"
//! thinking_budget = 32768
//! request_timeout_secs = 120
//! feed_interval_ms = 6000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use skypulse_core::analyst::GeminiConfig;
use skypulse_core::brand::BrandProfile;

/// Parsed contents of `config.toml`. Absent keys stay `None`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub brand: Option<String>,
    pub theme: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    /// Takes precedence over `GEMINI_API_KEY` / `API_KEY`.
    pub api_key: Option<String>,
    pub thinking_budget: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub feed_interval_ms: Option<u64>,
}

/// Returns the path to the skypulse config file.
///
/// Prefers `$XDG_CONFIG_HOME/skypulse/config.toml`; falls back to
/// `~/.config/skypulse/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("skypulse").join("config.toml")
}

impl Config {
    /// Loads the config at `path`. Never fails; see the module docs.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config parse error, using defaults");
                Self::default()
            }
        }
    }

    /// Resolves the brand profile, applying `feed_interval_ms` when set.
    ///
    /// Unknown brand keys fall back to Etihad.
    pub fn brand_profile(&self) -> BrandProfile {
        let brand = match self.brand.as_deref() {
            None => BrandProfile::default(),
            Some(key) => BrandProfile::from_key(key).unwrap_or_else(|| {
                tracing::warn!(brand = key, "unknown brand, falling back to 'etihad'");
                BrandProfile::default()
            }),
        };
        match self.feed_interval_ms {
            Some(ms) if ms > 0 => brand.with_feed_interval(Duration::from_millis(ms)),
            _ => brand,
        }
    }

    /// Theme name from config, else the brand's default.
    pub fn theme_name<'a>(&'a self, brand: &'a BrandProfile) -> &'a str {
        self.theme.as_deref().unwrap_or(brand.default_theme)
    }

    /// Builds the Gemini client settings, reading the API key from the
    /// environment when the config does not carry one.
    pub fn gemini_config(&self) -> GeminiConfig {
        let defaults = GeminiConfig::default();
        GeminiConfig {
            endpoint: self.endpoint.clone().unwrap_or(defaults.endpoint),
            model: self.model.clone().unwrap_or(defaults.model),
            api_key: self
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .or_else(GeminiConfig::api_key_from_env),
            thinking_budget: self.thinking_budget.unwrap_or(defaults.thinking_budget),
            timeout: self
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("absent.toml"));
        assert!(config.brand.is_none());
        assert_eq!(config.brand_profile().key, "etihad");
    }

    #[test]
    fn parses_brand_theme_and_interval() {
        let (_dir, path) = write_config(
            "brand = \"meridian\"\ntheme = \"dark\"\nfeed_interval_ms = 1500\n",
        );
        let config = Config::load(&path);
        let brand = config.brand_profile();
        assert_eq!(brand.key, "meridian");
        assert_eq!(brand.feed_interval, Duration::from_millis(1500));
        assert_eq!(config.theme_name(&brand), "dark");
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let (_dir, path) = write_config("brand = [unterminated");
        let config = Config::load(&path);
        assert!(config.brand.is_none());
    }

    #[test]
    fn theme_defaults_to_brand_theme() {
        let config = Config::default();
        let brand = BrandProfile::etihad();
        assert_eq!(config.theme_name(&brand), "horizon");
    }

    #[test]
    fn gemini_config_overrides() {
        let (_dir, path) = write_config(
            "model = \"gemini-2.5-flash\"\napi_key = \"k\"\nthinking_budget = 1024\nrequest_timeout_secs = 5\n",
        );
        let gemini = Config::load(&path).gemini_config();
        assert_eq!(gemini.model, "gemini-2.5-flash");
        assert_eq!(gemini.api_key.as_deref(), Some("k"));
        assert_eq!(gemini.thinking_budget, 1024);
        assert_eq!(gemini.timeout, Duration::from_secs(5));
    }
}
