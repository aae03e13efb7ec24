// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[cms]` - Query API coordinates, token and timeout
//! - `[images]` - Image CDN base and default transformation
//! - `[gallery]` - Viewer playback and lightbox behaviour
//! - `[logging]` - Log filter
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `FOLIO_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Environment
//!
//! `FOLIO_LENS_PROJECT_ID`, `FOLIO_LENS_DATASET` and `FOLIO_LENS_API_VERSION`
//! override the `[cms]` coordinates after the file is read.
//!
//! # Examples
//!
//! ```no_run
//! use folio_lens::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.cms.use_cdn = true;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::query::navigation::{PlaybackPolicy, ViewerOptions};
use crate::error::{Error, Result};
use crate::infrastructure::SanityEndpoint;
use crate::media::{FitMode, ImageTransform, ImageUrlBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Message key returned by [`load`] when the file exists but cannot be parsed.
pub const LOAD_ERROR_KEY: &str = "config-load-error";

pub const ENV_PROJECT_ID: &str = "FOLIO_LENS_PROJECT_ID";
pub const ENV_DATASET: &str = "FOLIO_LENS_DATASET";
pub const ENV_API_VERSION: &str = "FOLIO_LENS_API_VERSION";

// =============================================================================
// TimeoutSecs
// =============================================================================

/// CMS request timeout in seconds, guaranteed to be within 1–120.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct TimeoutSecs(u64);

impl TimeoutSecs {
    /// Creates a new timeout, clamping to the valid range.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for TimeoutSecs {
    fn default() -> Self {
        Self(DEFAULT_TIMEOUT_SECS)
    }
}

impl From<u64> for TimeoutSecs {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<TimeoutSecs> for u64 {
    fn from(value: TimeoutSecs) -> Self {
        value.0
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// CMS query API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Query the cached API edge instead of the live API.
    pub use_cdn: bool,
    /// Read token for private datasets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub timeout_secs: TimeoutSecs,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: false,
            token: None,
            timeout_secs: TimeoutSecs::default(),
        }
    }
}

impl CmsConfig {
    /// Checks that the project coordinates needed to build endpoints are set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(Error::Config(format!(
                "missing [cms] project_id (or {ENV_PROJECT_ID})"
            )));
        }
        if self.dataset.trim().is_empty() {
            return Err(Error::Config(format!(
                "missing [cms] dataset (or {ENV_DATASET})"
            )));
        }
        Ok(())
    }

    /// The query endpoint these settings describe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when [`validate`](Self::validate) fails.
    pub fn endpoint(&self) -> Result<SanityEndpoint> {
        self.validate()?;
        Ok(SanityEndpoint {
            project_id: self.project_id.trim().to_string(),
            dataset: self.dataset.trim().to_string(),
            api_version: self.api_version.clone(),
            use_cdn: self.use_cdn,
            token: self.token.clone(),
            timeout: Duration::from_secs(self.timeout_secs.value()),
        })
    }

    /// Applies the `FOLIO_LENS_*` environment variables. Blank values are ignored.
    pub fn apply_env_overrides(&mut self) {
        for (name, field) in [
            (ENV_PROJECT_ID, &mut self.project_id),
            (ENV_DATASET, &mut self.dataset),
            (ENV_API_VERSION, &mut self.api_version),
        ] {
            if let Ok(value) = std::env::var(name) {
                let value = value.trim();
                if !value.is_empty() {
                    *field = value.to_string();
                }
            }
        }
    }
}

/// Image CDN settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImagesConfig {
    pub cdn_base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitMode>,
    /// Encoding quality, 1-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    pub auto_format: bool,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            width: None,
            height: None,
            fit: None,
            quality: None,
            auto_format: true,
        }
    }
}

impl ImagesConfig {
    /// The transform applied to every image URL unless a view asks for its own.
    #[must_use]
    pub fn transform(&self) -> ImageTransform {
        ImageTransform {
            width: self.width,
            height: self.height,
            fit: self.fit,
            quality: self
                .quality
                .map(|q| q.clamp(MIN_IMAGE_QUALITY, MAX_IMAGE_QUALITY)),
            auto_format: self.auto_format,
        }
    }

    /// Image URL builder for the configured CMS project.
    #[must_use]
    pub fn builder(&self, cms: &CmsConfig) -> ImageUrlBuilder {
        ImageUrlBuilder::new(&self.cdn_base, &cms.project_id, &cms.dataset)
            .with_defaults(self.transform())
    }
}

/// Gallery viewer settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Start playable media automatically.
    pub autoplay: bool,
    /// Mute playable media in the inline viewer.
    pub muted_inline: bool,
    /// Move the main viewer to the lightbox position when it closes.
    pub sync_lightbox_on_close: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            muted_inline: true,
            sync_lightbox_on_close: false,
        }
    }
}

impl GalleryConfig {
    #[must_use]
    pub fn viewer_options(&self) -> ViewerOptions {
        ViewerOptions {
            playback: PlaybackPolicy {
                autoplay: self.autoplay,
                muted_inline: self.muted_inline,
            },
            sync_lightbox_on_close: self.sync_lightbox_on_close,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `folio_lens=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

// =============================================================================
// Main Config Struct
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Image URL builder for this configuration.
    #[must_use]
    pub fn image_builder(&self) -> ImageUrlBuilder {
        self.images.builder(&self.cms)
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let (mut config, warning) = read_with_override(base_dir);
    config.cms.apply_env_overrides();
    (config, warning)
}

fn read_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "invalid settings file");
                    return (Config::default(), Some(LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::paths::tests::ENV_MUTEX;
    use tempfile::tempdir;

    fn clear_env() {
        for name in [ENV_PROJECT_ID, ENV_DATASET, ENV_API_VERSION] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.cms.api_version, "2024-01-01");
        assert!(!config.cms.use_cdn);
        assert_eq!(config.cms.timeout_secs.value(), 10);
        assert_eq!(config.images.cdn_base, "https://cdn.sanity.io");
        assert!(config.images.auto_format);
        assert!(config.gallery.autoplay);
        assert!(config.gallery.muted_inline);
        assert!(!config.gallery.sync_lightbox_on_close);
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn timeout_is_clamped() {
        assert_eq!(TimeoutSecs::new(0).value(), MIN_TIMEOUT_SECS);
        assert_eq!(TimeoutSecs::new(30).value(), 30);
        assert_eq!(TimeoutSecs::new(10_000).value(), MAX_TIMEOUT_SECS);

        let config: Config = toml::from_str("[cms]\ntimeout_secs = 999\n").expect("parses");
        assert_eq!(config.cms.timeout_secs.value(), MAX_TIMEOUT_SECS);
    }

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            cms: CmsConfig {
                project_id: "abc123".to_string(),
                dataset: "production".to_string(),
                use_cdn: true,
                token: Some("secret".to_string()),
                timeout_secs: TimeoutSecs::new(25),
                ..CmsConfig::default()
            },
            images: ImagesConfig {
                width: Some(1200),
                fit: Some(FitMode::Crop),
                quality: Some(75),
                ..ImagesConfig::default()
            },
            gallery: GalleryConfig {
                autoplay: false,
                muted_inline: true,
                sync_lightbox_on_close: true,
            },
            logging: LoggingConfig {
                level: Some("info".to_string()),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config =
            toml::from_str("[cms]\nproject_id = \"p\"\ndataset = \"d\"\n").expect("parses");
        assert_eq!(config.cms.project_id, "p");
        assert_eq!(config.cms.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.images, ImagesConfig::default());
        assert_eq!(config.gallery, GalleryConfig::default());
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("write file");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "[cms\nproject_id = 1").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(warning.as_deref(), Some(LOAD_ERROR_KEY));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut config = Config::default();
        config.cms.project_id = "xyz".to_string();
        config.cms.dataset = "staging".to_string();
        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists(), "config file should exist");

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none(), "load should succeed without warning");
        assert_eq!(loaded.cms.project_id, "xyz");
        assert_eq!(loaded.cms.dataset, "staging");
    }

    #[test]
    fn env_overrides_replace_file_coordinates() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear_env();
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(
            base_dir.join("settings.toml"),
            "[cms]\nproject_id = \"from-file\"\ndataset = \"production\"\n",
        )
        .expect("write file");

        std::env::set_var(ENV_PROJECT_ID, "  from-env  ");
        std::env::set_var(ENV_DATASET, "   ");
        let (config, _) = load_with_override(Some(base_dir));
        clear_env();

        assert_eq!(config.cms.project_id, "from-env");
        assert_eq!(config.cms.dataset, "production", "blank values are ignored");
    }

    #[test]
    fn validate_reports_missing_coordinates() {
        assert!(matches!(CmsConfig::default().validate(), Err(Error::Config(_))));
        let only_project = CmsConfig {
            project_id: "p".to_string(),
            ..CmsConfig::default()
        };
        assert!(matches!(only_project.validate(), Err(Error::Config(_))));
        let complete = CmsConfig {
            dataset: "d".to_string(),
            ..only_project
        };
        assert!(complete.validate().is_ok());
    }

    #[test]
    fn endpoint_carries_cms_settings() {
        let cms = CmsConfig {
            project_id: " abc123 ".to_string(),
            dataset: "production".to_string(),
            use_cdn: true,
            token: Some("secret".to_string()),
            timeout_secs: TimeoutSecs::new(30),
            ..CmsConfig::default()
        };
        let endpoint = cms.endpoint().expect("complete coordinates");
        assert_eq!(endpoint.project_id, "abc123");
        assert_eq!(endpoint.api_version, DEFAULT_API_VERSION);
        assert!(endpoint.use_cdn);
        assert_eq!(endpoint.token.as_deref(), Some("secret"));
        assert_eq!(endpoint.timeout, Duration::from_secs(30));

        assert!(matches!(CmsConfig::default().endpoint(), Err(Error::Config(_))));
    }

    #[test]
    fn images_transform_clamps_quality() {
        let images = ImagesConfig {
            quality: Some(0),
            ..ImagesConfig::default()
        };
        assert_eq!(images.transform().quality, Some(MIN_IMAGE_QUALITY));
    }

    #[test]
    fn gallery_maps_to_viewer_options() {
        let gallery = GalleryConfig {
            autoplay: false,
            muted_inline: false,
            sync_lightbox_on_close: true,
        };
        let options = gallery.viewer_options();
        assert!(!options.playback.autoplay);
        assert!(!options.playback.muted_inline);
        assert!(options.sync_lightbox_on_close);
    }

    #[test]
    fn saved_config_uses_sectioned_format() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        save_to_path(&Config::default(), &config_path).expect("save");

        let content = fs::read_to_string(&config_path).expect("read");
        for section in ["[cms]", "[images]", "[gallery]"] {
            assert!(content.contains(section), "missing {section} in:\n{content}");
        }
    }
}
