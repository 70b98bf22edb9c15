use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::app::PracticeMode;
use crate::locale::Locale;
use crate::quran::api::{DEFAULT_API_BASE, DEFAULT_TRANSLATION_ID, Endpoints};

pub const MAX_REVEAL_COUNT: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_reveal_count")]
    pub reveal_count: usize,
    #[serde(default)]
    pub default_mode: PracticeMode,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_translation_id")]
    pub translation_id: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_reveal_count() -> usize {
    5
}
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
fn default_translation_id() -> u32 {
    DEFAULT_TRANSLATION_ID
}
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            locale: Locale::default(),
            reveal_count: default_reveal_count(),
            default_mode: PracticeMode::default(),
            api_base: default_api_base(),
            translation_id: default_translation_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_from(path)?;
        config.normalize();
        Ok(config)
    }

    /// Parse the file as written, without clamping. Missing file is defaults.
    fn read_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("muraja")
            .join("config.toml")
    }

    /// Pull hand-edited values back into range.
    pub fn normalize(&mut self) {
        self.reveal_count = self.reveal_count.clamp(1, MAX_REVEAL_COUNT);
        if self.api_base.trim().is_empty() {
            self.api_base = default_api_base();
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout_secs();
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.api_base, self.translation_id)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// The config file as the user wrote it, kept apart from the runtime
/// `Config` that command-line flags and `normalize` have adjusted.
///
/// Only settings changed from inside the app are written back.
pub struct ConfigFile {
    path: PathBuf,
    on_disk: Config,
}

impl ConfigFile {
    /// Fails on an unreadable or malformed file; the caller should then run
    /// on defaults and never save over it.
    pub fn open(path: PathBuf) -> Result<Self> {
        let on_disk = Config::read_from(&path)?;
        Ok(Self { path, on_disk })
    }

    /// Effective settings before command-line overrides.
    pub fn config(&self) -> Config {
        let mut config = self.on_disk.clone();
        config.normalize();
        config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save_locale(&mut self, locale: Locale) -> Result<()> {
        self.on_disk.locale = locale;
        self.on_disk.save_to(&self.path)
    }
}
