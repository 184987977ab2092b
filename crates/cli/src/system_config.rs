//! User-level configuration (`showcase/config.toml` in the platform config dir)
//!
//! Missing file or missing keys fall back to defaults. The auth URL and
//! public key may also come from the environment, which wins over the file.

use anyhow::{Context, Result};
use query::catalog::{PRODUCTS_URL, SEARCH_DEBOUNCE};
use query::CatalogConfig;
use sc_core::catalog::DEFAULT_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "SHOWCASE_CONFIG_DIR";
/// Overrides the data directory (session file)
pub const DATA_DIR_ENV: &str = "SHOWCASE_DATA_DIR";
/// Auth service URL
pub const SUPABASE_URL_ENV: &str = "SHOWCASE_SUPABASE_URL";
/// Auth service public (anon) key
pub const SUPABASE_PUBKEY_ENV: &str = "SHOWCASE_SUPABASE_PUBKEY";

const APP_DIR: &str = "showcase";
const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.json";

/// Full configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub catalog: CatalogSection,
    pub auth: AuthSection,
}

/// `[catalog]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Products endpoint
    pub base_url: String,
    /// Products per page (1-100)
    pub per_page: u32,
    /// Search debounce in milliseconds (0-5000)
    pub debounce_ms: u64,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            base_url: PRODUCTS_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            debounce_ms: SEARCH_DEBOUNCE.as_millis() as u64,
        }
    }
}

/// `[auth]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    pub supabase_url: String,
    pub supabase_pubkey: String,
    /// Where OAuth and recovery links send the browser back to
    pub redirect_url: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_pubkey: String::new(),
            redirect_url: "http://localhost:5173".to_string(),
        }
    }
}

impl SystemConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.catalog.per_page) {
            anyhow::bail!(
                "catalog.per_page must be between 1 and 100 (got {})",
                self.catalog.per_page
            );
        }
        if self.catalog.debounce_ms > 5000 {
            anyhow::bail!(
                "catalog.debounce_ms must be between 0 and 5000 (got {})",
                self.catalog.debounce_ms
            );
        }
        if !self.catalog.base_url.starts_with("http://") && !self.catalog.base_url.starts_with("https://") {
            anyhow::bail!(
                "catalog.base_url must be an http(s) URL (got '{}')",
                self.catalog.base_url
            );
        }
        Ok(())
    }

    /// Settings for the product listing
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.catalog.base_url.trim_end_matches('/').to_string(),
            per_page: self.catalog.per_page,
            debounce: Duration::from_millis(self.catalog.debounce_ms),
        }
    }

    /// Apply `SHOWCASE_SUPABASE_URL` / `SHOWCASE_SUPABASE_PUBKEY`
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = env_value(SUPABASE_URL_ENV) {
            self.auth.supabase_url = url;
        }
        if let Some(key) = env_value(SUPABASE_PUBKEY_ENV) {
            self.auth.supabase_pubkey = key;
        }
        self
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn app_dir(env_override: &str, base: Option<PathBuf>) -> Option<PathBuf> {
    match env_value(env_override) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => base.map(|dir| dir.join(APP_DIR)),
    }
}

/// Path of the config file
pub fn config_file_path() -> Option<PathBuf> {
    app_dir(CONFIG_DIR_ENV, dirs::config_dir()).map(|dir| dir.join(CONFIG_FILE))
}

/// Path of the persisted session
pub fn session_file_path() -> Option<PathBuf> {
    app_dir(DATA_DIR_ENV, dirs::data_dir()).map(|dir| dir.join(SESSION_FILE))
}

/// Read a config file; a missing file yields defaults
pub fn load_from(path: &Path) -> Result<SystemConfig> {
    if !path.exists() {
        return Ok(SystemConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

/// Write a config file, creating its directory
pub fn save_to(path: &Path, config: &SystemConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
    }
    let raw = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, raw)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

/// Config as stored on disk, without environment overrides
pub fn load_file() -> Result<SystemConfig> {
    match config_file_path() {
        Some(path) => load_from(&path),
        None => Ok(SystemConfig::default()),
    }
}

/// Effective config: file plus environment overrides
pub fn load() -> Result<SystemConfig> {
    Ok(load_file()?.with_env_overrides())
}

/// Save to the standard location
pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    save_to(&path, config)
}

/// Create the config file with defaults if it does not exist
pub fn init_if_missing() -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save_to(&path, &SystemConfig::default())?;
    }
    Ok(path)
}

/// Annotated example file
pub fn example_config() -> String {
    let defaults = SystemConfig::default();
    format!(
        r#"# showcase configuration

[catalog]
# Products endpoint
base_url = "{base_url}"
# Products per page (1-100)
per_page = {per_page}
# Delay before a search term is sent, in milliseconds (0-5000)
debounce_ms = {debounce_ms}

[auth]
# Auth service project URL (or set {url_env})
supabase_url = "https://your-project.supabase.co"
# Public anon key (or set {key_env})
supabase_pubkey = "your-anon-key"
# Where OAuth and password-recovery links return to
redirect_url = "{redirect_url}"
"#,
        base_url = defaults.catalog.base_url,
        per_page = defaults.catalog.per_page,
        debounce_ms = defaults.catalog.debounce_ms,
        url_env = SUPABASE_URL_ENV,
        key_env = SUPABASE_PUBKEY_ENV,
        redirect_url = defaults.auth.redirect_url,
    )
}
