//! Settings storage
//!
//! Manages persistence of the desk's connection settings and preferences.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the stored portal URL
pub const BASE_URL_ENV: &str = "CONSULTDESK_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSettings {
    /// Root URL of the consultant portal
    pub base_url: String,
    /// Per-request timeout in seconds (1 - 300)
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Client whose conversation was open last
    #[serde(default)]
    pub client_id: Option<String>,
    /// UI theme: "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Clients shown in the sidebar and the tag table
    #[serde(default)]
    pub clients: Vec<ClientEntry>,
    /// Tags offered on every client row
    #[serde(default = "default_tag_palette")]
    pub tag_palette: Vec<String>,
}

/// A client assigned to this consultant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientEntry {
    pub id: String,
    pub name: String,
    /// Comma separated tags, as the portal stores them
    #[serde(default)]
    pub tags: String,
}

fn default_timeout() -> u64 {
    30
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_tag_palette() -> Vec<String> {
    ["vip", "implant", "orthodontics", "follow-up"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: default_timeout(),
            client_id: None,
            theme: default_theme(),
            clients: Vec::new(),
            tag_palette: default_tag_palette(),
        }
    }
}

impl PortalSettings {
    /// Validate settings values
    pub fn validate(&mut self) {
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 300);

        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        } else if trimmed.len() != self.base_url.len() {
            self.base_url = trimmed.to_string();
        }

        if self
            .client_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            self.client_id = None;
        }

        if self.theme != "dark" && self.theme != "light" {
            self.theme = default_theme();
        }

        self.clients.retain(|c| !c.id.trim().is_empty());
        let mut seen = HashSet::new();
        self.tag_palette
            .retain(|t| !t.trim().is_empty() && seen.insert(t.clone()));
    }

    fn apply_env_override(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::info!("Using portal URL from {}", BASE_URL_ENV);
                self.base_url = url;
            }
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> PortalSettings {
    let mut settings = match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            PortalSettings::default()
        }
    };
    settings.apply_env_override();
    settings.validate();
    settings
}

fn load_settings_from(path: &Path) -> Result<PortalSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(PortalSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: PortalSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &PortalSettings) -> Result<(), StorageError> {
    save_settings_to(&get_settings_path()?, settings)
}

fn save_settings_to(path: &Path, settings: &PortalSettings) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}
