use crate::error::AppError;
use crate::filesystem;
use crate::models::{GenerationParams, DEFAULT_ROLES_CLAIM};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const ENV_API_URL: &str = "VIRTUAL_VOGUE_API_URL";
pub const ENV_CATALOG_URL: &str = "VIRTUAL_VOGUE_CATALOG_URL";

const DEFAULT_GENERATION_ENDPOINT: &str = "http://127.0.0.1:7860/tryon";

/// Runtime settings, read from `config.toml` in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Multipart endpoint of the try-on model
    pub generation_endpoint: String,
    /// REST product gateway; the local SQLite store is used when unset
    pub catalog_url: Option<String>,
    /// Relative paths are resolved against the app data directory
    pub database_path: String,
    pub downloads_dir: Option<String>,
    pub roles_claim: String,
    pub denoise_steps: u32,
    pub seed: i64,
    pub number_of_images: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let params = GenerationParams::DEFAULT;
        Self {
            generation_endpoint: DEFAULT_GENERATION_ENDPOINT.to_string(),
            catalog_url: None,
            database_path: "virtual_vogue.db".to_string(),
            downloads_dir: None,
            roles_claim: DEFAULT_ROLES_CLAIM.to_string(),
            denoise_steps: params.denoise_steps,
            seed: params.seed,
            number_of_images: params.number_of_images,
        }
    }
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Loads the config of this installation and applies environment overrides.
    /// Overrides are never written back.
    pub fn load() -> Result<Self, AppError> {
        let path = filesystem::get_app_data_dir().join(CONFIG_FILE_NAME);
        let existed = path.exists();
        let mut config = Self::load_from(&path)?;
        // First start writes the defaults so they can be edited
        if !existed {
            if let Err(e) = config.save() {
                log::warn!("Could not write default config: {}", e);
            }
        }
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, AppError> {
        let content = self.to_toml()?;
        Ok(filesystem::write_data_file(CONFIG_FILE_NAME, content.as_bytes())?)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());

        if let Some(url) = non_blank(ENV_API_URL) {
            self.generation_endpoint = url;
        }
        if let Some(url) = non_blank(ENV_CATALOG_URL) {
            self.catalog_url = Some(url);
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            denoise_steps: self.denoise_steps,
            seed: self.seed,
            number_of_images: self.number_of_images,
        }
    }

    pub fn database_file(&self) -> PathBuf {
        filesystem::resolve_data_path(&self.database_path)
    }

    pub fn downloads_path(&self) -> PathBuf {
        match &self.downloads_dir {
            Some(dir) if !dir.trim().is_empty() => filesystem::resolve_data_path(dir),
            _ => filesystem::get_downloads_dir(),
        }
    }
}
