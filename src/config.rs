use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::debug;

const GEO_API_KEY_VAR: &str = "GEO_API_KEY";
const CURRENCY_API_KEY_VAR: &str = "CURRENCY_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeoProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyApiProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub geo: Option<GeoProviderConfig>,
    pub currencyapi: Option<CurrencyApiProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            geo: Some(GeoProviderConfig {
                base_url: "https://api.getgeoapi.com/v2/currency".to_string(),
                api_key: None,
            }),
            currencyapi: Some(CurrencyApiProviderConfig {
                base_url: "https://api.currencyapi.com/v3".to_string(),
                api_key: None,
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Overrides the location of the supported-currencies cache file.
    #[serde(default)]
    pub cache_file: Option<PathBuf>,
}

impl AppConfig {
    /// Loads the config from the standard location, falling back to
    /// defaults when no file has been written yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "cviewer", "cviewer")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Path of the `CODE=NAME` cache file, honoring the config override.
    pub fn cache_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.cache_file {
            return Ok(path.clone());
        }
        let proj_dirs = ProjectDirs::from("dev", "cviewer", "cviewer")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().join("currencies.txt"))
    }

    pub fn geo_base_url(&self) -> &str {
        self.providers
            .geo
            .as_ref()
            .map_or("https://api.getgeoapi.com/v2/currency", |p| &p.base_url)
    }

    pub fn currencyapi_base_url(&self) -> &str {
        self.providers
            .currencyapi
            .as_ref()
            .map_or("https://api.currencyapi.com/v3", |p| &p.base_url)
    }

    /// API key for the geo conversion API. The environment wins over the
    /// config file.
    pub fn geo_api_key(&self) -> Result<String> {
        env::var(GEO_API_KEY_VAR)
            .ok()
            .or_else(|| self.providers.geo.as_ref().and_then(|p| p.api_key.clone()))
            .with_context(|| {
                format!("No API key for the conversion API: set {GEO_API_KEY_VAR} or add providers.geo.api_key to the config")
            })
    }

    /// API key for the latest-rates API. The environment wins over the
    /// config file.
    pub fn currency_api_key(&self) -> Result<String> {
        env::var(CURRENCY_API_KEY_VAR)
            .ok()
            .or_else(|| {
                self.providers
                    .currencyapi
                    .as_ref()
                    .and_then(|p| p.api_key.clone())
            })
            .with_context(|| {
                format!("No API key for the rates API: set {CURRENCY_API_KEY_VAR} or add providers.currencyapi.api_key to the config")
            })
    }
}
