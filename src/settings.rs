use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::SearchError;

/// Runtime settings shared by the console and web front ends
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Spoonacular API key (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the recipe API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of results to request; each endpoint has its own default
    pub number: Option<u32>,
    /// Address the web server listens on
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            number: None,
            bind: default_bind(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // e.g. RECIPE_FINDER__API_KEY, RECIPE_FINDER__NUMBER
            .add_source(
                Environment::with_prefix("RECIPE_FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// The configured key, falling back to SPOONACULAR_API_KEY
    pub fn resolve_api_key(&self) -> Result<String, SearchError> {
        let present = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(present)
            .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok().filter(present))
            .ok_or(SearchError::MissingApiKey)
    }
}
