use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;

use super::Settings;
use super::overrides::strip_unset;
use super::smart_load;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub struct ForkJoinConfig {
    figment: Figment,
}

impl ForkJoinConfig {
    /// Load configuration from every layer
    ///
    /// Priority, lowest first: embedded defaults, user config, repository config,
    /// `custom_config`, `FORKJOIN_*` environment variables, `cli_overrides`.
    pub fn load<T: Serialize>(custom_config: Option<&str>, cli_overrides: Option<T>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            // User config - support multiple formats
            .merge(Toml::file(Self::user_config_path("toml")))
            .merge(Json::file(Self::user_config_path("json")))
            .merge(Yaml::file(Self::user_config_path("yaml")))
            // Repository config - support multiple formats
            .merge(Toml::file("forkjoin.toml"))
            .merge(Json::file("forkjoin.json"))
            .merge(Yaml::file("forkjoin.yaml"))
            .merge(Yaml::file("forkjoin.yml"));

        if let Some(custom_path) = custom_config {
            if !Path::new(custom_path).is_file() {
                anyhow::bail!("Config file not found: {custom_path}");
            }
            figment = figment.merge(smart_load::auto(custom_path));
        }

        // Environment variables override every file
        figment = figment.merge(Env::prefixed("FORKJOIN_").split("__"));

        if let Some(cli) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(strip_unset(cli)));
        }

        Ok(ForkJoinConfig { figment })
    }

    /// Extract and validate the typed settings
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .context("Failed to parse configuration")?;
        settings.validate().context("Configuration is invalid")?;
        Ok(settings)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self.figment.extract_inner(path)?)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    fn user_config_path(extension: &str) -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/forkjoin/config.{extension}"),
            Err(_) => format!("~/.config/forkjoin/config.{extension}"),
        }
    }
}
