//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/handgen/handgen.toml`
//! 3. Environment variables: `HANDGEN_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for handgen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Flattening tool command (default: "zacro")
    pub flatten_tool: String,
    /// Root link the flattening tool removes (default: "world")
    pub remove_root_link: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flatten_tool: "zacro".into(),
            remove_root_link: "world".into(),
        }
    }
}

/// Get the XDG config directory for handgen.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "handgen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("handgen.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("flatten_tool", defaults.flatten_tool.clone())
            .map_err(config_err)?
            .set_default("remove_root_link", defaults.remove_root_link.clone())
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("HANDGEN"));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# handgen configuration
#
# Location: ~/.config/handgen/handgen.toml
# Environment overrides: HANDGEN_FLATTEN_TOOL, HANDGEN_REMOVE_ROOT_LINK

# Flattening tool that expands xacro macros into a final URDF
# flatten_tool = "zacro"

# Root link removed by the flattening tool
# remove_root_link = "world"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
