use anyhow::Context;
use apistudio_codegen::CodegenOptions;
use apistudio_editor::CommandManager;
use apistudio_validation::ValidationOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "apistudio.config.json";

/// API Studio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Java package for generated interfaces
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Validation rule codes to skip
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Undo levels kept by `apply` (0 = unlimited)
    #[serde(default)]
    pub max_levels: usize,
}

fn default_package_name() -> String {
    CodegenOptions::default().package_name
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file {}", config_path.display()))
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Codegen options, with an explicit package overriding the configured one
    pub fn codegen_options(&self, package: Option<&str>) -> CodegenOptions {
        CodegenOptions::new(package.unwrap_or(&self.package_name))
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions::disabling(self.disabled_rules.iter().cloned())
    }

    pub fn command_manager(&self) -> CommandManager {
        CommandManager::with_max_levels(self.history.max_levels)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            disabled_rules: vec![],
            history: HistoryConfig::default(),
        }
    }
}
