use kubejs_gui_core::{Identifier, VANILLA_NAMESPACE};
use log::warn;
use logging::LoggingConfig;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub mod logging;

pub const DEFAULT_CONFIG_PATH: &str = "configuration.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't read configuration file at {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Couldn't parse config at {path:?}. Reason: {source}. Delete the old config to regenerate it")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Couldn't serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the recipe editor.
///
/// Everything has a default, so a partial file only overrides what it names.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfiguration {
    /// Directory exported scripts are written to.
    pub export_directory: PathBuf,
    /// Recipe id used when the player leaves the field blank.
    pub default_recipe_id: String,
    /// Namespace selected when the editor opens.
    pub default_namespace: String,
    /// Recipe types known in addition to the vanilla ones.
    pub recipe_types: Vec<String>,
    /// JSON file with extra property definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_pack: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for EditorConfiguration {
    fn default() -> Self {
        Self {
            export_directory: PathBuf::from("kubejs/server_scripts"),
            default_recipe_id: "my_recipe".to_string(),
            default_namespace: VANILLA_NAMESPACE.to_string(),
            recipe_types: vec![
                "create:mixing".to_string(),
                "create:compacting".to_string(),
                "create:crushing".to_string(),
                "create:milling".to_string(),
                "create:cutting".to_string(),
                "create:deploying".to_string(),
                "create:mechanical_crafting".to_string(),
                "create:sequenced_assembly".to_string(),
                "thermal:pulverizer".to_string(),
                "thermal:smelter".to_string(),
            ],
            property_pack: None,
            logging: LoggingConfig::default(),
        }
    }
}

pub trait LoadTomlConfiguration {
    /// Reads the configuration at `path`. A missing file is replaced by the
    /// defaults, which are also written back so they can be edited.
    fn load(path: &Path) -> Result<Self, ConfigError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config = if path.exists() {
            let file_content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            toml::from_str(&file_content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            let content = Self::default();

            if let Err(err) = fs::write(path, toml::to_string(&content)?) {
                warn!(
                    "Couldn't write default config to {:?}. Reason: {}",
                    path, err
                );
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError>;
}

impl LoadTomlConfiguration for EditorConfiguration {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.export_directory.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "export_directory must not be empty".to_string(),
            ));
        }
        if self.default_recipe_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_recipe_id must not be empty".to_string(),
            ));
        }
        for recipe_type in &self.recipe_types {
            recipe_type
                .parse::<Identifier>()
                .map_err(|err| ConfigError::Invalid(format!("recipe_types: {err}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::{ConfigError, EditorConfiguration, LoadTomlConfiguration};
    use crate::logging::LevelFilter;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.toml");
        let config = EditorConfiguration::load(&path).unwrap();
        assert_eq!(config, EditorConfiguration::default());
        assert!(path.exists());

        let reloaded = EditorConfiguration::load(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.toml");
        fs::write(
            &path,
            "default_recipe_id = \"brass\"\n\n[logging]\nlevel = \"Debug\"\n",
        )
        .unwrap();
        let config = EditorConfiguration::load(&path).unwrap();
        assert_eq!(config.default_recipe_id, "brass");
        assert_eq!(config.default_namespace, "minecraft");
        assert_eq!(config.logging.level, LevelFilter::Debug);
        assert!(config.logging.enabled);
    }

    #[test]
    fn broken_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configuration.toml");
        fs::write(&path, "default_recipe_id = ").unwrap();
        assert!(matches!(
            EditorConfiguration::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn validation() {
        let mut config = EditorConfiguration::default();
        assert!(config.validate().is_ok());

        config.recipe_types.push("not an id".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = EditorConfiguration {
            default_recipe_id: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
