use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::DriamsError;
use crate::store::PathStore;

pub const CONFIG_FILE: &str = "driams.json";
pub const ROOT_ENV: &str = "DRIAMS_ROOT";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub root: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub root: Utf8PathBuf,
}

impl ResolvedConfig {
    pub fn store(&self) -> PathStore {
        PathStore::new(self.root.clone())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(
        path: Option<&str>,
        env_root: Option<String>,
    ) -> Result<ResolvedConfig, DriamsError> {
        let config_path = match path {
            Some(path) => Utf8PathBuf::from(path),
            None => Utf8PathBuf::from(CONFIG_FILE),
        };

        if path.is_some() || config_path.as_std_path().exists() {
            let config = Self::read(&config_path)?;
            return Self::resolve_config(config, env_root);
        }

        Self::resolve_config(
            Config {
                schema_version: None,
                root: None,
            },
            env_root,
        )
    }

    pub fn read(path: &Utf8Path) -> Result<Config, DriamsError> {
        let content = fs::read_to_string(path.as_std_path())
            .map_err(|_| DriamsError::ConfigRead(path.to_path_buf()))?;
        serde_json::from_str(&content).map_err(|err| DriamsError::ConfigParse(err.to_string()))
    }

    pub fn resolve_config(
        config: Config,
        env_root: Option<String>,
    ) -> Result<ResolvedConfig, DriamsError> {
        let schema_version = config.schema_version.unwrap_or(1);
        let root = config
            .root
            .or(env_root)
            .map(|root| root.trim().to_string())
            .filter(|root| !root.is_empty())
            .ok_or(DriamsError::MissingConfig)?;

        Ok(ResolvedConfig {
            schema_version,
            root: Utf8PathBuf::from(root),
        })
    }
}
