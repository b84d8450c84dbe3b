use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{IngestError, Result};

/// Runtime configuration handed to pipeline construction. Built once at the
/// process edge (CLI) and passed in; the library itself never reads ambient
/// process state.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub project_id: String,
    pub bucket_name: String,
    pub local_base_path: PathBuf,
}

impl AppConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|err| {
            IngestError::Config(format!("failed to parse {}: {err}", path.display()))
        })
    }

    /// Environment fallback for orchestrator containers that inject settings
    /// as variables rather than mounting a config file. `TRIPDATA_LOCAL_BASE`
    /// defaults to a scratch directory under the system temp dir.
    pub fn from_env() -> Result<Self> {
        let project_id = std::env::var("TRIPDATA_PROJECT_ID")
            .map_err(|_| IngestError::Config("TRIPDATA_PROJECT_ID must be set".into()))?;
        let bucket_name = std::env::var("TRIPDATA_BUCKET")
            .map_err(|_| IngestError::Config("TRIPDATA_BUCKET must be set".into()))?;
        let local_base_path = std::env::var("TRIPDATA_LOCAL_BASE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("tripdata"));

        Ok(Self {
            project_id,
            bucket_name,
            local_base_path,
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_toml_file(path),
            None => Self::from_env(),
        }
    }
}
