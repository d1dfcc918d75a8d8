use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::dataset::{DatasetSplit, ValidationBounds};
use crate::core::error::{DatasetError, DatasetResult};

/// Loader configuration.
///
/// Defaults describe the stock VeRi layout under `datasets/`. Any field
/// missing from a config file keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory containing the dataset folder
    pub root: PathBuf,

    /// Print the statistics table after loading
    pub verbose: bool,

    pub dataset_dir: String,
    pub train_dir: String,
    pub query_dir: String,
    pub gallery_dir: String,

    pub bounds: ValidationBounds,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("datasets"),
            verbose: true,
            dataset_dir: "VeRi".to_string(),
            train_dir: "image_train".to_string(),
            query_dir: "image_query".to_string(),
            gallery_dir: "image_test".to_string(),
            bounds: ValidationBounds::default(),
        }
    }
}

impl LoaderConfig {
    pub fn new(root: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            root: root.into(),
            verbose,
            ..Self::default()
        }
    }

    /// `<root>/<dataset_dir>`, where the manifests live
    pub fn dataset_path(&self) -> PathBuf {
        self.root.join(&self.dataset_dir)
    }

    pub fn split_path(&self, split: DatasetSplit) -> PathBuf {
        let dir = match split {
            DatasetSplit::Train => &self.train_dir,
            DatasetSplit::Query => &self.query_dir,
            DatasetSplit::Gallery => &self.gallery_dir,
        };
        self.dataset_path().join(dir)
    }

    /// Per-user config file location, e.g. `~/.config/veri-loader/loader.json`
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "veri-loader").map(|dirs| dirs.config_dir().join("loader.json"))
    }

    /// Load a JSON config file. Unlike missing fields, an unreadable or
    /// malformed file is an error.
    pub fn from_file(path: &Path) -> DatasetResult<Self> {
        info!("Loading loader config from: {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(|e| DatasetError::Config(format!("failed to read {:?}: {}", path, e)))?;
        let config: LoaderConfig = serde_json::from_str(&contents)
            .map_err(|e| DatasetError::Config(format!("failed to parse {:?}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DatasetResult<()> {
        for (name, dir) in [
            ("dataset_dir", &self.dataset_dir),
            ("train_dir", &self.train_dir),
            ("query_dir", &self.query_dir),
            ("gallery_dir", &self.gallery_dir),
        ] {
            if dir.is_empty() {
                return Err(DatasetError::Config(format!("{} must not be empty", name)));
            }
        }
        self.bounds.validate().map_err(DatasetError::Config)
    }
}
