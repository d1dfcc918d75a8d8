use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSplit {
    Train,
    Query,
    Gallery,
}

impl DatasetSplit {
    pub const ALL: [DatasetSplit; 3] = [DatasetSplit::Train, DatasetSplit::Query, DatasetSplit::Gallery];

    pub fn as_str(&self) -> &str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Query => "query",
            DatasetSplit::Gallery => "gallery",
        }
    }

    /// Only the training split gets dense identity labels
    pub fn relabels(&self) -> bool {
        matches!(self, DatasetSplit::Train)
    }
}

/// One labeled image: `(path, identity, camera)`.
///
/// `camera` is zero-based. `identity` is the dense label for the training
/// split and the raw parsed identity otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    image_path: PathBuf,
    identity: u32,
    camera: u32,
}

impl Record {
    pub(crate) fn new(image_path: PathBuf, identity: u32, camera: u32) -> Self {
        Self {
            image_path,
            identity,
            camera,
        }
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    pub fn identity(&self) -> u32 {
        self.identity
    }

    pub fn camera(&self) -> u32 {
        self.camera
    }
}

/// Records of one split in manifest order
pub type Dataset = Vec<Record>;
