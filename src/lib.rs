//! Loads the VeRi vehicle re-identification dataset into train, query and
//! gallery splits of `(image_path, identity, camera)` records.

pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::LoaderConfig;
pub use crate::core::{
    Dataset, DatasetError, DatasetResult, DatasetSplit, Record, SplitStats, VeriDataset,
};
