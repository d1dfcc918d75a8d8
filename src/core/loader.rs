use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, info_span};

use crate::config::LoaderConfig;
use crate::core::analysis::{print_dataset_statistics, render_statistics, SplitStats};
use crate::core::dataset::{process_split, Dataset, DatasetSplit};
use crate::core::error::{DatasetError, DatasetResult};

/// The three loaded splits of a VeRi directory tree.
///
/// Vehicle re-identification dataset from Liu et al., "Large-scale vehicle
/// re-identification in urban surveillance videos" (ICME 2016): 776
/// vehicles (576 train, 200 test), 37778 train and 11579 gallery images.
#[derive(Debug, Clone)]
pub struct VeriDataset {
    dataset_path: PathBuf,
    train: Dataset,
    query: Dataset,
    gallery: Dataset,
    train_stats: SplitStats,
    query_stats: SplitStats,
    gallery_stats: SplitStats,
}

#[derive(Serialize)]
struct SplitSummary<'a> {
    #[serde(flatten)]
    stats: &'a SplitStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a Dataset>,
}

/// JSON summary written by [`VeriDataset::export_summary`]
#[derive(Serialize)]
struct Summary<'a> {
    generated_at: String,
    dataset_path: &'a Path,
    train: SplitSummary<'a>,
    query: SplitSummary<'a>,
    gallery: SplitSummary<'a>,
}

/// Fail on the first of the dataset/train/query/gallery directories that
/// does not exist
fn check_before_run(config: &LoaderConfig) -> DatasetResult<()> {
    let required = std::iter::once(config.dataset_path())
        .chain(DatasetSplit::ALL.iter().map(|split| config.split_path(*split)));

    for dir in required {
        if !dir.exists() {
            error!("Required directory is missing: {:?}", dir);
            return Err(DatasetError::DirectoryNotFound(dir));
        }
    }
    Ok(())
}

impl VeriDataset {
    /// Load all three splits.
    ///
    /// Directories are checked before any manifest is read. Splits are then
    /// processed in train, query, gallery order; only train is relabeled.
    /// Any error aborts the whole load.
    ///
    /// # Arguments
    /// * `config` - Root, layout, bounds and verbosity
    ///
    /// # Returns
    /// * `Ok(VeriDataset)` with all three splits and their statistics
    /// * `Err(DatasetError)` for the first missing directory, missing
    ///   manifest, unparsable filename or out-of-range record
    pub fn load(config: &LoaderConfig) -> DatasetResult<Self> {
        config.validate()?;
        let _span = info_span!("load").entered();
        info!("Loading VeRi dataset from: {:?}", config.dataset_path());

        // Check if all directories are available before going deeper
        check_before_run(config)?;

        let dataset_path = config.dataset_path();
        let load_split = |split: DatasetSplit| {
            let _span = info_span!("split", name = split.as_str()).entered();
            let split_dir = config.split_path(split);
            info!("Processing {} split: {:?}", split.as_str(), split_dir);
            process_split(&dataset_path, &split_dir, split.relabels(), &config.bounds)
        };

        // Only the training split is relabeled
        let train = load_split(DatasetSplit::Train)?;
        let query = load_split(DatasetSplit::Query)?;
        let gallery = load_split(DatasetSplit::Gallery)?;
        let dataset = Self::from_splits(dataset_path.clone(), train, query, gallery);

        if config.verbose {
            println!("=> VeRi loaded");
            print_dataset_statistics(
                &dataset.train_stats,
                &dataset.query_stats,
                &dataset.gallery_stats,
            );
        }
        info!(
            "VeRi loaded: {} train, {} query, {} gallery images",
            dataset.train_stats.num_images,
            dataset.query_stats.num_images,
            dataset.gallery_stats.num_images
        );

        Ok(dataset)
    }

    /// Load with default layout from `root`
    pub fn from_root(root: impl Into<PathBuf>, verbose: bool) -> DatasetResult<Self> {
        Self::load(&LoaderConfig::new(root, verbose))
    }

    fn from_splits(dataset_path: PathBuf, train: Dataset, query: Dataset, gallery: Dataset) -> Self {
        Self {
            dataset_path,
            train_stats: SplitStats::from_records(&train),
            query_stats: SplitStats::from_records(&query),
            gallery_stats: SplitStats::from_records(&gallery),
            train,
            query,
            gallery,
        }
    }

    /// `<root>/VeRi` the splits were loaded from
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn train(&self) -> &Dataset {
        &self.train
    }

    pub fn query(&self) -> &Dataset {
        &self.query
    }

    pub fn gallery(&self) -> &Dataset {
        &self.gallery
    }

    pub fn split(&self, split: DatasetSplit) -> &Dataset {
        match split {
            DatasetSplit::Train => &self.train,
            DatasetSplit::Query => &self.query,
            DatasetSplit::Gallery => &self.gallery,
        }
    }

    pub fn stats(&self, split: DatasetSplit) -> &SplitStats {
        match split {
            DatasetSplit::Train => &self.train_stats,
            DatasetSplit::Query => &self.query_stats,
            DatasetSplit::Gallery => &self.gallery_stats,
        }
    }

    /// Number of training classes, i.e. the size of the dense label space
    pub fn num_train_pids(&self) -> usize {
        self.train_stats.num_identities
    }

    pub fn statistics_table(&self) -> String {
        render_statistics(&self.train_stats, &self.query_stats, &self.gallery_stats)
    }

    /// Write the split statistics as JSON, optionally with every record
    pub fn export_summary(&self, path: &Path, with_records: bool) -> DatasetResult<()> {
        let split_summary = |split: DatasetSplit| SplitSummary {
            stats: self.stats(split),
            records: with_records.then(|| self.split(split)),
        };
        let summary = Summary {
            generated_at: chrono::Local::now().to_rfc3339(),
            dataset_path: &self.dataset_path,
            train: split_summary(DatasetSplit::Train),
            query: split_summary(DatasetSplit::Query),
            gallery: split_summary(DatasetSplit::Gallery),
        };

        // Serialize and write in one go
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json)
            .map_err(|e| DatasetError::Export(format!("failed to write {:?}: {}", path, e)))?;
        info!("Summary exported to: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dataset_dir_reported_first() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoaderConfig::new(temp_dir.path(), false);

        match VeriDataset::load(&config).unwrap_err() {
            DatasetError::DirectoryNotFound(path) => assert_eq!(path, temp_dir.path().join("VeRi")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_io() {
        let mut config = LoaderConfig::new("/nonexistent", false);
        config.bounds.camera_min = 0;
        assert!(matches!(VeriDataset::load(&config), Err(DatasetError::Config(_))));
    }
}
