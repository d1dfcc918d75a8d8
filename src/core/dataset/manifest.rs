use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::error::{DatasetError, DatasetResult};

/// Get the manifest file name for a split directory.
///
/// The suffix is the last `_`-separated token of the directory's final
/// segment, so `image_train` maps to `name_train.txt` and `image_test`
/// to `name_test.txt`.
pub fn manifest_name_for(split_dir: &Path) -> String {
    let segment = split_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = segment.rsplit('_').next().unwrap_or(&segment);
    format!("name_{}.txt", suffix)
}

/// Read the manifest for `split_dir` from `dataset_dir` and join every
/// entry onto `split_dir`.
///
/// # Arguments
/// * `dataset_dir` - Directory holding the manifest files
/// * `split_dir` - Split image directory, also names the manifest
///
/// # Returns
/// * One path per manifest line, in file order, duplicates kept
/// * `Err(DatasetError::ManifestNotFound)` if the manifest does not exist
/// * `Err(DatasetError::ManifestUnreadable)` on any other read failure
pub fn read_manifest(dataset_dir: &Path, split_dir: &Path) -> DatasetResult<Vec<PathBuf>> {
    let manifest_path = dataset_dir.join(manifest_name_for(split_dir));
    debug!("Reading manifest: {:?}", manifest_path);

    let content = fs::read_to_string(&manifest_path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            DatasetError::ManifestNotFound(manifest_path.clone())
        } else {
            DatasetError::ManifestUnreadable {
                path: manifest_path.clone(),
                source: e,
            }
        }
    })?;

    // One entry per line, trailing whitespace stripped
    let paths: Vec<PathBuf> = content
        .lines()
        .map(|line| split_dir.join(line.trim_end()))
        .collect();

    info!("Found {} entries in {:?}", paths.len(), manifest_path);
    Ok(paths)
}
