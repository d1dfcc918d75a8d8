use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::filename::{parse_image_path, FilenameMetadata};
use super::manifest::read_manifest;
use super::record::{Dataset, Record};
use super::relabel::RelabelMap;
use super::validation::ValidationBounds;
use crate::core::error::{DatasetError, DatasetResult, Field};

/// Convert a checked value into the unsigned record space.
///
/// Bounds that admit negative values can still be built by hand, so a
/// value that doesn't fit is reported instead of wrapping.
fn to_record_value(path: &Path, field: Field, value: i64) -> DatasetResult<u32> {
    u32::try_from(value).map_err(|_| DatasetError::ValidationFailed {
        path: path.to_path_buf(),
        field,
        value,
        expected_range: 0..=u32::MAX as i64,
    })
}

/// Turn parsed manifest entries into records.
///
/// Junk entries are dropped first. With `relabel`, identities are replaced
/// by dense labels assigned in ascending identity order. Bounds are checked
/// on every kept entry before it becomes a record, and the cameras are
/// shifted to start at zero.
///
/// # Arguments
/// * `entries` - Manifest paths with their parsed metadata, in manifest order
/// * `relabel` - Replace identities with dense labels (training split)
/// * `bounds` - Inclusive identity and camera bounds
///
/// # Returns
/// * Records in manifest order, junk excluded
/// * `Err(DatasetError::ValidationFailed)` for the first out-of-range entry
pub fn assemble(
    entries: Vec<(PathBuf, FilenameMetadata)>,
    relabel: bool,
    bounds: &ValidationBounds,
) -> DatasetResult<Dataset> {
    // Junk never reaches validation or the label space
    let total = entries.len();
    let kept: Vec<(PathBuf, FilenameMetadata)> =
        entries.into_iter().filter(|(_, meta)| !meta.is_junk()).collect();
    if kept.len() < total {
        debug!("Ignored {} junk images", total - kept.len());
    }

    let mut relabel_map = if relabel {
        let map = RelabelMap::from_identities(kept.iter().map(|(_, meta)| meta.identity));
        info!("Relabeled {} distinct identities", map.len());
        Some(map)
    } else {
        None
    };

    let mut dataset = Dataset::with_capacity(kept.len());
    for (path, meta) in kept {
        bounds.check(&path, &meta)?;

        // Every kept identity is already in the map
        let identity = match relabel_map.as_mut() {
            Some(map) => map.insert(meta.identity),
            None => to_record_value(&path, Field::Identity, meta.identity)?,
        };

        // Camera index starts from 0
        let camera = to_record_value(&path, Field::Camera, meta.camera.saturating_sub(1))?;

        dataset.push(Record::new(path, identity, camera));
    }

    Ok(dataset)
}

/// Read, parse, filter, validate and, for training, relabel one split.
///
/// Every manifest entry is parsed before any is validated, so a filename
/// without metadata is reported even if an earlier entry is out of range.
///
/// # Arguments
/// * `dataset_dir` - Directory holding the `name_<split>.txt` manifests
/// * `split_dir` - Split image directory the manifest entries are joined onto
/// * `relabel` - Replace identities with dense labels
/// * `bounds` - Inclusive identity and camera bounds
pub fn process_split(
    dataset_dir: &Path,
    split_dir: &Path,
    relabel: bool,
    bounds: &ValidationBounds,
) -> DatasetResult<Dataset> {
    let paths = read_manifest(dataset_dir, split_dir)?;

    // Parse everything up front; the first mismatch aborts the split
    let entries = paths
        .into_iter()
        .map(|path| parse_image_path(&path).map(|meta| (path, meta)))
        .collect::<DatasetResult<Vec<_>>>()?;

    let dataset = assemble(entries, relabel, bounds)?;
    info!("Processed {:?}: {} records", split_dir, dataset.len());
    Ok(dataset)
}
