use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

use super::filename::FilenameMetadata;
use crate::core::error::{DatasetError, DatasetResult, Field};

/// Inclusive bounds for raw parsed metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationBounds {
    /// 0 is the background identity
    pub identity_min: i64,
    pub identity_max: i64,
    pub camera_min: i64,
    pub camera_max: i64,
}

impl Default for ValidationBounds {
    fn default() -> Self {
        Self {
            identity_min: 0,
            identity_max: 1501,
            camera_min: 1,
            camera_max: 20,
        }
    }
}

impl ValidationBounds {
    pub fn identity_range(&self) -> RangeInclusive<i64> {
        self.identity_min..=self.identity_max
    }

    pub fn camera_range(&self) -> RangeInclusive<i64> {
        self.camera_min..=self.camera_max
    }

    /// Check a non-junk record against the bounds.
    ///
    /// # Returns
    /// * `Ok(())` if identity and camera are in range
    /// * `Err(DatasetError::ValidationFailed)` naming the first bad field
    pub fn check(&self, path: &Path, meta: &FilenameMetadata) -> DatasetResult<()> {
        check_field(path, Field::Identity, meta.identity, self.identity_range())?;
        check_field(path, Field::Camera, meta.camera, self.camera_range())
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.identity_min < 0 {
            return Err(format!(
                "identity_min {} would admit the junk identity",
                self.identity_min
            ));
        }
        if self.identity_min > self.identity_max {
            return Err(format!(
                "empty identity range {}..={}",
                self.identity_min, self.identity_max
            ));
        }
        if self.camera_min < 1 || self.camera_min > self.camera_max {
            return Err(format!(
                "camera range {}..={} must be non-empty and start at 1 or above",
                self.camera_min, self.camera_max
            ));
        }
        if self.identity_max > u32::MAX as i64 || self.camera_max > u32::MAX as i64 {
            return Err("bounds exceed the u32 label space".to_string());
        }
        Ok(())
    }
}

fn check_field(
    path: &Path,
    field: Field,
    value: i64,
    expected_range: RangeInclusive<i64>,
) -> DatasetResult<()> {
    if expected_range.contains(&value) {
        Ok(())
    } else {
        Err(DatasetError::ValidationFailed {
            path: path.to_path_buf(),
            field,
            value,
            expected_range,
        })
    }
}
