use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write;

use crate::core::dataset::Record;

/// Counts describing one split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SplitStats {
    pub num_identities: usize,
    pub num_images: usize,
    pub num_cameras: usize,
}

impl SplitStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[Record]) -> Self {
        // Distinct identities and cameras across the split
        let identities: HashSet<u32> = records.iter().map(|r| r.identity()).collect();
        let cameras: HashSet<u32> = records.iter().map(|r| r.camera()).collect();

        Self {
            num_identities: identities.len(),
            num_images: records.len(),
            num_cameras: cameras.len(),
        }
    }
}

const RULE: &str = "  ----------------------------------------";

/// Render the per-split statistics table
pub fn render_statistics(train: &SplitStats, query: &SplitStats, gallery: &SplitStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dataset statistics:");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  subset   | # ids | # images | # cameras");
    let _ = writeln!(out, "{}", RULE);
    for (name, stats) in [("train", train), ("query", query), ("gallery", gallery)] {
        let _ = writeln!(
            out,
            "  {:<8} | {:5} | {:8} | {:9}",
            name, stats.num_identities, stats.num_images, stats.num_cameras
        );
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

/// Print the statistics table to stdout
pub fn print_dataset_statistics(train: &SplitStats, query: &SplitStats, gallery: &SplitStats) {
    print!("{}", render_statistics(train, query, gallery));
}
