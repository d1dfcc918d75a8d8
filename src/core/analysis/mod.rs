mod stats;

pub use stats::{print_dataset_statistics, render_statistics, SplitStats};
