pub mod analysis;
pub mod dataset;
pub mod error;
pub mod loader;

pub use analysis::*;
pub use dataset::*;
pub use error::{DatasetError, DatasetResult, Field};
pub use loader::VeriDataset;
