mod assembler;
mod filename;
mod manifest;
mod record;
mod relabel;
mod validation;

pub use assembler::{assemble, process_split};
pub use filename::{parse_image_path, parse_metadata, FilenameMetadata, JUNK_IDENTITY};
pub use manifest::{manifest_name_for, read_manifest};
pub use record::{Dataset, DatasetSplit, Record};
pub use relabel::RelabelMap;
pub use validation::ValidationBounds;
