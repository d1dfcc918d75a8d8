use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use veri_loader::core::Field;
use veri_loader::{DatasetError, DatasetSplit, LoaderConfig, VeriDataset};

const TRAIN: &[&str] = &[
    "0001_c003_00016335.jpg",
    "0002_c001_00016336.jpg",
    "-1_c005_00016337.jpg",
    "0305_c012_00016338.jpg",
    "0001_c004_00016339.jpg",
    "0776_c020_00016340.jpg",
];
const QUERY: &[&str] = &["0002_c002_00030600.jpg", "0010_c019_00030601.jpg"];
const GALLERY: &[&str] = &[
    "0002_c003_00030602.jpg",
    "0010_c001_00030603.jpg",
    "-1_c007_00030604.jpg",
    "0002_c003_00030602.jpg",
];

/// Create `<root>/VeRi` with the three split directories and manifests
fn create_veri_tree(train: &[&str], query: &[&str], gallery: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let veri = temp_dir.path().join("VeRi");
    for (dir, manifest, names) in [
        ("image_train", "name_train.txt", train),
        ("image_query", "name_query.txt", query),
        ("image_test", "name_test.txt", gallery),
    ] {
        fs::create_dir_all(veri.join(dir)).unwrap();
        let mut content = names.join("\n");
        content.push('\n');
        fs::write(veri.join(manifest), content).unwrap();
    }
    temp_dir
}

fn load(root: &Path) -> Result<VeriDataset, DatasetError> {
    VeriDataset::load(&LoaderConfig::new(root, false))
}

#[test]
fn test_train_identities_are_dense_and_bijective() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let dataset = load(temp_dir.path()).unwrap();

    // Raw identities 1, 2, 305, 776 map to 0..4 in ascending order
    let train_ids: Vec<u32> = dataset.train().iter().map(|r| r.identity()).collect();
    assert_eq!(train_ids, vec![0, 1, 2, 0, 3]);
    let labels: HashSet<u32> = dataset.train().iter().map(|r| r.identity()).collect();
    assert_eq!(labels, (0..4).collect::<HashSet<_>>());
    assert_eq!(dataset.num_train_pids(), 4);

    // Same raw identity, same label; distinct identities, distinct labels
    let mut by_label: HashMap<u32, HashSet<String>> = HashMap::new();
    for record in dataset.train() {
        let name = record.image_path().file_name().unwrap().to_string_lossy().into_owned();
        by_label.entry(record.identity()).or_default().insert(name[..4].to_string());
    }
    assert!(by_label.values().all(|raw| raw.len() == 1));
    assert_eq!(dataset.train()[0].identity(), dataset.train()[3].identity());
}

#[test]
fn test_record_counts_exclude_junk() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let dataset = load(temp_dir.path()).unwrap();

    assert_eq!(dataset.train().len(), TRAIN.len() - 1);
    assert_eq!(dataset.query().len(), QUERY.len());
    // Duplicate manifest lines are kept
    assert_eq!(dataset.gallery().len(), GALLERY.len() - 1);
    assert_eq!(dataset.gallery()[0], dataset.gallery()[2]);

    for split in DatasetSplit::ALL {
        assert!(dataset
            .split(split)
            .iter()
            .all(|r| !r.image_path().to_string_lossy().contains("-1_c")));
    }
}

#[test]
fn test_query_and_gallery_keep_raw_identities() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let dataset = load(temp_dir.path()).unwrap();

    let query_ids: Vec<u32> = dataset.query().iter().map(|r| r.identity()).collect();
    assert_eq!(query_ids, vec![2, 10]);
    let gallery_ids: Vec<u32> = dataset.gallery().iter().map(|r| r.identity()).collect();
    assert_eq!(gallery_ids, vec![2, 10, 2]);
}

#[test]
fn test_cameras_are_zero_based() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let dataset = load(temp_dir.path()).unwrap();

    let train_cams: Vec<u32> = dataset.train().iter().map(|r| r.camera()).collect();
    assert_eq!(train_cams, vec![2, 0, 11, 3, 19]);
    let query_cams: Vec<u32> = dataset.query().iter().map(|r| r.camera()).collect();
    assert_eq!(query_cams, vec![1, 18]);
}

#[test]
fn test_paths_joined_onto_split_dir_in_manifest_order() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let dataset = load(temp_dir.path()).unwrap();

    let query_dir = temp_dir.path().join("VeRi").join("image_query");
    let paths: Vec<PathBuf> = dataset.query().iter().map(|r| r.image_path().to_path_buf()).collect();
    assert_eq!(
        paths,
        QUERY.iter().map(|name| query_dir.join(name)).collect::<Vec<_>>()
    );
}

#[test]
fn test_statistics_per_split() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let dataset = load(temp_dir.path()).unwrap();

    let train = dataset.stats(DatasetSplit::Train);
    // Junk excluded from every count
    assert_eq!((train.num_identities, train.num_images, train.num_cameras), (4, 5, 5));
    let gallery = dataset.stats(DatasetSplit::Gallery);
    assert_eq!((gallery.num_identities, gallery.num_images, gallery.num_cameras), (2, 3, 2));

    let table = dataset.statistics_table();
    assert!(table.contains("  train    |     4 |        5 |         5"));
}

#[test]
fn test_identity_out_of_bounds_aborts_load() {
    let temp_dir = create_veri_tree(&["0001_c001_00.jpg", "1502_c001_00.jpg"], QUERY, GALLERY);

    match load(temp_dir.path()).unwrap_err() {
        DatasetError::ValidationFailed {
            field,
            value,
            expected_range,
            path,
        } => {
            assert_eq!(field, Field::Identity);
            assert_eq!(value, 1502);
            assert_eq!(expected_range, 0..=1501);
            assert!(path.ends_with("1502_c001_00.jpg"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_identity_beyond_i64_fails_validation() {
    let temp_dir = create_veri_tree(&["99999999999999999999_c001_00.jpg"], QUERY, GALLERY);

    match load(temp_dir.path()).unwrap_err() {
        DatasetError::ValidationFailed { field, value, .. } => {
            assert_eq!(field, Field::Identity);
            assert_eq!(value, i64::MAX);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_camera_out_of_bounds_aborts_load() {
    let temp_dir = create_veri_tree(TRAIN, &["0002_c021_00.jpg"], GALLERY);
    let err = load(temp_dir.path()).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::ValidationFailed { field: Field::Camera, value: 21, .. }
    ));
}

#[test]
fn test_missing_query_dir_aborts_before_manifests() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let veri = temp_dir.path().join("VeRi");
    fs::remove_dir_all(veri.join("image_query")).unwrap();
    // A broken train manifest would fail first if manifests were read
    fs::remove_file(veri.join("name_train.txt")).unwrap();

    match load(temp_dir.path()).unwrap_err() {
        DatasetError::DirectoryNotFound(path) => assert_eq!(path, veri.join("image_query")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_manifest_aborts_load() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let veri = temp_dir.path().join("VeRi");
    fs::remove_file(veri.join("name_test.txt")).unwrap();

    match load(temp_dir.path()).unwrap_err() {
        DatasetError::ManifestNotFound(path) => assert_eq!(path, veri.join("name_test.txt")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pattern_mismatch_aborts_load() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, &["0002_c003_00.jpg", "vehicle.jpg"]);
    let err = load(temp_dir.path()).unwrap_err();
    match err {
        DatasetError::PatternMismatch { path, .. } => assert!(path.ends_with("vehicle.jpg")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pattern_mismatch_reported_before_bounds() {
    // Entry 1 is out of range, entry 2 has no metadata at all
    let temp_dir = create_veri_tree(&["1502_c001_00.jpg", "vehicle.jpg"], QUERY, GALLERY);
    let err = load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, DatasetError::PatternMismatch { .. }));
}

#[test]
fn test_relabeling_is_reproducible() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let first = load(temp_dir.path()).unwrap();
    let second = load(temp_dir.path()).unwrap();
    assert_eq!(first.train(), second.train());
}

#[test]
fn test_custom_layout_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path().join("vehicles");
    for dir in ["img_train", "img_query", "img_gallery"] {
        fs::create_dir_all(base.join(dir)).unwrap();
    }
    fs::write(base.join("name_train.txt"), "0001_c001.jpg\n").unwrap();
    fs::write(base.join("name_query.txt"), "0001_c002.jpg\n").unwrap();
    fs::write(base.join("name_gallery.txt"), "0001_c003.jpg\n").unwrap();

    let config = LoaderConfig {
        root: temp_dir.path().to_path_buf(),
        verbose: false,
        dataset_dir: "vehicles".to_string(),
        train_dir: "img_train".to_string(),
        query_dir: "img_query".to_string(),
        gallery_dir: "img_gallery".to_string(),
        ..LoaderConfig::default()
    };
    let dataset = VeriDataset::load(&config).unwrap();
    assert_eq!(dataset.gallery()[0].camera(), 2);
}

#[test]
fn test_export_summary_json() {
    let temp_dir = create_veri_tree(TRAIN, QUERY, GALLERY);
    let dataset = load(temp_dir.path()).unwrap();
    let out = temp_dir.path().join("summary.json");

    dataset.export_summary(&out, true).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["train"]["num_images"], 5);
    assert_eq!(json["query"]["num_identities"], 2);
    assert_eq!(json["gallery"]["records"].as_array().unwrap().len(), 3);
    assert_eq!(json["query"]["records"][1]["identity"], 10);

    dataset.export_summary(&out, false).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert!(json["train"].get("records").is_none());
}
