use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use rare_disease_assistant::config::SamplingSettings;
use rare_disease_assistant::data::loader::{RAW_FILE, REDUCED_FILE};
use rare_disease_assistant::{diagnose, DataSource, DatasetCache, LoadError, Loader};
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, member: &str, body: &str) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    zip.start_file(member, SimpleFileOptions::default()).unwrap();
    zip.write_all(body.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn archive_loader(dir: &Path, body: &str, sampling: SamplingSettings) -> Loader {
    let zip_path = dir.join("source.zip");
    write_zip(&zip_path, "symptoms.csv", body);
    Loader::new(
        DataSource::Archive {
            path: zip_path,
            member: None,
        },
        dir.join("cache"),
        sampling,
    )
}

fn many_rows(n: usize) -> String {
    let mut text = String::from("Disease,fever,cough\n");
    for i in 0..n {
        text.push_str(&format!("D{},{},{}\n", i % 7, i % 2, (i + 1) % 2));
    }
    text
}

const SMALL: &str = "disease,fever,cough\nA,1,0\nB,0,1\nA,1,1\n";

#[test]
fn archive_load_caches_raw_file() {
    let dir = tempfile::tempdir().unwrap();
    let loader = archive_loader(dir.path(), SMALL, SamplingSettings::default());

    let ds = loader.load().unwrap();

    assert_eq!(ds.len(), 3);
    assert_eq!(ds.label_column(), "disease");
    assert_eq!(ds.feature_columns(), vec!["fever", "cough"]);
    assert!(dir.path().join("cache").join(RAW_FILE).is_file());
    assert!(!dir.path().join("cache").join(REDUCED_FILE).exists());
}

#[test]
fn second_load_does_not_refetch() {
    let dir = tempfile::tempdir().unwrap();
    let loader = archive_loader(dir.path(), SMALL, SamplingSettings::default());
    let first = loader.load().unwrap();

    // With the source gone, only the cache file can satisfy the load.
    fs::remove_file(dir.path().join("source.zip")).unwrap();
    let second = loader.load().unwrap();

    assert_eq!(first, second);
}

#[test]
fn oversized_source_is_sampled_and_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let sampling = SamplingSettings {
        max_rows: 25,
        seed: 42,
        batch_rows: 8,
    };
    let loader = archive_loader(dir.path(), &many_rows(100), sampling);

    let first = loader.load().unwrap();
    let reduced = dir.path().join("cache").join(REDUCED_FILE);

    assert_eq!(first.len(), 25);
    assert!(reduced.is_file());

    // Reading back the reduced file gives the same snapshot.
    fs::remove_file(dir.path().join("cache").join(RAW_FILE)).unwrap();
    assert_eq!(loader.load().unwrap(), first);
}

#[test]
fn independent_loads_sample_identically() {
    let sampling = SamplingSettings {
        max_rows: 30,
        seed: 42,
        batch_rows: 16,
    };
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();

    let first = archive_loader(a.path(), &many_rows(200), sampling.clone())
        .load()
        .unwrap();
    let second = archive_loader(b.path(), &many_rows(200), sampling)
        .load()
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        fs::read_to_string(a.path().join("cache").join(REDUCED_FILE)).unwrap(),
        fs::read_to_string(b.path().join("cache").join(REDUCED_FILE)).unwrap()
    );
}

#[test]
fn source_without_disease_column_is_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let loader = archive_loader(dir.path(), "fever,cough\n1,0\n", SamplingSettings::default());

    let err = loader.load().unwrap_err();

    assert!(matches!(err, LoadError::Schema { .. }));
}

#[test]
fn source_with_only_a_label_column_is_unusable() {
    let dir = tempfile::tempdir().unwrap();
    let loader = archive_loader(dir.path(), "disease\nA\nB\n", SamplingSettings::default());

    let err = loader.load().unwrap_err();

    assert!(matches!(err, LoadError::NoFeatureColumns { .. }));
    let mut cache = DatasetCache::new();
    assert!(cache.get_or_load(&loader).is_err());
    assert!(cache.dataset().is_none());
}

#[test]
fn missing_archive_leaves_no_cache_file() {
    let dir = tempfile::tempdir().unwrap();
    let loader = Loader::new(
        DataSource::Archive {
            path: dir.path().join("absent.zip"),
            member: None,
        },
        dir.path().join("cache"),
        SamplingSettings::default(),
    );

    let err = loader.load().unwrap_err();

    assert!(matches!(err, LoadError::SourceFetch { .. }));
    assert!(!dir.path().join("cache").join(RAW_FILE).exists());
}

#[test]
fn session_cache_serves_queries_from_one_load() {
    let dir = tempfile::tempdir().unwrap();
    let loader = archive_loader(dir.path(), SMALL, SamplingSettings::default());
    let mut cache = DatasetCache::new();

    let ds = cache.get_or_load(&loader).unwrap();
    fs::remove_dir_all(dir.path().join("cache")).unwrap();
    fs::remove_file(dir.path().join("source.zip")).unwrap();
    let again = cache.get_or_load(&loader).unwrap();

    let result = diagnose(&again, &["cough"]).unwrap();
    let pairs: Vec<(&str, usize)> = result
        .entries
        .iter()
        .map(|e| (e.label.as_str(), e.count))
        .collect();
    assert_eq!(pairs, vec![("B", 1), ("A", 1)]);
    assert_eq!(ds.len(), again.len());
}
