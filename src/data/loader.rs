use std::path::{Path, PathBuf};

use super::model::Dataset;
use super::source;
use super::table::RawTable;
use crate::config::{DataSource, SamplingSettings, Settings};
use crate::error::LoadError;

/// Raw copy of the source, as fetched.
pub const RAW_FILE: &str = "dataset.csv";
/// Sampled copy, only written when the source exceeds the row cap.
pub const REDUCED_FILE: &str = "dataset_reduced.csv";

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Produces the dataset snapshot from the configured source, going through
/// the on-disk cache files.
#[derive(Debug, Clone)]
pub struct Loader {
    source: DataSource,
    cache_dir: PathBuf,
    sampling: SamplingSettings,
}

impl Loader {
    pub fn new(
        source: DataSource,
        cache_dir: impl Into<PathBuf>,
        sampling: SamplingSettings,
    ) -> Self {
        Self {
            source,
            cache_dir: cache_dir.into(),
            sampling,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.source.clone(),
            settings.cache.dir.clone(),
            settings.sampling.clone(),
        )
    }

    pub fn raw_path(&self) -> PathBuf {
        self.cache_dir.join(RAW_FILE)
    }

    pub fn reduced_path(&self) -> PathBuf {
        self.cache_dir.join(REDUCED_FILE)
    }

    /// Fetch (if needed), parse, sample (if needed) and type the dataset.
    pub fn load(&self) -> Result<Dataset, LoadError> {
        log::info!("Loading dataset from {}", self.source.describe());
        let result = self.load_table().and_then(Dataset::from_table);
        match &result {
            Ok(ds) => log::info!(
                "Dataset ready: {} rows, label column '{}', {} symptom columns",
                ds.len(),
                ds.label_column(),
                ds.features().len()
            ),
            Err(e) => log::error!("Dataset load failed: {e}"),
        }
        result
    }

    fn load_table(&self) -> Result<RawTable, LoadError> {
        let reduced = self.reduced_path();
        if reduced.is_file() {
            log::info!("Using reduced sample {}", reduced.display());
            return self.read(&reduced);
        }

        let raw = self.raw_path();
        if raw.is_file() {
            log::info!("Using cached copy {}", raw.display());
        } else {
            source::fetch(&self.source, &raw)?;
        }

        let table = self.read(&raw)?;
        let max_rows = self.sampling.max_rows;
        if table.len() <= max_rows {
            return Ok(table);
        }

        log::info!(
            "Sampling {max_rows} of {} rows (seed {})",
            table.len(),
            self.sampling.seed
        );
        let sample = table.sample(max_rows, self.sampling.seed);
        sample.write_path(&reduced)?;
        log::info!("Wrote reduced sample to {}", reduced.display());
        Ok(sample)
    }

    fn read(&self, path: &Path) -> Result<RawTable, LoadError> {
        let table = RawTable::read_path(path, self.sampling.batch_rows)?;
        log::debug!("Parsed {} rows from {}", table.len(), path.display());
        Ok(table)
    }
}
