//! Deployment settings, read from `settings.toml`.
//!
//! Lookup order:
//! - an explicit path (`--config`), which must exist
//! - `<platform config dir>/settings.toml`, defaults when absent

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "rare-disease-assistant";
const APP_NAME: &str = "Rare Disease Assistant";
const CONFIG_FILENAME: &str = "settings.toml";

/// Google Drive file published with the augmented disease/symptom dataset.
pub const DEFAULT_DRIVE_FILE_ID: &str = "1-OkKiBHgLibBPKyef_7NAF--1w8eMUio";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: DataSource,
    pub cache: CacheSettings,
    pub sampling: SamplingSettings,
    pub logging: LoggingSettings,
}

/// Where the raw CSV comes from. Exactly one per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    /// A file shared on Google Drive, addressed by its id.
    Drive { file_id: String },
    /// Any URL serving the CSV directly.
    Url { url: String },
    /// A local zip archive holding the CSV.
    Archive {
        path: PathBuf,
        /// Member to extract; the first `.csv` member when omitted.
        #[serde(default)]
        member: Option<String>,
    },
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Drive {
            file_id: DEFAULT_DRIVE_FILE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Directory holding `dataset.csv` and `dataset_reduced.csv`.
    pub dir: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let dir = project_dirs()
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Row cap; larger sources are sampled down to exactly this many rows.
    pub max_rows: usize,
    pub seed: u64,
    /// Records per read batch.
    pub batch_rows: usize,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            max_rows: 100_000,
            seed: 42,
            batch_rows: 50_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Also append log lines here.
    pub file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Default location of the settings file, if the platform has one.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `explicit`, or from the platform config directory.
///
/// An explicit path must exist and parse. The platform file is optional;
/// defaults are used when it is missing.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        return parse_settings(&text)
            .with_context(|| format!("parsing settings {}", path.display()));
    }

    let Some(path) = settings_path() else {
        return Ok(Settings::default());
    };

    match fs::read_to_string(&path) {
        Ok(text) => {
            parse_settings(&text).with_context(|| format!("parsing settings {}", path.display()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e).with_context(|| format!("reading settings {}", path.display())),
    }
}

/// Parse a settings document. Row caps and batch sizes must be positive.
pub fn parse_settings(text: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(text)?;
    anyhow::ensure!(
        settings.sampling.max_rows > 0,
        "sampling.max_rows must be at least 1"
    );
    anyhow::ensure!(
        settings.sampling.batch_rows > 0,
        "sampling.batch_rows must be at least 1"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sampling.max_rows, 100_000);
        assert_eq!(settings.sampling.seed, 42);
        assert_eq!(
            settings.source,
            DataSource::Drive {
                file_id: DEFAULT_DRIVE_FILE_ID.into()
            }
        );
    }

    #[test]
    fn archive_source_without_member() {
        let settings = parse_settings(
            r#"
            [source]
            kind = "archive"
            path = "data/symptoms.zip"
            "#,
        )
        .unwrap();
        assert_eq!(
            settings.source,
            DataSource::Archive {
                path: PathBuf::from("data/symptoms.zip"),
                member: None,
            }
        );
    }

    #[test]
    fn url_source_and_partial_sampling() {
        let settings = parse_settings(
            r#"
            [source]
            kind = "url"
            url = "https://example.org/data.csv"

            [sampling]
            seed = 7

            [cache]
            dir = "/tmp/rda"
            "#,
        )
        .unwrap();
        assert_eq!(
            settings.source,
            DataSource::Url {
                url: "https://example.org/data.csv".into()
            }
        );
        assert_eq!(settings.sampling.seed, 7);
        assert_eq!(settings.sampling.max_rows, 100_000);
        assert_eq!(settings.cache.dir, PathBuf::from("/tmp/rda"));
    }

    #[test]
    fn unknown_source_kind_is_rejected() {
        assert!(parse_settings("[source]\nkind = \"ftp\"\n").is_err());
    }

    #[test]
    fn zero_row_cap_is_rejected() {
        let err = parse_settings("[sampling]\nmax_rows = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_rows"));
        assert!(parse_settings("[sampling]\nbatch_rows = 0\n").is_err());
        assert!(parse_settings("[sampling]\nmax_rows = 1\n").is_ok());
    }

    #[test]
    fn zero_row_cap_in_file_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[sampling]\nmax_rows = 0\n").unwrap();
        let err = load_settings(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("max_rows"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_settings(Some(&missing)).is_err());
    }

    #[test]
    fn settings_round_trip() {
        let settings = Settings {
            logging: LoggingSettings {
                file: Some(PathBuf::from("app.log")),
            },
            ..Settings::default()
        };
        let text = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(parse_settings(&text).unwrap(), settings);
    }
}
