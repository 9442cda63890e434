use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::DataSource;
use crate::error::LoadError;

/// Downloads of the full dataset can take a while on slow links.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

const USER_AGENT_VALUE: &str = concat!("rare-disease-assistant/", env!("CARGO_PKG_VERSION"));

// The usercontent host skips the "can't scan for viruses" page Drive serves
// for large files.
const DRIVE_DOWNLOAD: &str = "https://drive.usercontent.google.com/download";

// ---------------------------------------------------------------------------
// Locator helpers
// ---------------------------------------------------------------------------

impl DataSource {
    /// Human-readable locator used in logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            DataSource::Drive { file_id } => format!("Google Drive file {file_id}"),
            DataSource::Url { url } => url.clone(),
            DataSource::Archive { path, member } => match member {
                Some(m) => format!("{m} in archive {}", path.display()),
                None => format!("archive {}", path.display()),
            },
        }
    }

    /// Download URL for remote sources, `None` for archives.
    pub fn download_url(&self) -> Option<String> {
        match self {
            DataSource::Drive { file_id } => Some(format!(
                "{DRIVE_DOWNLOAD}?id={file_id}&export=download&confirm=t"
            )),
            DataSource::Url { url } => Some(url.clone()),
            DataSource::Archive { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Materialise the raw CSV of `source` at `dest`.
///
/// Data is written to `<dest>.part` first and renamed on success, so an
/// interrupted fetch never leaves a truncated cache file behind.
pub fn fetch(source: &DataSource, dest: &Path) -> Result<(), LoadError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| LoadError::io(parent, e))?;
    }
    let partial = dest.with_extension("csv.part");

    let result = match source {
        DataSource::Archive { path, member } => {
            extract_member(path, member.as_deref(), &partial, source)
        }
        _ => match source.download_url() {
            Some(url) => download(&url, &partial, source),
            None => Err(LoadError::fetch(source.describe(), "no download URL")),
        },
    };

    if let Err(e) = result {
        let _ = fs::remove_file(&partial);
        return Err(e);
    }

    fs::rename(&partial, dest).map_err(|e| LoadError::io(dest, e))
}

fn download(url: &str, dest: &Path, source: &DataSource) -> Result<(), LoadError> {
    let locator = source.describe();
    log::info!("Downloading dataset from {locator}");

    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT_VALUE)
        .build()
        .map_err(|e| LoadError::fetch(&locator, e))?;

    let mut response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| LoadError::fetch(&locator, e))?;

    // Drive answers with an HTML page when the file is private or missing.
    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"));
    if is_html {
        return Err(LoadError::fetch(
            &locator,
            "received an HTML page instead of CSV data",
        ));
    }

    let file = File::create(dest).map_err(|e| LoadError::io(dest, e))?;
    let mut writer = BufWriter::new(file);
    let bytes = response
        .copy_to(&mut writer)
        .map_err(|e| LoadError::fetch(&locator, e))?;
    writer.flush().map_err(|e| LoadError::io(dest, e))?;

    log::info!("Downloaded {bytes} bytes to {}", dest.display());
    Ok(())
}

fn extract_member(
    archive_path: &Path,
    member: Option<&str>,
    dest: &Path,
    source: &DataSource,
) -> Result<(), LoadError> {
    let locator = source.describe();
    log::info!("Extracting dataset from {locator}");

    let file = File::open(archive_path).map_err(|e| LoadError::fetch(&locator, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| LoadError::fetch(&locator, e))?;

    let name = match member {
        Some(m) => m.to_string(),
        None => archive
            .file_names()
            .find(|n| n.to_ascii_lowercase().ends_with(".csv"))
            .map(str::to_string)
            .ok_or_else(|| LoadError::fetch(&locator, "archive has no CSV member"))?,
    };

    let mut entry = archive
        .by_name(&name)
        .map_err(|e| LoadError::fetch(&locator, format!("{name}: {e}")))?;

    let out = File::create(dest).map_err(|e| LoadError::io(dest, e))?;
    let mut writer = BufWriter::new(out);
    let bytes =
        io::copy(&mut entry, &mut writer).map_err(|e| LoadError::fetch(&locator, e))?;
    writer.flush().map_err(|e| LoadError::io(dest, e))?;

    log::info!("Extracted {name} ({bytes} bytes) to {}", dest.display());
    Ok(())
}
