use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// RawTable – untyped CSV contents
// ---------------------------------------------------------------------------

/// CSV contents before any typing: header plus string records.
///
/// This is what gets cached to disk; typing happens afterwards in
/// [`super::model::Dataset::from_table`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl RawTable {
    /// Read a CSV file in batches of `batch_rows` records.
    pub fn read_path(path: &Path, batch_rows: usize) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        Self::read_batched(file, batch_rows)
    }

    /// Read CSV from `input`, collecting `batch_rows` records at a time and
    /// concatenating the batches. Every record must have as many fields as
    /// the header.
    pub fn read_batched<R: Read>(input: R, batch_rows: usize) -> Result<Self, LoadError> {
        let batch_rows = batch_rows.max(1);
        let mut reader = csv::Reader::from_reader(input);
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| LoadError::from_csv(&e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut batches: Vec<Vec<StringRecord>> = Vec::new();
        let mut records = reader.into_records();
        loop {
            let mut batch = Vec::with_capacity(batch_rows);
            for result in records.by_ref().take(batch_rows) {
                batch.push(result.map_err(|e| LoadError::from_csv(&e))?);
            }
            if batch.is_empty() {
                break;
            }
            log::debug!("Read batch {} ({} records)", batches.len() + 1, batch.len());
            let last = batch.len() < batch_rows;
            batches.push(batch);
            if last {
                break;
            }
        }

        let rows: Vec<StringRecord> = batches.into_iter().flatten().collect();
        Ok(RawTable { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Uniform sample of `n` rows without replacement, seeded for
    /// reproducibility. Sampled rows keep their relative order.
    /// Tables with at most `n` rows are returned unchanged.
    pub fn sample(self, n: usize, seed: u64) -> Self {
        if self.rows.len() <= n {
            return self;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut picked = rand::seq::index::sample(&mut rng, self.rows.len(), n).into_vec();
        picked.sort_unstable();

        let mut keep = vec![false; self.rows.len()];
        for i in picked {
            keep[i] = true;
        }
        let rows = self
            .rows
            .into_iter()
            .zip(keep)
            .filter_map(|(row, k)| k.then_some(row))
            .collect();

        RawTable {
            headers: self.headers,
            rows,
        }
    }

    /// Write the table as CSV, replacing `path` atomically.
    pub fn write_path(&self, path: &Path) -> Result<(), LoadError> {
        let partial = path.with_extension("csv.part");
        self.write_csv(&partial).map_err(|e| {
            let _ = fs::remove_file(&partial);
            e
        })?;
        fs::rename(&partial, path).map_err(|e| LoadError::io(path, e))
    }

    fn write_csv(&self, path: &Path) -> Result<(), LoadError> {
        let to_io = |e: csv::Error| LoadError::io(path, e.into());
        let mut writer = csv::Writer::from_path(path).map_err(to_io)?;
        writer.write_record(&self.headers).map_err(to_io)?;
        for row in &self.rows {
            writer.write_record(row).map_err(to_io)?;
        }
        writer.flush().map_err(|e| LoadError::io(path, e))
    }
}
