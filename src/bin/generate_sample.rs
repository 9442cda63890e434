use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zip::write::SimpleFileOptions;

const CSV_NAME: &str = "sample_diseases_and_symptoms.csv";
const ZIP_NAME: &str = "sample_diseases_and_symptoms.zip";

const SYMPTOMS: [&str; 12] = [
    "fever",
    "fatigue",
    "joint pain",
    "muscle weakness",
    "skin rash",
    "shortness of breath",
    "headache",
    "blurred vision",
    "abdominal pain",
    "weight loss",
    "tremor",
    "hearing loss",
];

/// Disease name, records to emit, and (symptom index, probability) pairs.
type Profile = (&'static str, usize, &'static [(usize, f64)]);

const PROFILES: [Profile; 6] = [
    ("Fabry disease", 120, &[(2, 0.8), (4, 0.6), (1, 0.5), (11, 0.3)]),
    ("Pompe disease", 90, &[(3, 0.9), (5, 0.7), (1, 0.6)]),
    ("Wilson disease", 110, &[(10, 0.7), (8, 0.6), (1, 0.4), (6, 0.3)]),
    ("Gaucher disease", 80, &[(8, 0.8), (9, 0.6), (2, 0.5)]),
    ("Marfan syndrome", 70, &[(7, 0.7), (2, 0.5), (5, 0.4)]),
    ("Behcet disease", 60, &[(4, 0.8), (0, 0.6), (7, 0.5)]),
];

/// Chance of a symptom outside the disease profile.
const NOISE: f64 = 0.05;

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    let mut writer = csv::Writer::from_path(CSV_NAME).context("creating sample CSV")?;
    let mut header = vec!["diseases"];
    header.extend(SYMPTOMS);
    writer.write_record(&header)?;

    let mut rows = 0usize;
    for (disease, count, profile) in PROFILES {
        for _ in 0..count {
            let mut record = vec![disease.to_string()];
            for idx in 0..SYMPTOMS.len() {
                let p = profile
                    .iter()
                    .find(|(i, _)| *i == idx)
                    .map(|(_, p)| *p)
                    .unwrap_or(NOISE);
                record.push(if rng.gen_bool(p) { "1" } else { "0" }.to_string());
            }
            writer.write_record(&record)?;
            rows += 1;
        }
    }
    writer.flush()?;

    let body = std::fs::read(CSV_NAME).context("re-reading sample CSV")?;
    let mut zip = zip::ZipWriter::new(File::create(ZIP_NAME).context("creating sample zip")?);
    zip.start_file(CSV_NAME, SimpleFileOptions::default())?;
    zip.write_all(&body)?;
    zip.finish()?;

    println!(
        "Wrote {rows} records ({} symptoms) to {CSV_NAME} and {ZIP_NAME}",
        SYMPTOMS.len()
    );
    Ok(())
}
