//! Data layer: fetching, caching, typing and ranking.
//!
//! Architecture:
//! ```text
//!  drive / url / zip archive
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  source   │  fetch → dataset.csv
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  table    │  batched CSV read, seeded sample → dataset_reduced.csv
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model    │  label column + symptom flags → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  ranker   │  any-of symptom mask → top labels
//!   └──────────┘
//! ```
//! [`loader::Loader`] drives the first three steps.

pub mod loader;
pub mod model;
pub mod ranker;
pub mod source;
pub mod table;
