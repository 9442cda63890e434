//! Rare disease diagnosis assistant.
//!
//! Loads a disease × symptom table once per session and ranks the disease
//! labels that co-occur most often with a chosen set of symptoms.

pub mod cache;
pub mod config;
pub mod data;
pub mod diagnosis;
pub mod error;
pub mod logging;

pub use cache::{DatasetCache, DatasetProvider};
pub use config::{load_settings, DataSource, Settings};
pub use data::loader::Loader;
pub use data::model::Dataset;
pub use data::ranker::{rank, FeatureSelection, MatchEntry, MatchResult, MAX_RESULTS};
pub use diagnosis::diagnose;
pub use error::{LoadError, QueryError};
