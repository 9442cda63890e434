use std::sync::Arc;

use crate::data::loader::Loader;
use crate::data::model::Dataset;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// Anything that can produce the dataset snapshot.
pub trait DatasetProvider {
    fn provide(&self) -> Result<Dataset, LoadError>;
}

impl DatasetProvider for Loader {
    fn provide(&self) -> Result<Dataset, LoadError> {
        self.load()
    }
}

// ---------------------------------------------------------------------------
// DatasetCache – one snapshot per session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
enum CacheState {
    #[default]
    Cold,
    Ready(Arc<Dataset>),
    /// User-facing message of the failed load.
    Failed(String),
}

/// Session-scoped holder of the dataset snapshot.
///
/// The provider runs at most once per cache. A failed load is remembered
/// and not retried until the cache is dropped.
#[derive(Debug, Clone, Default)]
pub struct DatasetCache {
    state: CacheState,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a load has completed (successfully or not).
    pub fn is_loaded(&self) -> bool {
        !matches!(self.state, CacheState::Cold)
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match &self.state {
            CacheState::Ready(ds) => Some(ds),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            CacheState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Return the snapshot, running `provider` only on the first call.
    pub fn get_or_load<P: DatasetProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<Arc<Dataset>, LoadError> {
        match &self.state {
            CacheState::Ready(ds) => return Ok(Arc::clone(ds)),
            CacheState::Failed(msg) => return Err(LoadError::Unavailable(msg.clone())),
            CacheState::Cold => {}
        }
        self.install(provider.provide())
    }

    /// Store an outcome computed elsewhere (e.g. on a loader thread).
    ///
    /// The first outcome wins; later ones are discarded and the stored
    /// state is reported instead.
    pub fn install(
        &mut self,
        outcome: Result<Dataset, LoadError>,
    ) -> Result<Arc<Dataset>, LoadError> {
        match &self.state {
            CacheState::Ready(ds) => return Ok(Arc::clone(ds)),
            CacheState::Failed(msg) => return Err(LoadError::Unavailable(msg.clone())),
            CacheState::Cold => {}
        }
        match outcome {
            Ok(ds) => {
                let ds = Arc::new(ds);
                self.state = CacheState::Ready(Arc::clone(&ds));
                Ok(ds)
            }
            Err(e) => {
                self.state = CacheState::Failed(e.user_message());
                Err(e)
            }
        }
    }
}
