use std::sync::{Arc, PoisonError, RwLock};

use crate::simulation::speeds::{ParseError, SpeedSet, SpeedSetParser};

/// Holds the one current `SpeedSet`.
///
/// Readers take an `Arc` snapshot and keep it for the whole frame; writers
/// replace the reference wholesale, so a reader never sees a partial list.
#[derive(Debug)]
pub struct SpeedStore {
    current: RwLock<Arc<SpeedSet>>,
}

impl SpeedStore {
    pub fn new(initial: SpeedSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Snapshot of the current set
    pub fn current(&self) -> Arc<SpeedSet> {
        // The guarded value is always a complete Arc, so a poisoned lock is still usable
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish a new set, returning the one it replaced
    pub fn replace(&self, next: Arc<SpeedSet>) -> Arc<SpeedSet> {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Parse `text` and publish the result; on error the current set stays in place
    pub fn apply(&self, parser: &SpeedSetParser, text: &str) -> Result<Arc<SpeedSet>, ParseError> {
        match parser.parse(text) {
            Ok(set) => {
                let set = Arc::new(set);
                self.replace(set.clone());
                log::info!("Wave speeds: {}", set);
                Ok(set)
            }
            Err(e) => {
                log::warn!("Rejected wave speeds {:?}: {}", text, e);
                Err(e)
            }
        }
    }
}

impl Default for SpeedStore {
    fn default() -> Self {
        Self::new(SpeedSet::default_set())
    }
}
