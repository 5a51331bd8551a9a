// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Dataset Cache

use crate::diag::diag;
use crate::synth;
use crate::types::Record;

/// Memoized synthetic dataset, owned by the dashboard context rather than a
/// module global so tests can isolate instances.
///
/// Generation failure fails closed: the cache memoizes an empty dataset,
/// logs the condition, and does not retry (generation is deterministic, a
/// retry would reproduce the identical failure).
#[derive(Debug, Default)]
pub struct DatasetCache {
    records: Option<Vec<Record>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self { records: None }
    }

    /// The memoized record set, generating it on first call.
    pub fn get(&mut self) -> &[Record] {
        if self.records.is_none() {
            let records = match synth::generate() {
                Ok(records) => records,
                Err(err) => {
                    diag(&format!("dataset generation failed closed: {}", err));
                    Vec::new()
                }
            };
            self.records = Some(records);
        }
        self.records.as_deref().unwrap_or(&[])
    }

    /// The memoized set without populating. Empty until the first `get`.
    pub fn peek(&self) -> &[Record] {
        self.records.as_deref().unwrap_or(&[])
    }

    /// Drop the memoized set; the next `get` regenerates from scratch.
    pub fn invalidate(&mut self) {
        self.records = None;
    }

    pub fn is_populated(&self) -> bool {
        self.records.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_population() {
        let mut cache = DatasetCache::new();
        assert!(!cache.is_populated());
        assert!(!cache.get().is_empty());
        assert!(cache.is_populated());
    }

    #[test]
    fn test_invalidate_forces_regeneration() {
        let mut cache = DatasetCache::new();
        let first = cache.get().len();
        cache.invalidate();
        assert!(!cache.is_populated());
        assert_eq!(cache.get().len(), first);
    }

    #[test]
    fn test_regeneration_is_identical() {
        let mut cache = DatasetCache::new();
        let first = cache.get().to_vec();
        cache.invalidate();
        assert_eq!(cache.get(), first.as_slice());
    }
}
