use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use openfund_core::{Catalog, CollectionId, CoreError};

use crate::error::EngineError;
use crate::resolve::NavigationIntent;
use crate::{QueryEngine, DEFAULT_PAGE_SIZE};

/// A requested page move, produced by pagination controls and applied here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChangeIntent {
    pub collection: CollectionId,
    pub page: usize,
}

/// One page view's worth of query engines: one per loaded collection, plus
/// the active view. Owns all mutable state for the session; constructed at
/// view activation and dropped on navigation away.
pub struct Session {
    engines: BTreeMap<CollectionId, QueryEngine>,
    active: CollectionId,
}

impl Session {
    pub fn new(catalog: &Catalog, active: CollectionId) -> Result<Self, EngineError> {
        Self::with_page_size(catalog, active, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(
        catalog: &Catalog,
        active: CollectionId,
        page_size: usize,
    ) -> Result<Self, EngineError> {
        catalog.get(active)?;
        let mut engines = BTreeMap::new();
        for id in catalog.ids() {
            let collection = catalog.get(id)?.clone();
            engines.insert(id, QueryEngine::with_page_size(collection, page_size));
        }
        Ok(Self { engines, active })
    }

    pub fn active(&self) -> CollectionId {
        self.active
    }

    pub fn activate(&mut self, id: CollectionId) -> Result<(), EngineError> {
        if !self.engines.contains_key(&id) {
            return Err(CoreError::UnknownCollection(id.as_str().to_string()).into());
        }
        self.active = id;
        Ok(())
    }

    pub fn engine(&self, id: CollectionId) -> Result<&QueryEngine, EngineError> {
        self.engines
            .get(&id)
            .ok_or_else(|| CoreError::UnknownCollection(id.as_str().to_string()).into())
    }

    pub fn engine_mut(&mut self, id: CollectionId) -> Result<&mut QueryEngine, EngineError> {
        self.engines
            .get_mut(&id)
            .ok_or_else(|| CoreError::UnknownCollection(id.as_str().to_string()).into())
    }

    pub fn active_engine(&self) -> &QueryEngine {
        // The active id is validated on construction and in activate().
        &self.engines[&self.active]
    }

    /// Apply a cross-reference navigation: reset the target view's state,
    /// seed its search with the matched value, and switch to it. Resolution
    /// was case-insensitive, so the substring search keeps every matched
    /// destination visible.
    pub fn apply_navigation(&mut self, intent: &NavigationIntent) -> Result<(), EngineError> {
        let engine = self
            .engines
            .get_mut(&intent.target)
            .ok_or_else(|| CoreError::UnknownCollection(intent.target.as_str().to_string()))?;
        engine.clear_all_filters();
        engine.set_search_term(&intent.value);
        self.active = intent.target;
        Ok(())
    }

    pub fn apply_page(&mut self, intent: PageChangeIntent) -> Result<(), EngineError> {
        self.engine_mut(intent.collection)?.set_page(intent.page);
        Ok(())
    }
}
