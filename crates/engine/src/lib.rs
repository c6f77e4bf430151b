pub mod aggregate;
pub mod error;
pub mod export;
pub mod predicate;
pub mod resolve;
pub mod session;

pub use aggregate::AggregateStats;
pub use error::EngineError;
pub use export::{CsvColumn, to_csv};
pub use predicate::{AmountBucket, Filter};
pub use resolve::{NavigationIntent, resolve};
pub use session::{PageChangeIntent, Session};

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use openfund_core::{Collection, FieldKind, Record};

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The only mutable state in the core: one view's search term, named
/// filters, sort and page. Mutated exclusively through [`QueryEngine`]
/// transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryState {
    search_term: String,
    filters: BTreeMap<String, Filter>,
    sort: Option<(String, SortDirection)>,
    page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
        }
    }
}

impl QueryState {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &BTreeMap<String, Filter> {
        &self.filters
    }

    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(f, d)| (f.as_str(), *d))
    }

    pub fn page(&self) -> usize {
        self.page
    }
}

/// Derived view of the collection under the current state. Recomputed fresh
/// on every state change, never patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct FilteredResult {
    matching: Vec<usize>,
    page: usize,
    page_count: usize,
}

impl FilteredResult {
    pub fn total(&self) -> usize {
        self.matching.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Row indices of all matches, in display order.
    pub fn matching(&self) -> &[usize] {
        &self.matching
    }
}

/// Search/filter/sort/paginate over one immutable collection. One instance
/// per collection per view; presentation reads only [`FilteredResult`] and
/// never touches the raw records or state directly.
pub struct QueryEngine {
    collection: Arc<Collection>,
    page_size: usize,
    state: QueryState,
    result: FilteredResult,
}

impl QueryEngine {
    pub fn new(collection: Arc<Collection>) -> Self {
        Self::with_page_size(collection, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(collection: Arc<Collection>, page_size: usize) -> Self {
        let mut engine = Self {
            collection,
            page_size: page_size.max(1),
            state: QueryState::default(),
            result: FilteredResult::default(),
        };
        engine.recompute();
        engine
    }

    pub fn collection(&self) -> &Arc<Collection> {
        &self.collection
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn result(&self) -> &FilteredResult {
        &self.result
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ========================================================================
    // State transitions
    // ========================================================================

    pub fn set_search_term(&mut self, term: &str) {
        self.state.search_term = term.to_string();
        self.state.page = 1;
        self.recompute();
    }

    /// Install or replace a named filter. Fails with `UnknownField` if the
    /// filter references a field the collection never registered.
    pub fn set_filter(&mut self, name: &str, filter: Filter) -> Result<(), EngineError> {
        filter.validate(self.collection.registry())?;
        self.state.filters.insert(name.to_string(), filter);
        self.state.page = 1;
        self.recompute();
        Ok(())
    }

    pub fn clear_filter(&mut self, name: &str) {
        if self.state.filters.remove(name).is_some() {
            self.state.page = 1;
            self.recompute();
        }
    }

    /// Reset the search term and every filter; sort is preserved.
    pub fn clear_all_filters(&mut self) {
        self.state.search_term.clear();
        self.state.filters.clear();
        self.state.page = 1;
        self.recompute();
    }

    pub fn set_sort(&mut self, field: &str, direction: SortDirection) -> Result<(), EngineError> {
        self.collection.registry().get(field)?;
        self.state.sort = Some((field.to_string(), direction));
        self.state.page = 1;
        self.recompute();
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        if self.state.sort.take().is_some() {
            self.recompute();
        }
    }

    /// Move to a page, clamped to `[1, page_count]`. Does not refilter.
    pub fn set_page(&mut self, page: usize) {
        self.state.page = page.clamp(1, self.result.page_count.max(1));
        self.result.page = self.state.page;
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// All matching records in display order, independent of pagination.
    pub fn matching_records(&self) -> Vec<&Record> {
        self.result
            .matching
            .iter()
            .filter_map(|&ix| self.collection.record(ix))
            .collect()
    }

    /// The current page's window of matching records.
    pub fn page_records(&self) -> Vec<&Record> {
        let start = (self.state.page - 1) * self.page_size;
        self.result
            .matching
            .iter()
            .skip(start)
            .take(self.page_size)
            .filter_map(|&ix| self.collection.record(ix))
            .collect()
    }

    // ========================================================================
    // Recomputation
    // ========================================================================

    fn recompute(&mut self) {
        let registry = self.collection.registry();
        let search = Filter::Substring {
            fields: registry.searchable().to_vec(),
            term: self.state.search_term.clone(),
        };

        let mut matching: Vec<usize> = self
            .collection
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                search.matches(registry, record)
                    && self
                        .state
                        .filters
                        .values()
                        .all(|filter| filter.matches(registry, record))
            })
            .map(|(ix, _)| ix)
            .collect();

        if let Some((field, direction)) = &self.state.sort
            && let Ok(descriptor) = registry.get(field)
        {
            let records = self.collection.records();
            let desc = *direction == SortDirection::Desc;
            // Stable sort; descending reverses the comparator, not the rows,
            // so tied elements keep their snapshot order either way.
            matching.sort_by(|&a, &b| {
                let ord = match descriptor.kind() {
                    // Ordering fallback for absent numbers is 0; this differs
                    // from filtering, where absent values match no bounded range.
                    FieldKind::Number => {
                        let ka = descriptor.value(&records[a]).and_then(|v| v.as_number()).unwrap_or(0.0);
                        let kb = descriptor.value(&records[b]).and_then(|v| v.as_number()).unwrap_or(0.0);
                        ka.total_cmp(&kb)
                    }
                    // Absent/unparsable dates sort as the maximum date, so
                    // they land at the end of an ascending sort.
                    FieldKind::Date => {
                        let ka = descriptor.value(&records[a]).and_then(|v| v.as_date()).unwrap_or(NaiveDate::MAX);
                        let kb = descriptor.value(&records[b]).and_then(|v| v.as_date()).unwrap_or(NaiveDate::MAX);
                        ka.cmp(&kb)
                    }
                    _ => {
                        let ka = descriptor.value(&records[a]).map(|v| v.display().to_lowercase()).unwrap_or_default();
                        let kb = descriptor.value(&records[b]).map(|v| v.display().to_lowercase()).unwrap_or_default();
                        ka.cmp(&kb)
                    }
                };
                if desc { ord.reverse() } else { ord }
            });
        }

        let page_count = matching.len().div_ceil(self.page_size).max(1);
        let page = self.state.page.clamp(1, page_count);
        self.state.page = page;

        debug!(
            collection = %self.collection.id(),
            total = matching.len(),
            page,
            page_count,
            "recomputed filtered result"
        );

        self.result = FilteredResult {
            matching,
            page,
            page_count,
        };
    }
}
