//! List view controller for BrewBrowser.
//!
//! Drives the paged, searchable main list and the saved-items panel. Every
//! list request takes a ticket from a monotonically increasing sequence and
//! its response is applied only while that ticket is still the newest one,
//! so a slow response can never overwrite fresher state. Search input is
//! debounced; a newer keystroke cancels the pending refresh outright.
//!
//! Saved flags are merged when a page is applied, not when it is fetched, so
//! a load that lands after a bookmark change already shows it.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::managers::bookmark_store::BookmarkStoreTrait;
use crate::managers::debounce::Debouncer;
use crate::services::catalog_client::CatalogClientTrait;
use crate::types::beverage::{BeverageRecord, ListQuery, SortOrder};
use crate::types::errors::{CatalogError, ListError};
use crate::types::list::{total_pages, ListPhase, ListSnapshot};
use crate::types::settings::ListSettings;

/// Fixed parameters of a list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    pub page_size: u32,
    pub sort: SortOrder,
    pub debounce: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::from(&ListSettings::default())
    }
}

impl From<&ListSettings> for ListConfig {
    fn from(settings: &ListSettings) -> Self {
        Self {
            page_size: settings.page_size,
            sort: settings.sort,
            debounce: Duration::from_millis(settings.search_debounce_ms),
        }
    }
}

/// Sets `is_saved` on every record whose identifier is in `saved`.
pub fn merge_saved(records: Vec<BeverageRecord>, saved: &HashSet<String>) -> Vec<BeverageRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.is_saved = saved.contains(&record.id);
            record
        })
        .collect()
}

/// Marks its ticket finished when dropped, including when the owning future
/// is aborted mid-request.
struct InFlight<'a> {
    finished: &'a AtomicU64,
    ticket: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.finished.fetch_max(self.ticket, Ordering::SeqCst);
    }
}

/// A fetched page waiting to be applied.
struct PageLoad {
    ticket: u64,
    page: u32,
    items: Vec<BeverageRecord>,
    total_pages: Option<u32>,
}

struct ListInner<C, S> {
    client: Arc<C>,
    store: S,
    config: ListConfig,
    state: Mutex<ListSnapshot>,
    sequence: AtomicU64,
    /// Highest ticket whose request has completed, failed or been dropped.
    finished: AtomicU64,
    debouncer: Debouncer,
}

impl<C, S> ListInner<C, S>
where
    C: CatalogClientTrait,
    S: BookmarkStoreTrait + 'static,
{
    fn lock_state(&self) -> MutexGuard<'_, ListSnapshot> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn current_query(&self) -> (u32, String) {
        let state = self.lock_state();
        (state.page.page, state.page.search.clone())
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == ticket
    }

    /// Issues the next ticket. Hold the guard until the load is applied.
    fn begin(&self) -> InFlight<'_> {
        InFlight {
            finished: &self.finished,
            ticket: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// True while the newest issued request has not finished.
    fn load_in_flight(&self) -> bool {
        self.finished.load(Ordering::SeqCst) < self.sequence.load(Ordering::SeqCst)
    }

    /// Identifiers currently persisted. A failing store is treated as empty
    /// for display purposes.
    fn saved_ids(&self) -> HashSet<String> {
        match self.store.get_ids() {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                warn!(error = %e, "could not read saved items; showing none as saved");
                HashSet::new()
            }
        }
    }

    /// Resolves every saved identifier to its full record, concurrently.
    ///
    /// Identifiers that fail to resolve are logged and left out.
    async fn resolve_saved(&self) -> Vec<BeverageRecord> {
        let ids = match self.store.get_ids() {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "could not read saved items");
                return Vec::new();
            }
        };

        let results = join_all(ids.iter().map(|id| self.client.get_item(id))).await;
        ids.iter()
            .zip(results)
            .filter_map(|(id, result)| match result {
                Ok(mut record) => {
                    record.is_saved = true;
                    Some(record)
                }
                Err(e) => {
                    warn!(%id, error = %e, "saved item could not be resolved");
                    None
                }
            })
            .collect()
    }

    /// Fetches a page (and optionally the page count) under `ticket`.
    async fn fetch(
        &self,
        ticket: u64,
        page: u32,
        search: &str,
        with_count: bool,
    ) -> Result<PageLoad, CatalogError> {
        debug!(ticket, page, search, "list request");

        let query = ListQuery::new(page, self.config.page_size, self.config.sort, search);
        let items = self.client.list_items(&query).await?;

        let total_pages = if with_count {
            let filter = Some(search).filter(|s| !s.is_empty());
            let meta = self.client.get_metadata(filter).await?;
            Some(total_pages(meta.total, self.config.page_size))
        } else {
            None
        };

        Ok(PageLoad {
            ticket,
            page,
            items,
            total_pages,
        })
    }

    /// Applies a load if it is still the newest request. Returns whether it was applied.
    fn apply(&self, state: &mut ListSnapshot, load: PageLoad) -> bool {
        if !self.is_current(load.ticket) {
            debug!(ticket = load.ticket, "discarding stale list response");
            return false;
        }
        state.page.page = load.page;
        state.items = merge_saved(load.items, &self.saved_ids());
        if let Some(pages) = load.total_pages {
            state.page.total_pages = pages;
        }
        state.phase = if state.page.fetching {
            ListPhase::Searching
        } else {
            ListPhase::Ready
        };
        true
    }

    /// Fetches and applies a page. Returns whether it was applied.
    ///
    /// Failures of a request that has since been superseded are logged and
    /// otherwise ignored; the newer request owns the view.
    async fn refresh(&self, page: u32, search: &str, with_count: bool) -> Result<bool, ListError> {
        let flight = self.begin();
        let result = self.fetch(flight.ticket, page, search, with_count).await;

        let mut state = self.lock_state();
        match result {
            Ok(load) => Ok(self.apply(&mut state, load)),
            Err(e) if !self.is_current(flight.ticket) => {
                debug!(ticket = flight.ticket, error = %e, "ignoring failure of superseded list request");
                Ok(false)
            }
            Err(e) => {
                if state.phase == ListPhase::Loading {
                    state.phase = ListPhase::Ready;
                }
                Err(e.into())
            }
        }
    }

    /// Refreshes the current page after the saved items changed.
    ///
    /// Skipped while a search is pending or another list load is in flight:
    /// that load lands on the right page and merges the new flags itself,
    /// and a fresh ticket here would discard it as stale.
    async fn refresh_saved_flags(&self, page: u32, search: &str, search_pending: bool) {
        if search_pending || self.load_in_flight() {
            debug!("list load pending; it will pick up the saved-items change");
            return;
        }
        if let Err(e) = self.refresh(page, search, false).await {
            warn!(error = %e, "refresh after saved-items change failed");
        }
    }

    /// Body of the debounced search refresh.
    async fn run_search(&self, text: String) {
        if let Err(e) = self.refresh(1, &text, true).await {
            error!(search = %text, error = %e, "search refresh failed");
        }
        // Superseded searches are aborted, so whoever gets here is the latest.
        let mut state = self.lock_state();
        state.page.fetching = false;
        if state.phase == ListPhase::Searching {
            state.phase = ListPhase::Ready;
        }
    }
}

/// Controller behind the main list and the saved-items panel.
pub struct ListViewController<C, S> {
    inner: Arc<ListInner<C, S>>,
}

impl<C, S> ListViewController<C, S>
where
    C: CatalogClientTrait,
    S: BookmarkStoreTrait + 'static,
{
    pub fn new(client: Arc<C>, store: S, config: ListConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce);
        Self {
            inner: Arc::new(ListInner {
                client,
                store,
                config,
                state: Mutex::new(ListSnapshot::default()),
                sequence: AtomicU64::new(0),
                finished: AtomicU64::new(0),
                debouncer,
            }),
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.inner.config
    }

    /// The bookmark store this view reads and writes.
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// A copy of everything the view currently renders.
    pub fn snapshot(&self) -> ListSnapshot {
        self.inner.lock_state().clone()
    }

    /// Initial load: resolves the saved panel while fetching the current
    /// page, then the page count. Both must finish before the view is Ready.
    pub async fn mount(&self) -> Result<(), ListError> {
        self.inner.lock_state().phase = ListPhase::Loading;
        let (page, search) = self.inner.current_query();

        let flight = self.inner.begin();
        let (saved, load) = tokio::join!(
            self.inner.resolve_saved(),
            self.inner.fetch(flight.ticket, page, &search, true)
        );

        let mut state = self.inner.lock_state();
        state.saved = saved;
        match load {
            Ok(load) => {
                if self.inner.apply(&mut state, load) {
                    info!(
                        items = state.items.len(),
                        saved = state.saved.len(),
                        total_pages = state.page.total_pages,
                        "list mounted"
                    );
                }
                Ok(())
            }
            Err(e) if !self.inner.is_current(flight.ticket) => {
                debug!(error = %e, "ignoring failure of superseded mount request");
                Ok(())
            }
            Err(e) => {
                state.phase = ListPhase::Ready;
                Err(e.into())
            }
        }
    }

    /// Fetches page `n` with the current search text. `n` is not clamped.
    pub async fn change_page(&self, n: u32) -> Result<(), ListError> {
        let search = {
            let mut state = self.inner.lock_state();
            if !state.page.fetching {
                state.phase = ListPhase::Loading;
            }
            state.page.search.clone()
        };
        self.inner.refresh(n, &search, true).await.map(|_| ())
    }

    /// Records new search text and schedules the debounced refresh.
    ///
    /// Must be called from within a tokio runtime.
    pub fn search(&self, text: &str) {
        {
            let mut state = self.inner.lock_state();
            state.page.search = text.to_string();
            state.page.fetching = true;
            state.phase = ListPhase::Searching;
        }

        let inner = self.inner.clone();
        let text = text.to_string();
        self.inner.debouncer.schedule(async move {
            inner.run_search(text).await;
        });
    }

    /// Waits for a pending debounced search, if any, to finish.
    pub async fn settle_search(&self) {
        self.inner.debouncer.flush().await;
    }

    /// True while a debounced search has not completed.
    pub fn search_pending(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// Clears the search and returns to page 1 immediately.
    pub async fn reload_list(&self) -> Result<(), ListError> {
        self.inner.debouncer.cancel();
        {
            let mut state = self.inner.lock_state();
            state.page.search.clear();
            state.page.fetching = false;
            state.phase = ListPhase::Loading;
        }
        self.inner.refresh(1, "", true).await.map(|_| ())
    }

    /// Adds `record` to the saved items if absent, removes it if present.
    ///
    /// Returns whether the record is saved afterwards. A store failure leaves
    /// the view untouched and is returned as an error. The toggled row is
    /// updated in place; the follow-up page refresh only runs when no other
    /// list load is pending, and its failure is only logged.
    pub async fn toggle_bookmark(&self, record: &BeverageRecord) -> Result<bool, ListError> {
        let store = &self.inner.store;
        let mut ids = store.get_ids().inspect_err(|e| {
            error!(id = %record.id, error = %e, "could not read saved items");
        })?;

        let now_saved = match ids.iter().position(|id| *id == record.id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(record.id.clone());
                true
            }
        };

        store.save_ids(&ids).inspect_err(|e| {
            error!(id = %record.id, error = %e, "could not write saved items");
        })?;

        let (page, search, search_pending) = {
            let mut state = self.inner.lock_state();
            if now_saved {
                let mut saved = record.clone();
                saved.is_saved = true;
                state.saved.push(saved);
            } else if let Some(index) = state.saved.iter().position(|r| r.id == record.id) {
                state.saved.remove(index);
            }
            for item in state.items.iter_mut().filter(|r| r.id == record.id) {
                item.is_saved = now_saved;
            }
            (state.page.page, state.page.search.clone(), state.page.fetching)
        };
        debug!(id = %record.id, saved = now_saved, "bookmark toggled");

        self.inner
            .refresh_saved_flags(page, &search, search_pending)
            .await;
        Ok(now_saved)
    }

    /// Clears every saved item and refreshes the current page.
    pub async fn remove_all_bookmarks(&self) -> Result<(), ListError> {
        self.inner.store.clear().inspect_err(|e| {
            error!(error = %e, "could not clear saved items");
        })?;

        let (page, search, search_pending) = {
            let mut state = self.inner.lock_state();
            state.saved.clear();
            for item in state.items.iter_mut() {
                item.is_saved = false;
            }
            (state.page.page, state.page.search.clone(), state.page.fetching)
        };
        info!("saved items cleared");

        self.inner
            .refresh_saved_flags(page, &search, search_pending)
            .await;
        Ok(())
    }

    /// Finds a record currently on screen, in the list or the saved panel.
    pub fn find_record(&self, id: &str) -> Option<BeverageRecord> {
        let state = self.inner.lock_state();
        state
            .items
            .iter()
            .chain(state.saved.iter())
            .find(|r| r.id == id)
            .cloned()
    }
}

impl<C, S> Drop for ListViewController<C, S> {
    fn drop(&mut self) {
        // A pending search holds its own reference to the state; stop it on unmount.
        self.inner.debouncer.cancel();
    }
}
