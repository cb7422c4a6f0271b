//! Paginated query feed.
//!
//! `QueryPages` walks the pages of a query lazily: nothing is fetched until
//! `read_next` is called, and iteration ends as soon as the store stops handing
//! out continuations. `restart` rewinds the feed to the first page.

use super::error::Result;
use super::store::DocumentStore;
use super::types::{
    ContainerRef, ContinuationToken, FeedPage, QueryDefinition, QueryOptions, StoredDocument,
};

pub struct QueryPages<'a> {
    store: &'a dyn DocumentStore,
    container: &'a ContainerRef,
    query: QueryDefinition,
    options: QueryOptions,
    continuation: Option<ContinuationToken>,
    exhausted: bool,
    pages_read: usize,
}

impl<'a> QueryPages<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        container: &'a ContainerRef,
        query: QueryDefinition,
        options: QueryOptions,
    ) -> Self {
        Self {
            store,
            container,
            query,
            options,
            continuation: None,
            exhausted: false,
            pages_read: 0,
        }
    }

    pub fn has_more_results(&self) -> bool {
        !self.exhausted
    }

    pub fn pages_read(&self) -> usize {
        self.pages_read
    }

    /// Fetches the next page.
    ///
    /// On error the cursor is left where it was, so the same page can be
    /// requested again. Calling this on an exhausted feed yields an empty page.
    pub async fn read_next(&mut self) -> Result<FeedPage> {
        if self.exhausted {
            return Ok(FeedPage::default());
        }

        let page = self
            .store
            .query_page(
                self.container,
                &self.query,
                self.options,
                self.continuation.as_ref(),
            )
            .await?;

        self.pages_read += 1;
        self.continuation = page.continuation.clone();
        self.exhausted = self.continuation.is_none();

        Ok(page)
    }

    pub fn restart(&mut self) {
        self.continuation = None;
        self.exhausted = false;
        self.pages_read = 0;
    }

    /// Returns the first matching document, fetching no more pages than needed.
    ///
    /// Empty pages that still carry a continuation are skipped.
    pub async fn find_first(&mut self) -> Result<Option<StoredDocument>> {
        while self.has_more_results() {
            let page = self.read_next().await?;
            if page.is_empty() {
                continue;
            }
            return Ok(page.items.into_iter().next());
        }
        Ok(None)
    }
}
