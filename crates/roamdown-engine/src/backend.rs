//! The seam to the remote graph-note backend.
//!
//! The engine never talks to the network; it consumes and produces [`Page`]
//! values through this trait and leaves transport to the caller. The
//! in-memory implementation backs tests and local workflows.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::daily;
use crate::models::page::Page;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("page not found: {0}")]
    PageNotFound(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Storage boundary for whole pages, keyed by title.
pub trait PageStore {
    fn fetch_page(&self, title: &str) -> Result<Option<Page>, BackendError>;
    fn write_page(&mut self, page: Page) -> Result<(), BackendError>;
    fn page_titles(&self) -> Result<Vec<String>, BackendError>;
}

/// How a user-supplied page query should be addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLocator {
    /// A daily note (empty query, relative keyword, or ISO date).
    Daily(NaiveDate),
    /// A raw block/page uid (nine alphanumerics).
    Uid(String),
    /// An ordinary page title.
    Title(String),
}

static UID_RE: OnceLock<Regex> = OnceLock::new();

fn uid_re() -> &'static Regex {
    UID_RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9]{9}$").expect("valid uid regex"))
}

impl PageLocator {
    /// Classifies a query. `today` anchors relative and empty queries so the
    /// classification stays pure.
    pub fn parse(query: &str, today: NaiveDate) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return PageLocator::Daily(today);
        }
        if let Some(date) = daily::resolve_date_query(query, today) {
            return PageLocator::Daily(date);
        }
        if uid_re().is_match(query) {
            return PageLocator::Uid(query.to_string());
        }
        PageLocator::Title(query.to_string())
    }

    /// The page title this locator resolves to, daily notes included.
    pub fn title(&self) -> String {
        match self {
            PageLocator::Daily(date) => daily::daily_note_title(*date),
            PageLocator::Uid(uid) => uid.clone(),
            PageLocator::Title(title) => title.clone(),
        }
    }
}

/// Map-backed store used by tests and local tooling.
#[derive(Debug, Default)]
pub struct InMemoryPageStore {
    pages: HashMap<String, Page>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageStore for InMemoryPageStore {
    fn fetch_page(&self, title: &str) -> Result<Option<Page>, BackendError> {
        Ok(self.pages.get(title).cloned())
    }

    fn write_page(&mut self, page: Page) -> Result<(), BackendError> {
        self.pages.insert(page.page_text.clone(), page);
        Ok(())
    }

    fn page_titles(&self) -> Result<Vec<String>, BackendError> {
        let mut titles: Vec<String> = self.pages.keys().cloned().collect();
        titles.sort();
        Ok(titles)
    }
}
