//! Keyword search screen (`/search`).

use crate::http::RecipeApi;
use crate::types::Recipe;

/// Message shown for any failed search.
pub const SEARCH_ERROR_MESSAGE: &str = "Error fetching recipes, please try again.";

/// What a submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query: no request, no state change.
    Skipped,
    Found(usize),
    Failed,
}

#[derive(Debug, Default)]
pub struct RecipeSearch {
    query: String,
    results: Vec<Recipe>,
    loading: bool,
    error: Option<String>,
}

impl RecipeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the query text. Never fetches.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Recipe] {
        &self.results
    }

    /// True while a request is in flight; the submit control is disabled.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Run the search for the current query.
    pub async fn submit(&mut self, api: &dyn RecipeApi) -> SearchOutcome {
        if self.query.is_empty() {
            return SearchOutcome::Skipped;
        }

        self.loading = true;
        self.error = None;

        let outcome = match api.search_recipes(&self.query).await {
            Ok(page) => {
                self.results = page.recipes;
                SearchOutcome::Found(self.results.len())
            }
            Err(e) => {
                tracing::warn!(query = %self.query, error = %e, "search failed");
                self.error = Some(SEARCH_ERROR_MESSAGE.to_string());
                SearchOutcome::Failed
            }
        };

        self.loading = false;
        outcome
    }
}
