//! Recipe list screen: one fetch of the whole collection, client-side cuisine and
//! difficulty filtering, and either a paged window or an infinite-scroll
//! accumulator over the filtered result.

use crate::http::RecipeApi;
use crate::types::Recipe;

/// Items per page, and per "load more" batch.
pub const PAGE_SIZE: usize = 6;

/// Wildcard facet label.
pub const ALL: &str = "All";

/// A filter selection: the "All" wildcard or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// "All" maps to the wildcard, anything else to an exact match.
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    /// Case-sensitive equality, or always true for the wildcard.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value,
        }
    }
}

/// Distinct cuisine and difficulty values, in order of first appearance.
///
/// The "All" wildcard is implicit and not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub cuisines: Vec<String>,
    pub difficulties: Vec<String>,
}

impl Facets {
    pub fn from_recipes(recipes: &[Recipe]) -> Self {
        Self {
            cuisines: distinct(recipes.iter().map(|r| r.cuisine.as_str())),
            difficulties: distinct(recipes.iter().map(|r| r.difficulty.as_str())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Recipes passing both selections, in collection order.
pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    cuisine: &Selection,
    difficulty: &Selection,
) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|r| cuisine.matches(&r.cuisine) && difficulty.matches(&r.difficulty))
        .collect()
}

/// `ceil(len / PAGE_SIZE)`.
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// The `page`-th window of `items`. Empty past the end.
pub fn page_window<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_mul(PAGE_SIZE).min(items.len());
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Progress of the one collection fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// State behind the `/` screen.
#[derive(Debug)]
pub struct RecipeListEngine {
    recipes: Vec<Recipe>,
    facets: Facets,
    cuisine: Selection,
    difficulty: Selection,
    page: usize,
    infinite_scroll: bool,
    accumulator: Vec<Recipe>,
    state: LoadState,
}

impl Default for RecipeListEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeListEngine {
    pub fn new() -> Self {
        Self {
            recipes: Vec::new(),
            facets: Facets::default(),
            cuisine: Selection::All,
            difficulty: Selection::All,
            page: 0,
            infinite_scroll: false,
            accumulator: Vec::new(),
            state: LoadState::Loading,
        }
    }

    /// Fetch the whole collection once. Failures are logged and leave the
    /// collection empty; there is no retry.
    pub async fn load(&mut self, api: &dyn RecipeApi) {
        self.state = LoadState::Loading;

        match api.list_recipes().await {
            Ok(page) => {
                tracing::debug!(count = page.recipes.len(), total = page.total, "recipes loaded");
                self.set_recipes(page.recipes);
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching recipes");
                self.set_recipes(Vec::new());
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Replace the collection, recompute facets, and reseed the accumulator.
    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
        self.facets = Facets::from_recipes(&self.recipes);
        self.state = LoadState::Ready;
        tracing::debug!(
            cuisines = ?self.facets.cuisines,
            difficulties = ?self.facets.difficulties,
            "facets derived"
        );
        self.reseed();
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn cuisine(&self) -> &Selection {
        &self.cuisine
    }

    pub fn difficulty(&self) -> &Selection {
        &self.difficulty
    }

    /// Changing the cuisine reseeds the accumulator. The page index is kept.
    pub fn set_cuisine(&mut self, cuisine: Selection) {
        if self.cuisine != cuisine {
            self.cuisine = cuisine;
            self.reseed();
        }
    }

    /// Changing the difficulty does not reseed the accumulator; already
    /// revealed items stay until the next cuisine, collection, or toggle change.
    pub fn set_difficulty(&mut self, difficulty: Selection) {
        self.difficulty = difficulty;
    }

    pub fn filtered(&self) -> Vec<&Recipe> {
        filter_recipes(&self.recipes, &self.cuisine, &self.difficulty)
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered().len())
    }

    /// The stored page index, which may be stale after a filter change.
    pub fn page(&self) -> usize {
        self.page
    }

    /// The page actually served: the stored index clamped to the last page.
    pub fn current_page(&self) -> usize {
        self.page.min(self.page_count().saturating_sub(1))
    }

    /// Select a page as the pager would. Indexes past the end select the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    pub fn next_page(&mut self) -> bool {
        let current = self.current_page();
        if current + 1 < self.page_count() {
            self.page = current + 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        let current = self.current_page();
        if current > 0 {
            self.page = current - 1;
            true
        } else {
            false
        }
    }

    /// Items on the served page.
    pub fn page_items(&self) -> Vec<&Recipe> {
        let filtered = self.filtered();
        page_window(&filtered, self.current_page()).to_vec()
    }

    pub fn infinite_scroll(&self) -> bool {
        self.infinite_scroll
    }

    /// Switch between paged and infinite-scroll mode. Either direction resets
    /// the page index; turning it on reseeds the accumulator, turning it off
    /// empties it. Filter selections are kept.
    pub fn set_infinite_scroll(&mut self, enabled: bool) {
        if self.infinite_scroll == enabled {
            return;
        }
        self.infinite_scroll = enabled;
        self.page = 0;
        if enabled {
            self.reseed();
        } else {
            self.accumulator.clear();
        }
    }

    pub fn toggle_infinite_scroll(&mut self) {
        self.set_infinite_scroll(!self.infinite_scroll);
    }

    pub fn accumulator(&self) -> &[Recipe] {
        &self.accumulator
    }

    pub fn has_more(&self) -> bool {
        self.accumulator.len() < self.filtered().len()
    }

    /// Append the next batch to the accumulator. Returns how many were added;
    /// 0 when exhausted or when infinite scroll is off.
    pub fn load_more(&mut self) -> usize {
        if !self.infinite_scroll {
            return 0;
        }
        let next: Vec<Recipe> = {
            let filtered = self.filtered();
            let start = self.accumulator.len().min(filtered.len());
            let end = (start + PAGE_SIZE).min(filtered.len());
            filtered[start..end].iter().map(|r| (*r).clone()).collect()
        };
        let added = next.len();
        self.accumulator.extend(next);
        added
    }

    fn reseed(&mut self) {
        if !self.infinite_scroll {
            return;
        }
        let first: Vec<Recipe> = self
            .filtered()
            .into_iter()
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        self.accumulator = first;
    }
}
