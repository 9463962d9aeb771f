//! In-memory recipe service for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::ApiError;
use crate::types::{NewRecipe, Recipe, RecipePage};

use super::client::RecipeApi;

/// Which endpoint a call went to, for call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List,
    Get,
    Search,
    Add,
}

/// Mock recipe service with canned responses.
///
/// Search matches case-insensitively against recipe names, like the real service.
pub struct MockRecipeApi {
    recipes: Vec<Recipe>,
    failing: HashMap<Endpoint, u16>,
    next_id: AtomicU64,
    fixed_id: Option<u64>,
    calls: Mutex<HashMap<Endpoint, usize>>,
    added: Mutex<Vec<NewRecipe>>,
}

impl MockRecipeApi {
    /// Create a mock serving no recipes.
    pub fn new() -> Self {
        Self {
            recipes: Vec::new(),
            failing: HashMap::new(),
            next_id: AtomicU64::new(51),
            fixed_id: None,
            calls: Mutex::new(HashMap::new()),
            added: Mutex::new(Vec::new()),
        }
    }

    /// Serve this collection from every read endpoint.
    pub fn with_recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.recipes = recipes;
        self
    }

    /// Make an endpoint fail with the given HTTP status.
    pub fn with_failure(mut self, endpoint: Endpoint, status: u16) -> Self {
        self.failing.insert(endpoint, status);
        self
    }

    /// First id handed out by the create endpoint; later creates count up.
    pub fn with_next_id(self, id: u64) -> Self {
        self.next_id.store(id, Ordering::SeqCst);
        self
    }

    /// Echo every create with the same id, as the public demo service does.
    pub fn with_fixed_id(mut self, id: u64) -> Self {
        self.fixed_id = Some(id);
        self
    }

    /// Number of calls made to an endpoint.
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        lock(&self.calls)
            .get(&endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Number of calls made to any endpoint.
    pub fn total_calls(&self) -> usize {
        lock(&self.calls).values().sum()
    }

    /// Payloads received by the create endpoint, in order.
    pub fn added(&self) -> Vec<NewRecipe> {
        lock(&self.added).clone()
    }

    fn record(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        *lock(&self.calls).entry(endpoint).or_insert(0) += 1;

        match self.failing.get(&endpoint) {
            Some(status) => Err(ApiError::Status {
                status: *status,
                url: format!("mock://{:?}", endpoint),
            }),
            None => Ok(()),
        }
    }

    fn page(recipes: Vec<Recipe>) -> RecipePage {
        let total = recipes.len() as u64;
        RecipePage {
            recipes,
            total,
            skip: 0,
            limit: total,
        }
    }
}

/// A panicking test thread must not hide the counters from the others.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Default for MockRecipeApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeApi for MockRecipeApi {
    async fn list_recipes(&self) -> Result<RecipePage, ApiError> {
        self.record(Endpoint::List)?;
        Ok(Self::page(self.recipes.clone()))
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ApiError> {
        self.record(Endpoint::Get)?;
        let wanted = id.parse::<u64>().ok();
        self.recipes
            .iter()
            .find(|r| Some(r.id) == wanted)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    async fn search_recipes(&self, query: &str) -> Result<RecipePage, ApiError> {
        self.record(Endpoint::Search)?;
        let needle = query.to_lowercase();
        let hits = self
            .recipes
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(Self::page(hits))
    }

    async fn add_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError> {
        self.record(Endpoint::Add)?;
        lock(&self.added).push(recipe.clone());
        let id = match self.fixed_id {
            Some(id) => id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        Ok(recipe.clone().into_recipe(id))
    }
}
