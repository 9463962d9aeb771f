//! Recipe detail screen (`/recipe/{id}`).

use crate::http::RecipeApi;
use crate::types::Recipe;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Recipe),
    NotFound,
}

/// Loads one recipe per activation. Nothing is cached between loads.
#[derive(Debug)]
pub struct RecipeDetailLoader {
    state: DetailState,
}

impl Default for RecipeDetailLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeDetailLoader {
    pub fn new() -> Self {
        Self {
            state: DetailState::Loading,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match &self.state {
            DetailState::Loaded(recipe) => Some(recipe),
            _ => None,
        }
    }

    /// Resolve the route parameter and fetch. Any present id is sent as is,
    /// so the service decides what exists; only a missing id skips the request.
    pub async fn load(&mut self, api: &dyn RecipeApi, id: Option<&str>) -> &DetailState {
        self.state = DetailState::Loading;

        let Some(id) = id else {
            tracing::debug!("no recipe id in route");
            self.state = DetailState::NotFound;
            return &self.state;
        };

        self.state = match api.get_recipe(id).await {
            Ok(recipe) => DetailState::Loaded(recipe),
            Err(e) => {
                tracing::error!(id, error = %e, "error fetching recipe");
                DetailState::NotFound
            }
        };
        &self.state
    }
}
