pub mod config;
pub mod detail;
pub mod draft;
pub mod error;
pub mod http;
pub mod list;
pub mod routes;
pub mod scratch;
pub mod search;
pub mod submission;
pub mod types;

pub use config::ApiConfig;
pub use detail::{DetailState, RecipeDetailLoader};
pub use draft::{DraftRecipe, ListField, TextField};
pub use error::{ApiError, FormError, SubmitError};
pub use http::{Endpoint, HttpRecipeApi, HttpRecipeApiBuilder, MockRecipeApi, RecipeApi};
pub use list::{Facets, LoadState, RecipeListEngine, Selection, PAGE_SIZE};
pub use routes::Route;
pub use scratch::{Debouncer, Task, TaskChange, TaskList};
pub use search::{RecipeSearch, SearchOutcome};
pub use submission::{SubmissionController, SubmitOutcome};
pub use types::{NewRecipe, Recipe, RecipePage};
