//! HTTP access to the remote recipe service.
//!
//! Every screen talks to the service through the [`RecipeApi`] trait so tests can
//! swap in [`MockRecipeApi`].

mod client;
mod mock;
mod rate_limiter;

pub use client::{HttpRecipeApi, HttpRecipeApiBuilder, RecipeApi};
pub use mock::{Endpoint, MockRecipeApi};
pub use rate_limiter::RateLimiter;
