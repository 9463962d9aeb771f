//! Recipe service trait and the reqwest-backed implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{NewRecipe, Recipe, RecipePage};

use super::rate_limiter::RateLimiter;

/// Operations the remote recipe service offers, enabling mockability in tests.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Fetch the whole collection. No pagination parameters are sent.
    async fn list_recipes(&self) -> Result<RecipePage, ApiError>;

    /// Look up a single recipe by its route identifier, sent as given.
    async fn get_recipe(&self, id: &str) -> Result<Recipe, ApiError>;

    /// Keyword search.
    async fn search_recipes(&self, query: &str) -> Result<RecipePage, ApiError>;

    /// Create a recipe. The service echoes the entity back with an assigned id.
    async fn add_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError>;
}

/// Builder for [`HttpRecipeApi`].
#[derive(Clone)]
pub struct HttpRecipeApiBuilder {
    config: ApiConfig,
}

impl Default for HttpRecipeApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpRecipeApiBuilder {
    /// Start from built-in defaults (no environment lookup).
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Start from an existing configuration, e.g. [`ApiConfig::from_env`].
    pub fn from_config(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout. None disables it.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the per-host spacing in milliseconds. 0 disables rate limiting.
    pub fn rate_limit_ms(mut self, ms: u64) -> Self {
        self.config.rate_limit_ms = ms;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<HttpRecipeApi, ApiError> {
        reqwest::Url::parse(&self.config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;

        let mut builder = reqwest::Client::builder().user_agent(&self.config.user_agent);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build()?;

        Ok(HttpRecipeApi {
            inner: Arc::new(inner),
            base_url: self.config.base_url,
            rate_limiter: RateLimiter::new(Duration::from_millis(self.config.rate_limit_ms)),
        })
    }
}

/// Production client for the recipe service.
pub struct HttpRecipeApi {
    /// Shared reqwest client for connection pooling.
    inner: Arc<reqwest::Client>,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl HttpRecipeApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        HttpRecipeApiBuilder::new().base_url(base_url).build()
    }

    pub fn builder() -> HttpRecipeApiBuilder {
        HttpRecipeApiBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let raw = format!("{}{}", self.base_url, path);
        reqwest::Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// `/recipes/{id}` with the id escaped as one path segment.
    fn recipe_url(&self, id: &str) -> Result<reqwest::Url, ApiError> {
        let mut url = self.url("/recipes")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }

    async fn throttle(&self, url: &reqwest::Url) {
        if let Some(host) = url.host_str() {
            self.rate_limiter.wait(host).await;
        }
    }

    /// Send a prepared request and decode a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        url: reqwest::Url,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.throttle(&url).await;

        tracing::debug!(url = %url, "network: sending request");
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::debug!(url = %url, status = %status, "network: request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        tracing::debug!(url = %url, status = %status, "network: response received");
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn list_recipes(&self) -> Result<RecipePage, ApiError> {
        let url = self.url("/recipes")?;
        let request = self.inner.get(url.clone());
        self.send_json(url, request).await
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ApiError> {
        let url = self.recipe_url(id)?;
        let request = self.inner.get(url.clone());
        match self.send_json(url, request).await {
            Err(ApiError::Status { status: 404, .. }) => Err(ApiError::NotFound(id.to_string())),
            other => other,
        }
    }

    async fn search_recipes(&self, query: &str) -> Result<RecipePage, ApiError> {
        let mut url = self.url("/recipes/search")?;
        url.query_pairs_mut().append_pair("q", query);
        let request = self.inner.get(url.clone());
        self.send_json(url, request).await
    }

    async fn add_recipe(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError> {
        let url = self.url("/recipes/add")?;
        let request = self.inner.post(url.clone()).json(recipe);
        self.send_json(url, request).await
    }
}
