use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} has no entry at index {index} (length {len})")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("No submitted recipe with id {0}")]
    UnknownRecipe(u64),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Failed to create recipe: {0}")]
    Api(#[from] ApiError),
}
