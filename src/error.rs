use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// The request never produced a response (network unreachable, DNS, TLS, ...)
    #[error("Failed to reach recipe API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The recipe API answered with a non-success status
    #[error("Recipe API returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not one of the known result shapes
    #[error("Unexpected response from recipe API: {0}")]
    MalformedResponse(String),

    /// A search was attempted without any ingredients
    #[error("Please enter at least one ingredient.")]
    EmptyIngredients,

    /// No API key found in config or environment
    #[error("Spoonacular API key not found; set RECIPE_FINDER__API_KEY or SPOONACULAR_API_KEY")]
    MissingApiKey,

    /// The configured base URL could not be parsed
    #[error("Invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
