use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::model::{RecipeDetails, RecipeList};
use crate::query::{build_details_url, build_search_url, Endpoint, SearchQuery};
use crate::settings::Settings;
use crate::SearchError;

/// Anything that can turn a query into recipes
#[async_trait]
pub trait RecipeSearch: Send + Sync {
    /// Run one search and report every failure
    async fn search(
        &self,
        endpoint: Endpoint,
        query: &SearchQuery,
    ) -> Result<RecipeList, SearchError>;

    /// Fetch the full information record for one recipe
    async fn details(&self, id: i64) -> Result<RecipeDetails, SearchError>;

    /// Run one search, logging failures and substituting an empty list
    async fn search_or_empty(&self, endpoint: Endpoint, query: &SearchQuery) -> RecipeList {
        match self.search(endpoint, query).await {
            Ok(recipes) => recipes,
            Err(SearchError::Transport(e)) => {
                error!("Failed to fetch recipes: {}", e);
                RecipeList::default()
            }
            Err(e) => {
                warn!("Failed to fetch recipes: {}", e);
                RecipeList::default()
            }
        }
    }
}

/// Client for the Spoonacular recipe API
pub struct SpoonacularClient {
    client: Client,
    base_url: Url,
    api_key: String,
    number: Option<u32>,
}

impl SpoonacularClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
            number: None,
        })
    }

    /// Create a client from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self, SearchError> {
        let api_key = settings.resolve_api_key()?;
        Ok(Self::new(&settings.base_url, api_key)?.with_number(settings.number))
    }

    /// Override the per-endpoint result count
    pub fn with_number(mut self, number: Option<u32>) -> Self {
        if number.is_some() {
            self.number = number;
        }
        self
    }

    fn number_for(&self, endpoint: Endpoint) -> u32 {
        self.number.unwrap_or_else(|| endpoint.default_number())
    }

    async fn get_json(&self, url: Url) -> Result<Value, SearchError> {
        debug!("Fetching {}", redact_api_key(&url));

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl RecipeSearch for SpoonacularClient {
    async fn search(
        &self,
        endpoint: Endpoint,
        query: &SearchQuery,
    ) -> Result<RecipeList, SearchError> {
        let url = build_search_url(
            &self.base_url,
            endpoint,
            query,
            &self.api_key,
            self.number_for(endpoint),
        )?;
        let body = self.get_json(url).await?;
        let recipes = RecipeList::from_json(body)?;
        debug!("Recipe API returned {} recipes", recipes.len());
        Ok(recipes)
    }

    async fn details(&self, id: i64) -> Result<RecipeDetails, SearchError> {
        let url = build_details_url(&self.base_url, id, &self.api_key)?;
        let body = self.get_json(url).await?;
        RecipeDetails::from_json(body)
    }
}

// Keep the key out of logs
fn redact_api_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apiKey" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
