use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::json;

use crate::fetch::RecipeSearch;
use crate::model::{RecipeDetails, RecipeList};
use crate::query::{Endpoint, SearchQuery};
use crate::SearchError;

pub type SharedSearch = Arc<dyn RecipeSearch>;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    ingredients: String,
    recipes: RecipeList,
}

#[derive(Template)]
#[template(path = "recipebook.html")]
pub struct RecipeBookTemplate {}

#[derive(Template)]
#[template(path = "recipe-details.html")]
pub struct RecipeDetailsTemplate {
    recipe: RecipeDetails,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultsForm {
    ingredients: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsParams {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiSearchParams {
    #[serde(rename = "includeIngredients")]
    include_ingredients: Option<String>,
    #[serde(rename = "type")]
    meal_type: Option<String>,
    diet: Option<String>,
}

/// Build the application router around a search backend
pub fn router(search: SharedSearch) -> Router {
    Router::new()
        .route("/", get(index).post(index))
        .route("/results", post(results))
        .route("/recipebook", get(recipebook))
        .route("/recipe-details", get(recipe_details))
        .route("/api/search", get(api_search))
        .route("/api/get", get(api_get))
        .fallback(handler_404)
        .with_state(search)
}

fn render<T: Template>(status: StatusCode, template: &T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn index() -> Response {
    render(StatusCode::OK, &IndexTemplate { error: None })
}

fn error_page(status: StatusCode, message: impl Into<String>) -> Response {
    render(
        status,
        &ErrorTemplate {
            message: message.into(),
        },
    )
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn parse_recipe_id(id: Option<&str>) -> Option<i64> {
    id.and_then(|id| id.trim().parse().ok())
}

// Upstream 404 stays a 404; every other failure is the gateway's fault
fn upstream_status(e: &SearchError) -> StatusCode {
    match e {
        SearchError::Status(status) if *status == StatusCode::NOT_FOUND => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    }
}

async fn results(
    State(search): State<SharedSearch>,
    form: Result<Form<ResultsForm>, FormRejection>,
) -> Response {
    let ingredients = match form {
        Ok(Form(form)) => form.ingredients.unwrap_or_default(),
        Err(rejection) => {
            debug!("Unreadable results form: {}", rejection);
            String::new()
        }
    };
    info!("Ingredients received: {:?}", ingredients);

    let query = match SearchQuery::from_input(&ingredients) {
        Ok(query) => query,
        Err(e @ SearchError::EmptyIngredients) => {
            return render(
                StatusCode::BAD_REQUEST,
                &IndexTemplate {
                    error: Some(e.to_string()),
                },
            )
        }
        Err(e) => {
            error!("Could not build query: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    let recipes = search
        .search_or_empty(Endpoint::FindByIngredients, &query)
        .await;
    info!("Recipes fetched: {}", recipes.len());

    render(
        StatusCode::OK,
        &ResultsTemplate {
            ingredients: query.ingredients().join(", "),
            recipes,
        },
    )
}

async fn recipebook() -> Response {
    render(StatusCode::OK, &RecipeBookTemplate {})
}

async fn recipe_details(
    State(search): State<SharedSearch>,
    Query(params): Query<DetailsParams>,
) -> Response {
    let Some(id) = parse_recipe_id(params.id.as_deref()) else {
        return error_page(StatusCode::BAD_REQUEST, "Recipe id must be a number.");
    };

    match search.details(id).await {
        Ok(recipe) => render(StatusCode::OK, &RecipeDetailsTemplate { recipe }),
        Err(e) => {
            warn!("Failed to fetch recipe {}: {}", id, e);
            let status = upstream_status(&e);
            let message = if status == StatusCode::NOT_FOUND {
                "Recipe not found."
            } else {
                "Failed to fetch recipe details."
            };
            error_page(status, message)
        }
    }
}

/// JSON search: `includeIngredients`, `type` and `diet` as in the upstream API
async fn api_search(
    State(search): State<SharedSearch>,
    Query(params): Query<ApiSearchParams>,
) -> Response {
    let query = match SearchQuery::from_input(params.include_ingredients.as_deref().unwrap_or("")) {
        Ok(query) => query
            .with_diet(params.diet.as_deref().unwrap_or(""))
            .with_meal_type(params.meal_type.as_deref().unwrap_or("")),
        Err(e) => return api_error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match search.search(Endpoint::ComplexSearch, &query).await {
        Ok(recipes) => Json(json!({ "results": recipes })).into_response(),
        Err(e) => {
            warn!("API search failed: {}", e);
            api_error(upstream_status(&e), e.to_string())
        }
    }
}

/// JSON details for one recipe
async fn api_get(
    State(search): State<SharedSearch>,
    Query(params): Query<DetailsParams>,
) -> Response {
    let Some(id) = parse_recipe_id(params.id.as_deref()) else {
        return api_error(StatusCode::BAD_REQUEST, "Recipe id must be a number.");
    };

    match search.details(id).await {
        Ok(recipe) => Json(recipe).into_response(),
        Err(e) => {
            warn!("API get for recipe {} failed: {}", id, e);
            api_error(upstream_status(&e), e.to_string())
        }
    }
}

async fn handler_404() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}
