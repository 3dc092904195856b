pub mod console;
pub mod error;
pub mod fetch;
pub mod model;
pub mod query;
pub mod settings;
pub mod web;

pub use error::SearchError;
pub use fetch::{RecipeSearch, SpoonacularClient};
pub use model::{Recipe, RecipeDetails, RecipeList};
pub use query::{
    build_details_url, build_search_url, normalize_diet, parse_ingredients, Endpoint, SearchQuery,
};
pub use settings::Settings;
