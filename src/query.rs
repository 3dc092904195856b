use url::Url;

use crate::SearchError;

/// Search endpoints offered by the recipe API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/recipes/findByIngredients`, answers with a bare array
    FindByIngredients,
    /// `/recipes/complexSearch`, answers with `{"results": [...]}`
    ComplexSearch,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::FindByIngredients => "recipes/findByIngredients",
            Endpoint::ComplexSearch => "recipes/complexSearch",
        }
    }

    /// Number of results requested when nothing is configured
    pub fn default_number(&self) -> u32 {
        match self {
            Endpoint::FindByIngredients => 10,
            Endpoint::ComplexSearch => 5,
        }
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    ingredients: Vec<String>,
    diet: Option<String>,
    meal_type: Option<String>,
}

impl SearchQuery {
    /// Build a query from already split ingredients. At least one is required.
    pub fn new(ingredients: Vec<String>) -> Result<Self, SearchError> {
        if ingredients.is_empty() {
            return Err(SearchError::EmptyIngredients);
        }
        Ok(Self {
            ingredients,
            diet: None,
            meal_type: None,
        })
    }

    /// Build a query from the raw comma-separated text a user typed
    pub fn from_input(input: &str) -> Result<Self, SearchError> {
        Self::new(parse_ingredients(input))
    }

    /// Restrict results to a diet. Blank and `none` clear the restriction.
    pub fn with_diet(mut self, diet: &str) -> Self {
        self.diet = normalize_diet(diet);
        self
    }

    pub fn with_meal_type(mut self, meal_type: &str) -> Self {
        let meal_type = meal_type.trim();
        self.meal_type = (!meal_type.is_empty()).then(|| meal_type.to_string());
        self
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn diet(&self) -> Option<&str> {
        self.diet.as_deref()
    }

    pub fn meal_type(&self) -> Option<&str> {
        self.meal_type.as_deref()
    }
}

/// Split "apples, flour,sugar" into trimmed, non-empty items
pub fn parse_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// `None` for a blank value or any casing of "none"
pub fn normalize_diet(diet: &str) -> Option<String> {
    let diet = diet.trim();
    if diet.is_empty() || diet.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(diet.to_string())
    }
}

/// Assemble the full request URL for a search.
///
/// Parameters are form-urlencoded, so commas between ingredients travel as
/// `%2C` and spaces as `+`.
pub fn build_search_url(
    base_url: &Url,
    endpoint: Endpoint,
    query: &SearchQuery,
    api_key: &str,
    number: u32,
) -> Result<Url, SearchError> {
    let mut url = join_path(base_url, endpoint.path())?;
    let ingredients = query.ingredients.join(",");

    {
        let mut pairs = url.query_pairs_mut();
        match endpoint {
            Endpoint::FindByIngredients => {
                pairs
                    .append_pair("ingredients", &ingredients)
                    .append_pair("apiKey", api_key)
                    .append_pair("number", &number.to_string());
            }
            Endpoint::ComplexSearch => {
                pairs
                    .append_pair("apiKey", api_key)
                    .append_pair("includeIngredients", &ingredients);
                if let Some(meal_type) = &query.meal_type {
                    pairs.append_pair("type", meal_type);
                }
                pairs
                    .append_pair("addRecipeInformation", "true")
                    .append_pair("number", &number.to_string());
                if let Some(diet) = &query.diet {
                    pairs.append_pair("diet", diet);
                }
            }
        }
    }

    Ok(url)
}

/// URL of the full information record for one recipe
pub fn build_details_url(base_url: &Url, id: i64, api_key: &str) -> Result<Url, SearchError> {
    let mut url = join_path(base_url, &format!("recipes/{id}/information"))?;
    url.query_pairs_mut().append_pair("apiKey", api_key);
    Ok(url)
}

// Url::join drops the last path segment unless the base ends with '/'
fn join_path(base_url: &Url, path: &str) -> Result<Url, SearchError> {
    if base_url.path().ends_with('/') {
        Ok(base_url.join(path)?)
    } else {
        let mut base = base_url.clone();
        base.set_path(&format!("{}/", base_url.path()));
        Ok(base.join(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.spoonacular.com").unwrap()
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    #[test]
    fn test_parse_ingredients() {
        assert_eq!(
            parse_ingredients(" apples, flour ,,sugar "),
            vec!["apples", "flour", "sugar"]
        );
        assert!(parse_ingredients(" , ").is_empty());
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        assert!(matches!(
            SearchQuery::from_input("  "),
            Err(SearchError::EmptyIngredients)
        ));
        assert!(matches!(
            SearchQuery::new(Vec::new()),
            Err(SearchError::EmptyIngredients)
        ));
    }

    #[test]
    fn test_find_by_ingredients_url() {
        let query = SearchQuery::from_input("eggs,milk").unwrap();
        let url = build_search_url(&base(), Endpoint::FindByIngredients, &query, "k3y", 10).unwrap();

        assert_eq!(url.path(), "/recipes/findByIngredients");
        assert!(url.as_str().contains("ingredients=eggs%2Cmilk"));
        assert_eq!(param(&url, "apiKey").as_deref(), Some("k3y"));
        assert_eq!(param(&url, "number").as_deref(), Some("10"));
        assert_eq!(param(&url, "diet"), None);
    }

    #[test]
    fn test_ingredients_are_percent_encoded() {
        for input in ["green beans", "crème fraîche", "salt&pepper", "50% cocoa", "a=b"] {
            let query = SearchQuery::from_input(input).unwrap();
            let url = build_search_url(&base(), Endpoint::ComplexSearch, &query, "k", 5).unwrap();
            assert_eq!(param(&url, "includeIngredients").as_deref(), Some(input));
            let encoded: String = url::form_urlencoded::byte_serialize(input.as_bytes()).collect();
            assert!(url
                .query()
                .unwrap()
                .contains(&format!("includeIngredients={encoded}&")));
        }
    }

    #[test]
    fn test_diet_omitted_when_blank_or_none() {
        for diet in ["", "   ", "none", "None", "NONE"] {
            let query = SearchQuery::from_input("rice").unwrap().with_diet(diet);
            let url = build_search_url(&base(), Endpoint::ComplexSearch, &query, "k", 5).unwrap();
            assert_eq!(param(&url, "diet"), None, "diet {diet:?} should be dropped");
        }
    }

    #[test]
    fn test_diet_included_otherwise() {
        let query = SearchQuery::from_input("rice").unwrap().with_diet(" vegan ");
        let url = build_search_url(&base(), Endpoint::ComplexSearch, &query, "k", 5).unwrap();
        assert_eq!(param(&url, "diet").as_deref(), Some("vegan"));
    }

    #[test]
    fn test_complex_search_url() {
        let query = SearchQuery::from_input("apples, flour")
            .unwrap()
            .with_meal_type("breakfast");
        let url = build_search_url(&base(), Endpoint::ComplexSearch, &query, "k", 5).unwrap();

        assert_eq!(url.path(), "/recipes/complexSearch");
        assert_eq!(param(&url, "includeIngredients").as_deref(), Some("apples,flour"));
        assert_eq!(param(&url, "type").as_deref(), Some("breakfast"));
        assert_eq!(param(&url, "addRecipeInformation").as_deref(), Some("true"));
        assert_eq!(param(&url, "number").as_deref(), Some("5"));
    }

    #[test]
    fn test_blank_meal_type_omitted() {
        let query = SearchQuery::from_input("apples").unwrap().with_meal_type(" ");
        let url = build_search_url(&base(), Endpoint::ComplexSearch, &query, "k", 5).unwrap();
        assert_eq!(param(&url, "type"), None);
    }

    #[test]
    fn test_details_url() {
        let url = build_details_url(&base(), 716429, "k3y").unwrap();
        assert_eq!(url.path(), "/recipes/716429/information");
        assert_eq!(param(&url, "apiKey").as_deref(), Some("k3y"));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let base = Url::parse("http://127.0.0.1:1234/proxy").unwrap();
        let query = SearchQuery::from_input("eggs").unwrap();
        let url = build_search_url(&base, Endpoint::FindByIngredients, &query, "k", 1).unwrap();
        assert_eq!(url.path(), "/proxy/recipes/findByIngredients");
    }
}
