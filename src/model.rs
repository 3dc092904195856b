use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::SearchError;

/// A recipe as returned by the search API.
///
/// Only `id` and `title` are required. `image` is typed because the web
/// templates show it; everything else is carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Recipes in the order the API returned them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeList(pub Vec<Recipe>);

impl RecipeList {
    /// Normalize either response shape into a list.
    ///
    /// `findByIngredients` answers with a bare array, `complexSearch` with an
    /// object holding a `results` array. An object without `results` is an
    /// empty result set.
    pub fn from_json(body: Value) -> Result<Self, SearchError> {
        let items = match body {
            Value::Array(items) => items,
            Value::Object(mut object) => match object.remove("results") {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(SearchError::MalformedResponse(format!(
                        "expected `results` to be an array, got {}",
                        json_kind(&other)
                    )))
                }
            },
            other => {
                return Err(SearchError::MalformedResponse(format!(
                    "expected an array or object, got {}",
                    json_kind(&other)
                )))
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| {
                    SearchError::MalformedResponse(format!("recipe #{index}: {e}"))
                })
            })
            .collect::<Result<Vec<Recipe>, _>>()
            .map(RecipeList)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.0.iter()
    }
}

impl IntoIterator for RecipeList {
    type Item = Recipe;
    type IntoIter = std::vec::IntoIter<Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecipeList {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Everything the details page shows about one recipe
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetails {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    /// Ingredient names, without amounts
    pub ingredients: Vec<String>,
    pub instructions: String,
    /// First dish type the API lists, e.g. "main course"
    pub meal_type: Option<String>,
    /// Diet tags derived from the vegetarian/vegan/glutenFree flags
    pub diets: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InformationResponse {
    id: i64,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    dish_types: Option<Vec<String>>,
    #[serde(default)]
    vegetarian: bool,
    #[serde(default)]
    vegan: bool,
    #[serde(default)]
    gluten_free: bool,
    #[serde(default)]
    extended_ingredients: Option<Vec<ExtendedIngredient>>,
    #[serde(default)]
    instructions: Option<String>,
}

#[derive(Deserialize)]
struct ExtendedIngredient {
    name: String,
}

impl RecipeDetails {
    /// Normalize a `/recipes/{id}/information` body
    pub fn from_json(body: Value) -> Result<Self, SearchError> {
        let info: InformationResponse = serde_json::from_value(body)
            .map_err(|e| SearchError::MalformedResponse(format!("recipe information: {e}")))?;

        let diets = [
            (info.vegetarian, "vegetarian"),
            (info.vegan, "vegan"),
            (info.gluten_free, "gluten free"),
        ]
        .into_iter()
        .filter(|(flag, _)| *flag)
        .map(|(_, name)| name.to_string())
        .collect();

        Ok(Self {
            id: info.id,
            title: info.title,
            image: info.image,
            ingredients: info
                .extended_ingredients
                .unwrap_or_default()
                .into_iter()
                .map(|ingredient| ingredient.name)
                .collect(),
            instructions: info.instructions.unwrap_or_default(),
            meal_type: info.dish_types.and_then(|types| types.into_iter().next()),
            diets,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_results_object() {
        let list = RecipeList::from_json(json!({"results": [{"id": 1, "title": "Soup"}]})).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.0[0].id, 1);
        assert_eq!(list.0[0].title, "Soup");
    }

    #[test]
    fn test_bare_array_keeps_order_and_extra_fields() {
        let body = json!([
            {"id": 7, "title": "Omelette", "image": "https://img/7.jpg", "usedIngredientCount": 2},
            {"id": 3, "title": "Crepes"}
        ]);
        let list = RecipeList::from_json(body).unwrap();
        let titles: Vec<&str> = list.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Omelette", "Crepes"]);
        assert_eq!(list.0[0].image.as_deref(), Some("https://img/7.jpg"));
        assert_eq!(list.0[0].extra.get("usedIngredientCount"), Some(&json!(2)));
        assert!(list.0[1].image.is_none());
    }

    #[test]
    fn test_object_without_results_is_empty() {
        let list = RecipeList::from_json(json!({"offset": 0, "totalResults": 0})).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_details_from_information() {
        let body = json!({
            "id": 716429,
            "title": "Pasta with Garlic",
            "image": "https://img.example/716429.jpg",
            "dishTypes": ["lunch", "main course"],
            "vegetarian": true,
            "vegan": false,
            "glutenFree": true,
            "extendedIngredients": [
                {"name": "garlic", "amount": 2.0},
                {"name": "pasta", "amount": 200.0}
            ],
            "instructions": "Boil pasta. Add garlic.",
            "servings": 2
        });
        let details = RecipeDetails::from_json(body).unwrap();

        assert_eq!(details.id, 716429);
        assert_eq!(details.title, "Pasta with Garlic");
        assert_eq!(details.ingredients, ["garlic", "pasta"]);
        assert_eq!(details.meal_type.as_deref(), Some("lunch"));
        assert_eq!(details.diets, ["vegetarian", "gluten free"]);
        assert_eq!(details.instructions, "Boil pasta. Add garlic.");
    }

    #[test]
    fn test_details_tolerates_missing_and_null_fields() {
        let body = json!({"id": 1, "title": "Toast", "instructions": null, "dishTypes": null});
        let details = RecipeDetails::from_json(body).unwrap();

        assert!(details.ingredients.is_empty());
        assert!(details.diets.is_empty());
        assert!(details.meal_type.is_none());
        assert!(details.image.is_none());
        assert_eq!(details.instructions, "");
    }

    #[test]
    fn test_details_without_title_is_malformed() {
        assert!(matches!(
            RecipeDetails::from_json(json!({"id": 1})),
            Err(SearchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_unexpected_shapes_are_rejected() {
        assert!(matches!(
            RecipeList::from_json(json!("nope")),
            Err(SearchError::MalformedResponse(_))
        ));
        assert!(matches!(
            RecipeList::from_json(json!({"results": {"id": 1}})),
            Err(SearchError::MalformedResponse(_))
        ));
        assert!(matches!(
            RecipeList::from_json(json!([{"title": "No id"}])),
            Err(SearchError::MalformedResponse(_))
        ));
    }
}
