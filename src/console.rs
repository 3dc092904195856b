//! Interactive terminal front end.
//!
//! Prompts for ingredients, a dietary restriction and a meal type, runs a
//! `complexSearch` and prints one line per recipe, then asks whether to go
//! again.

use std::io::{self, BufRead, Write};

use log::info;

use crate::fetch::RecipeSearch;
use crate::model::RecipeList;
use crate::query::{Endpoint, SearchQuery};
use crate::SearchError;

const INGREDIENTS_PROMPT: &str =
    "Enter the ingredients you have separated by a comma (e.g., apples, flour, sugar): ";
const DIET_PROMPT: &str =
    "Enter any dietary restrictions (e.g., vegetarian, vegan, gluten-free): ";
const MEAL_TYPE_PROMPT: &str =
    "What type of meal are you looking for? (e.g., breakfast, lunch, dinner): ";
const AGAIN_PROMPT: &str = "\nWould you like to search again or modify your choices? (yes/no): ";

pub const NO_RECIPES_MESSAGE: &str = "No recipes found. Try different ingredients or settings.";
pub const FAREWELL_MESSAGE: &str = "Thank you for using the recipe finder!";

/// What the user typed in one round of prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub ingredients: String,
    pub diet: String,
    pub meal_type: String,
}

impl Preferences {
    pub fn to_query(&self) -> Result<SearchQuery, SearchError> {
        Ok(SearchQuery::from_input(&self.ingredients)?
            .with_diet(&self.diet)
            .with_meal_type(&self.meal_type))
    }
}

/// Print a prompt and read one line. `None` once input is exhausted.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn read_preferences<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<Preferences>> {
    let Some(ingredients) = prompt(input, output, INGREDIENTS_PROMPT)? else {
        return Ok(None);
    };
    let diet = prompt(input, output, DIET_PROMPT)?.unwrap_or_default();
    let meal_type = prompt(input, output, MEAL_TYPE_PROMPT)?.unwrap_or_default();
    Ok(Some(Preferences {
        ingredients,
        diet,
        meal_type,
    }))
}

/// Print the recipe list, or the empty-state message
pub fn print_recipes<W: Write>(output: &mut W, recipes: &RecipeList) -> io::Result<()> {
    if recipes.is_empty() {
        return writeln!(output, "{NO_RECIPES_MESSAGE}");
    }

    writeln!(output, "\nRecipes you can make:")?;
    for recipe in recipes {
        writeln!(output, " - {} (ID: {})", recipe.title, recipe.id)?;
    }
    Ok(())
}

/// Run one search and print whatever came back
pub async fn search_and_print<S, W>(
    search: &S,
    output: &mut W,
    preferences: &Preferences,
) -> io::Result<()>
where
    S: RecipeSearch + ?Sized,
    W: Write,
{
    let query = match preferences.to_query() {
        Ok(query) => query,
        Err(e) => return writeln!(output, "{e}"),
    };
    info!("Searching recipes for {:?}", query.ingredients());

    writeln!(output, "Fetching recipes...")?;
    match search.search(Endpoint::ComplexSearch, &query).await {
        Ok(recipes) => print_recipes(output, &recipes),
        Err(e) => writeln!(output, "An error occurred: {e}"),
    }
}

/// Prompt, search, print, repeat until the user stops answering "yes"
pub async fn run<S, R, W>(search: &S, input: &mut R, output: &mut W) -> io::Result<()>
where
    S: RecipeSearch + ?Sized,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(preferences) = read_preferences(input, output)? else {
            break;
        };
        search_and_print(search, output, &preferences).await?;

        let again = prompt(input, output, AGAIN_PROMPT)?.unwrap_or_default();
        if !again.trim().eq_ignore_ascii_case("yes") {
            break;
        }
    }

    writeln!(output, "{FAREWELL_MESSAGE}")?;
    Ok(())
}
