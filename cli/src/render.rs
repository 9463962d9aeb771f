//! Plain-text rendering of each screen.
//!
//! Each screen is a `Display` wrapper; the `*_screen` helpers render to a `String`.

use larder_core::list::ALL;
use larder_core::{
    DetailState, ListField, LoadState, Recipe, RecipeListEngine, RecipeSearch, Route,
    SubmissionController, TaskList, TextField,
};
use std::fmt::{self, Display, Formatter};

/// Persistent header with the navigation links.
pub struct Header<'a>(pub &'a Route);

impl Display for Header<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Larder")?;
        for (label, route) in Route::nav() {
            if &route == self.0 {
                write!(f, " | [{}]", label)?;
            } else {
                write!(f, " | {} ({})", label, route.path())?;
            }
        }
        writeln!(f)
    }
}

pub struct Card<'a>(pub &'a Recipe);

impl Display for Card<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let recipe = self.0;
        write!(
            f,
            "#{} {} - {} / {}",
            recipe.id, recipe.name, recipe.cuisine, recipe.difficulty
        )?;
        if let Some(summary) = recipe.summary() {
            write!(f, "\n    {}", summary)?;
        }
        Ok(())
    }
}

pub struct Detail<'a>(pub &'a Recipe);

impl Display for Detail<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let recipe = self.0;
        writeln!(f, "{}", recipe.name)?;
        writeln!(
            f,
            "{} cuisine • {}",
            recipe.cuisine,
            recipe.meal_type.join(", ")
        )?;
        writeln!(f, "Image: {}", recipe.image)?;
        writeln!(f)?;
        writeln!(f, "Prep: {} mins", recipe.prep_time_minutes)?;
        writeln!(f, "Cook: {} mins", recipe.cook_time_minutes)?;
        writeln!(f, "Servings: {}", recipe.servings)?;
        writeln!(f, "Difficulty: {}", recipe.difficulty)?;
        writeln!(f, "Calories: {}", recipe.calories_per_serving)?;
        writeln!(
            f,
            "Rating: {} ({} reviews)",
            recipe.rating, recipe.review_count
        )?;

        writeln!(f, "\nIngredients")?;
        for item in &recipe.ingredients {
            writeln!(f, "  - {}", item)?;
        }

        writeln!(f, "\nInstructions")?;
        for (i, step) in recipe.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, step)?;
        }
        Ok(())
    }
}

/// Facet choices with the selected one bracketed, wildcard first.
struct Choices<'a> {
    values: &'a [String],
    selected: &'a str,
}

impl Display for Choices<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let all = std::iter::once(ALL).chain(self.values.iter().map(String::as_str));
        for (i, value) in all.enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if value == self.selected {
                write!(f, "[{}]", value)?;
            } else {
                write!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}

pub struct ListScreen<'a>(pub &'a RecipeListEngine);

impl Display for ListScreen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let engine = self.0;
        match engine.state() {
            LoadState::Loading => return writeln!(f, "Loading..."),
            LoadState::Failed(error) => return writeln!(f, "Could not load recipes: {}", error),
            LoadState::Ready => {}
        }

        let facets = engine.facets();
        writeln!(f, "Recipes")?;
        writeln!(
            f,
            "Difficulty: {}",
            Choices {
                values: &facets.difficulties,
                selected: engine.difficulty().as_str(),
            }
        )?;
        writeln!(
            f,
            "Cuisine: {}",
            Choices {
                values: &facets.cuisines,
                selected: engine.cuisine().as_str(),
            }
        )?;
        writeln!(
            f,
            "Infinite scroll: {}\n",
            if engine.infinite_scroll() { "on" } else { "off" }
        )?;

        if engine.infinite_scroll() {
            for recipe in engine.accumulator() {
                writeln!(f, "{}", Card(recipe))?;
            }
            if engine.has_more() {
                writeln!(
                    f,
                    "\nShowing {} of {}. Loading more with `more`.",
                    engine.accumulator().len(),
                    engine.filtered().len()
                )?;
            } else {
                writeln!(f, "\nNo more recipes")?;
            }
            return Ok(());
        }

        let items = engine.page_items();
        if items.is_empty() {
            writeln!(f, "No recipes match these filters.")?;
        }
        for recipe in items {
            writeln!(f, "{}", Card(recipe))?;
        }
        let pages = engine.page_count();
        if pages > 0 {
            writeln!(
                f,
                "\n← Previous  Page {} of {}  Next →",
                engine.current_page() + 1,
                pages
            )?;
        }
        Ok(())
    }
}

pub struct DetailScreen<'a>(pub &'a DetailState);

impl Display for DetailScreen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            DetailState::Loading => writeln!(f, "Loading..."),
            DetailState::NotFound => writeln!(f, "Recipe not found"),
            DetailState::Loaded(recipe) => write!(f, "{}", Detail(recipe)),
        }
    }
}

pub struct SearchScreen<'a>(pub &'a RecipeSearch);

impl Display for SearchScreen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let search = self.0;
        writeln!(f, "Recipe Search")?;
        let button = if search.is_loading() {
            "[Searching...]"
        } else {
            "[Search]"
        };
        writeln!(f, "Query: {:?} {}", search.query(), button)?;
        if let Some(error) = search.error() {
            writeln!(f, "{}", error)?;
        }
        writeln!(f)?;
        if search.results().is_empty() {
            writeln!(f, "No recipes found")?;
        }
        for recipe in search.results() {
            writeln!(f, "{}", Card(recipe))?;
        }
        Ok(())
    }
}

pub struct AddScreen<'a>(pub &'a SubmissionController);

impl Display for AddScreen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let controller = self.0;
        let draft = controller.draft();
        match controller.editing() {
            Some(id) => writeln!(f, "Edit Recipe #{}", id)?,
            None => writeln!(f, "Add Recipe")?,
        }

        for field in TextField::ALL {
            writeln!(
                f,
                "  {:<22} {:<20} = {:?}",
                field.label(),
                field.as_str(),
                draft.text(*field)
            )?;
        }
        for field in ListField::ALL {
            writeln!(f, "  {}:", field.as_str())?;
            for (i, value) in draft.list(*field).iter().enumerate() {
                writeln!(f, "    {} {}: {:?}", field.slot_label(), i + 1, value)?;
            }
        }

        if !controller.submitted().is_empty() {
            writeln!(f, "\nSubmitted")?;
            for (i, recipe) in controller.submitted().iter().enumerate() {
                writeln!(f, "{:>3}. {}", i + 1, Card(recipe))?;
            }
        }
        Ok(())
    }
}

pub struct ScratchScreen<'a>(pub &'a TaskList);

impl Display for ScratchScreen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tasks = self.0;
        writeln!(f, "Create")?;
        let action = if tasks.editing().is_some() {
            "Update"
        } else {
            "Add"
        };
        writeln!(f, "Title: {:?} [{} Task]", tasks.title(), action)?;
        for task in tasks.tasks() {
            writeln!(f, "  {:>6}  {}", task.id, task.title)?;
        }
        Ok(())
    }
}

pub fn header(current: &Route) -> String {
    Header(current).to_string()
}

pub fn recipe_card(recipe: &Recipe) -> String {
    Card(recipe).to_string()
}

pub fn recipe_detail(recipe: &Recipe) -> String {
    Detail(recipe).to_string()
}

pub fn list_screen(engine: &RecipeListEngine) -> String {
    ListScreen(engine).to_string()
}

pub fn detail_screen(state: &DetailState) -> String {
    DetailScreen(state).to_string()
}

pub fn search_screen(search: &RecipeSearch) -> String {
    SearchScreen(search).to_string()
}

pub fn add_screen(controller: &SubmissionController) -> String {
    AddScreen(controller).to_string()
}

pub fn scratch_screen(tasks: &TaskList) -> String {
    ScratchScreen(tasks).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::Selection;

    fn recipe(id: u64, name: &str, cuisine: &str, difficulty: &str) -> Recipe {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "cuisine": cuisine,
            "difficulty": difficulty,
            "instructions": ["Step one", "Step two"],
            "mealType": ["Lunch", "Dinner"],
            "rating": 4.5,
            "reviewCount": 12
        }))
        .unwrap()
    }

    #[test]
    fn test_card_uses_first_instruction() {
        let card = recipe_card(&recipe(3, "Caprese Salad", "Italian", "Easy"));
        assert_eq!(card, "#3 Caprese Salad - Italian / Easy\n    Step one");
    }

    #[test]
    fn test_detail_lists_meal_types_and_steps() {
        let text = recipe_detail(&recipe(3, "Caprese Salad", "Italian", "Easy"));
        assert!(text.contains("Italian cuisine • Lunch, Dinner"));
        assert!(text.contains("Rating: 4.5 (12 reviews)"));
        assert!(text.contains("  2. Step two"));
    }

    #[test]
    fn test_list_screen_marks_selection_and_pager() {
        let mut engine = RecipeListEngine::new();
        engine.set_recipes(vec![
            recipe(1, "Pizza", "Italian", "Easy"),
            recipe(2, "Stir-Fry", "Asian", "Medium"),
        ]);
        engine.set_cuisine(Selection::parse("Asian"));

        let text = list_screen(&engine);
        assert!(text.contains("Cuisine: All Italian [Asian]"));
        assert!(text.contains("Difficulty: [All] Easy Medium"));
        assert!(text.contains("#2 Stir-Fry"));
        assert!(!text.contains("#1 Pizza"));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn test_list_screen_end_message() {
        let mut engine = RecipeListEngine::new();
        engine.set_recipes(vec![recipe(1, "Pizza", "Italian", "Easy")]);
        engine.set_infinite_scroll(true);
        assert!(list_screen(&engine).contains("No more recipes"));
    }

    #[test]
    fn test_detail_not_found() {
        assert_eq!(detail_screen(&DetailState::NotFound), "Recipe not found\n");
    }

    #[test]
    fn test_header_marks_current_route() {
        let text = header(&Route::Search);
        assert!(text.contains("[Search]"));
        assert!(text.contains("Recipes (/)"));
    }
}
