//! Screen-level behavior against a recorded service collection.
//!
//! The fixture in `fixtures/recipes.json` is a trimmed copy of the service's
//! `GET /recipes` response.

use larder_core::list::{filter_recipes, page_count, page_window};
use larder_core::{
    DraftRecipe, Endpoint, ListField, MockRecipeApi, Recipe, RecipeListEngine, RecipePage,
    RecipeSearch, SearchOutcome, Selection, SubmissionController, SubmitOutcome, TextField,
    PAGE_SIZE,
};
use std::fs;
use std::path::Path;

fn fixture() -> Vec<Recipe> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/recipes.json");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    let page: RecipePage = serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
    page.recipes
}

/// Every selection pair the facets offer, wildcard included.
fn all_selections(recipes: &[Recipe]) -> Vec<(Selection, Selection)> {
    let facets = larder_core::Facets::from_recipes(recipes);
    let cuisines = std::iter::once(Selection::All)
        .chain(facets.cuisines.iter().map(|c| Selection::parse(c)))
        .collect::<Vec<_>>();
    let difficulties = std::iter::once(Selection::All)
        .chain(facets.difficulties.iter().map(|d| Selection::parse(d)))
        .collect::<Vec<_>>();

    let mut pairs = Vec::new();
    for cuisine in &cuisines {
        for difficulty in &difficulties {
            pairs.push((cuisine.clone(), difficulty.clone()));
        }
    }
    pairs
}

#[test]
fn test_fixture_facets() {
    let recipes = fixture();
    let facets = larder_core::Facets::from_recipes(&recipes);
    assert_eq!(
        facets.cuisines,
        vec!["Italian", "Asian", "American", "Mexican", "Mediterranean", "Pakistani"]
    );
    assert_eq!(facets.difficulties, vec!["Easy", "Medium"]);
}

#[test]
fn test_wildcard_filter_is_identity() {
    let recipes = fixture();
    for len in 0..=recipes.len() {
        let subset = &recipes[..len];
        let filtered = filter_recipes(subset, &Selection::All, &Selection::All);
        assert_eq!(filtered.len(), len);
        assert!(filtered.iter().zip(subset).all(|(a, b)| *a == b));
    }
}

#[test]
fn test_pages_partition_filtered_collection() {
    let recipes = fixture();
    for (cuisine, difficulty) in all_selections(&recipes) {
        let filtered = filter_recipes(&recipes, &cuisine, &difficulty);
        let pages = page_count(filtered.len());
        assert_eq!(pages, filtered.len().div_ceil(PAGE_SIZE));

        let mut joined = Vec::new();
        for page in 0..pages {
            let window = page_window(&filtered, page);
            assert!(!window.is_empty() && window.len() <= PAGE_SIZE);
            joined.extend(window.iter().map(|r| r.id));
        }
        let expected: Vec<u64> = filtered.iter().map(|r| r.id).collect();
        assert_eq!(joined, expected, "{:?}/{:?}", cuisine, difficulty);
    }
}

#[test]
fn test_accumulator_grows_monotonically_to_filtered_len() {
    let recipes = fixture();
    for (cuisine, difficulty) in all_selections(&recipes) {
        let mut engine = RecipeListEngine::new();
        engine.set_recipes(recipes.clone());
        engine.set_cuisine(cuisine);
        engine.set_difficulty(difficulty);
        engine.set_infinite_scroll(true);

        let target = engine.filtered().len();
        let mut previous = engine.accumulator().len();
        assert!(previous <= target);
        while engine.has_more() {
            engine.load_more();
            let now = engine.accumulator().len();
            assert!(now > previous);
            assert!(now <= target);
            previous = now;
        }
        assert_eq!(previous, target);

        let revealed: Vec<u64> = engine.accumulator().iter().map(|r| r.id).collect();
        let expected: Vec<u64> = engine.filtered().iter().map(|r| r.id).collect();
        assert_eq!(revealed, expected);
    }
}

#[tokio::test]
async fn test_list_screen_end_to_end() {
    let api = MockRecipeApi::new().with_recipes(fixture());
    let mut engine = RecipeListEngine::new();
    engine.load(&api).await;

    engine.set_cuisine(Selection::parse("Italian"));
    engine.set_difficulty(Selection::parse("Easy"));
    let names: Vec<&str> = engine.page_items().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Classic Margherita Pizza",
            "Tomato Basil Bruschetta",
            "Caprese Salad"
        ]
    );
    assert_eq!(engine.page_count(), 1);
    assert_eq!(api.calls(Endpoint::List), 1);
}

#[tokio::test]
async fn test_add_then_edit_dosa() {
    let api = MockRecipeApi::new().with_recipes(fixture());
    let mut controller = SubmissionController::new();

    {
        let draft = controller.draft_mut();
        draft.set_text(TextField::Name, "Masala Dosa");
        draft.set_item(ListField::Ingredients, 0, "rice").unwrap();
        draft.set_item(ListField::Instructions, 0, "soak rice").unwrap();
    }
    let SubmitOutcome::Created(id) = controller.submit(&api).await.unwrap() else {
        panic!("expected a created recipe");
    };
    assert_eq!(controller.submitted().len(), 1);
    assert_eq!(controller.submitted()[0].name, "Masala Dosa");

    controller.begin_edit(id).unwrap();
    controller
        .draft_mut()
        .set_text(TextField::Name, "Updated Dosa");
    assert_eq!(
        controller.submit(&api).await.unwrap(),
        SubmitOutcome::Updated(id)
    );

    assert_eq!(controller.submitted().len(), 1);
    assert_eq!(controller.submitted()[0].id, id);
    assert_eq!(controller.submitted()[0].name, "Updated Dosa");
    assert_eq!(controller.draft(), &DraftRecipe::default());
    assert_eq!(api.calls(Endpoint::Add), 1);
}

#[tokio::test]
async fn test_edit_after_creates_sharing_an_id() {
    let api = MockRecipeApi::new().with_fixed_id(51);
    let mut controller = SubmissionController::new();

    for name in ["Masala Dosa", "Idli"] {
        controller.draft_mut().set_text(TextField::Name, name);
        assert_eq!(
            controller.submit(&api).await.unwrap(),
            SubmitOutcome::Created(51)
        );
    }

    controller.begin_edit(51).unwrap();
    controller
        .draft_mut()
        .set_text(TextField::Name, "Updated Dosa");
    controller.submit(&api).await.unwrap();

    let entries: Vec<(u64, &str)> = controller
        .submitted()
        .iter()
        .map(|r| (r.id, r.name.as_str()))
        .collect();
    assert_eq!(entries, vec![(51, "Updated Dosa"), (51, "Idli")]);
    assert_eq!(api.calls(Endpoint::Add), 2);
}

#[tokio::test]
async fn test_empty_search_makes_no_request() {
    let api = MockRecipeApi::new().with_recipes(fixture());
    let mut search = RecipeSearch::new();

    assert_eq!(search.submit(&api).await, SearchOutcome::Skipped);
    assert_eq!(api.total_calls(), 0);
    assert!(search.results().is_empty());

    search.set_query("chicken");
    assert_eq!(search.submit(&api).await, SearchOutcome::Found(4));
}
