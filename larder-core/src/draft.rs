//! String-typed staging form for a recipe, coerced to [`NewRecipe`] on submit.

use crate::error::FormError;
use crate::types::{NewRecipe, Recipe};

/// Scalar inputs of the recipe form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Image,
    PrepTimeMinutes,
    CookTimeMinutes,
    Servings,
    Difficulty,
    Cuisine,
    CaloriesPerServing,
    UserId,
    Rating,
    ReviewCount,
}

impl TextField {
    /// Form order.
    pub const ALL: &'static [TextField] = &[
        TextField::Name,
        TextField::PrepTimeMinutes,
        TextField::CookTimeMinutes,
        TextField::Servings,
        TextField::Difficulty,
        TextField::Cuisine,
        TextField::CaloriesPerServing,
        TextField::UserId,
        TextField::Image,
        TextField::Rating,
        TextField::ReviewCount,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Image => "image",
            TextField::PrepTimeMinutes => "prepTimeMinutes",
            TextField::CookTimeMinutes => "cookTimeMinutes",
            TextField::Servings => "servings",
            TextField::Difficulty => "difficulty",
            TextField::Cuisine => "cuisine",
            TextField::CaloriesPerServing => "caloriesPerServing",
            TextField::UserId => "userId",
            TextField::Rating => "rating",
            TextField::ReviewCount => "reviewCount",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextField::Name => "Name",
            TextField::Image => "Image URL",
            TextField::PrepTimeMinutes => "Prep Time (minutes)",
            TextField::CookTimeMinutes => "Cook Time (minutes)",
            TextField::Servings => "Servings",
            TextField::Difficulty => "Difficulty",
            TextField::Cuisine => "Cuisine",
            TextField::CaloriesPerServing => "Calories Per Serving",
            TextField::UserId => "User ID",
            TextField::Rating => "Rating",
            TextField::ReviewCount => "Review Count",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        TextField::ALL.iter().copied().find(|f| f.as_str() == s)
    }
}

/// Growable list inputs of the recipe form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Ingredients,
    Instructions,
    Tags,
    MealType,
}

impl ListField {
    pub const ALL: &'static [ListField] = &[
        ListField::Ingredients,
        ListField::Instructions,
        ListField::Tags,
        ListField::MealType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListField::Ingredients => "ingredients",
            ListField::Instructions => "instructions",
            ListField::Tags => "tags",
            ListField::MealType => "mealType",
        }
    }

    /// Placeholder prefix for one slot, e.g. "Step 2".
    pub fn slot_label(&self) -> &'static str {
        match self {
            ListField::Ingredients => "Ingredient",
            ListField::Instructions => "Step",
            ListField::Tags => "Tag",
            ListField::MealType => "Meal Type",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        ListField::ALL.iter().copied().find(|f| f.as_str() == s)
    }
}

/// The in-progress recipe form. Every scalar is held as typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRecipe {
    pub name: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time_minutes: String,
    pub cook_time_minutes: String,
    pub servings: String,
    pub difficulty: String,
    pub cuisine: String,
    pub calories_per_serving: String,
    pub rating: String,
    pub review_count: String,
    pub tags: Vec<String>,
    pub meal_type: Vec<String>,
    pub user_id: String,
}

impl Default for DraftRecipe {
    fn default() -> Self {
        Self {
            name: String::new(),
            image: "https://cdn.dummyjson.com/recipe-images/28.webp".to_string(),
            ingredients: vec![String::new()],
            instructions: vec![String::new()],
            prep_time_minutes: "15".to_string(),
            cook_time_minutes: "15".to_string(),
            servings: "4".to_string(),
            difficulty: "Easy".to_string(),
            cuisine: "Indian".to_string(),
            calories_per_serving: "40".to_string(),
            rating: "4".to_string(),
            review_count: "20".to_string(),
            tags: vec!["Dosa".to_string(), "Breakfast".to_string()],
            meal_type: vec!["Lunch".to_string()],
            user_id: "2".to_string(),
        }
    }
}

impl DraftRecipe {
    /// Pre-fill from an existing recipe, rendering numbers back to text.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            prep_time_minutes: recipe.prep_time_minutes.to_string(),
            cook_time_minutes: recipe.cook_time_minutes.to_string(),
            servings: recipe.servings.to_string(),
            difficulty: recipe.difficulty.clone(),
            cuisine: recipe.cuisine.clone(),
            calories_per_serving: recipe.calories_per_serving.to_string(),
            rating: recipe.rating.to_string(),
            review_count: recipe.review_count.to_string(),
            tags: recipe.tags.clone(),
            meal_type: recipe.meal_type.clone(),
            user_id: recipe.user_id.to_string(),
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Image => &mut self.image,
            TextField::PrepTimeMinutes => &mut self.prep_time_minutes,
            TextField::CookTimeMinutes => &mut self.cook_time_minutes,
            TextField::Servings => &mut self.servings,
            TextField::Difficulty => &mut self.difficulty,
            TextField::Cuisine => &mut self.cuisine,
            TextField::CaloriesPerServing => &mut self.calories_per_serving,
            TextField::UserId => &mut self.user_id,
            TextField::Rating => &mut self.rating,
            TextField::ReviewCount => &mut self.review_count,
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Image => &self.image,
            TextField::PrepTimeMinutes => &self.prep_time_minutes,
            TextField::CookTimeMinutes => &self.cook_time_minutes,
            TextField::Servings => &self.servings,
            TextField::Difficulty => &self.difficulty,
            TextField::Cuisine => &self.cuisine,
            TextField::CaloriesPerServing => &self.calories_per_serving,
            TextField::UserId => &self.user_id,
            TextField::Rating => &self.rating,
            TextField::ReviewCount => &self.review_count,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.text_mut(field) = value.into();
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Ingredients => &self.ingredients,
            ListField::Instructions => &self.instructions,
            ListField::Tags => &self.tags,
            ListField::MealType => &self.meal_type,
        }
    }

    fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Ingredients => &mut self.ingredients,
            ListField::Instructions => &mut self.instructions,
            ListField::Tags => &mut self.tags,
            ListField::MealType => &mut self.meal_type,
        }
    }

    /// Overwrite one slot of a list field in place.
    pub fn set_item(
        &mut self,
        field: ListField,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let list = self.list_mut(field);
        let len = list.len();
        let slot = list.get_mut(index).ok_or(FormError::IndexOutOfRange {
            field: field.as_str(),
            index,
            len,
        })?;
        *slot = value.into();
        Ok(())
    }

    /// Append one empty slot. Lists never shrink.
    pub fn push_slot(&mut self, field: ListField) -> usize {
        let list = self.list_mut(field);
        list.push(String::new());
        list.len() - 1
    }

    /// Replace a whole list field.
    pub fn set_list(&mut self, field: ListField, values: Vec<String>) {
        *self.list_mut(field) = values;
    }

    /// Convert to the typed payload. Numeric text is trimmed before parsing.
    pub fn coerce(&self) -> Result<NewRecipe, FormError> {
        Ok(NewRecipe {
            name: self.name.clone(),
            image: self.image.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            prep_time_minutes: parse_number(TextField::PrepTimeMinutes, &self.prep_time_minutes)?,
            cook_time_minutes: parse_number(TextField::CookTimeMinutes, &self.cook_time_minutes)?,
            servings: parse_number(TextField::Servings, &self.servings)?,
            difficulty: self.difficulty.clone(),
            cuisine: self.cuisine.clone(),
            calories_per_serving: parse_number(
                TextField::CaloriesPerServing,
                &self.calories_per_serving,
            )?,
            rating: parse_rating(&self.rating)?,
            review_count: parse_number(TextField::ReviewCount, &self.review_count)?,
            tags: self.tags.clone(),
            meal_type: self.meal_type.clone(),
            user_id: parse_number(TextField::UserId, &self.user_id)?,
        })
    }
}

fn parse_number<T: std::str::FromStr>(field: TextField, value: &str) -> Result<T, FormError> {
    value
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidNumber {
            field: field.as_str(),
            value: value.to_string(),
        })
}

fn parse_rating(value: &str) -> Result<f64, FormError> {
    let rating: f64 = parse_number(TextField::Rating, value)?;
    if rating.is_finite() {
        Ok(rating)
    } else {
        Err(FormError::InvalidNumber {
            field: TextField::Rating.as_str(),
            value: value.to_string(),
        })
    }
}
