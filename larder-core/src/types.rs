use serde::{Deserialize, Serialize};

/// A recipe as served by the remote recipe service.
///
/// List fields are never absent: a missing array in the payload decodes as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub servings: u32,
    /// Open set: "Easy", "Medium", ... whatever the service sends.
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub calories_per_serving: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meal_type: Vec<String>,
    #[serde(default)]
    pub user_id: u64,
}

impl Recipe {
    /// First instruction, used as the short description on recipe cards.
    pub fn summary(&self) -> Option<&str> {
        self.instructions.first().map(String::as_str)
    }
}

/// Envelope returned by the collection and search endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipePage {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// Typed payload for the create endpoint, produced by coercing a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub servings: u32,
    pub difficulty: String,
    pub cuisine: String,
    pub calories_per_serving: u32,
    pub rating: f64,
    pub review_count: u32,
    pub tags: Vec<String>,
    pub meal_type: Vec<String>,
    pub user_id: u64,
}

impl NewRecipe {
    /// Attach an identifier, producing the full recipe shape.
    pub fn into_recipe(self, id: u64) -> Recipe {
        Recipe {
            id,
            name: self.name,
            image: self.image,
            ingredients: self.ingredients,
            instructions: self.instructions,
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            servings: self.servings,
            difficulty: self.difficulty,
            cuisine: self.cuisine,
            calories_per_serving: self.calories_per_serving,
            rating: self.rating,
            review_count: self.review_count,
            tags: self.tags,
            meal_type: self.meal_type,
            user_id: self.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_decode_as_empty() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": 7, "name": "Toast", "cuisine": "British"}"#).unwrap();
        assert_eq!(recipe.id, 7);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
        assert!(recipe.tags.is_empty());
        assert!(recipe.meal_type.is_empty());
        assert_eq!(recipe.summary(), None);
    }

    #[test]
    fn test_decode_service_field_names() {
        let json = r#"{
            "id": 1,
            "name": "Classic Margherita Pizza",
            "ingredients": ["Pizza dough", "Tomato sauce"],
            "instructions": ["Preheat the oven", "Roll out the dough"],
            "prepTimeMinutes": 20,
            "cookTimeMinutes": 15,
            "servings": 4,
            "difficulty": "Easy",
            "cuisine": "Italian",
            "caloriesPerServing": 300,
            "tags": ["Pizza", "Italian"],
            "userId": 166,
            "image": "https://cdn.dummyjson.com/recipe-images/1.webp",
            "rating": 4.6,
            "reviewCount": 98,
            "mealType": ["Dinner"]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.prep_time_minutes, 20);
        assert_eq!(recipe.calories_per_serving, 300);
        assert_eq!(recipe.review_count, 98);
        assert_eq!(recipe.user_id, 166);
        assert_eq!(recipe.meal_type, vec!["Dinner"]);
        assert_eq!(recipe.summary(), Some("Preheat the oven"));
    }

    #[test]
    fn test_new_recipe_serializes_camel_case() {
        let payload = NewRecipe {
            name: "Masala Dosa".to_string(),
            image: String::new(),
            ingredients: vec!["rice".to_string()],
            instructions: vec!["soak rice".to_string()],
            prep_time_minutes: 15,
            cook_time_minutes: 15,
            servings: 4,
            difficulty: "Easy".to_string(),
            cuisine: "Indian".to_string(),
            calories_per_serving: 40,
            rating: 4.0,
            review_count: 20,
            tags: vec![],
            meal_type: vec!["Lunch".to_string()],
            user_id: 2,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["prepTimeMinutes"], 15);
        assert_eq!(value["caloriesPerServing"], 40);
        assert_eq!(value["mealType"][0], "Lunch");
        assert!(value.get("id").is_none());

        let recipe = payload.into_recipe(51);
        assert_eq!(recipe.id, 51);
        assert_eq!(recipe.name, "Masala Dosa");
    }
}
