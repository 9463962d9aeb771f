//! Add/edit recipe screen (`/add`).
//!
//! New recipes go to the service's create endpoint and the echoed entity is
//! kept locally. Edits only ever touch the local list.

use crate::draft::DraftRecipe;
use crate::error::{FormError, SubmitError};
use crate::http::RecipeApi;
use crate::types::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(u64),
    Updated(u64),
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    draft: DraftRecipe,
    submitted: Vec<Recipe>,
    /// Position and id of the entry being edited. The service can echo the
    /// same id for several creates, so the position picks the entry.
    editing: Option<(usize, u64)>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftRecipe {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftRecipe {
        &mut self.draft
    }

    /// Recipes created or edited in this session, oldest first.
    pub fn submitted(&self) -> &[Recipe] {
        &self.submitted
    }

    /// Id of the recipe being edited, if any.
    pub fn editing(&self) -> Option<u64> {
        self.editing.map(|(_, id)| id)
    }

    /// Load the first submitted recipe with this id into the draft and make it
    /// the edit target.
    pub fn begin_edit(&mut self, id: u64) -> Result<(), FormError> {
        let index = self
            .submitted
            .iter()
            .position(|r| r.id == id)
            .ok_or(FormError::UnknownRecipe(id))?;
        self.begin_edit_at(index)
    }

    /// Make the submitted recipe at `index` the edit target.
    pub fn begin_edit_at(&mut self, index: usize) -> Result<(), FormError> {
        let recipe = self
            .submitted
            .get(index)
            .ok_or(FormError::IndexOutOfRange {
                field: "submitted",
                index,
                len: self.submitted.len(),
            })?;
        self.draft = DraftRecipe::from_recipe(recipe);
        self.editing = Some((index, recipe.id));
        Ok(())
    }

    /// Coerce the draft and either patch the edit target locally or create the
    /// recipe remotely. The draft is reset afterwards in both cases, including
    /// when the create call fails. A draft that fails coercion is left as is.
    pub async fn submit(&mut self, api: &dyn RecipeApi) -> Result<SubmitOutcome, SubmitError> {
        let payload = self.draft.coerce()?;
        tracing::debug!(?payload, "submitting recipe");

        if let Some((index, id)) = self.editing.take() {
            let entry = self.submitted.get_mut(index).filter(|r| r.id == id);
            let found = match entry {
                Some(entry) => {
                    *entry = payload.into_recipe(id);
                    true
                }
                None => false,
            };
            self.reset();
            if !found {
                return Err(FormError::UnknownRecipe(id).into());
            }
            tracing::info!(id, "recipe updated locally");
            return Ok(SubmitOutcome::Updated(id));
        }

        let created = api.add_recipe(&payload).await;
        self.reset();
        let recipe = created?;
        let id = recipe.id;
        tracing::info!(id, name = %recipe.name, "recipe created");
        self.submitted.push(recipe);
        Ok(SubmitOutcome::Created(id))
    }

    /// Back to the default draft, leaving edit mode.
    pub fn reset(&mut self) {
        self.draft = DraftRecipe::default();
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{ListField, TextField};
    use crate::http::{Endpoint, MockRecipeApi};

    fn fill_dosa(controller: &mut SubmissionController) {
        let draft = controller.draft_mut();
        draft.set_text(TextField::Name, "Masala Dosa");
        draft.set_item(ListField::Ingredients, 0, "rice").unwrap();
        draft.set_item(ListField::Instructions, 0, "soak rice").unwrap();
    }

    #[tokio::test]
    async fn test_add_appends_created_recipe() {
        let api = MockRecipeApi::new();
        let mut controller = SubmissionController::new();
        fill_dosa(&mut controller);

        let outcome = controller.submit(&api).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Created(51));
        assert_eq!(controller.submitted().len(), 1);
        assert_eq!(controller.submitted()[0].name, "Masala Dosa");
        assert_eq!(controller.submitted()[0].ingredients, vec!["rice"]);
        assert_eq!(controller.draft(), &DraftRecipe::default());

        let sent = api.added();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].servings, 4);
        assert_eq!(sent[0].rating, 4.0);
    }

    #[tokio::test]
    async fn test_edit_patches_in_place_without_network() {
        let api = MockRecipeApi::new();
        let mut controller = SubmissionController::new();
        fill_dosa(&mut controller);
        controller.submit(&api).await.unwrap();

        controller.begin_edit(51).unwrap();
        assert_eq!(controller.draft().name, "Masala Dosa");
        assert_eq!(controller.draft().servings, "4");
        controller
            .draft_mut()
            .set_text(TextField::Name, "Updated Dosa");

        let outcome = controller.submit(&api).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Updated(51));
        assert_eq!(controller.submitted().len(), 1);
        assert_eq!(controller.submitted()[0].id, 51);
        assert_eq!(controller.submitted()[0].name, "Updated Dosa");
        assert_eq!(controller.editing(), None);
        assert_eq!(api.calls(Endpoint::Add), 1);
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_id() {
        let mut controller = SubmissionController::new();
        assert_eq!(controller.begin_edit(7), Err(FormError::UnknownRecipe(7)));
        assert_eq!(controller.editing(), None);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_kept() {
        let api = MockRecipeApi::new();
        let mut controller = SubmissionController::new();
        fill_dosa(&mut controller);
        controller
            .draft_mut()
            .set_text(TextField::CookTimeMinutes, "soon");

        let err = controller.submit(&api).await.unwrap_err();

        assert!(matches!(err, SubmitError::Form(FormError::InvalidNumber { field: "cookTimeMinutes", .. })));
        assert_eq!(controller.draft().name, "Masala Dosa");
        assert_eq!(api.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_create_still_resets_draft() {
        let api = MockRecipeApi::new().with_failure(Endpoint::Add, 500);
        let mut controller = SubmissionController::new();
        fill_dosa(&mut controller);

        let err = controller.submit(&api).await.unwrap_err();

        assert!(matches!(err, SubmitError::Api(_)));
        assert!(controller.submitted().is_empty());
        assert_eq!(controller.draft(), &DraftRecipe::default());
    }

    #[tokio::test]
    async fn test_edit_keeps_other_entries() {
        let api = MockRecipeApi::new().with_next_id(100);
        let mut controller = SubmissionController::new();
        fill_dosa(&mut controller);
        controller.submit(&api).await.unwrap();
        controller
            .draft_mut()
            .set_text(TextField::Name, "Idli");
        controller.submit(&api).await.unwrap();

        controller.begin_edit(101).unwrap();
        controller.draft_mut().set_text(TextField::Cuisine, "South Indian");
        controller.submit(&api).await.unwrap();

        let names: Vec<(u64, &str, &str)> = controller
            .submitted()
            .iter()
            .map(|r| (r.id, r.name.as_str(), r.cuisine.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![(100, "Masala Dosa", "Indian"), (101, "Idli", "South Indian")]
        );
    }

    #[tokio::test]
    async fn test_edit_with_repeated_service_id_touches_one_entry() {
        let api = MockRecipeApi::new().with_fixed_id(51);
        let mut controller = SubmissionController::new();
        fill_dosa(&mut controller);
        controller.submit(&api).await.unwrap();
        controller
            .draft_mut()
            .set_text(TextField::Name, "Idli");
        controller.submit(&api).await.unwrap();

        controller.begin_edit(51).unwrap();
        assert_eq!(controller.draft().name, "Masala Dosa");
        controller
            .draft_mut()
            .set_text(TextField::Name, "Updated Dosa");
        assert_eq!(
            controller.submit(&api).await.unwrap(),
            SubmitOutcome::Updated(51)
        );

        let names: Vec<(u64, &str)> = controller
            .submitted()
            .iter()
            .map(|r| (r.id, r.name.as_str()))
            .collect();
        assert_eq!(names, vec![(51, "Updated Dosa"), (51, "Idli")]);
    }

    #[tokio::test]
    async fn test_begin_edit_at_picks_later_duplicate() {
        let api = MockRecipeApi::new().with_fixed_id(51);
        let mut controller = SubmissionController::new();
        fill_dosa(&mut controller);
        controller.submit(&api).await.unwrap();
        controller
            .draft_mut()
            .set_text(TextField::Name, "Idli");
        controller.submit(&api).await.unwrap();

        controller.begin_edit_at(1).unwrap();
        assert_eq!(controller.draft().name, "Idli");
        assert_eq!(controller.editing(), Some(51));
        controller
            .draft_mut()
            .set_text(TextField::Name, "Rava Idli");
        controller.submit(&api).await.unwrap();

        assert_eq!(controller.submitted()[0].name, "Masala Dosa");
        assert_eq!(controller.submitted()[1].name, "Rava Idli");
        assert!(controller.begin_edit_at(2).is_err());
    }
}
