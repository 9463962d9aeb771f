//! Route-driven screen host.
//!
//! Navigating mounts a fresh screen for the target route and drops the
//! previous one, so every visit starts from clean state.

use crate::render;
use larder_core::{
    RecipeApi, RecipeDetailLoader, RecipeListEngine, RecipeSearch, Route, SubmissionController,
    TaskList,
};
use std::sync::Arc;

pub enum Screen {
    List(RecipeListEngine),
    Detail(RecipeDetailLoader),
    Search(RecipeSearch),
    Add(SubmissionController),
    Scratch(TaskList),
}

impl Screen {
    /// Build the screen for a route, running its on-mount fetch.
    pub async fn mount(api: &dyn RecipeApi, route: &Route) -> Self {
        match route {
            Route::List => {
                let mut engine = RecipeListEngine::new();
                engine.load(api).await;
                Screen::List(engine)
            }
            Route::Detail(id) => {
                let mut loader = RecipeDetailLoader::new();
                loader.load(api, Some(id.as_str())).await;
                Screen::Detail(loader)
            }
            Route::Search => Screen::Search(RecipeSearch::new()),
            Route::Add => Screen::Add(SubmissionController::new()),
            Route::Scratch => Screen::Scratch(TaskList::new()),
        }
    }

    pub fn render(&self) -> String {
        match self {
            Screen::List(engine) => render::list_screen(engine),
            Screen::Detail(loader) => render::detail_screen(loader.state()),
            Screen::Search(search) => render::search_screen(search),
            Screen::Add(controller) => render::add_screen(controller),
            Screen::Scratch(tasks) => render::scratch_screen(tasks),
        }
    }
}

pub struct App {
    api: Arc<dyn RecipeApi>,
    route: Route,
    screen: Screen,
}

impl App {
    pub async fn new(api: Arc<dyn RecipeApi>, route: Route) -> Self {
        let screen = Screen::mount(api.as_ref(), &route).await;
        Self { api, route, screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Split borrow for async screen operations that need the client.
    pub fn parts(&mut self) -> (&dyn RecipeApi, &mut Screen) {
        (self.api.as_ref(), &mut self.screen)
    }

    pub async fn navigate(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigating");
        self.screen = Screen::mount(self.api.as_ref(), &route).await;
        self.route = route;
    }

    /// Header plus the active screen.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}",
            render::header(&self.route),
            self.screen.render()
        )
    }
}
