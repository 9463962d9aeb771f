mod app;
mod render;
mod shell;

use anyhow::{anyhow, bail, Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use larder_core::{
    ApiConfig, DetailState, HttpRecipeApiBuilder, ListField, LoadState, Recipe, RecipeApi,
    RecipeDetailLoader, RecipeListEngine, RecipeSearch, Route, SearchOutcome, Selection,
    SubmissionController, TextField,
};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Browse, search and add recipes", long_about = None)]
struct Cli {
    /// Recipe service URL (default: https://dummyjson.com)
    #[arg(long, global = true, env = "LARDER_API_URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recipes with facet filters and paging
    List {
        /// Cuisine to keep, or "All"
        #[arg(long, default_value = "All")]
        cuisine: String,
        /// Difficulty to keep, or "All"
        #[arg(long, default_value = "All")]
        difficulty: String,
        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Reveal recipes in growing batches instead of pages
        #[arg(long)]
        infinite: bool,
        /// Batches to reveal after the first (with --infinite)
        #[arg(long, default_value_t = 0)]
        load_more: usize,
        /// Print the visible recipes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one recipe
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Search recipes by name
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Submit a new recipe
    Add(AddArgs),
    /// Render the screen at a route path once
    Open {
        /// e.g. /, /recipe/3, /search
        path: String,
    },
    /// Interactive session across all screens
    Shell {
        /// Route to start on
        #[arg(long, default_value = "/")]
        start: String,
    },
}

/// Form inputs. Anything left out keeps the form's default.
#[derive(clap::Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    /// Repeat for each ingredient
    #[arg(long = "ingredient")]
    ingredients: Vec<String>,
    /// Repeat for each step
    #[arg(long = "instruction")]
    instructions: Vec<String>,
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long = "meal-type")]
    meal_types: Vec<String>,
    /// Prep time in minutes
    #[arg(long)]
    prep: Option<String>,
    /// Cook time in minutes
    #[arg(long)]
    cook: Option<String>,
    #[arg(long)]
    servings: Option<String>,
    #[arg(long)]
    difficulty: Option<String>,
    #[arg(long)]
    cuisine: Option<String>,
    /// Calories per serving
    #[arg(long)]
    calories: Option<String>,
    #[arg(long)]
    user_id: Option<String>,
    /// Image URL
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    rating: Option<String>,
    #[arg(long)]
    review_count: Option<String>,
    /// Print the created recipe as JSON
    #[arg(long)]
    json: bool,
}

impl AddArgs {
    fn fill(self, controller: &mut SubmissionController) {
        let draft = controller.draft_mut();
        draft.set_text(TextField::Name, self.name);

        let scalars = [
            (TextField::PrepTimeMinutes, self.prep),
            (TextField::CookTimeMinutes, self.cook),
            (TextField::Servings, self.servings),
            (TextField::Difficulty, self.difficulty),
            (TextField::Cuisine, self.cuisine),
            (TextField::CaloriesPerServing, self.calories),
            (TextField::UserId, self.user_id),
            (TextField::Image, self.image),
            (TextField::Rating, self.rating),
            (TextField::ReviewCount, self.review_count),
        ];
        for (field, value) in scalars {
            if let Some(value) = value {
                draft.set_text(field, value);
            }
        }

        let lists = [
            (ListField::Ingredients, self.ingredients),
            (ListField::Instructions, self.instructions),
            (ListField::Tags, self.tags),
            (ListField::MealType, self.meal_types),
        ];
        for (field, values) in lists {
            if !values.is_empty() {
                draft.set_list(field, values);
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

async fn list(
    api: &dyn RecipeApi,
    cuisine: &str,
    difficulty: &str,
    page: usize,
    infinite: bool,
    load_more: usize,
    json: bool,
) -> Result<()> {
    let mut engine = RecipeListEngine::new();
    engine.load(api).await;
    if let LoadState::Failed(error) = engine.state() {
        bail!("Failed to load recipes: {}", error);
    }

    engine.set_cuisine(Selection::parse(cuisine));
    engine.set_difficulty(Selection::parse(difficulty));
    if infinite {
        engine.set_infinite_scroll(true);
        for _ in 0..load_more {
            if engine.load_more() == 0 {
                break;
            }
        }
    } else {
        engine.set_page(page.saturating_sub(1));
    }

    if json {
        let visible: Vec<&Recipe> = if engine.infinite_scroll() {
            engine.accumulator().iter().collect()
        } else {
            engine.page_items()
        };
        return print_json(&visible);
    }
    print!("{}", render::list_screen(&engine));
    Ok(())
}

async fn show(api: &dyn RecipeApi, id: &str, json: bool) -> Result<()> {
    let mut loader = RecipeDetailLoader::new();
    match loader.load(api, Some(id)).await {
        DetailState::Loaded(recipe) if json => print_json(recipe),
        DetailState::Loaded(recipe) => {
            print!("{}", render::recipe_detail(recipe));
            Ok(())
        }
        _ => Err(anyhow!("Recipe not found: {}", id)),
    }
}

async fn search(api: &dyn RecipeApi, query: &str, json: bool) -> Result<()> {
    let mut search = RecipeSearch::new();
    search.set_query(query);
    if let SearchOutcome::Failed = search.submit(api).await {
        bail!("{}", search.error().unwrap_or_default());
    }

    if json {
        return print_json(&search.results());
    }
    print!("{}", render::search_screen(&search));
    Ok(())
}

async fn add(api: &dyn RecipeApi, args: AddArgs) -> Result<()> {
    let json = args.json;
    let mut controller = SubmissionController::new();
    args.fill(&mut controller);

    controller
        .submit(api)
        .await
        .context("Failed to submit recipe")?;

    let created = controller
        .submitted()
        .last()
        .context("Service returned no recipe")?;
    if json {
        return print_json(created);
    }
    print!("{}", render::recipe_detail(created));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    let mut config = ApiConfig::from_env().context("Invalid configuration")?;
    if let Some(server) = cli.server {
        config.base_url = server.trim_end_matches('/').to_string();
    }
    let api = HttpRecipeApiBuilder::from_config(config)
        .build()
        .context("Failed to build recipe client")?;
    let api: Arc<dyn RecipeApi> = Arc::new(api);

    match cli.command {
        Commands::List {
            cuisine,
            difficulty,
            page,
            infinite,
            load_more,
            json,
        } => {
            list(
                api.as_ref(),
                &cuisine,
                &difficulty,
                page,
                infinite,
                load_more,
                json,
            )
            .await?;
        }
        Commands::Show { id, json } => {
            show(api.as_ref(), &id, json).await?;
        }
        Commands::Search { query, json } => {
            search(api.as_ref(), &query, json).await?;
        }
        Commands::Add(args) => {
            add(api.as_ref(), args).await?;
        }
        Commands::Open { path } => {
            let route = Route::parse(&path).ok_or_else(|| anyhow!("No page at {}", path))?;
            let app = App::new(api, route).await;
            print!("{}", app.render());
        }
        Commands::Shell { start } => {
            let route = Route::parse(&start).ok_or_else(|| anyhow!("No page at {}", start))?;
            shell::run(App::new(api, route).await).await?;
        }
    }

    Ok(())
}
