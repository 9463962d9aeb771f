//! Interactive shell over the screens.
//!
//! Reads one command per line from stdin and prints the active screen after
//! every command that changes it.

use crate::app::{App, Screen};
use anyhow::Result;
use larder_core::{ListField, Route, Selection, TaskChange, TextField};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands (any screen):
  go <path>                 open a route: /, /recipe/<id>, /search, /add, /temp
  show                      print the current screen
  help                      this text
  quit                      leave the shell

Recipes (/):
  cuisine <value|All>       filter by cuisine
  difficulty <value|All>    filter by difficulty
  page <n>                  jump to page n
  next | prev               page forward or back
  infinite                  toggle infinite scroll
  more                      reveal the next batch in infinite scroll
  open <id>                 open a recipe

Search (/search):
  query <text>              set the query text
  submit                    run the search
  find <text>               set the query and run it

Add Recipe (/add):
  set <field> <value>       set a form field, e.g. `set prepTimeMinutes 15`
  item <list> <n> <value>   set slot n of ingredients, instructions, tags or mealType
  slot <list>               add an empty slot to a list
  submit                    send the draft, or save the edit
  edit <id>                 load a submitted recipe into the form
  revise <n>                load the n-th submitted recipe into the form

Tasks (/temp):
  title <text>              type into the title input
  add                       add or rename using the settled title
  edit <id>                 edit a task
  delete <id>               delete a task";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Go(String),
    Show,
    Help,
    Quit,
    Cuisine(String),
    Difficulty(String),
    Page(usize),
    Next,
    Prev,
    Infinite,
    More,
    Open(String),
    Query(String),
    Find(String),
    Submit,
    Set(TextField, String),
    Item(ListField, usize, String),
    Slot(ListField),
    Edit(u64),
    Revise(usize),
    Title(String),
    Add,
    Delete(u32),
}

fn parse_list_field(name: &str) -> Result<ListField, String> {
    ListField::from_str(name).ok_or_else(|| {
        format!(
            "unknown list {:?}, expected one of: ingredients, instructions, tags, mealType",
            name
        )
    })
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{} must be a number, got {:?}", what, value))
}

/// Parse one shell line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let require = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("`{}` needs {}", word, what))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word {
        "go" => Command::Go(require("a path")?),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "cuisine" => Command::Cuisine(require("a cuisine")?),
        "difficulty" => Command::Difficulty(require("a difficulty")?),
        "page" => {
            let page: usize = parse_number(&require("a page number")?, "page")?;
            if page == 0 {
                return Err("pages start at 1".to_string());
            }
            Command::Page(page)
        }
        "next" => Command::Next,
        "prev" => Command::Prev,
        "infinite" => Command::Infinite,
        "more" => Command::More,
        "open" => Command::Open(require("a recipe id")?),
        // The query is kept verbatim, surrounding whitespace included.
        "query" => Command::Query(rest.to_string()),
        "find" => Command::Find(rest.to_string()),
        "submit" => Command::Submit,
        "set" => {
            let (name, value) = rest.split_once(' ').unwrap_or((rest, ""));
            let field = TextField::from_str(name)
                .ok_or_else(|| format!("unknown field {:?}", name))?;
            Command::Set(field, value.to_string())
        }
        "item" => {
            let mut parts = rest.splitn(3, ' ');
            let field = parse_list_field(parts.next().unwrap_or_default())?;
            let slot: usize = parse_number(parts.next().unwrap_or_default(), "slot")?;
            if slot == 0 {
                return Err("slots start at 1".to_string());
            }
            Command::Item(field, slot - 1, parts.next().unwrap_or_default().to_string())
        }
        "slot" => Command::Slot(parse_list_field(&require("a list name")?)?),
        "edit" => Command::Edit(parse_number(&require("an id")?, "id")?),
        "revise" => {
            let position: usize = parse_number(&require("a position")?, "position")?;
            if position == 0 {
                return Err("positions start at 1".to_string());
            }
            Command::Revise(position - 1)
        }
        "title" => Command::Title(rest.to_string()),
        "add" => Command::Add,
        "delete" => Command::Delete(parse_number(&require("an id")?, "id")?),
        other => return Err(format!("unknown command {:?}, try `help`", other)),
    };
    Ok(Some(command))
}

/// Outcome of running one command.
enum Step {
    Render,
    Say(String),
    Quit,
}

async fn execute(app: &mut App, command: Command) -> Step {
    match command {
        Command::Go(path) => match Route::parse(&path) {
            Some(route) => {
                app.navigate(route).await;
                Step::Render
            }
            None => Step::Say(format!("No page at {}", path)),
        },
        Command::Show => Step::Render,
        Command::Help => Step::Say(HELP.to_string()),
        Command::Quit => Step::Quit,
        Command::Open(id) => {
            app.navigate(Route::Detail(id)).await;
            Step::Render
        }
        command => on_screen(app, command).await,
    }
}

async fn on_screen(app: &mut App, command: Command) -> Step {
    let (api, screen) = app.parts();
    match (screen, command) {
        (Screen::List(engine), Command::Cuisine(value)) => {
            engine.set_cuisine(Selection::parse(&value));
            Step::Render
        }
        (Screen::List(engine), Command::Difficulty(value)) => {
            engine.set_difficulty(Selection::parse(&value));
            Step::Render
        }
        (Screen::List(engine), Command::Page(page)) => {
            engine.set_page(page - 1);
            Step::Render
        }
        (Screen::List(engine), Command::Next) => {
            if engine.next_page() {
                Step::Render
            } else {
                Step::Say("Already on the last page".to_string())
            }
        }
        (Screen::List(engine), Command::Prev) => {
            if engine.prev_page() {
                Step::Render
            } else {
                Step::Say("Already on the first page".to_string())
            }
        }
        (Screen::List(engine), Command::Infinite) => {
            engine.toggle_infinite_scroll();
            Step::Render
        }
        (Screen::List(engine), Command::More) => {
            if !engine.infinite_scroll() {
                return Step::Say("Infinite scroll is off, use `infinite`".to_string());
            }
            engine.load_more();
            Step::Render
        }
        (Screen::Search(search), Command::Query(query)) => {
            search.set_query(query);
            Step::Render
        }
        (Screen::Search(search), Command::Find(query)) => {
            search.set_query(query);
            search.submit(api).await;
            Step::Render
        }
        (Screen::Search(search), Command::Submit) => {
            search.submit(api).await;
            Step::Render
        }
        (Screen::Add(controller), Command::Set(field, value)) => {
            controller.draft_mut().set_text(field, value);
            Step::Render
        }
        (Screen::Add(controller), Command::Item(field, index, value)) => {
            match controller.draft_mut().set_item(field, index, value) {
                Ok(()) => Step::Render,
                Err(e) => Step::Say(e.to_string()),
            }
        }
        (Screen::Add(controller), Command::Slot(field)) => {
            controller.draft_mut().push_slot(field);
            Step::Render
        }
        (Screen::Add(controller), Command::Submit) => match controller.submit(api).await {
            Ok(outcome) => {
                tracing::debug!(?outcome, "draft submitted");
                Step::Render
            }
            Err(e) => Step::Say(format!("Could not submit recipe: {}", e)),
        },
        (Screen::Add(controller), Command::Edit(id)) => match controller.begin_edit(id) {
            Ok(()) => Step::Render,
            Err(e) => Step::Say(e.to_string()),
        },
        (Screen::Add(controller), Command::Revise(index)) => {
            match controller.begin_edit_at(index) {
                Ok(()) => Step::Render,
                Err(e) => Step::Say(e.to_string()),
            }
        }
        (Screen::Scratch(tasks), Command::Title(title)) => {
            tasks.set_title(title);
            Step::Render
        }
        (Screen::Scratch(tasks), Command::Add) => match tasks.add() {
            Some(TaskChange::Added(id)) => Step::Say(format!("Added task {}", id)),
            Some(TaskChange::Renamed(id)) => Step::Say(format!("Updated task {}", id)),
            None => Step::Say("Nothing to add yet".to_string()),
        },
        (Screen::Scratch(tasks), Command::Edit(id)) => match u32::try_from(id) {
            Ok(id) if tasks.edit(id) => Step::Render,
            _ => Step::Say(format!("No task {}", id)),
        },
        (Screen::Scratch(tasks), Command::Delete(id)) => {
            if tasks.delete(id) {
                Step::Render
            } else {
                Step::Say(format!("No task {}", id))
            }
        }
        (_, command) => Step::Say(format!(
            "{:?} does not apply on {}, try `help`",
            command,
            app_route_hint(&command)
        )),
    }
}

fn app_route_hint(command: &Command) -> &'static str {
    match command {
        Command::Cuisine(_)
        | Command::Difficulty(_)
        | Command::Page(_)
        | Command::Next
        | Command::Prev
        | Command::Infinite
        | Command::More => "this page; it belongs to /",
        Command::Query(_) | Command::Find(_) => "this page; it belongs to /search",
        Command::Set(..) | Command::Item(..) | Command::Slot(_) | Command::Revise(_) => {
            "this page; it belongs to /add"
        }
        Command::Title(_) | Command::Delete(_) => "this page; it belongs to /temp",
        _ => "this page",
    }
}

/// Run the shell until `quit` or end of input.
pub async fn run(mut app: App) -> Result<()> {
    println!("{}", app.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match execute(&mut app, command).await {
            Step::Render => println!("{}", app.render()),
            Step::Say(message) => println!("{}", message),
            Step::Quit => break,
        }
    }
    Ok(())
}
