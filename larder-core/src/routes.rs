//! Static route table.

use std::fmt;

/// One of the five screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/recipe/{id}`; the id is kept as raw route text.
    Detail(String),
    /// `/search`
    Search,
    /// `/add`
    Add,
    /// `/temp`
    Scratch,
}

impl Route {
    /// Match a path against the table. Query strings and fragments are ignored;
    /// a trailing slash is tolerated. Unknown paths match nothing.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Some(Route::List),
            "/search" => Some(Route::Search),
            "/add" => Some(Route::Add),
            "/temp" => Some(Route::Scratch),
            _ => {
                let id = trimmed.strip_prefix("/recipe/")?;
                if id.is_empty() || id.contains('/') {
                    None
                } else {
                    Some(Route::Detail(id.to_string()))
                }
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/recipe/{}", id),
            Route::Search => "/search".to_string(),
            Route::Add => "/add".to_string(),
            Route::Scratch => "/temp".to_string(),
        }
    }

    /// Header navigation entries.
    pub fn nav() -> [(&'static str, Route); 4] {
        [
            ("Recipes", Route::List),
            ("Search", Route::Search),
            ("Add Recipe", Route::Add),
            ("Tasks", Route::Scratch),
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
