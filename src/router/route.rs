use std::fmt;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/home";

/// An in-app screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Chat { conversation_id: i64 },
    Profile,
    Search,
}

impl Route {
    /// Resolve a path against the route table.
    /// Returns `None` for unknown paths and for `/`, which only redirects.
    pub fn parse(path: &str) -> Option<Self> {
        let path = normalize_path(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["login"] => Some(Route::Login),
            ["home"] => Some(Route::Home),
            ["profile"] => Some(Route::Profile),
            ["search"] => Some(Route::Search),
            ["chat", id] => id
                .parse()
                .ok()
                .map(|conversation_id| Route::Chat { conversation_id }),
            _ => None,
        }
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN_PATH.to_string(),
            Route::Home => HOME_PATH.to_string(),
            Route::Chat { conversation_id } => format!("/chat/{}", conversation_id),
            Route::Profile => "/profile".to_string(),
            Route::Search => "/search".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Redirect records of the route table, applied before any guard runs.
pub fn static_redirect(path: &str) -> Option<&'static str> {
    match normalize_path(path).as_str() {
        ROOT_PATH => Some(LOGIN_PATH),
        _ => None,
    }
}

/// Strip query and fragment, force a leading slash and drop a trailing one.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');

    if trimmed.is_empty() {
        ROOT_PATH.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

pub fn is_login_path(path: &str) -> bool {
    normalize_path(path) == LOGIN_PATH
}
