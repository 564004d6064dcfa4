/// A navigable route and its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub requires_auth: bool,
    /// When set, this route is an alias that forwards to another path
    pub redirect: Option<String>,
}

impl Route {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            requires_auth: false,
            redirect: None,
        }
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }
}

pub const LOGIN_PATH: &str = "/b/login";

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    login_path: String,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, login_path: impl Into<String>) -> Self {
        Self {
            routes,
            login_path: login_path.into(),
        }
    }

    /// Where unauthenticated users are sent
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Exact match, ignoring a trailing slash
    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

impl Default for RouteTable {
    /// The guest ordering view under `/c` and the owner flow under `/b`
    fn default() -> Self {
        Self::new(
            vec![
                Route::new("/", "root").redirect_to("/c"),
                Route::new("/c", "c-side"),
                Route::new("/b", "b").redirect_to(LOGIN_PATH),
                Route::new(LOGIN_PATH, "b-login"),
                Route::new("/b/signup", "b-signup"),
                Route::new("/b/app", "b-dashboard").requires_auth(),
            ],
            LOGIN_PATH,
        )
    }
}
