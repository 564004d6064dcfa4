//! Owner flows for the command line.
//!
//! `App` wires the core the way the web client does: one file-backed
//! storage shared by the session and the router, and the router attached to
//! the API client as its navigator.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, warn};

use orderbot_core::cache::LocalCache;
use orderbot_core::router::{RouteTable, Router};
use orderbot_core::storage::FileStorage;
use orderbot_core::{
    ApiClient, ApiError, Config, LoginOutcome, MenuItemPayload, SessionStore, SignupOutcome,
};

/// Route name of the owner dashboard, where a successful login or signup lands
const DASHBOARD_ROUTE: &str = "b-dashboard";

pub struct App {
    session: SessionStore,
    router: Arc<Router>,
    api: ApiClient,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let storage_dir = config.storage_dir()?;
        debug!(dir = %storage_dir.display(), "Opening storage");
        let storage = FileStorage::new(&storage_dir)
            .with_context(|| format!("Failed to open storage at {}", storage_dir.display()))?;

        let cache = LocalCache::new(Arc::new(storage), config.storage_ttl);
        let session = SessionStore::new(cache);
        let router = Arc::new(Router::new(RouteTable::default(), session.clone()));
        let api = ApiClient::new(config)?
            .with_session(session.clone())
            .with_navigator(router.clone());

        Ok(Self {
            session,
            router,
            api,
        })
    }

    pub async fn login(&self, email: Option<String>) -> Result<()> {
        let email = match email {
            Some(email) => email,
            None => prompt("Email: ")?,
        };
        let password = rpassword::prompt_password("Password: ")?;

        match self.api.login(&email, &password).await? {
            LoginOutcome::LoggedIn(_) => {
                let landed = self.router.push_path(self.dashboard_path()?)?;
                println!("Logged in as {} ({})", email, landed);
            }
            LoginOutcome::InvalidCredentials => {
                println!("Invalid email or password");
            }
        }
        Ok(())
    }

    pub async fn signup(&self, email: &str, bot_name: &str) -> Result<()> {
        let password = rpassword::prompt_password("Password: ")?;
        let confirm = rpassword::prompt_password("Confirm password: ")?;
        if password != confirm {
            anyhow::bail!("Passwords do not match");
        }

        match self.api.signup(email, &password, bot_name).await? {
            SignupOutcome::Created(_) => {
                let landed = self.router.push_path(self.dashboard_path()?)?;
                println!("Created account {} with bot {:?} ({})", email, bot_name, landed);
            }
            SignupOutcome::AlreadyExists => {
                println!("An account for {} already exists, log in instead", email);
            }
            SignupOutcome::Unauthorized => {
                println!("Signup was rejected, please try again");
            }
        }
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Backend logout failed, local session cleared anyway");
        }
        println!("Logged out");
        Ok(())
    }

    pub fn status(&self) {
        if self.session.is_logged_in() {
            println!("Logged in");
        } else {
            println!("Not logged in");
        }
    }

    /// Show where navigating to `path` would land
    pub fn open(&self, path: &str) -> Result<()> {
        let landed = self.router.push_path(path)?;
        println!("{}", landed);
        Ok(())
    }

    pub async fn list_menu(&self) -> Result<()> {
        if !self.enter_dashboard()? {
            return Ok(());
        }

        let items = match self.api.fetch_menu_items().await {
            Ok(items) => items,
            Err(e) => return self.report(e),
        };

        if items.is_empty() {
            println!("The menu is empty");
            return Ok(());
        }
        for item in &items {
            println!("{:<30} {:>8.2}  {}", item.name, item.price, item.status);
        }
        let active = items.iter().filter(|item| item.is_active()).count();
        println!("{} items, {} active", items.len(), active);
        Ok(())
    }

    pub async fn save_menu(&self, file: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let items: Vec<MenuItemPayload> = serde_json::from_str(&contents)
            .with_context(|| format!("{} is not a list of menu items", file.display()))?;

        if !self.enter_dashboard()? {
            return Ok(());
        }

        match self.api.save_menu_items(&items).await {
            Ok(()) => {
                info!(count = items.len(), "Menu saved");
                println!("Saved {} menu items", items.len());
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn dashboard_path(&self) -> Result<&str> {
        self.router
            .routes()
            .by_name(DASHBOARD_ROUTE)
            .map(|route| route.path.as_str())
            .ok_or_else(|| anyhow!("No route named {}", DASHBOARD_ROUTE))
    }

    /// Navigate to the dashboard; false (with a message) if the guard said no
    fn enter_dashboard(&self) -> Result<bool> {
        let dashboard = self.dashboard_path()?;
        let landed = self.router.push_path(dashboard)?;
        if landed.path == dashboard {
            return Ok(true);
        }
        println!("Not logged in. Run `orderbot login` first ({})", landed);
        Ok(false)
    }

    /// Turn an API error into something the user can act on
    fn report(&self, e: ApiError) -> Result<()> {
        if e.is_auth_expired() {
            println!(
                "Your session has expired. Run `orderbot login` again ({})",
                self.router.current()
            );
            return Ok(());
        }
        Err(e.into())
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
