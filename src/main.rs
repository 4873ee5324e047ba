//! WASAText command-line client.
//!
//! Each screen command first navigates the router to its screen, so the
//! navigation guard decides whether it may run, then talks to the API.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wasatext_client::api::ApiClient;
use wasatext_client::auth::{
    CredentialProvider, FileStore, KeyValueStore, KeyringStore, Session, TokenCredentials,
};
use wasatext_client::config::{Config, StorageBackend};
use wasatext_client::models::NewMessage;
use wasatext_client::router::{Route, Router};

const USAGE: &str = "\
Usage: wasatext <command>

Commands:
  login <username>         Log in (registers the user on first use)
  logout                   Forget the stored session
  status                   Show whether a session is stored
  navigate <path> [from]   Show where navigating to <path> ends up
  conversations            List your conversations
  chat <id>                Show the messages of a conversation
  start <username>         Start a conversation with a user
  send <id> <text>         Send a text message
  search <query>           Search users
  rename <username>        Change your username
  config show              Print the configuration
  config set <key> <value> Set api_url or storage (file|keyring)";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

struct App {
    credentials: Arc<dyn CredentialProvider>,
    session: Session<Arc<dyn KeyValueStore>>,
    router: Router<Arc<dyn CredentialProvider>>,
    api: ApiClient,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match config.storage {
            StorageBackend::File => Arc::new(FileStore::new(&config.cache_dir()?)),
            StorageBackend::Keyring => Arc::new(KeyringStore::new()),
        };
        let credentials: Arc<dyn CredentialProvider> =
            Arc::new(TokenCredentials::new(Arc::clone(&store)));

        let api_url = config.api_url();
        info!(api_url = %api_url, storage = ?config.storage, "Client configured");

        Ok(Self {
            session: Session::new(store),
            router: Router::new(Arc::clone(&credentials)),
            api: ApiClient::new(api_url, Arc::clone(&credentials))?,
            credentials,
        })
    }

    /// Navigate to a screen; false when the guard sent us to the login screen
    fn enter(&mut self, route: &Route) -> Result<bool> {
        let nav = self.router.navigate(&route.path())?;
        if nav.route == Route::Login && *route != Route::Login {
            println!("Not logged in. Run `wasatext login <username>` first.");
            return Ok(false);
        }
        Ok(true)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let mut config = Config::load().context("Failed to load config")?;

    if command == "config" {
        match &args[1..] {
            [show] if show == "show" => {
                println!("config file: {}", Config::config_path()?.display());
                println!("api_url:     {}", config.api_url());
                println!("storage:     {:?}", config.storage);
            }
            [set, key, value] if set == "set" => {
                config.set(key, value)?;
                config.save().context("Failed to save config")?;
                println!("Saved {} = {}", key, value);
            }
            _ => {
                eprintln!("{}", USAGE);
                std::process::exit(2);
            }
        }
        return Ok(());
    }

    let mut ctx = App::new(&config)?;

    match (command.as_str(), &args[1..]) {
        ("login", [username]) => {
            // Already signed in: the guard bounces /login to /home
            if ctx.router.navigate(&Route::Login.path())?.route != Route::Login {
                println!("Already logged in. Run `wasatext logout` first.");
                return Ok(());
            }
            let response = ctx.api.login(username).await?;
            ctx.session.login(&response.identifier, &response.username)?;
            println!("Logged in as {} (id {})", response.username, response.identifier);
        }
        ("logout", []) => {
            ctx.session.logout()?;
            println!("Logged out");
        }
        ("status", []) => {
            if ctx.session.is_authenticated() {
                println!("Logged in");
            } else {
                println!("Not logged in");
            }
        }
        ("navigate", [path, rest @ ..]) if rest.len() <= 1 => {
            if let Some(from) = rest.first() {
                let from = Route::parse(from).with_context(|| format!("Unknown route {}", from))?;
                ctx.router = Router::starting_at(Arc::clone(&ctx.credentials), from);
            }
            let nav = ctx.router.navigate(path)?;
            if nav.redirected {
                println!("{} -> {} (redirected)", nav.requested, nav.route);
            } else {
                println!("{}", nav.route);
            }
        }
        ("conversations", []) => {
            if !ctx.enter(&Route::Home)? {
                return Ok(());
            }
            let me = ctx.session.username()?.unwrap_or_default();
            let conversations = ctx.api.get_my_conversations().await?;
            if conversations.is_empty() {
                println!("No conversations yet");
            }
            for convo in conversations {
                let preview = convo
                    .last_message
                    .as_ref()
                    .map(|m| format!("{}  {}", m.timestamp.format("%b %d %H:%M"), m.preview))
                    .unwrap_or_default();
                println!("{:>6}  {:<30}  {}", convo.id, convo.display_name(&me), preview);
            }
        }
        ("chat", [id]) => {
            let conversation_id: i64 = id.parse().context("Conversation id must be a number")?;
            if !ctx.enter(&Route::Chat { conversation_id })? {
                return Ok(());
            }
            let convo = ctx.api.get_conversation(conversation_id).await?;
            for message in convo.messages {
                let body = message
                    .text
                    .unwrap_or_else(|| "[photo]".to_string());
                println!("{}  {}: {}", message.timestamp.format("%b %d %H:%M"), message.sender, body);
            }
        }
        ("start", [recipient]) => {
            if !ctx.enter(&Route::Search)? {
                return Ok(());
            }
            let convo = ctx.api.start_conversation(recipient).await?;
            println!("Conversation {} started", convo.id);
        }
        ("send", [id, words @ ..]) if !words.is_empty() => {
            let conversation_id: i64 = id.parse().context("Conversation id must be a number")?;
            if !ctx.enter(&Route::Chat { conversation_id })? {
                return Ok(());
            }
            let message = ctx
                .api
                .send_message(conversation_id, &NewMessage::text(words.join(" ")))
                .await?;
            println!("Sent message {}", message.id);
        }
        ("search", [query]) => {
            if !ctx.enter(&Route::Search)? {
                return Ok(());
            }
            for user in ctx.api.search_users(query).await? {
                println!("{:>6}  {}", user.id, user.username);
            }
        }
        ("rename", [username]) => {
            if !ctx.enter(&Route::Profile)? {
                return Ok(());
            }
            let user = ctx.api.set_my_username(username).await?;
            ctx.session.set_username(&user.username)?;
            println!("Username changed to {}", user.username);
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}
