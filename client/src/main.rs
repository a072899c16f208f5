//! `snooze`: terminal front end for the hack-or-snooze story API.
//!
//! Every invocation restores the stored session, fetches the feed, applies
//! one command and prints the resulting panels as HTML on stdout. Logs go to
//! stderr as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use snooze::domain::StoryId;
use snooze::inbound::nav::NavClick;
use snooze::inbound::render;
use snooze::outbound::credentials::FileCredentialStore;
use snooze::outbound::http::HttpStoryApi;
use snooze::{App, ClientSettings, Event, Screen};

/// `snooze` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "snooze",
    about = "Browse, submit and favorite hack-or-snooze stories",
    version
)]
struct CliArgs {
    /// Story API base URL. Overrides `SNOOZE_BASE_URL`.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Option<String>,
    /// Directory for the stored token and username. Overrides
    /// `SNOOZE_CREDENTIALS_DIR`.
    #[arg(long = "credentials-dir", value_name = "path")]
    credentials_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Show the global feed.
    Stories,
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and remember the session.
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    /// Forget the stored session.
    Logout,
    /// Submit a new story.
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        url: String,
    },
    /// Edit one of your stories; omitted fields keep their current values.
    Edit {
        story_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Delete one of your stories.
    Remove { story_id: String },
    /// Add a story to your favorites.
    Favorite { story_id: String },
    /// Remove a story from your favorites.
    Unfavorite { story_id: String },
    /// Show your favorites.
    Favorites,
    /// Show your own stories.
    Mine,
    /// Show your profile, or change your name and password.
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let mut settings = ClientSettings::load_from_iter([OsString::from("snooze")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    settings.base_url = args.base_url.or(settings.base_url);
    settings.credentials_dir = args.credentials_dir.or(settings.credentials_dir);

    let base_url = settings.base_url().map_err(io::Error::other)?;
    let credentials_dir = settings.credentials_dir().map_err(io::Error::other)?;
    let api = HttpStoryApi::new(base_url, settings.timeout())
        .map_err(|error| io::Error::other(format!("build HTTP client: {error}")))?;
    let credentials = FileCredentialStore::open(&credentials_dir).map_err(io::Error::other)?;
    info!(base_url = %api.base_url(), credentials_dir = %credentials.root(), "client ready");

    let mut app = App::new(Arc::new(api), Arc::new(credentials));
    let mut screen = app.handle(Event::Start).await;
    if screen.notice.is_none() {
        for event in events_for(args.command, &app)? {
            screen = app.handle(event).await;
            if screen.notice.is_some() {
                break;
            }
        }
    }
    present(&screen)
}

/// Events a command expands to, given the state after start-up.
fn events_for(command: Command, app: &App) -> io::Result<Vec<Event>> {
    let events = match command {
        Command::Stories => vec![Event::Navigate(NavClick::All)],
        Command::Login { username, password } => vec![Event::Login { username, password }],
        Command::Signup {
            username,
            password,
            name,
        } => vec![Event::Signup {
            username,
            password,
            name,
        }],
        Command::Logout => vec![Event::Logout],
        Command::Submit { title, author, url } => {
            vec![Event::SubmitStory { title, author, url }]
        }
        Command::Edit {
            story_id,
            title,
            author,
            url,
        } => vec![Event::EditStory {
            story_id,
            title,
            author,
            url,
        }],
        Command::Remove { story_id } => vec![Event::RemoveStory { story_id }],
        Command::Favorite { story_id } => favorite_events(app, story_id, true)?,
        Command::Unfavorite { story_id } => favorite_events(app, story_id, false)?,
        Command::Favorites => vec![Event::Navigate(NavClick::Favorites)],
        Command::Mine => vec![Event::Navigate(NavClick::MyStories)],
        Command::Profile { name, password } => {
            let mut events = vec![Event::Navigate(NavClick::Profile)];
            if name.is_some() || password.is_some() {
                events.push(Event::UpdateProfile { name, password });
            }
            events
        }
    };
    Ok(events)
}

/// Toggle only when the story is not already in the wanted state.
fn favorite_events(app: &App, story_id: String, favorite: bool) -> io::Result<Vec<Event>> {
    let id = StoryId::new(story_id.as_str()).map_err(io::Error::other)?;
    let mut events = Vec::with_capacity(2);
    if app.session().is_favorite_id(&id) != favorite {
        events.push(Event::ToggleFavorite { story_id });
    }
    events.push(Event::Navigate(NavClick::Favorites));
    Ok(events)
}

fn present(screen: &Screen) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render::nav_markup(&screen.nav))?;
    if !screen.html.is_empty() {
        writeln!(stdout, "{}", screen.html)?;
    }
    match &screen.notice {
        Some(notice) => Err(io::Error::other(notice.message.clone())),
        None => Ok(()),
    }
}
