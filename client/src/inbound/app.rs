//! Application controller mapping user events onto the services.
//!
//! [`App::handle`] runs one event to completion: it calls the services,
//! persists credentials when the user changes, re-renders the visible panels
//! and turns any failure into a [`Notice`] on the returned [`Screen`].
//! Nothing is retried.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{CredentialStore, StoredCredentials, StoryApi};
use crate::domain::{
    AccountService, Error, ErrorCode, LoginCredentials, ProfileUpdate, Session, SignupDetails,
    StoryDraft, StoryId, StoryListService,
};

use super::nav::{NavBar, NavClick, Navigator, Panel};
use super::render;

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// First load: try a silent re-login, then fetch the feed.
    Start,
    /// Nav-bar click.
    Navigate(NavClick),
    /// Login form submitted.
    Login { username: String, password: String },
    /// Signup form submitted.
    Signup {
        username: String,
        password: String,
        name: String,
    },
    /// Logout link clicked.
    Logout,
    /// New story submitted.
    SubmitStory {
        title: String,
        author: String,
        url: String,
    },
    /// Edited story submitted; omitted fields keep the story's current
    /// values.
    EditStory {
        story_id: String,
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
    },
    /// Trash can clicked.
    RemoveStory { story_id: String },
    /// Star clicked.
    ToggleFavorite { story_id: String },
    /// Profile form submitted; blank fields are left unchanged.
    UpdateProfile {
        name: Option<String>,
        password: Option<String>,
    },
}

/// User-facing failure notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Failure category.
    pub code: ErrorCode,
    /// Text to show the user.
    pub message: String,
}

impl From<&Error> for Notice {
    fn from(error: &Error) -> Self {
        Self {
            code: error.code(),
            message: format!("Something went wrong: {error}"),
        }
    }
}

/// What the front end should draw after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Visible panels in drawing order.
    pub panels: Vec<Panel>,
    /// Nav-bar state.
    pub nav: NavBar,
    /// Markup for the visible list and profile panels, in panel order.
    pub html: String,
    /// Failure raised by the event, if any.
    pub notice: Option<Notice>,
}

/// Event-driven client controller owning the session.
pub struct App {
    stories: StoryListService<dyn StoryApi>,
    accounts: AccountService<dyn StoryApi>,
    credentials: Arc<dyn CredentialStore>,
    session: Session,
    navigator: Navigator,
}

impl App {
    /// Controller over the given API and credential store, with an anonymous
    /// session.
    pub fn new(api: Arc<dyn StoryApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            stories: StoryListService::new(Arc::clone(&api)),
            accounts: AccountService::new(api),
            credentials,
            session: Session::new(),
            navigator: Navigator::new(),
        }
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current panel state.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Run `event` and describe the resulting screen.
    pub async fn handle(&mut self, event: Event) -> Screen {
        debug!(?event, "handling event");
        let notice = match self.dispatch(event).await {
            Ok(()) => None,
            Err(error) => {
                warn!(code = ?error.code(), %error, "event failed");
                Some(Notice::from(&error))
            }
        };
        self.screen(notice)
    }

    /// Render the current state without handling an event.
    pub fn screen(&self, notice: Option<Notice>) -> Screen {
        let panels: Vec<Panel> = self.navigator.visible().collect();
        let html = panels
            .iter()
            .filter_map(|panel| render::panel_markup(*panel, &self.session))
            .collect::<Vec<_>>()
            .join("\n");
        Screen {
            panels,
            nav: NavBar::for_session(&self.session),
            html,
            notice,
        }
    }

    async fn dispatch(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::Start => self.start().await,
            Event::Navigate(click) => {
                self.navigator.click(click, &self.session);
                Ok(())
            }
            Event::Login { username, password } => {
                let credentials = LoginCredentials::try_from_parts(&username, &password)?;
                self.accounts.login(&mut self.session, &credentials).await?;
                self.remember_user()?;
                self.navigator.show_only(&[Panel::AllStories]);
                Ok(())
            }
            Event::Signup {
                username,
                password,
                name,
            } => {
                let details = SignupDetails::try_from_parts(&username, &password, &name)?;
                self.accounts.signup(&mut self.session, &details).await?;
                self.remember_user()?;
                self.navigator.show_only(&[Panel::AllStories]);
                Ok(())
            }
            Event::Logout => {
                if let Some(user) = self.session.end() {
                    debug!(username = %user.username(), "logged out");
                }
                self.navigator.show_only(&[Panel::AllStories]);
                self.credentials.clear()?;
                Ok(())
            }
            Event::SubmitStory { title, author, url } => {
                let draft = StoryDraft::try_new(&title, &author, &url)?;
                self.stories.add_story(&mut self.session, &draft).await?;
                self.navigator.show_only(&[Panel::AllStories]);
                Ok(())
            }
            Event::EditStory {
                story_id,
                title,
                author,
                url,
            } => {
                let story_id = StoryId::new(story_id)?;
                let draft = self.edit_draft(
                    &story_id,
                    title.as_deref(),
                    author.as_deref(),
                    url.as_deref(),
                )?;
                self.stories
                    .edit_story(&mut self.session, &story_id, &draft)
                    .await?;
                self.navigator.show_only(&[Panel::MyStories]);
                Ok(())
            }
            Event::RemoveStory { story_id } => {
                let story_id = StoryId::new(story_id)?;
                self.stories
                    .remove_story(&mut self.session, &story_id)
                    .await?;
                self.navigator.show_only(&[Panel::MyStories]);
                Ok(())
            }
            Event::ToggleFavorite { story_id } => self.toggle_favorite(story_id).await,
            Event::UpdateProfile { name, password } => {
                let update = ProfileUpdate::try_from_parts(password.as_deref(), name.as_deref())?;
                self.accounts
                    .update_profile(&mut self.session, &update)
                    .await?;
                self.remember_user()?;
                Ok(())
            }
        }
    }

    async fn start(&mut self) -> Result<(), Error> {
        match self.credentials.load() {
            Ok(Some(stored)) => {
                if let Err(error) = self
                    .accounts
                    .login_via_stored_credentials(&mut self.session, &stored)
                    .await
                {
                    warn!(%error, "stored credentials rejected; continuing anonymously");
                }
            }
            Ok(None) => {}
            Err(error) => warn!(%error, "stored credentials unreadable; continuing anonymously"),
        }
        self.stories.get_stories(&mut self.session).await?;
        self.navigator.show_only(&[Panel::AllStories]);
        Ok(())
    }

    async fn toggle_favorite(&mut self, story_id: String) -> Result<(), Error> {
        let story_id = StoryId::new(story_id)?;
        let story = self
            .session
            .stories()
            .get(&story_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("story {story_id} is not loaded")))?;
        if self.session.is_favorite(&story) {
            self.accounts
                .remove_favorite(&mut self.session, &story)
                .await
        } else {
            self.accounts.add_favorite(&mut self.session, &story).await
        }
    }

    /// Draft for editing one of the user's own stories, prefilled from the
    /// stored copy.
    fn edit_draft(
        &self,
        story_id: &StoryId,
        title: Option<&str>,
        author: Option<&str>,
        url: Option<&str>,
    ) -> Result<StoryDraft, Error> {
        self.session.require_user()?;
        let current = self
            .session
            .own_stories()
            .find(|story| story.id() == story_id)
            .ok_or_else(|| Error::not_found(format!("story {story_id} is not one of yours")))?;
        Ok(StoryDraft::from_story(current).with_overrides(title, author, url)?)
    }

    fn remember_user(&self) -> Result<(), Error> {
        let user = self.session.require_user()?;
        self.credentials
            .save(&StoredCredentials::for_user(user))
            .map_err(Error::from)
    }
}
