//! Visible-panel state machine and nav-bar state.

use std::collections::BTreeSet;

use crate::domain::Session;

/// A page region the front end can show or hide.
///
/// Declaration order is the top-to-bottom order panels are drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
    /// Profile form for the active user.
    ProfileForm,
    /// Story submit/edit form.
    SubmitForm,
    /// Login form.
    LoginForm,
    /// Signup form.
    SignupForm,
    /// The global feed.
    AllStories,
    /// The active user's own stories.
    MyStories,
    /// The active user's favorites.
    Favorites,
}

/// Nav-bar link the user clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavClick {
    /// Site name: back to the feed.
    All,
    /// "submit".
    Submit,
    /// "favorites".
    Favorites,
    /// "my stories".
    MyStories,
    /// "login/signup".
    Login,
    /// The username link.
    Profile,
}

impl NavClick {
    fn requires_user(self) -> bool {
        matches!(
            self,
            Self::Submit | Self::Favorites | Self::MyStories | Self::Profile
        )
    }
}

/// Tracks which panels are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    visible: BTreeSet<Panel>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Navigator showing the feed.
    pub fn new() -> Self {
        let mut navigator = Self {
            visible: BTreeSet::new(),
        };
        navigator.show_only(&[Panel::AllStories]);
        navigator
    }

    /// Visible panels in drawing order.
    pub fn visible(&self) -> impl Iterator<Item = Panel> + '_ {
        self.visible.iter().copied()
    }

    /// Whether `panel` is currently shown.
    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible.contains(&panel)
    }

    /// Hide everything, then show `panels`.
    pub fn show_only(&mut self, panels: &[Panel]) {
        self.visible.clear();
        self.visible.extend(panels.iter().copied());
    }

    /// Apply a nav-bar click.
    ///
    /// Links that need a user send an anonymous session to the login and
    /// signup forms instead.
    pub fn click(&mut self, click: NavClick, session: &Session) {
        let click = if click.requires_user() && session.user().is_none() {
            NavClick::Login
        } else {
            click
        };
        let panels: &[Panel] = match click {
            NavClick::All => &[Panel::AllStories],
            NavClick::Submit => &[Panel::SubmitForm, Panel::AllStories],
            NavClick::Favorites => &[Panel::Favorites],
            NavClick::MyStories => &[Panel::MyStories],
            NavClick::Login => &[Panel::LoginForm, Panel::SignupForm],
            NavClick::Profile => &[Panel::ProfileForm, Panel::MyStories, Panel::Favorites],
        };
        self.show_only(panels);
    }
}

/// Nav-bar state derived from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    /// Submit, favorites and my-stories links.
    pub main_links: bool,
    /// Login/signup link.
    pub login: bool,
    /// Logout link.
    pub logout: bool,
    /// Username shown as the profile link.
    pub username: Option<String>,
}

impl NavBar {
    /// Nav bar for the session's current user, if any.
    pub fn for_session(session: &Session) -> Self {
        match session.user() {
            Some(user) => Self {
                main_links: true,
                login: false,
                logout: true,
                username: Some(user.username().to_string()),
            },
            None => Self {
                main_links: false,
                login: true,
                logout: false,
                username: None,
            },
        }
    }
}
