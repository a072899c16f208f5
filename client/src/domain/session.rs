//! Explicit session context replacing process-wide "current user" state.
//!
//! A [`Session`] owns the [`StoryStore`] and the lifecycle of the active user.
//! Every mutating operation takes `&mut Session`, so at most one writer can
//! touch the collections at a time.

use crate::domain::{
    Error, SessionToken, Story, StoryId, StoryStore, StoryView, User, UserAccount,
};

/// Lifecycle of the session's user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is logged in.
    #[default]
    Absent,
    /// A signup, login or credential restore is in flight.
    Authenticating,
    /// A user is logged in.
    Active(User),
}

/// Session context passed to every operation that needs user or story state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    stories: StoryStore,
}

impl Session {
    /// Anonymous session with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Active user, if any.
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Active(user) => Some(user),
            SessionState::Absent | SessionState::Authenticating => None,
        }
    }

    /// Active user or an [`Error::unauthorized`] failure.
    pub fn require_user(&self) -> Result<&User, Error> {
        self.user()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Mark an authentication attempt as in flight.
    ///
    /// Returns the state the attempt interrupted; hand it back to
    /// [`Session::abandon_authentication`] if the attempt fails. The store is
    /// left alone until [`Session::activate`] succeeds.
    #[must_use = "pass the previous state to abandon_authentication on failure"]
    pub fn begin_authentication(&mut self) -> SessionState {
        std::mem::replace(&mut self.state, SessionState::Authenticating)
    }

    /// Restore `previous` after a failed attempt, so a user who was active
    /// before stays active with their views intact.
    ///
    /// Has no effect if the session is not mid-authentication.
    pub fn abandon_authentication(&mut self, previous: SessionState) {
        if self.state == SessionState::Authenticating {
            self.state = previous;
        }
    }

    /// Install `account` as the active user, loading its own stories and
    /// favorites into the store.
    pub fn activate(&mut self, account: UserAccount, token: SessionToken) {
        let UserAccount {
            profile,
            favorites,
            own_stories,
        } = account;
        self.stories.replace_view(StoryView::Own, own_stories);
        self.stories.replace_view(StoryView::Favorites, favorites);
        self.state = SessionState::Active(User::new(profile, token));
    }

    /// Discard the active user and their views; the feed stays.
    pub fn end(&mut self) -> Option<User> {
        self.stories.clear_view(StoryView::Own);
        self.stories.clear_view(StoryView::Favorites);
        match std::mem::take(&mut self.state) {
            SessionState::Active(user) => Some(user),
            SessionState::Absent | SessionState::Authenticating => None,
        }
    }

    /// Read access to the entity store.
    pub fn stories(&self) -> &StoryStore {
        &self.stories
    }

    pub(crate) fn stories_mut(&mut self) -> &mut StoryStore {
        &mut self.stories
    }

    /// Global feed in order.
    pub fn feed(&self) -> impl Iterator<Item = &Story> + '_ {
        self.stories.view(StoryView::Feed)
    }

    /// Active user's own stories in order.
    pub fn own_stories(&self) -> impl Iterator<Item = &Story> + '_ {
        self.stories.view(StoryView::Own)
    }

    /// Active user's favorites in order.
    pub fn favorites(&self) -> impl Iterator<Item = &Story> + '_ {
        self.stories.view(StoryView::Favorites)
    }

    /// Whether the active user has favorited `story`, by id.
    ///
    /// Always `false` without an active user.
    pub fn is_favorite(&self, story: &Story) -> bool {
        self.is_favorite_id(story.id())
    }

    /// [`Session::is_favorite`] keyed by id.
    pub fn is_favorite_id(&self, id: &StoryId) -> bool {
        self.user().is_some() && self.stories.contains(StoryView::Favorites, id)
    }
}
