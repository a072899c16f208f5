//! User data model.
//!
//! [`UserAccount`] is what the API hands back: the profile plus the user's
//! favorites and own stories, already converted into [`Story`] values.
//! [`User`] is the active identity held by a [`Session`]; its story
//! collections live in the session's [`StoryStore`] so that a story shared
//! between the feed, the favorites and the own-stories view exists once.
//!
//! [`Session`]: crate::domain::Session
//! [`StoryStore`]: crate::domain::StoryStore

use chrono::{DateTime, Utc};

use crate::domain::{SessionToken, Story, Username};

/// Profile fields reported by the user endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    username: Username,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Build a profile from already-validated parts.
    pub fn new(
        username: Username,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            username,
            name: name.into(),
            created_at,
            updated_at,
        }
    }

    /// Unique account identifier.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Account creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last profile change, when the API reports one.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Account snapshot returned by signup, login, lookup and profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Profile fields.
    pub profile: UserProfile,
    /// Favorited stories in API order.
    pub favorites: Vec<Story>,
    /// Stories posted by this user in API order.
    pub own_stories: Vec<Story>,
}

/// The authenticated user of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    profile: UserProfile,
    login_token: SessionToken,
}

impl User {
    /// Pair a profile with the token that authenticates it.
    pub fn new(profile: UserProfile, login_token: SessionToken) -> Self {
        Self {
            profile,
            login_token,
        }
    }

    /// Profile fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Unique account identifier.
    pub fn username(&self) -> &Username {
        self.profile.username()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.profile.name()
    }

    /// Token sent with every authenticated request.
    pub fn login_token(&self) -> &SessionToken {
        &self.login_token
    }
}
