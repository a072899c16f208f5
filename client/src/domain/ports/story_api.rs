//! Driven port for the hosted story API.
//!
//! The domain owns request and response shapes; adapters own transport. The
//! API expects the session token in the query string for `GET` requests and
//! in the JSON body otherwise. That split belongs to the adapter, so callers
//! here just pass the token.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{
    LoginCredentials, ProfileUpdate, SessionToken, SignupDetails, Story, StoryDraft, StoryId,
    UserAccount, Username,
};

/// Account snapshot plus the token the API issued alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
    /// User profile and story collections.
    pub account: UserAccount,
    /// Token to send with subsequent requests.
    pub token: SessionToken,
}

define_port_error! {
    /// Errors surfaced while calling the story API.
    pub enum StoryApiError {
        /// The request never produced an HTTP response.
        Network { message: String } =>
            "story api unreachable: {message}",
        /// The API answered with a non-success status.
        Api { status: u16, message: String } =>
            "story api returned status {status}: {message}",
        /// A success response could not be decoded.
        Decode { message: String } =>
            "story api response decode failed: {message}",
        /// The adapter rejected the request before sending it.
        InvalidRequest { message: String } =>
            "story api request invalid: {message}",
    }
}

impl StoryApiError {
    /// HTTP status for [`StoryApiError::Api`] failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } | Self::InvalidRequest { .. } => None,
        }
    }
}

/// Port covering every story API endpoint the client consumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryApi: Send + Sync {
    /// `GET /stories`: the full feed, unauthenticated.
    async fn list_stories(&self) -> Result<Vec<Story>, StoryApiError>;

    /// `POST /stories`: create a story owned by the token's user.
    async fn create_story(
        &self,
        token: &SessionToken,
        draft: &StoryDraft,
    ) -> Result<Story, StoryApiError>;

    /// `PATCH /stories/{id}`: replace a story's editable fields.
    async fn update_story(
        &self,
        token: &SessionToken,
        story_id: &StoryId,
        draft: &StoryDraft,
    ) -> Result<Story, StoryApiError>;

    /// `DELETE /stories/{id}`.
    async fn delete_story(
        &self,
        token: &SessionToken,
        story_id: &StoryId,
    ) -> Result<(), StoryApiError>;

    /// `POST /signup`.
    async fn signup(&self, details: &SignupDetails)
    -> Result<AuthenticatedAccount, StoryApiError>;

    /// `POST /login`.
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedAccount, StoryApiError>;

    /// `GET /users/{username}` with the token as query parameter.
    async fn fetch_user(
        &self,
        token: &SessionToken,
        username: &Username,
    ) -> Result<UserAccount, StoryApiError>;

    /// `PATCH /users/{username}`: change name and/or password.
    async fn update_user(
        &self,
        token: &SessionToken,
        username: &Username,
        update: &ProfileUpdate,
    ) -> Result<AuthenticatedAccount, StoryApiError>;

    /// `POST /users/{username}/favorites/{storyId}`.
    async fn add_favorite(
        &self,
        token: &SessionToken,
        username: &Username,
        story_id: &StoryId,
    ) -> Result<(), StoryApiError>;

    /// `DELETE /users/{username}/favorites/{storyId}`.
    async fn remove_favorite(
        &self,
        token: &SessionToken,
        username: &Username,
        story_id: &StoryId,
    ) -> Result<(), StoryApiError>;
}
