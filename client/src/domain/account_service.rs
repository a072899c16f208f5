//! Account use-cases: signup, login, credential restore, profile update and
//! favorites.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{AuthenticatedAccount, StoredCredentials, StoryApi, StoryApiError};
use crate::domain::{
    Error, LoginCredentials, ProfileUpdate, Session, SessionState, SignupDetails, Story,
    StoryView,
};

/// Account service over a [`StoryApi`] port.
#[derive(Clone)]
pub struct AccountService<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> AccountService<A> {
    /// Create a service that talks to `api`.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A> AccountService<A>
where
    A: StoryApi + ?Sized,
{
    fn finish_authentication(
        session: &mut Session,
        previous: SessionState,
        outcome: Result<AuthenticatedAccount, StoryApiError>,
    ) -> Result<(), Error> {
        match outcome {
            Ok(AuthenticatedAccount { account, token }) => {
                debug!(username = %account.profile.username(), "user authenticated");
                session.activate(account, token);
                Ok(())
            }
            Err(error) => {
                session.abandon_authentication(previous);
                Err(error.into())
            }
        }
    }

    /// Register a new account and make it the session's user.
    pub async fn signup(&self, session: &mut Session, details: &SignupDetails) -> Result<(), Error> {
        let previous = session.begin_authentication();
        let outcome = self.api.signup(details).await;
        Self::finish_authentication(session, previous, outcome)
    }

    /// Log in with a username and password.
    pub async fn login(
        &self,
        session: &mut Session,
        credentials: &LoginCredentials,
    ) -> Result<(), Error> {
        let previous = session.begin_authentication();
        let outcome = self.api.login(credentials).await;
        Self::finish_authentication(session, previous, outcome)
    }

    /// Restore a user from a stored token and username.
    ///
    /// The start-up path treats any error as "not logged in" and discards it;
    /// on failure the session returns to whatever state it was in before.
    pub async fn login_via_stored_credentials(
        &self,
        session: &mut Session,
        credentials: &StoredCredentials,
    ) -> Result<(), Error> {
        let previous = session.begin_authentication();
        let outcome = self
            .api
            .fetch_user(&credentials.token, &credentials.username)
            .await
            .map(|account| AuthenticatedAccount {
                account,
                token: credentials.token.clone(),
            });
        Self::finish_authentication(session, previous, outcome)
    }

    /// Change the active user's name and/or password.
    ///
    /// The API may issue a fresh token; the session keeps whichever token it
    /// returns along with the refreshed profile and story views.
    pub async fn update_profile(
        &self,
        session: &mut Session,
        update: &ProfileUpdate,
    ) -> Result<(), Error> {
        let user = session.require_user()?;
        let token = user.login_token().clone();
        let username = user.username().clone();

        let AuthenticatedAccount { account, token } =
            self.api.update_user(&token, &username, update).await?;
        session.activate(account, token);
        debug!(%username, "profile updated");
        Ok(())
    }

    /// Favorite `story` for the active user, appending it to favorites.
    ///
    /// Favoriting a story that is already a favorite leaves the order alone.
    pub async fn add_favorite(&self, session: &mut Session, story: &Story) -> Result<(), Error> {
        let user = session.require_user()?;
        let token = user.login_token().clone();
        let username = user.username().clone();

        self.api.add_favorite(&token, &username, story.id()).await?;
        session
            .stories_mut()
            .append(StoryView::Favorites, story.clone());
        debug!(story_id = %story.id(), "favorite added");
        Ok(())
    }

    /// Unfavorite `story` for the active user.
    pub async fn remove_favorite(&self, session: &mut Session, story: &Story) -> Result<(), Error> {
        let user = session.require_user()?;
        let token = user.login_token().clone();
        let username = user.username().clone();

        self.api
            .remove_favorite(&token, &username, story.id())
            .await?;
        session
            .stories_mut()
            .remove_from(StoryView::Favorites, story.id());
        debug!(story_id = %story.id(), "favorite removed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
