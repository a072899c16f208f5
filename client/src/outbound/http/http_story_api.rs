//! Reqwest-backed story API adapter.
//!
//! This adapter owns transport details only: endpoint construction, token
//! placement, HTTP error mapping and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    AuthEnvelope, CredentialsDto, ErrorEnvelope, ProfileFieldsDto, StoriesEnvelope, StoryBody,
    StoryEnvelope, TokenBody, UserBody, UserEnvelope, convert_stories,
};
use crate::domain::ports::{AuthenticatedAccount, StoryApi, StoryApiError};
use crate::domain::{
    LoginCredentials, ProfileUpdate, SessionToken, SignupDetails, Story, StoryDraft, StoryId,
    UserAccount, Username,
};

/// Production host of the story API.
pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

/// Story API adapter issuing JSON requests against one base URL.
#[derive(Debug, Clone)]
pub struct HttpStoryApi {
    client: Client,
    base_url: Url,
}

impl HttpStoryApi {
    /// Build an adapter; `timeout` bounds each whole request when set.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoryApiError> {
        endpoint_url(&self.base_url, segments)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, StoryApiError> {
        let url = self.endpoint(segments)?;
        debug!(%method, path = url.path(), "story api request");
        Ok(self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json"))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, StoryApiError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoryApiError> {
        let body = self.execute(request).await?;
        decode(&body)
    }
}

fn endpoint_url(base_url: &Url, segments: &[&str]) -> Result<Url, StoryApiError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            StoryApiError::invalid_request(format!("base url {base_url} cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, StoryApiError> {
    serde_json::from_slice(body).map_err(|error| {
        StoryApiError::decode(format!("invalid story api JSON payload: {error}"))
    })
}

fn authenticated(
    envelope: AuthEnvelope,
    fallback_token: Option<&SessionToken>,
) -> Result<AuthenticatedAccount, StoryApiError> {
    let token = match (envelope.token, fallback_token) {
        (Some(raw), _) => SessionToken::new(raw)
            .map_err(|error| StoryApiError::decode(format!("token: {error}")))?,
        (None, Some(current)) => current.clone(),
        (None, None) => return Err(StoryApiError::decode("response carried no token")),
    };
    let account = envelope.user.into_domain().map_err(StoryApiError::decode)?;
    Ok(AuthenticatedAccount { account, token })
}

#[async_trait]
impl StoryApi for HttpStoryApi {
    async fn list_stories(&self) -> Result<Vec<Story>, StoryApiError> {
        let request = self.request(Method::GET, &["stories"])?;
        let envelope: StoriesEnvelope = self.fetch(request).await?;
        convert_stories(envelope.stories).map_err(StoryApiError::decode)
    }

    async fn create_story(
        &self,
        token: &SessionToken,
        draft: &StoryDraft,
    ) -> Result<Story, StoryApiError> {
        let request = self.request(Method::POST, &["stories"])?.json(&StoryBody {
            token: token.expose(),
            story: draft.into(),
        });
        let envelope: StoryEnvelope = self.fetch(request).await?;
        envelope.story.into_domain().map_err(StoryApiError::decode)
    }

    async fn update_story(
        &self,
        token: &SessionToken,
        story_id: &StoryId,
        draft: &StoryDraft,
    ) -> Result<Story, StoryApiError> {
        let request = self
            .request(Method::PATCH, &["stories", story_id.as_ref()])?
            .json(&StoryBody {
                token: token.expose(),
                story: draft.into(),
            });
        let envelope: StoryEnvelope = self.fetch(request).await?;
        envelope.story.into_domain().map_err(StoryApiError::decode)
    }

    async fn delete_story(
        &self,
        token: &SessionToken,
        story_id: &StoryId,
    ) -> Result<(), StoryApiError> {
        let request = self
            .request(Method::DELETE, &["stories", story_id.as_ref()])?
            .json(&TokenBody {
                token: token.expose(),
            });
        self.execute(request).await?;
        Ok(())
    }

    async fn signup(
        &self,
        details: &SignupDetails,
    ) -> Result<AuthenticatedAccount, StoryApiError> {
        let request = self.request(Method::POST, &["signup"])?.json(&UserBody {
            user: CredentialsDto::signup(details),
            token: None,
        });
        let envelope: AuthEnvelope = self.fetch(request).await?;
        authenticated(envelope, None)
    }

    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedAccount, StoryApiError> {
        let request = self.request(Method::POST, &["login"])?.json(&UserBody {
            user: CredentialsDto::login(credentials),
            token: None,
        });
        let envelope: AuthEnvelope = self.fetch(request).await?;
        authenticated(envelope, None)
    }

    async fn fetch_user(
        &self,
        token: &SessionToken,
        username: &Username,
    ) -> Result<UserAccount, StoryApiError> {
        let request = self
            .request(Method::GET, &["users", username.as_ref()])?
            .query(&[("token", token.expose())]);
        let envelope: UserEnvelope = self.fetch(request).await?;
        envelope.user.into_domain().map_err(StoryApiError::decode)
    }

    async fn update_user(
        &self,
        token: &SessionToken,
        username: &Username,
        update: &ProfileUpdate,
    ) -> Result<AuthenticatedAccount, StoryApiError> {
        let request = self
            .request(Method::PATCH, &["users", username.as_ref()])?
            .json(&UserBody {
                user: ProfileFieldsDto::from(update),
                token: Some(token.expose()),
            });
        let envelope: AuthEnvelope = self.fetch(request).await?;
        authenticated(envelope, Some(token))
    }

    async fn add_favorite(
        &self,
        token: &SessionToken,
        username: &Username,
        story_id: &StoryId,
    ) -> Result<(), StoryApiError> {
        let request = self
            .request(
                Method::POST,
                &["users", username.as_ref(), "favorites", story_id.as_ref()],
            )?
            .json(&TokenBody {
                token: token.expose(),
            });
        self.execute(request).await?;
        Ok(())
    }

    async fn remove_favorite(
        &self,
        token: &SessionToken,
        username: &Username,
        story_id: &StoryId,
    ) -> Result<(), StoryApiError> {
        let request = self
            .request(
                Method::DELETE,
                &["users", username.as_ref(), "favorites", story_id.as_ref()],
            )?
            .json(&TokenBody {
                token: token.expose(),
            });
        self.execute(request).await?;
        Ok(())
    }
}

// GET requests carry the token in the URL, which reqwest echoes into its
// error messages.
fn map_transport_error(error: reqwest::Error) -> StoryApiError {
    StoryApiError::network(error.without_url().to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoryApiError {
    let message = serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| body_preview(body));
    let message = if message.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        message
    };
    StoryApiError::api(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
