//! Wire DTOs for the story API.
//!
//! Responses decode into these transport shapes first and map into domain
//! records in one pass. Request bodies borrow from domain values so nothing
//! secret is copied more than once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    LoginCredentials, ProfileUpdate, SignupDetails, Story, StoryDraft, StoryId, StoryParts,
    UserAccount, UserProfile, Username,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StoryDto {
    pub(super) story_id: String,
    pub(super) title: String,
    pub(super) author: String,
    pub(super) url: String,
    pub(super) username: String,
    pub(super) created_at: DateTime<Utc>,
}

impl StoryDto {
    pub(super) fn into_domain(self) -> Result<Story, String> {
        let story_id = StoryId::new(self.story_id).map_err(|error| error.to_string())?;
        Ok(Story::new(StoryParts {
            story_id,
            title: self.title,
            author: self.author,
            url: self.url,
            username: self.username,
            created_at: self.created_at,
        }))
    }
}

/// `UserJSON`; the API names the user's own stories `stories`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    pub(super) username: String,
    pub(super) name: String,
    pub(super) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(super) updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(super) favorites: Vec<StoryDto>,
    #[serde(default)]
    pub(super) stories: Vec<StoryDto>,
}

impl UserDto {
    pub(super) fn into_domain(self) -> Result<UserAccount, String> {
        let username = Username::new(&self.username).map_err(|error| error.to_string())?;
        let favorites = convert_stories(self.favorites)?;
        let own_stories = convert_stories(self.stories)?;
        Ok(UserAccount {
            profile: UserProfile::new(username, self.name, self.created_at, self.updated_at),
            favorites,
            own_stories,
        })
    }
}

pub(super) fn convert_stories(stories: Vec<StoryDto>) -> Result<Vec<Story>, String> {
    stories.into_iter().map(StoryDto::into_domain).collect()
}

#[derive(Debug, Deserialize)]
pub(super) struct StoriesEnvelope {
    pub(super) stories: Vec<StoryDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StoryEnvelope {
    pub(super) story: StoryDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserEnvelope {
    pub(super) user: UserDto,
}

/// `{user, token}` from signup, login and profile update. Profile updates
/// may omit the token.
#[derive(Debug, Deserialize)]
pub(super) struct AuthEnvelope {
    pub(super) user: UserDto,
    #[serde(default)]
    pub(super) token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TokenBody<'a> {
    pub(super) token: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct StoryFieldsDto<'a> {
    title: &'a str,
    author: &'a str,
    url: &'a str,
}

impl<'a> From<&'a StoryDraft> for StoryFieldsDto<'a> {
    fn from(draft: &'a StoryDraft) -> Self {
        Self {
            title: draft.title(),
            author: draft.author(),
            url: draft.url(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct StoryBody<'a> {
    pub(super) token: &'a str,
    pub(super) story: StoryFieldsDto<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct CredentialsDto<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> CredentialsDto<'a> {
    pub(super) fn login(credentials: &'a LoginCredentials) -> Self {
        Self {
            username: credentials.username().as_ref(),
            password: credentials.password(),
            name: None,
        }
    }

    pub(super) fn signup(details: &'a SignupDetails) -> Self {
        Self {
            name: Some(details.name()),
            ..Self::login(details.credentials())
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct UserBody<'a, T> {
    pub(super) user: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProfileFieldsDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

impl<'a> From<&'a ProfileUpdate> for ProfileFieldsDto<'a> {
    fn from(update: &'a ProfileUpdate) -> Self {
        Self {
            password: update.password(),
            name: update.name(),
        }
    }
}
