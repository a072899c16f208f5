//! Story entity and the draft used to create or edit one.

use std::fmt;

use chrono::{DateTime, Utc};
use url::Url;

/// Validation errors for story identifiers and drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoryValidationError {
    /// Story id was blank.
    #[error("story id must not be empty")]
    EmptyId,
    /// A draft field was blank once trimmed.
    #[error("story {field} must not be empty")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// A story URL that is not an absolute URL with a host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("story url '{url}' is not an absolute url with a host")]
pub struct MalformedUrlError {
    url: String,
}

impl MalformedUrlError {
    /// Record the offending URL text.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The URL that failed to parse.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

/// Server-assigned opaque story identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoryId(String);

impl StoryId {
    /// Validate and construct a [`StoryId`].
    pub fn new(raw: impl Into<String>) -> Result<Self, StoryValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(StoryValidationError::EmptyId);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Field bundle for [`Story::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryParts {
    /// Server-assigned id.
    pub story_id: StoryId,
    /// Headline.
    pub title: String,
    /// Credited author (free text, not an account).
    pub author: String,
    /// Link target.
    pub url: String,
    /// Account that posted the story.
    pub username: String,
    /// Creation timestamp reported by the API.
    pub created_at: DateTime<Utc>,
}

/// A submitted link record.
///
/// Stories are never edited in place: an edit yields a new `Story` that
/// replaces the old one by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    story_id: StoryId,
    title: String,
    author: String,
    url: String,
    username: String,
    created_at: DateTime<Utc>,
}

impl Story {
    /// Build a story by copying every field from `parts`.
    pub fn new(parts: StoryParts) -> Self {
        let StoryParts {
            story_id,
            title,
            author,
            url,
            username,
            created_at,
        } = parts;
        Self {
            story_id,
            title,
            author,
            url,
            username,
            created_at,
        }
    }

    /// Server-assigned id.
    pub fn id(&self) -> &StoryId {
        &self.story_id
    }

    /// Headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Credited author.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Link target as submitted.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Account that posted the story.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Host component of the story URL.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedUrlError`] when the URL is relative or has no host
    /// (for example `mailto:` links).
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use snooze::domain::{Story, StoryId, StoryParts};
    ///
    /// let story = Story::new(StoryParts {
    ///     story_id: StoryId::new("abc").unwrap(),
    ///     title: "Title".to_owned(),
    ///     author: "Author".to_owned(),
    ///     url: "https://example.com/a/b".to_owned(),
    ///     username: "hueter".to_owned(),
    ///     created_at: Utc::now(),
    /// });
    /// assert_eq!(story.host_name().unwrap(), "example.com");
    /// ```
    pub fn host_name(&self) -> Result<String, MalformedUrlError> {
        let parsed = Url::parse(&self.url).map_err(|_| MalformedUrlError::new(self.url.as_str()))?;
        parsed
            .host_str()
            .map(str::to_owned)
            .ok_or_else(|| MalformedUrlError::new(self.url.as_str()))
    }
}

/// User-supplied fields for creating or editing a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    title: String,
    author: String,
    url: String,
}

impl StoryDraft {
    /// Validate draft fields; each is trimmed and must be non-empty.
    ///
    /// URL well-formedness is left to the API, which owns that rule.
    pub fn try_new(title: &str, author: &str, url: &str) -> Result<Self, StoryValidationError> {
        Ok(Self {
            title: non_blank(title, "title")?,
            author: non_blank(author, "author")?,
            url: non_blank(url, "url")?,
        })
    }

    /// Draft pre-filled from an existing story, as the edit form does.
    pub fn from_story(story: &Story) -> Self {
        Self {
            title: story.title.clone(),
            author: story.author.clone(),
            url: story.url.clone(),
        }
    }

    /// Replace the fields that were supplied, keeping the rest.
    ///
    /// Supplied fields follow the [`StoryDraft::try_new`] rules.
    pub fn with_overrides(
        self,
        title: Option<&str>,
        author: Option<&str>,
        url: Option<&str>,
    ) -> Result<Self, StoryValidationError> {
        Ok(Self {
            title: title.map_or(Ok(self.title), |raw| non_blank(raw, "title"))?,
            author: author.map_or(Ok(self.author), |raw| non_blank(raw, "author"))?,
            url: url.map_or(Ok(self.url), |raw| non_blank(raw, "url"))?,
        })
    }

    /// Headline.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Credited author.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Link target.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

fn non_blank(value: &str, field: &'static str) -> Result<String, StoryValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoryValidationError::BlankField { field });
    }
    Ok(trimmed.to_owned())
}
