//! Collection synchronizer: story create, edit and delete against the API,
//! applied to every view of the session's store.
//!
//! Each operation awaits the API call first and mutates the store only once
//! it succeeds, so a failed call leaves every view untouched.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::StoryApi;
use crate::domain::{Error, Session, Story, StoryDraft, StoryId, StoryView};

/// Story list service over a [`StoryApi`] port.
#[derive(Clone)]
pub struct StoryListService<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> StoryListService<A> {
    /// Create a service that talks to `api`.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

impl<A> StoryListService<A>
where
    A: StoryApi + ?Sized,
{
    /// Fetch the full feed and replace the feed view with it.
    ///
    /// Returns the number of stories fetched.
    pub async fn get_stories(&self, session: &mut Session) -> Result<usize, Error> {
        let stories = self.api.list_stories().await?;
        let count = stories.len();
        session.stories_mut().replace_view(StoryView::Feed, stories);
        debug!(count, "feed refreshed");
        Ok(count)
    }

    /// Create a story and put it at the front of the feed and own views.
    pub async fn add_story(&self, session: &mut Session, draft: &StoryDraft) -> Result<Story, Error> {
        let token = session.require_user()?.login_token().clone();
        let story = self.api.create_story(&token, draft).await?;

        let store = session.stories_mut();
        store.prepend(StoryView::Feed, story.clone());
        store.prepend(StoryView::Own, story.clone());
        debug!(story_id = %story.id(), "story added");
        Ok(story)
    }

    /// Delete a story and drop it from the feed, own and favorites views.
    ///
    /// Local removal is idempotent: a second call for the same id changes
    /// nothing locally, though the API will report the story as missing.
    pub async fn remove_story(&self, session: &mut Session, story_id: &StoryId) -> Result<(), Error> {
        let token = session.require_user()?.login_token().clone();
        self.api.delete_story(&token, story_id).await?;

        let removed = session.stories_mut().remove_everywhere(story_id);
        debug!(%story_id, removed, "story removed");
        Ok(())
    }

    /// Edit a story and replace the single stored entity, so every view,
    /// including a favorite at index 0, shows the new data.
    pub async fn edit_story(
        &self,
        session: &mut Session,
        story_id: &StoryId,
        draft: &StoryDraft,
    ) -> Result<Story, Error> {
        let token = session.require_user()?.login_token().clone();
        let story = self.api.update_story(&token, story_id, draft).await?;

        let known = session.stories_mut().replace(story.clone());
        debug!(story_id = %story.id(), known, "story edited");
        Ok(story)
    }
}

#[cfg(test)]
#[path = "story_list_service_tests.rs"]
mod tests;
