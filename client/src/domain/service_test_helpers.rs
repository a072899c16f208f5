//! Shared builders for domain service tests.

use chrono::{TimeZone, Utc};

use crate::domain::{
    Session, SessionToken, Story, StoryId, StoryParts, StoryView, UserAccount, UserProfile,
    Username,
};

pub(crate) const USERNAME: &str = "hueter";
pub(crate) const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.fixture";

pub(crate) fn story_id(raw: &str) -> StoryId {
    StoryId::new(raw).expect("fixture story id")
}

pub(crate) fn story(id: &str, title: &str) -> Story {
    Story::new(StoryParts {
        story_id: story_id(id),
        title: title.to_owned(),
        author: "Ada Author".to_owned(),
        url: format!("https://example.com/{id}"),
        username: USERNAME.to_owned(),
        created_at: Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("fixture timestamp"),
    })
}

pub(crate) fn username() -> Username {
    Username::new(USERNAME).expect("fixture username")
}

pub(crate) fn token() -> SessionToken {
    SessionToken::new(TOKEN).expect("fixture token")
}

pub(crate) fn account(favorites: Vec<Story>, own_stories: Vec<Story>) -> UserAccount {
    UserAccount {
        profile: UserProfile::new(username(), "Joel Burton", Utc::now(), None),
        favorites,
        own_stories,
    }
}

/// Active session whose feed, own and favorites views hold the given stories.
pub(crate) fn active_session(feed: Vec<Story>, own: Vec<Story>, favorites: Vec<Story>) -> Session {
    let mut session = Session::new();
    session.stories_mut().replace_view(StoryView::Feed, feed);
    session.activate(account(favorites, own), token());
    session
}

pub(crate) fn ids(session: &Session, view: StoryView) -> Vec<String> {
    session
        .stories()
        .view(view)
        .map(|story| story.id().to_string())
        .collect()
}
