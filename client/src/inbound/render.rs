//! HTML fragments for stories, story lists and the profile panel.
//!
//! Rendering reads the session on every call: the favorite star is derived
//! from current membership each time and never cached on the story.

use tracing::{debug, warn};

use crate::domain::{Session, Story, StoryView, User};

use super::nav::{NavBar, Panel};

const NO_FAVORITES: &str = "No favorite stories!";
const NO_OWN_STORIES: &str = "No stories added by user yet!";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn star_markup(session: &Session, story: &Story) -> Option<String> {
    session.user()?;
    let glyph = if session.is_favorite(story) {
        "fa-solid"
    } else {
        "fa-regular"
    };
    Some(format!(
        r#"<span class="star"><i class="{glyph} fa-star"></i></span>"#
    ))
}

const EDIT_TOOLS: &str = concat!(
    r#"<span class="edit-pen"><i class="fa-regular fa-pen-to-square"></i></span>"#,
    "\n",
    r#"<span class="trash-can"><i class="fa-solid fa-trash-can"></i></span>"#,
);

/// Markup for one story list item.
///
/// Edit and delete tools appear only when `with_edit_tools` is set; the
/// star appears only while a user is logged in. A story whose URL has no
/// host is rendered without the hostname element.
pub fn story_markup(story: &Story, session: &Session, with_edit_tools: bool) -> String {
    let mut lines = vec![
        format!(r#"<li id="{}">"#, escape_html(story.id().as_ref())),
        "<div>".to_owned(),
    ];
    if with_edit_tools {
        lines.push(EDIT_TOOLS.to_owned());
    }
    lines.extend(star_markup(session, story));
    lines.push(format!(
        r#"<a href="{}" target="a_blank" class="story-link">{}</a>"#,
        escape_html(story.url()),
        escape_html(story.title())
    ));
    match story.host_name() {
        Ok(host) => lines.push(format!(
            r#"<small class="story-hostname">({})</small>"#,
            escape_html(&host)
        )),
        Err(error) => warn!(story_id = %story.id(), %error, "story url has no host"),
    }
    lines.push(format!(
        r#"<small class="story-author">by {}</small>"#,
        escape_html(story.author())
    ));
    lines.push(format!(
        r#"<small class="story-user">posted by {}</small>"#,
        escape_html(story.username())
    ));
    lines.push("</div>".to_owned());
    lines.push("</li>".to_owned());
    lines.join("\n")
}

fn list_markup(session: &Session, view: StoryView) -> String {
    let (list_id, empty_message) = match view {
        StoryView::Feed => ("all-stories-list", None),
        StoryView::Own => ("my-stories", Some(NO_OWN_STORIES)),
        StoryView::Favorites => ("favorited-stories", Some(NO_FAVORITES)),
    };
    let with_edit_tools = view == StoryView::Own;

    let items: Vec<String> = session
        .stories()
        .view(view)
        .map(|story| story_markup(story, session, with_edit_tools))
        .collect();
    debug!(?view, count = items.len(), "rendering story list");

    let mut out = format!(r#"<ol id="{list_id}" class="stories-list">"#);
    match (items.is_empty(), empty_message) {
        (true, Some(message)) => {
            out.push_str("\n<h3>");
            out.push_str(message);
            out.push_str("</h3>");
        }
        _ => {
            for item in items {
                out.push('\n');
                out.push_str(&item);
            }
        }
    }
    out.push_str("\n</ol>");
    out
}

/// The global feed.
pub fn feed_markup(session: &Session) -> String {
    list_markup(session, StoryView::Feed)
}

/// The active user's favorites, or the empty-favorites message.
pub fn favorites_markup(session: &Session) -> String {
    list_markup(session, StoryView::Favorites)
}

/// The active user's own stories with edit tools, or the empty message.
pub fn own_stories_markup(session: &Session) -> String {
    list_markup(session, StoryView::Own)
}

/// Profile summary shown above the profile form.
pub fn profile_markup(user: &User) -> String {
    let profile = user.profile();
    [
        r#"<section id="user-profile">"#.to_owned(),
        format!(
            r#"<p>Name: <span id="profile-name">{}</span></p>"#,
            escape_html(profile.name())
        ),
        format!(
            r#"<p>Username: <span id="profile-username">{}</span></p>"#,
            escape_html(profile.username().as_ref())
        ),
        format!(
            r#"<p>Account created: <span id="profile-account-date">{}</span></p>"#,
            profile.created_at().format("%Y-%m-%d")
        ),
        "</section>".to_owned(),
    ]
    .join("\n")
}

/// Nav-bar links for the session state.
pub fn nav_markup(bar: &NavBar) -> String {
    let mut links = vec![r##"<a id="nav-all" href="#">Hack or Snooze</a>"##.to_owned()];
    if bar.main_links {
        links.push(r##"<a id="nav-submit-story" href="#">submit</a>"##.to_owned());
        links.push(r##"<a id="nav-favorites" href="#">favorites</a>"##.to_owned());
        links.push(r##"<a id="nav-my-stories" href="#">my stories</a>"##.to_owned());
    }
    if bar.login {
        links.push(r##"<a id="nav-login" href="#">login/signup</a>"##.to_owned());
    }
    if let Some(username) = &bar.username {
        links.push(format!(
            r##"<a id="nav-user-profile" href="#">{}</a>"##,
            escape_html(username)
        ));
    }
    if bar.logout {
        links.push(r##"<a id="nav-logout" href="#">log out</a>"##.to_owned());
    }
    format!("<nav>\n{}\n</nav>", links.join("\n"))
}

/// Markup for one visible panel; form panels are drawn by the front end and
/// yield `None`.
pub fn panel_markup(panel: Panel, session: &Session) -> Option<String> {
    match panel {
        Panel::AllStories => Some(feed_markup(session)),
        Panel::Favorites => Some(favorites_markup(session)),
        Panel::MyStories => Some(own_stories_markup(session)),
        Panel::ProfileForm => session.user().map(profile_markup),
        Panel::SubmitForm | Panel::LoginForm | Panel::SignupForm => None,
    }
}
