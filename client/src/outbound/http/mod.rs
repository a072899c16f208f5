//! Story API outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `StoryApi` port.

mod dto;
mod http_story_api;

pub use http_story_api::{DEFAULT_BASE_URL, HttpStoryApi};
