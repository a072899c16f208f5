//! Domain primitives, the story entity store and the use-case services.
//!
//! Purpose: keep the client's rules (which views hold a story, when a user
//! is logged in, which failures are which) free of transport and rendering
//! concerns. Adapters reach the domain through the traits in [`ports`].

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod session;
pub mod story;
pub mod story_list_service;
pub mod story_store;
pub mod user;

#[cfg(test)]
mod service_test_helpers;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, ProfileUpdate, SessionToken, SignupDetails, Username,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::session::{Session, SessionState};
pub use self::story::{
    MalformedUrlError, Story, StoryDraft, StoryId, StoryParts, StoryValidationError,
};
pub use self::story_list_service::StoryListService;
pub use self::story_store::{StoryStore, StoryView};
pub use self::user::{User, UserAccount, UserProfile};
