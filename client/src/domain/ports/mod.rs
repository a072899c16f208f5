//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod story_api;

#[cfg(test)]
pub use credential_store::{InMemoryCredentialStore, MockCredentialStore};
pub use credential_store::{CredentialStore, CredentialStoreError, StoredCredentials};
#[cfg(test)]
pub use story_api::MockStoryApi;
pub use story_api::{AuthenticatedAccount, StoryApi, StoryApiError};
