//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest client for the hosted story API
//! - **credentials**: cap-std directory holding the stored token and username
//!
//! Adapters are thin translators between domain types and transport or
//! storage representations. They contain no business logic.

pub mod credentials;
pub mod http;
