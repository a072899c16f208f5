//! Client library for the hack-or-snooze story API.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, the
//! story entity store, the session and the use-case services; [`outbound`]
//! implements the domain ports over HTTP and the filesystem; [`inbound`]
//! turns user events into service calls and HTML.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use config::{ClientSettings, SettingsError};
pub use inbound::app::{App, Event, Notice, Screen};
