//! Inbound side: the event controller plus the navigation and rendering it
//! drives. Front ends (the CLI binary, tests) only talk to [`app::App`].

pub mod app;
pub mod nav;
pub mod render;
