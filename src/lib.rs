//! conduit-editor: compose and publish articles to a Conduit (RealWorld)
//! API from the terminal.

pub mod api;
pub mod cli;
pub mod config;
pub mod editor;
pub mod models;
pub mod session;
pub mod tui;
