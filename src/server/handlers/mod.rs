//! HTTP request handlers

mod assets;
mod config_api;
mod passthrough;
mod play;

pub use assets::{content_type_for, serve_frontend, serve_public};
pub use config_api::{handle_no_label_tile_server, handle_tile_server};
pub use passthrough::handle_passthrough;
pub use play::{handle_play, join_location};
