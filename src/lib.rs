//! Earthwalker - a street-level geography guessing game
//!
//! Players walk through the places of a shared challenge one round at a
//! time. Each place is shown through the imagery provider's own viewer,
//! fetched on the player's behalf and rewritten so that branding, place
//! labels and outbound links do not give the answer away.
//!
//! ## Request flow
//!
//! 1. **Session**: the challenge and result a request belongs to are
//!    recovered from the `id` query parameter and tracking cookies, then
//!    checked against the stores (see [`session`]).
//! 2. **Play**: incomplete results get their next place served and their
//!    cookies refreshed; everything else is redirected (see [`server`]).
//! 3. **Provider**: the viewer page is fetched, the injection fragment is
//!    spliced in and provider URLs are rewritten to stay on this origin
//!    (see [`provider`]).
//!
//! No state is kept between requests beyond what the stores and the
//! player's cookies hold.

pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod server;
pub mod session;
pub mod store;

pub use domain::*;
pub use error::PlayError;
