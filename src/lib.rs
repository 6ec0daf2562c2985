//! # dashgate
//!
//! Leptos + WASM single-page dashboard gated behind a hosted identity
//! service (email/password and OAuth). All credential handling, token
//! issuance, and OAuth handshakes happen on the identity service; this
//! crate consumes its REST API and keeps a single reactive session state
//! that the router is guarded by.
//!
//! The interesting parts live in `state::auth` (the session state model and
//! guard decision), `components::auth_provider` (the session store), and
//! `net::identity` (the identity service client).

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
