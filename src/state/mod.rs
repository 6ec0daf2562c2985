//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State lives in plain structs that components wrap in `RwSignal`s and
//! provide via context, so the transition logic stays testable without a
//! browser or a reactive runtime.

pub mod auth;
