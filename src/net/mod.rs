//! Networking: identity service client and wire types.
//!
//! Browser-only transport (`gloo-net`, `web-sys`) is gated behind the
//! `csr` feature; everything with behavior worth testing compiles natively.

pub mod identity;
pub mod types;
