//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for a specific API area.
//! Handlers are thin wrappers that delegate to `SecureLlmService`.

pub mod endpoints;
pub mod inference;
pub mod status;
