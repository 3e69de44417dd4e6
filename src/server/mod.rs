//! Axum-based HTTP server for gemini-relay.
//!
//! This module sets up the HTTP server, its routes and the handlers that
//! turn text prompts and uploaded media into a single Gemini call.
//!
//! # Components
//!
//! - `handlers`: The generation endpoints plus health and metrics.
//! - `multipart`: Collecting prompt and files from multipart forms.
//! - `routes`: Router, shared state and the tower layers around it.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod multipart;
mod routes;

pub use routes::{create_router, AppState};
