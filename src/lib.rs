// gemini-relay - HTTP relay for Gemini text and multimodal prompts
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod server;
pub mod translation;
pub mod utils;
