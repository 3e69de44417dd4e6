// CLI module for gemini-relay
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;

/// gemini-relay - HTTP relay for Gemini text and multimodal prompts
#[derive(Parser, Debug, Default)]
#[command(name = "gemini-relay", version, about, long_about = None)]
pub struct Args {
    /// Address to bind (overrides config and environment)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config and environment)
    #[arg(long, short)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides, the highest-precedence config source.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
