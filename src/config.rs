use clap::Parser;

use crate::api::ApiClient;
use crate::constants::DEFAULT_BASE_URL;
use crate::error::Result;

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the nutrition assistant backend.
    #[arg(long, env = "NUTRICHAT_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

// Define the available subcommands
#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Log meals by chatting with the nutrition assistant.
    Chat,
    /// Change your settings by chatting with the settings assistant.
    Settings,
    /// Fetch and display your current settings.
    ShowSettings,
    /// Show logged meals per day.
    History,
}

impl Cli {
    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.base_url)
    }
}
