use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use super::{browse::BrowseCommand, list::ListCommand, show::ShowCommand};
use crate::config::Config;

/// album-feed - browse a paginated photo album feed from the terminal
#[derive(Parser)]
#[command(
    name = "album-feed",
    version,
    about = "Browse a paginated photo album feed",
    long_about = r#"album-feed pages through the albums of a GraphQL endpoint, loading more
albums on demand and refreshing from the first page.

Examples:
  album-feed                      # Browse interactively
  album-feed list --pages 3       # Print the first three pages
  album-feed show 7               # Show album 7"#
)]
pub struct Cli {
    /// GraphQL endpoint
    #[arg(short = 'e', long = "endpoint", global = true)]
    pub endpoint: Option<String>,

    /// Page size
    #[arg(short = 'l', long = "limit", global = true)]
    pub limit: Option<u32>,

    /// Page to start from
    #[arg(short = 'p', long = "page", global = true)]
    pub page: Option<u32>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the album list
    List(ListCommand),
    /// Browse albums interactively
    Browse(BrowseCommand),
    /// Show a single album
    Show(ShowCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = Config::init()
            .await?
            .with_overrides(self.endpoint, self.limit, self.page);
        debug!("Configuration initialized: {:?}", config);

        match self.command {
            Some(Commands::List(cmd)) => cmd.execute(&config).await,
            Some(Commands::Browse(cmd)) => cmd.execute(&config).await,
            Some(Commands::Show(cmd)) => cmd.execute(&config).await,
            None => {
                info!("No command given, starting browse session");
                BrowseCommand::default().execute(&config).await
            }
        }
    }
}
