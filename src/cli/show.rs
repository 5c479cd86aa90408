use anyhow::{anyhow, Result};
use clap::Args;
use std::io;
use tracing::debug;

use super::render;
use crate::config::Config;
use crate::graphql::GraphqlClient;

/// Show a single album with its cover and photo count
#[derive(Args)]
pub struct ShowCommand {
    /// Album id
    pub id: String,
}

impl ShowCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!("Fetching album {}", self.id);
        config.validate()?;

        let client = GraphqlClient::from_config(config)?;
        let album = client
            .fetch_album(&self.id)
            .await?
            .ok_or_else(|| anyhow!("Album {} not found", self.id))?;

        render::write_album_detail(&mut io::stdout(), &album)?;
        Ok(())
    }
}
