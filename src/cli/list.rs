use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use tracing::{debug, info};

use super::render;
use crate::config::Config;
use crate::graphql::{Album, GraphqlClient};
use crate::pagination::{FetchController, LoadMore, PageRequest, PageSource};

/// Print the album list, loading additional pages on the way
#[derive(Args)]
pub struct ListCommand {
    /// Number of pages to load, including the first
    #[arg(short = 'n', long = "pages", default_value_t = 1)]
    pub pages: usize,
}

impl ListCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!("Executing list command");
        config.validate()?;

        let client = GraphqlClient::from_config(config)?;
        let controller = FetchController::new(client, config.pagination());

        let mut out = io::stdout();
        self.run(&controller, &mut out).await
    }

    async fn run<S, W>(&self, controller: &FetchController<Album, S>, out: &mut W) -> Result<()>
    where
        S: PageSource<Album>,
        W: Write,
    {
        let pagination = *controller.config();
        controller
            .load_first(PageRequest::new(pagination.limit, pagination.default_page))
            .await?;
        let mut loaded = 1;

        while loaded < self.pages {
            match controller.load_more().await? {
                LoadMore::Fetched(_) => loaded += 1,
                LoadMore::Exhausted | LoadMore::InFlight => break,
            }
        }
        info!("Loaded {} page(s)", loaded);

        let state = controller.state().await;
        render::write_albums(out, &state, 0)?;
        render::write_footer(out, &state, controller.status().await, controller.has_more().await)?;

        Ok(())
    }
}
