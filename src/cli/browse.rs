//! Interactive, line-oriented browsing of the album list

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use super::render;
use crate::config::Config;
use crate::graphql::{Album, GraphqlClient};
use crate::pagination::{FetchController, LoadMore, PageRequest, PageSource};

const HELP: &str = "commands: more | refresh | show <n> | help | quit";

/// Browse albums interactively: load more, refresh, open an album
#[derive(Args, Default)]
pub struct BrowseCommand {}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    More,
    Refresh,
    Show(usize),
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        let input = match command {
            "more" | "m" => Input::More,
            "refresh" | "r" => Input::Refresh,
            "show" | "s" => match parts.next().and_then(|n| n.parse().ok()) {
                Some(n) => Input::Show(n),
                None => Input::Unknown(line.trim().to_string()),
            },
            "help" | "h" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            _ => Input::Unknown(line.trim().to_string()),
        };
        Some(input)
    }
}

impl BrowseCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        debug!("Starting browse session");
        config.validate()?;

        let client = GraphqlClient::from_config(config)?;
        let controller = FetchController::new(client, config.pagination());

        let input = BufReader::new(tokio::io::stdin());
        let mut out = io::stdout();
        run_session(&controller, input, &mut out).await
    }
}

/// Drive a browse session from `input` until it ends or `quit` is read.
///
/// Fetch failures are reported and the controller is returned to idle so
/// the session can carry on.
pub async fn run_session<S, R, W>(
    controller: &FetchController<Album, S>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: PageSource<Album>,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let pagination = *controller.config();
    match controller
        .load_first(PageRequest::new(pagination.limit, pagination.default_page))
        .await
    {
        Ok(_) => render::write_albums(out, &controller.state().await, 0)?,
        Err(e) => {
            warn!("Initial load failed: {}", e);
            writeln!(out, "error: {}", e)?;
            controller.reset_status().await;
        }
    }
    write_status(controller, out).await?;
    writeln!(out, "{}", HELP)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Input::parse(&line) else {
            continue;
        };

        match command {
            Input::More => {
                let before = controller.len().await;
                match controller.load_more().await {
                    Ok(LoadMore::Fetched(_)) => {
                        render::write_albums(out, &controller.state().await, before)?
                    }
                    Ok(LoadMore::InFlight) => writeln!(out, "busy, try again")?,
                    Ok(LoadMore::Exhausted) => {}
                    Err(e) => {
                        writeln!(out, "error: {}", e)?;
                        controller.reset_status().await;
                    }
                }
                write_status(controller, out).await?;
            }
            Input::Refresh => {
                match controller.refresh().await {
                    Ok(_) => render::write_albums(out, &controller.state().await, 0)?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
                write_status(controller, out).await?;
            }
            Input::Show(n) => {
                let state = controller.state().await;
                match n.checked_sub(1).and_then(|i| state.items.get(i)) {
                    Some(album) => render::write_album_detail(out, album)?,
                    None => writeln!(out, "no album at position {}", n)?,
                }
            }
            Input::Help => writeln!(out, "{}", HELP)?,
            Input::Quit => break,
            Input::Unknown(text) => writeln!(out, "unknown command: {}", text)?,
        }
        out.flush()?;
    }

    Ok(())
}

async fn write_status<S, W>(controller: &FetchController<Album, S>, out: &mut W) -> Result<()>
where
    S: PageSource<Album>,
    W: Write,
{
    let state = controller.state().await;
    render::write_footer(out, &state, controller.status().await, controller.has_more().await)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{Cursor, FetchError, FetchResult, LinkSet, Page, PaginationConfig};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct TwoPages {
        fail_more: AtomicBool,
    }

    #[async_trait]
    impl PageSource<Album> for TwoPages {
        async fn fetch_page(&self, request: PageRequest) -> FetchResult<Page<Album>> {
            let next = (request.page == 1).then(|| Cursor::new(request.limit, 2));
            let items = (1..=request.limit)
                .map(|i| {
                    let id = (request.page - 1) * request.limit + i;
                    Album {
                        id: id.to_string(),
                        title: format!("album {}", id),
                        photos: Default::default(),
                    }
                })
                .collect();
            Ok(Page::new(
                items,
                LinkSet {
                    next,
                    ..Default::default()
                },
            ))
        }

        async fn fetch_more(&self, request: PageRequest) -> FetchResult<Page<Album>> {
            if self.fail_more.swap(false, Ordering::SeqCst) {
                return Err(FetchError::failed("timed out"));
            }
            self.fetch_page(request).await
        }
    }

    async fn session(source: TwoPages, script: &str) -> String {
        let controller = FetchController::new(source, PaginationConfig::new(2, 1));
        let mut out = Vec::new();
        run_session(&controller, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(Input::parse("more"), Some(Input::More));
        assert_eq!(Input::parse("  s 3 "), Some(Input::Show(3)));
        assert_eq!(Input::parse("show x"), Some(Input::Unknown("show x".to_string())));
        assert_eq!(Input::parse("   "), None);
    }

    #[tokio::test]
    async fn test_more_until_end_then_refresh() {
        let out = session(TwoPages::default(), "more\nmore\nrefresh\nquit\nmore\n").await;

        assert!(out.contains("[4] album 4"));
        assert!(out.contains("-- 4 albums -- You reached the end"));
        // has_more after refresh reflects the replaced collection
        assert!(out.trim_end().ends_with("-- 2 albums -- You reached the end"));
    }

    #[tokio::test]
    async fn test_show_album_detail() {
        let out = session(TwoPages::default(), "show 2\nshow 9\n").await;

        assert!(out.contains("album 2\n  id:        2"));
        assert!(out.contains("no album at position 9"));
    }

    #[tokio::test]
    async fn test_failed_more_recovers() {
        let source = TwoPages::default();
        source.fail_more.store(true, Ordering::SeqCst);

        let out = session(source, "more\nmore\n").await;

        assert!(out.contains("error: Fetch failed: timed out"));
        assert!(out.contains("[3] album 3"));
    }
}
