//! The pagination loop, run as a background task with a progress-event
//! stream.
//!
//! Pages are visited strictly in order 1..=max_pages; the loop stops
//! early at the first page with no usable "next" control, and a page
//! error aborts the remaining pages while preserving everything already
//! collected. No page is ever retried.
//!
//! A presentation layer (the CLI, or any interactive shell) spawns the
//! scrape and drains [`ScrapeEvent`]s from a channel while staying
//! responsive. Cancellation is raced against the in-flight page fetch,
//! so a cancel aborts the current page rather than merely preventing the
//! next one; records collected before the cancel are still delivered.
//!
//! The loop itself runs against [`ResultsSession`], so its ordering,
//! termination, and cancellation rules are tested with scripted
//! sessions rather than a live WebDriver.

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::search;
use crate::types::{GigRecord, SearchParams};
use crate::webdriver::{Browser, BrowserType};

/// How the scrape task reports progress to its consumer
#[derive(Debug)]
pub enum ScrapeEvent {
    /// One results page finished, with the filtered record count
    Page { page: usize, found: usize },
    /// Final record list (possibly partial after an error or cancel)
    Success(Vec<GigRecord>),
    /// Fatal error message (session init, or a page failure)
    Error(String),
    /// Always the last event; the browser session is closed by now
    Finished,
}

/// Session options for the spawned browser
#[derive(Clone, Debug)]
pub struct BrowserOptions {
    pub browser: BrowserType,
    pub headless: bool,
    pub proxy: Option<String>,
}

/// Handle to a running scrape: the event stream plus a cancel switch
pub struct ScrapeHandle {
    pub events: mpsc::Receiver<ScrapeEvent>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ScrapeHandle {
    /// Request cancellation. The in-flight page fetch is aborted; the
    /// task still emits Success with whatever was collected, then
    /// Finished.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Wait for the task itself to wind down
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// One session's page operations, as the page loop consumes them.
/// Implemented by [`Browser`].
pub(crate) trait ResultsSession {
    async fn fetch_page(&self, params: &SearchParams, page: usize) -> Result<Vec<GigRecord>>;
    async fn has_more(&self) -> bool;
    async fn finish(self) -> Result<()>;
}

impl ResultsSession for Browser {
    async fn fetch_page(&self, params: &SearchParams, page: usize) -> Result<Vec<GigRecord>> {
        search::scrape_page(self, params, page).await
    }

    async fn has_more(&self) -> bool {
        self.has_next_page().await
    }

    async fn finish(self) -> Result<()> {
        self.close().await
    }
}

/// Spawn the full paginated scrape on a background task.
pub fn spawn_scrape(params: SearchParams, opts: BrowserOptions) -> ScrapeHandle {
    let (event_tx, event_rx) = mpsc::channel(32);
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let task = tokio::spawn(scrape_task(params, opts, event_tx, cancel_rx));

    ScrapeHandle {
        events: event_rx,
        cancel: cancel_tx,
        task,
    }
}

async fn scrape_task(
    params: SearchParams,
    opts: BrowserOptions,
    events: mpsc::Sender<ScrapeEvent>,
    cancel: watch::Receiver<bool>,
) {
    let browser = match Browser::new(opts.browser, opts.headless, opts.proxy.as_deref()).await {
        Ok(browser) => browser,
        Err(e) => {
            error!("Browser session failed to start: {e:#}");
            let _ = events.send(ScrapeEvent::Error(format!("{e:#}"))).await;
            let _ = events.send(ScrapeEvent::Finished).await;
            return;
        }
    };

    drive_pages(browser, &params, &events, cancel).await;
}

async fn drive_pages<S: ResultsSession>(
    session: S,
    params: &SearchParams,
    events: &mpsc::Sender<ScrapeEvent>,
    mut cancel: watch::Receiver<bool>,
) {
    let mut all = Vec::new();
    let max_pages = params.max_pages.max(1);

    for page in 1..=max_pages {
        let result = tokio::select! {
            _ = cancel.changed() => {
                warn!(page, "Scrape cancelled mid-page");
                break;
            }
            result = session.fetch_page(params, page) => result,
        };

        match result {
            Ok(batch) => {
                let _ = events
                    .send(ScrapeEvent::Page {
                        page,
                        found: batch.len(),
                    })
                    .await;
                all.extend(batch);
            }
            Err(e) => {
                error!(page, "Aborting pagination: {e:#}");
                let _ = events.send(ScrapeEvent::Error(format!("{e:#}"))).await;
                break;
            }
        }

        if page == max_pages {
            break;
        }
        if !session.has_more().await {
            info!(page, "No next-page control, stopping");
            break;
        }
        tokio::select! {
            _ = cancel.changed() => break,
            _ = search::pause(search::PAGE_GAP_SECS) => {}
        }
    }

    if let Err(e) = session.finish().await {
        warn!("Browser session did not close cleanly: {e:#}");
    }

    info!(total = all.len(), "Scrape task finished");
    let _ = events.send(ScrapeEvent::Success(all)).await;
    let _ = events.send(ScrapeEvent::Finished).await;
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
