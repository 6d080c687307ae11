//! Simulated paged profile feed.
//!
//! Each load-more request runs as a tokio task that sleeps for the configured
//! latency and then sends a page back over an mpsc channel. The main loop
//! drains the channel once per frame. While a request is in flight further
//! requests are dropped, so a burst of load-more effects costs one page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use honeycomb_engine::DataSource;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use crate::config::FeedConfig;
use crate::profile::{Profile, ProfileGenerator};

/// Receiving end for delivered pages.
pub type PageReceiver = mpsc::UnboundedReceiver<Vec<Profile>>;

/// Paged profile source.
#[derive(Debug)]
pub struct FeedLoader {
    config: FeedConfig,
    generator: ProfileGenerator,
    in_flight: Arc<AtomicBool>,
    pages_tx: mpsc::UnboundedSender<Vec<Profile>>,
    requests: u64,
}

impl FeedLoader {
    /// Create a loader and the receiver its pages arrive on.
    pub fn new(config: FeedConfig) -> (Self, PageReceiver) {
        let (pages_tx, pages_rx) = mpsc::unbounded_channel();
        let loader = Self {
            generator: ProfileGenerator::new(config.seed),
            config,
            in_flight: Arc::new(AtomicBool::new(false)),
            pages_tx,
            requests: 0,
        };
        (loader, pages_rx)
    }

    /// Fetch the first page, waiting out the simulated latency.
    pub async fn fetch_initial(&mut self) -> Vec<Profile> {
        tokio::time::sleep(self.config.latency).await;
        let count = self.remaining().min(self.config.initial_page);
        let page = self.generator.page(count);
        info!(count = page.len(), "initial feed page loaded");
        page
    }

    /// True while a page request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Load-more requests that actually started a fetch.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Profiles handed out so far, delivered or still in flight.
    pub fn generated(&self) -> u64 {
        self.generator.generated()
    }

    fn remaining(&self) -> usize {
        match self.config.max_items {
            Some(max) => max.saturating_sub(self.generator.generated() as usize),
            None => usize::MAX,
        }
    }

    /// Start fetching the next page unless one is already on its way.
    pub fn request_page(&mut self) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            trace!("load-more ignored, page already in flight");
            return false;
        }

        let count = self.remaining().min(self.config.page_size);
        if count == 0 {
            debug!("feed exhausted");
            self.in_flight.store(false, Ordering::Release);
            return false;
        }

        self.requests += 1;
        let fails = self.generator.roll_failure(self.config.failure_rate);
        let page = if fails { Vec::new() } else { self.generator.page(count) };
        let latency = self.config.latency;
        let in_flight = Arc::clone(&self.in_flight);
        let pages_tx = self.pages_tx.clone();
        let request = self.requests;

        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            if fails {
                warn!(request, "feed page request failed");
            } else {
                debug!(request, count = page.len(), "feed page delivered");
                if pages_tx.send(page).is_err() {
                    debug!(request, "page receiver dropped");
                }
            }
            in_flight.store(false, Ordering::Release);
        });
        true
    }
}

impl DataSource for FeedLoader {
    fn load_more(&mut self) {
        self.request_page();
    }
}
