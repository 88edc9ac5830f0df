//! Bounded-concurrency fetch worker pool.
//!
//! Submits one task per input URL, bounded by a semaphore, and gathers
//! results through a single mpsc aggregation channel. The call joins all
//! tasks before returning (channel close is the join barrier); result
//! order is not guaranteed, cardinality is: exactly one record per
//! submitted URL, failures included.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, instrument, warn};
use url::Url;

use faqharvest_shared::{FaqHarvestError, FetchStatus, Result, ScrapeConfig, UrlRecord};

use crate::archive::Archiver;
use crate::jsonld;

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("FaqHarvest/", env!("CARGO_PKG_VERSION"));

/// Concurrent fetch pool with FAQ schema detection and archiving.
pub struct FetchPool {
    client: Client,
    config: ScrapeConfig,
}

impl FetchPool {
    /// Create a pool with the given configuration.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FaqHarvestError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Fetch every URL once, detect FAQ schema, archive detected pages.
    ///
    /// Blocks until all submitted tasks complete. Returns exactly one
    /// record per submitted URL; duplicates in the input produce
    /// independent duplicate records. Per-task failures never abort the
    /// batch.
    #[instrument(skip_all, fields(urls = urls.len(), workers = self.config.workers))]
    pub async fn run(&self, urls: &[String], archiver: &Archiver) -> Vec<UrlRecord> {
        let semaphore = Arc::new(Semaphore::new(self.config.workers.max(1)));
        let (tx, mut rx) = mpsc::channel::<UrlRecord>(urls.len().max(1));

        info!(workers = self.config.workers, "starting fetch pool");

        for url in urls {
            let client = self.client.clone();
            let archiver = archiver.clone();
            let sem = semaphore.clone();
            let tx = tx.clone();
            let url = url.clone();

            tokio::spawn(async move {
                let _permit = sem.acquire().await.expect("semaphore closed");
                let record = fetch_one(&client, &url, &archiver).await;
                // Receiver outlives all senders; a send only fails if the
                // pool was dropped mid-run.
                let _ = tx.send(record).await;
            });
        }

        // The aggregation loop ends when the last worker drops its sender.
        drop(tx);

        let mut records = Vec::with_capacity(urls.len());
        while let Some(record) = rx.recv().await {
            records.push(record);
        }

        info!(
            records = records.len(),
            detected = records.iter().filter(|r| r.detected).count(),
            "fetch pool complete"
        );

        records
    }
}

/// Fetch a single URL and classify the outcome. One attempt, no retry.
async fn fetch_one(client: &Client, url: &str, archiver: &Archiver) -> UrlRecord {
    let fetch_date = Utc::now();
    debug!(url, "fetching");

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(url, error = %e, "request failed");
            return UrlRecord {
                url: url.to_string(),
                fetch_date,
                status: FetchStatus::Error,
                detected: false,
            };
        }
    };

    let status = FetchStatus::Http(response.status().as_u16());
    let final_url = response.url().clone();

    if !status.is_success() {
        debug!(url, %status, "non-success response, skipping body");
        return UrlRecord {
            url: url.to_string(),
            fetch_date,
            status,
            detected: false,
        };
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(url, error = %e, "failed to read response body");
            return UrlRecord {
                url: url.to_string(),
                fetch_date,
                status: FetchStatus::Error,
                detected: false,
            };
        }
    };

    let documents = jsonld::extract_blocks(&body);
    let detected = jsonld::detect(&documents);

    if detected {
        archive_page(archiver, url, &final_url, &body, &documents);
    }

    UrlRecord {
        url: url.to_string(),
        fetch_date,
        status,
        detected,
    }
}

/// Archive a detected page under the submitted URL's canonical key.
fn archive_page(
    archiver: &Archiver,
    submitted: &str,
    final_url: &Url,
    body: &str,
    documents: &[serde_json::Value],
) {
    // Keys derive from the submitted URL text so they stay stable across
    // redirects; fall back to the resolved URL if the input won't re-parse.
    let key_url = Url::parse(submitted).unwrap_or_else(|_| final_url.clone());
    archiver.archive(&key_url, body, documents);
}
