use crate::error::{CrawlError, Result};
use crate::result::PageFetch;
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_DEADLINE_SECS: u64 = 60;

pub struct PageFetcher {
    client: Client,
    workers: usize,
    deadline: Duration,
    progress_callback: Option<ProgressCallback>,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("linkrank/0.1 (https://github.com/linkrank/linkrank)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_max_idle_per_host(50) // Connection pooling
            .pool_idle_timeout(Duration::from_secs(90))
            .http2_adaptive_window(true)
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            workers: DEFAULT_WORKERS,
            deadline: Duration::from_secs(DEFAULT_DEADLINE_SECS),
            progress_callback: None,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Fetch every seed URL with at most `workers` requests in flight.
    /// The returned vector is index-aligned with `seeds` regardless of
    /// completion order. Individual failures are recorded in the matching
    /// slot, never propagated.
    pub async fn fetch_all(&self, seeds: &[String]) -> Result<Vec<PageFetch>> {
        info!(
            "Fetching {} seed URLs with {} workers",
            seeds.len(),
            self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let deadline = tokio::time::Instant::now() + self.deadline;
        let batch_deadline = self.deadline;

        let mut handles = Vec::with_capacity(seeds.len());

        for (index, seed) in seeds.iter().enumerate() {
            let client = self.client.clone();
            let semaphore = semaphore.clone();
            let progress_cb = self.progress_callback.clone();
            let url = seed.clone();

            handles.push(tokio::spawn(async move {
                // Acquire semaphore permit
                let _permit = semaphore.acquire().await.unwrap();

                if let Some(ref callback) = progress_cb {
                    callback(index, url.clone());
                }

                match tokio::time::timeout_at(deadline, Self::fetch_page_static(&client, &url))
                    .await
                {
                    Ok(fetch) => fetch,
                    Err(_) => {
                        warn!("Gave up on {} after {:?}", url, batch_deadline);
                        PageFetch::with_error(
                            url,
                            CrawlError::DeadlineExceeded(batch_deadline).to_string(),
                        )
                    }
                }
            }));
        }

        let mut pages = Vec::with_capacity(handles.len());
        for joined in join_all(handles).await {
            pages.push(joined?);
        }

        let failed = pages.iter().filter(|page| page.error.is_some()).count();
        info!("Fetch complete. {} ok, {} failed", pages.len() - failed, failed);

        Ok(pages)
    }

    /// Static version of the fetch for use in spawned tasks
    async fn fetch_page_static(client: &Client, url: &str) -> PageFetch {
        debug!("Fetching {}", url);

        if let Err(e) = Url::parse(url) {
            return PageFetch::with_error(
                url.to_string(),
                CrawlError::InvalidUrl(format!("{}: {}", url, e)).to_string(),
            );
        }

        let start = Instant::now();
        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request failed for {}: {}", url, e);
                return PageFetch::with_error(url.to_string(), CrawlError::HttpError(e).to_string());
            }
        };
        let response_time = start.elapsed();

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let content_length = response.content_length();

        let mut fetch = PageFetch::new(url.to_string());
        fetch.status_code = status.as_u16();
        fetch.content_type = content_type;
        fetch.content_length = content_length;
        fetch.response_time = response_time;

        if !status.is_success() {
            fetch.error = Some(CrawlError::BadStatus(status.as_u16()).to_string());
            return fetch;
        }

        match response.text().await {
            Ok(body) => fetch.body = Some(body),
            Err(e) => fetch.error = Some(CrawlError::HttpError(e).to_string()),
        }

        fetch
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
