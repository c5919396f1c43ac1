use crate::error::{EngineError, Result};
use crate::graph::LinkGraph;
use crate::metrics::NetworkMetrics;
use crate::seeds::SeedList;
use crate::solver::{self, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, RankParams};
use linkrank_crawler::fetcher::{DEFAULT_DEADLINE_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use linkrank_crawler::{LinkExtractor, PageFetcher, ProgressCallback};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// A ranking request: seed URLs plus optional overrides. When
/// `adjacency_matrix` is present the seeds are treated as plain labels
/// and no fetching happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub urls: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacency_matrix: Option<Vec<Vec<f64>>>,

    #[serde(default = "default_damping")]
    pub damping_factor: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_damping() -> f64 {
    DEFAULT_DAMPING
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl RankRequest {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            adjacency_matrix: None,
            damping_factor: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_matrix(urls: Vec<String>, matrix: Vec<Vec<f64>>) -> Self {
        Self {
            urls,
            adjacency_matrix: Some(matrix),
            damping_factor: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// One entry of the ranking, highest rank first. `index` is the URL's
/// position in the submitted seed list, which stays meaningful when the
/// same URL was submitted more than once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedUrl {
    pub url: String,
    pub rank: f64,
    pub index: usize,
}

/// A seed that could not be fetched, and why. These nodes stay in the
/// graph with no outbound links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchFailure {
    pub index: usize,
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub results: Vec<RankedUrl>,
    pub total_urls: usize,
    pub metrics: NetworkMetrics,
    pub adjacency_matrix: Vec<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fetch_failures: Vec<FetchFailure>,
}

/// Knobs for the crawl phase. Ignored in matrix mode.
pub struct CrawlSettings {
    pub workers: usize,
    pub timeout_secs: u64,
    pub deadline_secs: u64,
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            deadline_secs: DEFAULT_DEADLINE_SECS,
            progress_callback: None,
        }
    }
}

/// Run the full pipeline: validate the request, build the graph (by
/// crawling the seeds or from the provided matrix), rank, and measure.
pub async fn rank(request: RankRequest, settings: CrawlSettings) -> Result<RankResponse> {
    let seeds = SeedList::from_lines(request.urls)?;
    let params = RankParams::new(request.damping_factor, request.max_iterations)?;
    let n = seeds.len();

    let (graph, fetch_failures) = match request.adjacency_matrix {
        Some(ref rows) => (LinkGraph::from_matrix(n, rows)?, Vec::new()),
        None => crawl_graph(&seeds, &settings).await?,
    };

    let ranks = solver::pagerank(&graph, params)?;
    let metrics = NetworkMetrics::compute(&graph, seeds.urls());

    let mut results: Vec<RankedUrl> = seeds
        .urls()
        .iter()
        .cloned()
        .zip(ranks)
        .enumerate()
        .map(|(index, (url, rank))| RankedUrl { url, rank, index })
        .collect();
    // Stable sort keeps ties in input order
    results.sort_by(|a, b| b.rank.total_cmp(&a.rank));

    info!("Ranked {} URLs over {} edges", n, metrics.total_edges);

    Ok(RankResponse {
        results,
        total_urls: n,
        metrics,
        adjacency_matrix: graph.rows().to_vec(),
        fetch_failures,
    })
}

/// Fetch every seed and extract the edges between them.
async fn crawl_graph(
    seeds: &SeedList,
    settings: &CrawlSettings,
) -> Result<(LinkGraph, Vec<FetchFailure>)> {
    let mut fetcher = PageFetcher::with_timeout(settings.timeout_secs)
        .with_workers(settings.workers)
        .with_deadline(Duration::from_secs(settings.deadline_secs));

    if let Some(ref callback) = settings.progress_callback {
        fetcher = fetcher.with_progress_callback(callback.clone());
    }

    let pages = fetcher
        .fetch_all(seeds.urls())
        .await
        .map_err(|e| EngineError::Crawl(e.to_string()))?;

    let extractor = LinkExtractor::new(
        seeds
            .urls()
            .iter()
            .enumerate()
            .map(|(index, url)| (index, url.as_str())),
    );

    let mut links: Vec<Vec<usize>> = Vec::with_capacity(seeds.len());
    let mut failures = Vec::new();

    for (index, page) in pages.iter().enumerate() {
        match &page.body {
            Some(html) => links.push(extractor.extract(index, &page.url, html)),
            None => {
                links.push(Vec::new());
                let reason = page
                    .error
                    .clone()
                    .unwrap_or_else(|| "empty response body".to_string());
                warn!("Seed {} unreachable: {} ({})", index, page.url, reason);
                failures.push(FetchFailure {
                    index,
                    url: page.url.clone(),
                    reason,
                });
            }
        }
    }

    Ok((LinkGraph::from_links(seeds.len(), &links)?, failures))
}
