// End-to-end tests for the ranking engine

use linkrank_core::engine::{self, CrawlSettings, RankRequest};
use linkrank_core::error::EngineError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html")
        .set_body_string(body.to_string())
}

// ============================================================================
// Matrix Mode Tests
// ============================================================================

#[tokio::test]
async fn test_matrix_mode_ranks_most_linked_first() {
    let request = RankRequest::with_matrix(
        vec![
            "https://a.test/".to_string(),
            "https://b.test/".to_string(),
            "https://c.test/".to_string(),
        ],
        vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
        ],
    );

    let response = engine::rank(request, CrawlSettings::default()).await.unwrap();

    assert_eq!(response.total_urls, 3);
    assert_eq!(response.results.len(), 3);
    assert_eq!(response.results[0].url, "https://a.test/");
    // B and C tie, so input order decides
    assert_eq!(response.results[1].url, "https://b.test/");
    assert_eq!(response.results[2].url, "https://c.test/");
    assert!((response.results[1].rank - response.results[2].rank).abs() < 1e-12);

    assert_eq!(
        response.adjacency_matrix,
        vec![vec![0, 1, 1], vec![1, 0, 0], vec![1, 0, 0]]
    );
    assert_eq!(response.metrics.total_edges, 4);
    assert!(response.fetch_failures.is_empty());

    let sum: f64 = response.results.iter().map(|r| r.rank).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_matrix_mode_keeps_ties_in_input_order() {
    let request = RankRequest::with_matrix(
        vec!["one".to_string(), "two".to_string(), "three".to_string()],
        vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ],
    );

    let response = engine::rank(request, CrawlSettings::default()).await.unwrap();

    let names: Vec<&str> = response.results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(names, vec!["one", "two", "three"]);
    assert_eq!(response.results[0].index, 0);
    assert_eq!(response.results[2].index, 2);
}

#[tokio::test]
async fn test_matrix_mode_accepts_arbitrary_labels() {
    // Labels are echoed, never fetched or validated as URLs.
    let request = RankRequest::with_matrix(
        vec!["alpha".to_string(), "beta".to_string()],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
    );

    let response = engine::rank(request, CrawlSettings::default()).await.unwrap();
    assert_eq!(response.results.len(), 2);
}

#[tokio::test]
async fn test_duplicate_urls_keep_distinct_rows() {
    let request = RankRequest::with_matrix(
        vec!["https://a.test/".to_string(), "https://a.test/".to_string()],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
    );

    let response = engine::rank(request, CrawlSettings::default()).await.unwrap();

    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].url, response.results[1].url);
    assert_eq!(response.results[0].index, 0);
    assert_eq!(response.results[1].index, 1);
    assert!((response.results[0].rank - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_blank_lines_are_dropped_before_shape_checking() {
    let request = RankRequest::with_matrix(
        vec![
            "https://a.test/".to_string(),
            "   ".to_string(),
            "https://b.test/".to_string(),
        ],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
    );

    let response = engine::rank(request, CrawlSettings::default()).await.unwrap();
    assert_eq!(response.total_urls, 2);
}

// ============================================================================
// Request Validation Tests
// ============================================================================

#[tokio::test]
async fn test_empty_url_list_is_rejected() {
    let request = RankRequest::new(Vec::new());
    let err = engine::rank(request, CrawlSettings::default()).await.unwrap_err();

    assert!(matches!(err, EngineError::EmptyInput));
    assert_eq!(err.code(), "empty_input");
    assert!(err.is_input_error());
}

#[tokio::test]
async fn test_whitespace_only_urls_are_rejected() {
    let request = RankRequest::new(vec!["   ".to_string(), "\t".to_string()]);
    let err = engine::rank(request, CrawlSettings::default()).await.unwrap_err();

    assert!(matches!(err, EngineError::EmptyInput));
}

#[tokio::test]
async fn test_matrix_shape_mismatch_is_rejected() {
    let request = RankRequest::with_matrix(
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
    );
    let err = engine::rank(request, CrawlSettings::default()).await.unwrap_err();

    assert!(matches!(err, EngineError::ShapeMismatch { expected: 3, .. }));
}

#[tokio::test]
async fn test_matrix_invalid_entry_is_rejected() {
    let request = RankRequest::with_matrix(
        vec!["a".to_string(), "b".to_string()],
        vec![vec![0.0, 1.5], vec![1.0, 0.0]],
    );
    let err = engine::rank(request, CrawlSettings::default()).await.unwrap_err();

    assert!(matches!(err, EngineError::InvalidValue { row: 0, col: 1, .. }));
}

#[tokio::test]
async fn test_out_of_range_damping_is_rejected() {
    let mut request = RankRequest::with_matrix(
        vec!["a".to_string(), "b".to_string()],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
    );
    request.damping_factor = 1.5;

    let err = engine::rank(request, CrawlSettings::default()).await.unwrap_err();
    assert!(matches!(err, EngineError::ParameterRange(_)));
}

#[tokio::test]
async fn test_zero_iterations_is_rejected() {
    let mut request = RankRequest::with_matrix(
        vec!["a".to_string(), "b".to_string()],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
    );
    request.max_iterations = 0;

    let err = engine::rank(request, CrawlSettings::default()).await.unwrap_err();
    assert!(matches!(err, EngineError::ParameterRange(_)));
}

// ============================================================================
// Crawl Mode Tests
// ============================================================================

#[tokio::test]
async fn test_crawl_mode_builds_graph_from_page_links() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // /a links to /b and /c (and itself, which must not count),
    // /b and /c link back to /a.
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page(&format!(
            r#"<html><body>
                <a href="{base}/b">b</a>
                <a href="/c">c</a>
                <a href="/a">self</a>
            </body></html>"#
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page(&format!(r#"<a href="{base}/a">a</a>"#)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(html_page(r#"<a href="/a">a</a>"#))
        .mount(&mock_server)
        .await;

    let request = RankRequest::new(vec![
        format!("{base}/a"),
        format!("{base}/b"),
        format!("{base}/c"),
    ]);

    let response = engine::rank(request, CrawlSettings::default()).await.unwrap();

    assert_eq!(
        response.adjacency_matrix,
        vec![vec![0, 1, 1], vec![1, 0, 0], vec![1, 0, 0]]
    );
    assert!(response.fetch_failures.is_empty());
    assert_eq!(response.results[0].url, format!("{base}/a"));
}

#[tokio::test]
async fn test_crawl_mode_ignores_links_outside_seed_set() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page(&format!(
            r#"<a href="https://elsewhere.invalid/">out</a>
               <a href="{base}/b">b</a>"#
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page("<html><body>no links</body></html>"))
        .mount(&mock_server)
        .await;

    let request = RankRequest::new(vec![format!("{base}/a"), format!("{base}/b")]);
    let response = engine::rank(request, CrawlSettings::default()).await.unwrap();

    assert_eq!(response.adjacency_matrix, vec![vec![0, 1], vec![0, 0]]);
    assert_eq!(response.metrics.total_edges, 1);
}

#[tokio::test]
async fn test_unreachable_seeds_become_dangling_nodes() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    // Only three of the five seeds resolve; the mock returns 404 for
    // the other two paths.
    for page in ["a", "b", "c"] {
        Mock::given(method("GET"))
            .and(path(format!("/{page}")))
            .respond_with(html_page(&format!(r#"<a href="{base}/a">a</a>"#)))
            .mount(&mock_server)
            .await;
    }

    let seeds: Vec<String> = ["a", "b", "c", "missing-1", "missing-2"]
        .iter()
        .map(|page| format!("{base}/{page}"))
        .collect();

    let request = RankRequest::new(seeds.clone());
    let response = engine::rank(request, CrawlSettings::default()).await.unwrap();

    // Every seed stays in the result, reachable or not
    assert_eq!(response.results.len(), 5);
    assert_eq!(response.total_urls, 5);

    let failed: Vec<usize> = response.fetch_failures.iter().map(|f| f.index).collect();
    assert_eq!(failed, vec![3, 4]);
    for failure in &response.fetch_failures {
        assert!(failure.reason.contains("404"), "reason: {}", failure.reason);
    }

    assert_eq!(response.metrics.out_degree[3], 0);
    assert_eq!(response.metrics.out_degree[4], 0);
    assert!(response.metrics.dangling_nodes >= 2);

    let sum: f64 = response.results.iter().map(|r| r.rank).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_crawl_mode_reports_progress() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page("<html></html>"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page("<html></html>"))
        .mount(&mock_server)
        .await;

    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();

    let settings = CrawlSettings {
        progress_callback: Some(Arc::new(move |_index, _url| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
        ..CrawlSettings::default()
    };

    let request = RankRequest::new(vec![format!("{base}/a"), format!("{base}/b")]);
    engine::rank(request, settings).await.unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 2);
}
