use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use linkrank_core::report::{self, ReportFormat};
use linkrank_core::{engine, CrawlSettings, RankRequest, RankResponse};
use linkrank_crawler::ProgressCallback;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber;
use url::Url;

// Helper functions for the crawl handler

/// Load seed URLs from either a file or the repeated --url arguments
pub fn load_urls_from_source(
    urls: &[Url],
    urls_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(urls_file_path) = urls_file {
        load_urls_from_file(urls_file_path)
    } else if !urls.is_empty() {
        Ok(urls.iter().map(|url| url.as_str().to_string()).collect())
    } else {
        Err("Either --url or --urls-file must be provided".to_string())
    }
}

/// Load and parse URLs from a file
pub fn load_urls_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read urls file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_url_line(line.trim()))
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    // Try to parse as-is
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("⚠️  Skipping invalid URL '{}'", line);
    None
}

// Helper functions for the matrix handler

/// Load node labels from a file, one per line. Labels pair up with matrix
/// rows by position and are kept verbatim, so they need not be URLs.
pub fn load_labels_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read labels file {}: {}", path.display(), e))?;

    let labels: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if labels.is_empty() {
        return Err(format!("No labels found in {}", path.display()));
    }

    Ok(labels)
}

/// Load a JSON adjacency matrix (array of equal-length numeric rows) from a file
pub fn load_matrix_from_file(path: &PathBuf) -> Result<Vec<Vec<f64>>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read matrix file {}: {}", path.display(), e))?;

    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse matrix file {}: {}", path.display(), e))
}

pub async fn handle_crawl(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url_args: Vec<Url> = sub_matches
        .get_many::<Url>("url")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let urls_file = sub_matches.get_one::<PathBuf>("urls-file");
    let damping = *sub_matches.get_one::<f64>("damping").unwrap_or(&0.85);
    let iterations = *sub_matches.get_one::<usize>("iterations").unwrap_or(&100);
    let threads = *sub_matches.get_one::<usize>("threads").unwrap_or(&10);
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);
    let deadline = *sub_matches.get_one::<u64>("deadline").unwrap_or(&60);

    // Load URLs from source
    let urls = match load_urls_from_source(&url_args, urls_file) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    // Print run configuration
    println!("\n🕷️  Ranking {} seed URL(s)", urls.len());
    println!("Workers: {}", threads);
    println!("Damping factor: {}", damping);
    println!("Max iterations: {}", iterations);
    println!("Timeout: {}s (deadline {}s)\n", timeout, deadline);

    // One spinner for the whole pool; workers feed it per-URL progress
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Starting crawl...");

    let total = urls.len();
    let started = Arc::new(AtomicUsize::new(0));
    let progress_spinner = spinner.clone();
    let progress_counter = started.clone();
    let progress_callback: ProgressCallback = Arc::new(move |_worker_id: usize, url: String| {
        let n = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
        progress_spinner.set_message(format!("Fetching {}/{}: {}", n, total, url));
    });

    let mut request = RankRequest::new(urls);
    request.damping_factor = damping;
    request.max_iterations = iterations;

    let settings = CrawlSettings {
        workers: threads,
        timeout_secs: timeout,
        deadline_secs: deadline,
        progress_callback: Some(progress_callback),
    };

    let response = match engine::rank(request, settings).await {
        Ok(response) => response,
        Err(e) => {
            spinner.finish_and_clear();
            eprintln!("✗ Ranking failed: {}", e);
            std::process::exit(1);
        }
    };
    spinner.finish_and_clear();

    println!("\n✓ Ranking complete!\n");
    if !response.fetch_failures.is_empty() {
        println!(
            "{} {} URL(s) could not be fetched and rank as dangling nodes\n",
            "⚠".yellow().bold(),
            response.fetch_failures.len()
        );
    }

    emit_report(&response, sub_matches);
}

pub async fn handle_matrix(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let urls_file = sub_matches.get_one::<PathBuf>("urls-file").unwrap();
    let matrix_file = sub_matches.get_one::<PathBuf>("matrix-file").unwrap();
    let damping = *sub_matches.get_one::<f64>("damping").unwrap_or(&0.85);
    let iterations = *sub_matches.get_one::<usize>("iterations").unwrap_or(&100);

    let labels = match load_labels_from_file(urls_file) {
        Ok(labels) => labels,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    let matrix = match load_matrix_from_file(matrix_file) {
        Ok(matrix) => matrix,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    // Print run configuration
    println!("\nRanking {} node(s) from {}", labels.len(), matrix_file.display());
    println!("Damping factor: {}", damping);
    println!("Max iterations: {}\n", iterations);

    let mut request = RankRequest::with_matrix(labels, matrix);
    request.damping_factor = damping;
    request.max_iterations = iterations;

    let response = match engine::rank(request, CrawlSettings::default()).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("✗ Ranking failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("✓ Ranking complete!\n");
    emit_report(&response, sub_matches);
}

/// Render the response in the requested format and either save it or
/// print it to stdout
fn emit_report(response: &RankResponse, sub_matches: &ArgMatches) {
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|value| ReportFormat::from_str(value))
        .unwrap_or(ReportFormat::Text);

    let content = match format {
        ReportFormat::Text => report::generate_text_report(response),
        ReportFormat::Csv => report::generate_csv_report(response),
        ReportFormat::Markdown => report::generate_markdown_report(response),
        ReportFormat::Json => match report::generate_json_report(response) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("✗ Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        },
    };

    match sub_matches.get_one::<PathBuf>("output") {
        Some(output) => {
            let raw_path = output.to_string_lossy().to_string();
            let expanded = shellexpand::tilde(&raw_path);
            let target = Path::new(expanded.as_ref());
            if let Err(e) = report::save_report(&content, target) {
                eprintln!("✗ Failed to write report to {}: {}", target.display(), e);
                std::process::exit(1);
            }
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                target.display().to_string().bright_white()
            );
        }
        None => print!("{}", content),
    }
}
