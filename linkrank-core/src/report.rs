// Report generation from ranking results

use crate::engine::RankResponse;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

pub fn generate_text_report(data: &RankResponse) -> String {
    let metrics = &data.metrics;
    let mut report = String::new();

    // Header
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("                           LINKRANK RANKING REPORT\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str(&format!("Generated:        {}\n", format_timestamp()));
    report.push_str(&format!("Total URLs:       {}\n", data.total_urls));
    report.push_str(&format!("Total Edges:      {}\n", metrics.total_edges));
    report.push_str(&format!("Density:          {:.4}\n", metrics.density));
    report.push_str(&format!("Dangling Nodes:   {}\n", metrics.dangling_nodes));
    report.push_str(&format!("Isolated Nodes:   {}\n", metrics.isolated_nodes));
    if !data.fetch_failures.is_empty() {
        report.push_str(&format!("Failed Fetches:   {}\n", data.fetch_failures.len()));
    }
    report.push_str("\n");

    // Ranking, highest first
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("RANKING\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for (position, entry) in data.results.iter().enumerate() {
        report.push_str(&format!(
            "{:>4}.  {:.6}  {}\n",
            position + 1,
            entry.rank,
            entry.url
        ));
    }
    report.push_str("\n");

    // Graph metrics
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("NETWORK METRICS\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str(&format!("Avg In-Degree:        {:.4}\n", metrics.avg_in_degree));
    report.push_str(&format!("Avg Out-Degree:       {:.4}\n", metrics.avg_out_degree));
    report.push_str(&format!(
        "Avg Clustering:       {:.4}\n",
        metrics.avg_clustering_coefficient
    ));
    report.push_str(&format!(
        "In Cycles:            {} node(s)\n",
        metrics.strongly_connected_nodes
    ));
    report.push_str("\nPer-node degrees:\n");

    let urls = urls_by_index(data);
    for index in 0..data.total_urls {
        report.push_str(&format!(
            "  [{}] in {:>4}  out {:>4}  hub {:.2}  auth {:.2}  {}\n",
            index,
            metrics.in_degree[index],
            metrics.out_degree[index],
            metrics.hub_scores[index],
            metrics.authority_scores[index],
            urls[index]
        ));
    }
    report.push_str("\n");

    report.push_str("TOP HUBS\n\n");
    if metrics.hubs.is_empty() {
        report.push_str("  (none)\n");
    }
    for (idx, hub) in metrics.hubs.iter().enumerate() {
        report.push_str(&format!(
            "  {}. {}  ({} outbound, score {:.2})\n",
            idx + 1,
            hub.url,
            hub.out_degree,
            hub.score
        ));
    }
    report.push_str("\n");

    report.push_str("TOP AUTHORITIES\n\n");
    if metrics.authorities.is_empty() {
        report.push_str("  (none)\n");
    }
    for (idx, authority) in metrics.authorities.iter().enumerate() {
        report.push_str(&format!(
            "  {}. {}  ({} inbound, score {:.2})\n",
            idx + 1,
            authority.url,
            authority.in_degree,
            authority.score
        ));
    }
    report.push_str("\n");

    // Fetch failures
    if !data.fetch_failures.is_empty() {
        report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        report.push_str("FETCH FAILURES\n");
        report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

        for failure in &data.fetch_failures {
            report.push_str(&format!("  [{}] {}\n      {}\n", failure.index, failure.url, failure.reason));
        }
        report.push_str("\n");
    }

    // Footer
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("                                End of Report\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("\nGenerated by linkrank - PageRank over a closed set of URLs\n\n");

    report
}

pub fn generate_json_report(data: &RankResponse) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "linkrank",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": {
                "total_urls": data.total_urls,
                "total_edges": data.metrics.total_edges,
                "density": data.metrics.density,
                "dangling_nodes": data.metrics.dangling_nodes,
                "isolated_nodes": data.metrics.isolated_nodes,
                "failed_fetches": data.fetch_failures.len()
            },
            "results": data.results,
            "metrics": data.metrics,
            "adjacency_matrix": data.adjacency_matrix,
            "fetch_failures": data.fetch_failures
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_csv_report(data: &RankResponse) -> String {
    let metrics = &data.metrics;
    let mut report = String::new();

    report.push_str("position,index,url,rank,in_degree,out_degree,hub_score,authority_score\n");

    for (position, entry) in data.results.iter().enumerate() {
        report.push_str(&format!(
            "{},{},{},{:.6},{},{},{:.4},{:.4}\n",
            position + 1,
            entry.index,
            csv_escape(&entry.url),
            entry.rank,
            metrics.in_degree[entry.index],
            metrics.out_degree[entry.index],
            metrics.hub_scores[entry.index],
            metrics.authority_scores[entry.index]
        ));
    }

    report
}

pub fn generate_markdown_report(data: &RankResponse) -> String {
    let metrics = &data.metrics;
    let mut report = String::new();

    report.push_str("# Linkrank Ranking Report\n\n");
    report.push_str(&format!("Generated: {}\n\n", format_timestamp()));

    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Total URLs:** {}\n", data.total_urls));
    report.push_str(&format!("- **Total Edges:** {}\n", metrics.total_edges));
    report.push_str(&format!("- **Density:** {:.4}\n", metrics.density));
    report.push_str(&format!(
        "- **Avg Clustering Coefficient:** {:.4}\n",
        metrics.avg_clustering_coefficient
    ));
    report.push_str(&format!("- **Dangling Nodes:** {}\n", metrics.dangling_nodes));
    report.push_str(&format!("- **Isolated Nodes:** {}\n", metrics.isolated_nodes));
    report.push_str(&format!(
        "- **Nodes in Cycles:** {}\n",
        metrics.strongly_connected_nodes
    ));
    if !data.fetch_failures.is_empty() {
        report.push_str(&format!("- **Failed Fetches:** {}\n", data.fetch_failures.len()));
    }
    report.push_str("\n");

    report.push_str("## Ranking\n\n");
    report.push_str("| # | PageRank | URL |\n");
    report.push_str("|---|----------|-----|\n");
    for (position, entry) in data.results.iter().enumerate() {
        report.push_str(&format!(
            "| {} | {:.6} | {} |\n",
            position + 1,
            entry.rank,
            entry.url
        ));
    }
    report.push_str("\n");

    if !metrics.hubs.is_empty() {
        report.push_str("## Top Hubs\n\n");
        report.push_str("| URL | Outbound Links | Score |\n");
        report.push_str("|-----|----------------|-------|\n");
        for hub in &metrics.hubs {
            report.push_str(&format!(
                "| {} | {} | {:.2} |\n",
                hub.url, hub.out_degree, hub.score
            ));
        }
        report.push_str("\n");
    }

    if !metrics.authorities.is_empty() {
        report.push_str("## Top Authorities\n\n");
        report.push_str("| URL | Inbound Links | Score |\n");
        report.push_str("|-----|---------------|-------|\n");
        for authority in &metrics.authorities {
            report.push_str(&format!(
                "| {} | {} | {:.2} |\n",
                authority.url, authority.in_degree, authority.score
            ));
        }
        report.push_str("\n");
    }

    if !data.fetch_failures.is_empty() {
        report.push_str("## Fetch Failures\n\n");
        for failure in &data.fetch_failures {
            report.push_str(&format!(
                "- `{}` (index {}): {}\n",
                failure.url, failure.index, failure.reason
            ));
        }
        report.push_str("\n");
    }

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

// Helper functions

/// Node labels in submission order, rebuilt from the ranked rows.
fn urls_by_index(data: &RankResponse) -> Vec<&str> {
    let mut urls = vec![""; data.total_urls];
    for entry in &data.results {
        urls[entry.index] = entry.url.as_str();
    }
    urls
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
