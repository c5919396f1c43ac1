pub mod engine;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod report;
pub mod seeds;
pub mod solver;

pub use engine::{rank, CrawlSettings, FetchFailure, RankRequest, RankResponse, RankedUrl};
pub use error::EngineError;
pub use graph::LinkGraph;
pub use metrics::NetworkMetrics;
pub use report::ReportFormat;
pub use seeds::SeedList;
pub use solver::{pagerank, RankParams};

use colored::Colorize;

/// Startup banner, printed by the CLI unless --quiet is set.
pub fn print_banner() {
    let banner = r#"
██╗     ██╗███╗   ██╗██╗  ██╗██████╗  █████╗ ███╗   ██╗██╗  ██╗
██║     ██║████╗  ██║██║ ██╔╝██╔══██╗██╔══██╗████╗  ██║██║ ██╔╝
██║     ██║██╔██╗ ██║█████╔╝ ██████╔╝███████║██╔██╗ ██║█████╔╝
██║     ██║██║╚██╗██║██╔═██╗ ██╔══██╗██╔══██║██║╚██╗██║██╔═██╗
███████╗██║██║ ╚████║██║  ██╗██║  ██║██║  ██║██║ ╚████║██║  ██╗
╚══════╝╚═╝╚═╝  ╚═══╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═══╝╚═╝  ╚═╝"#;

    println!("{}", banner.bright_cyan());
    println!(
        "        {} v{} :: PageRank over a closed set of URLs\n",
        "linkrank".bold(),
        env!("CARGO_PKG_VERSION")
    );
}
