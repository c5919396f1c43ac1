use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkrank")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkrank")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Fetch a set of seed URLs, build the link graph between them, and rank \
                them with PageRank.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("A seed URL to rank; repeat to build the set")
                        .value_parser(clap::value_parser!(Url))
                        .action(clap::ArgAction::Append)
                        .conflicts_with("urls-file"),
                )
                .arg(
                    arg!(-U --"urls-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of seed URLs to rank")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-d --"damping" <FACTOR>)
                        .required(false)
                        .help("PageRank damping factor, between 0.10 and 0.99")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("0.85"),
                )
                .arg(
                    arg!(-i --"iterations" <NUM>)
                        .required(false)
                        .help("Maximum power-iteration count before the solver gives up")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    arg!(-t --"threads" <NUM_WORKERS>)
                        .required(false)
                        .help("The number of async worker 'threads' in the worker pool.")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"deadline" <SECONDS>)
                        .required(false)
                        .help("Overall crawl deadline in seconds; pages not fetched in time rank as dangling")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("60"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown")
                        .value_parser(["text", "json", "csv", "markdown"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("matrix")
                .about(
                    "Rank labeled nodes from a prebuilt adjacency matrix instead of \
                crawling. Labels and matrix rows pair up by position.",
                )
                .arg(
                    arg!(-U --"urls-file" <PATH>)
                        .required(true)
                        .help("Path to a newline-delimited file of node labels, one per matrix row")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-m --"matrix-file" <PATH>)
                        .required(true)
                        .help("Path to a JSON adjacency matrix: an array of equal-length numeric rows")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-d --"damping" <FACTOR>)
                        .required(false)
                        .help("PageRank damping factor, between 0.10 and 0.99")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("0.85"),
                )
                .arg(
                    arg!(-i --"iterations" <NUM>)
                        .required(false)
                        .help("Maximum power-iteration count before the solver gives up")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, csv, markdown")
                        .value_parser(["text", "json", "csv", "markdown"])
                        .default_value("text"),
                ),
        )
}
