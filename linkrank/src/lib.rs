// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    load_labels_from_file,
    load_matrix_from_file,
    load_urls_from_file,
    load_urls_from_source,
    parse_url_line,
};

// Re-export the ranking entry points from linkrank-core
pub use linkrank_core::{
    engine::rank,
    report::{
        generate_csv_report, generate_json_report, generate_markdown_report,
        generate_text_report, save_report,
    },
    CrawlSettings, RankRequest, RankResponse, ReportFormat,
};
