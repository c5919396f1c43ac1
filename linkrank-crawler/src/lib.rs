pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod result;

pub use error::CrawlError;
pub use extractor::LinkExtractor;
pub use fetcher::{PageFetcher, ProgressCallback};
pub use result::PageFetch;
