use crate::error::{EngineError, Result};

/// An ordered list of seed URLs.
///
/// Entries are kept exactly as given apart from surrounding whitespace:
/// order is preserved, duplicates are preserved, and nothing is validated
/// as a URL here. A seed that cannot be fetched simply ends up with no
/// outbound links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedList {
    urls: Vec<String>,
}

impl SeedList {
    /// Build from newline-delimited text. Blank lines are dropped.
    pub fn parse(input: &str) -> Result<Self> {
        Self::from_lines(input.lines().map(|line| line.to_string()))
    }

    /// Build from individual entries, trimming each and dropping blanks.
    pub fn from_lines<I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let urls: Vec<String> = lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if urls.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        Ok(Self { urls })
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.urls.get(index).map(|url| url.as_str())
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}
