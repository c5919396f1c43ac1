use scraper::{Html, Selector};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use url::Url;

/// Derive the key under which a URL participates in link matching: the
/// parsed URL with its fragment stripped, re-serialized. Unparseable
/// input has no key and can never be linked to.
pub fn match_key(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url.trim()).ok()?;
    parsed.set_fragment(None);
    Some(parsed.to_string())
}

/// Matches anchors on a fetched page against a fixed seed set.
///
/// The seed set is closed: anchors pointing anywhere else are ignored.
/// Seeds that share a match key (duplicates, or spellings that serialize
/// identically) all receive the edge.
pub struct LinkExtractor {
    targets: HashMap<String, Vec<usize>>,
}

impl LinkExtractor {
    pub fn new<'a, I>(seeds: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut targets: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, url) in seeds {
            if let Some(key) = match_key(url) {
                targets.entry(key).or_default().push(index);
            }
        }
        Self { targets }
    }

    /// Scan `html` fetched from `page_url` and return the seed indices it
    /// links to, deduplicated, in ascending order. The source index is
    /// never part of the result.
    pub fn extract(&self, source_index: usize, page_url: &str, html: &str) -> Vec<usize> {
        let Ok(base) = Url::parse(page_url) else {
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let link_selector = Selector::parse("a[href]").unwrap();

        let mut found = BTreeSet::new();

        for element in document.select(&link_selector) {
            if let Some(href) = element.value().attr("href")
                && let Some(resolved) = Self::resolve_href(&base, href)
                && let Some(indices) = self.targets.get(resolved.as_str())
            {
                debug!("Matched link {} -> {:?}", resolved, indices);
                found.extend(
                    indices
                        .iter()
                        .copied()
                        .filter(|&target| target != source_index),
                );
            }
        }

        found.into_iter().collect()
    }

    fn resolve_href(base: &Url, href: &str) -> Option<Url> {
        // Skip empty, javascript:, mailto:, tel:, etc.
        if href.is_empty()
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with('#')
        {
            return None;
        }

        let mut resolved = base.join(href).ok()?;
        resolved.set_fragment(None);

        Some(resolved)
    }
}
