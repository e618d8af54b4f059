//! Query/filter layer over a collection snapshot.
//!
//! Pure functions of the snapshot passed in - no mutation, no
//! persistence side effects, and no coupling to the sync engine. The
//! category index is derived on demand and never stored, so it cannot
//! drift from the collection.

use rand::seq::SliceRandom;

use super::model::Quote;

/// A category scope for queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every quote, regardless of category.
    #[default]
    All,
    /// Quotes whose category matches the label, case-insensitively.
    Category(String),
}

impl CategoryFilter {
    /// Parse a user-supplied label; `"all"` (any casing) selects everything.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(trimmed.to_string())
        }
    }

    fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(label) => {
                quote.category.to_lowercase() == label.to_lowercase()
            }
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Category(label) => write!(f, "{}", label),
        }
    }
}

/// Distinct categories present in the collection, in first-seen order.
pub fn categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen = Vec::new();
    for quote in quotes {
        if !seen
            .iter()
            .any(|c: &String| c.eq_ignore_ascii_case(&quote.category))
        {
            seen.push(quote.category.clone());
        }
    }
    seen
}

/// Quotes in the given category scope, in collection order.
pub fn by_category(quotes: &[Quote], filter: &CategoryFilter) -> Vec<Quote> {
    quotes
        .iter()
        .filter(|q| filter.matches(q))
        .cloned()
        .collect()
}

/// A uniformly random quote from the filtered subset, or `None` when
/// the subset is empty.
pub fn random_pick<'a>(quotes: &'a [Quote], filter: &CategoryFilter) -> Option<&'a Quote> {
    let candidates: Vec<&Quote> = quotes.iter().filter(|q| filter.matches(q)).collect();
    candidates.choose(&mut rand::thread_rng()).copied()
}
