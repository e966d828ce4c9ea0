//! Case-insensitive substring search on the names of the venues and artists.
//!
//! The names are folded and compared in the service rather than with the SQL `LOWER` function,
//! because SQLite only folds ASCII letters.

use serde::Serialize;

use crate::{Listed, WithUpcomingCount};

/// The result of a search on the venue or artist names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    /// The amount of venues or artists found.
    pub count: usize,
    /// The venues or artists found, with their amount of upcoming shows.
    pub data: Vec<WithUpcomingCount>,
}

impl From<Vec<WithUpcomingCount>> for SearchResults {
    fn from(data: Vec<WithUpcomingCount>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A search term, folded once to be compared against many names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery(String);

impl NameQuery {
    /// Builds the query from the raw term, ignoring its surrounding whitespace.
    pub fn new(term: &str) -> Self {
        Self(term.trim().to_lowercase())
    }

    /// Returns true if the name contains the term, ignoring the case.
    ///
    /// Every character of the term is matched literally, and an empty term matches any name.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.0)
    }

    /// Keeps the listed venues or artists with a matching name, in the same order.
    pub fn filter(&self, listed: Vec<Listed>) -> Vec<Listed> {
        listed
            .into_iter()
            .filter(|entry| self.matches(&entry.name))
            .collect()
    }
}
