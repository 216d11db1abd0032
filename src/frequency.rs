// Frequency ranking of a word stream.
//
// Counts are taken over the whole valid-token stream. Ranking is by count
// descending; equal counts keep the order in which words were first seen,
// which keeps output deterministic.

use std::collections::HashMap;

/// Occurrence counts for one processing run. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
    /// Distinct words in first-seen order
    order: Vec<String>,
}

impl FrequencyTable {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for token in tokens {
            let word = token.into();
            match table.counts.get_mut(&word) {
                Some(count) => *count += 1,
                None => {
                    table.counts.insert(word.clone(), 1);
                    table.order.push(word);
                }
            }
        }
        table
    }

    /// Occurrences of `word`, 0 if it never appeared.
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of tokens counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Distinct words with their counts, most frequent first.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|w| (w.as_str(), self.counts[w]))
            .collect();
        // Stable sort: ties stay in first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Distinct words, most frequent first.
    pub fn ranked_words(&self) -> Vec<String> {
        self.ranked().into_iter().map(|(w, _)| w.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_first_seen() {
        let table = FrequencyTable::from_tokens(["a", "b", "a", "c", "a", "b"]);
        assert_eq!(table.ranked(), vec![("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let table = FrequencyTable::from_tokens(["zebra", "gamma", "alpha", "gamma", "zebra", "alpha"]);
        assert_eq!(table.ranked_words(), vec!["zebra", "gamma", "alpha"]);
    }

    #[test]
    fn empty_stream() {
        let table = FrequencyTable::from_tokens(Vec::<String>::new());
        assert!(table.is_empty());
        assert!(table.ranked().is_empty());
        assert_eq!(table.count("missing"), 0);
    }
}
