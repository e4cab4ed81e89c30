//! Frequency counter that remembers insertion order.
//!
//! Favorite hour, top words and top mentions all rank by count and break
//! ties by whichever value was seen first. An `IndexMap` keeps keys in
//! insertion order, so a stable sort by count is enough.

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap};

/// Counts occurrences while keeping first-seen order.
///
/// # Example
///
/// ```rust
/// use chatstats::stats::OrderedCounter;
///
/// let mut counter = OrderedCounter::new();
/// for word in ["pizza", "playa", "playa", "pizza", "sol"] {
///     counter.add(word.to_string());
/// }
///
/// // pizza and playa tie at 2; pizza was seen first
/// assert_eq!(counter.most_common(2), vec![("pizza".to_string(), 2), ("playa".to_string(), 2)]);
/// assert_eq!(counter.mode(), Some(&"pizza".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct OrderedCounter<K> {
    counts: IndexMap<K, usize>,
}

impl<K> Default for OrderedCounter<K> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> OrderedCounter<K> {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    /// Counts `n` occurrences of `key`.
    pub fn add_n(&mut self, key: K, n: usize) {
        *self.counts.entry(key).or_default() += n;
    }

    /// Count for `key`, zero if never seen.
    pub fn get<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Keys and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    /// The `n` highest counts, ties in first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(K, usize)> {
        let mut ranked: Vec<(K, usize)> = self
            .counts
            .iter()
            .map(|(key, count)| (key.clone(), *count))
            .collect();
        // sort_by is stable, so equal counts keep insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// The most frequent key; the first one to be seen wins a tie.
    pub fn mode(&self) -> Option<&K> {
        let mut best: Option<(&K, usize)> = None;
        for (key, &count) in &self.counts {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key)
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for OrderedCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        for key in iter {
            counter.add(key);
        }
        counter
    }
}
