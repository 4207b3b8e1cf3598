//! Symbol frequency counting.
//!
//! A [`FrequencyTable`] is the only input the tree builder needs. Keys are
//! kept ordered so that iteration, and with it leaf insertion order, does
//! not depend on hashing.

use std::collections::btree_map::{self, BTreeMap};

use crate::error::{Error, Result};

/// Occurrence counts, one entry per distinct symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S> {
    counts: BTreeMap<S, u64>,
}

impl<S: Ord + Clone> FrequencyTable<S> {
    /// Count every symbol in `symbols`.
    pub fn from_symbols(symbols: &[S]) -> Self {
        symbols.iter().cloned().collect()
    }

    /// Build a table from counts the caller already holds.
    ///
    /// Repeated symbols have their counts summed.
    ///
    /// The grand total must fit in a `u64`, so that no weight built from
    /// the table can overflow.
    ///
    /// # Errors
    /// - `Error::ZeroWeight` if any count is 0.
    /// - `Error::WeightOverflow` if the counts sum past `u64::MAX`.
    pub fn from_counts<I: IntoIterator<Item = (S, u64)>>(counts: I) -> Result<Self> {
        let mut table = BTreeMap::new();
        let mut total = 0u64;
        for (symbol, count) in counts {
            if count == 0 {
                return Err(Error::ZeroWeight);
            }
            total = total.checked_add(count).ok_or(Error::WeightOverflow)?;
            // Bounded by `total`.
            *table.entry(symbol).or_insert(0u64) += count;
        }
        Ok(Self { counts: table })
    }

    /// Count for `symbol`, or `None` if it never occurred.
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }
}

impl<S> FrequencyTable<S> {
    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the message length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` in ascending symbol order.
    pub fn iter(&self) -> Iter<'_, S> {
        Iter {
            inner: self.counts.iter(),
        }
    }
}

impl<S: Ord> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for symbol in iter {
            *counts.entry(symbol).or_insert(0u64) += 1;
        }
        Self { counts }
    }
}

/// Iterator over a [`FrequencyTable`].
pub struct Iter<'a, S> {
    inner: btree_map::Iter<'a, S, u64>,
}

impl<'a, S> Iterator for Iter<'a, S> {
    type Item = (&'a S, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(s, &c)| (s, c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, S> ExactSizeIterator for Iter<'a, S> {}

impl<'a, S> IntoIterator for &'a FrequencyTable<S> {
    type Item = (&'a S, u64);
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_worked_example() {
        let input: Vec<char> = "AAAAAAABBBCCCCCCCDDEEEEEE".chars().collect();
        let freq = FrequencyTable::from_symbols(&input);

        assert_eq!(freq.len(), 5);
        assert_eq!(freq.total(), 25);
        assert_eq!(freq.get(&'A'), Some(7));
        assert_eq!(freq.get(&'B'), Some(3));
        assert_eq!(freq.get(&'C'), Some(7));
        assert_eq!(freq.get(&'D'), Some(2));
        assert_eq!(freq.get(&'E'), Some(6));
        assert_eq!(freq.get(&'Z'), None);
    }

    #[test]
    fn test_iteration_is_symbol_ordered() {
        let freq: FrequencyTable<u8> = b"cabbac".iter().copied().collect();
        let seen: Vec<(u8, u64)> = freq.iter().map(|(&s, c)| (s, c)).collect();
        assert_eq!(seen, vec![(b'a', 2), (b'b', 2), (b'c', 2)]);
    }

    #[test]
    fn test_empty() {
        let freq = FrequencyTable::<u8>::from_symbols(&[]);
        assert!(freq.is_empty());
        assert_eq!(freq.total(), 0);
    }

    #[test]
    fn test_from_counts() {
        let freq = FrequencyTable::from_counts([('x', 3), ('y', 1), ('x', 2)]).unwrap();
        assert_eq!(freq.get(&'x'), Some(5));
        assert_eq!(freq.len(), 2);

        let err = FrequencyTable::from_counts([('x', 3), ('y', 0)]).unwrap_err();
        assert_eq!(err, Error::ZeroWeight);
    }

    #[test]
    fn test_from_counts_overflow() {
        let err = FrequencyTable::from_counts([('a', u64::MAX), ('a', 1)]).unwrap_err();
        assert_eq!(err, Error::WeightOverflow);

        // Distinct symbols whose total would overflow a merged weight.
        let err = FrequencyTable::from_counts([('a', u64::MAX), ('b', 1)]).unwrap_err();
        assert_eq!(err, Error::WeightOverflow);

        let max = FrequencyTable::from_counts([('a', u64::MAX - 1), ('b', 1)]).unwrap();
        assert_eq!(max.total(), u64::MAX);
    }
}
