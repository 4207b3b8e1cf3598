//! Code tables: symbol to prefix-free bit string.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use bitvec::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use crate::{Bits, Symbol};

/// Mapping from symbol to its code.
///
/// Codes are non-empty and no code is a prefix of another. Tables made by
/// [`CodeTable::from_tree`] hold this by construction; tables from
/// [`CodeTable::from_codes`] are checked. A deserialized table is checked
/// when a decoder is built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CodeTable<S: Ord> {
    codes: BTreeMap<S, Bits>,
}

impl<S: Symbol> CodeTable<S> {
    /// Derive codes from a tree, root to leaf.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = BTreeMap::new();
        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes.insert(symbol.clone(), bitvec![u8, Msb0; 0]);
            }
            root => assign_codes(root, &mut BitVec::new(), &mut codes),
        }
        Self { codes }
    }

    /// Build a table from codes supplied independently of any tree.
    ///
    /// # Errors
    /// Returns `Error::CorruptTable` if a code is empty, a symbol is listed
    /// twice, or one code is a prefix of another.
    pub fn from_codes<I: IntoIterator<Item = (S, Bits)>>(codes: I) -> Result<Self> {
        let mut table = BTreeMap::new();
        for (symbol, code) in codes {
            if code.is_empty() {
                return Err(Error::CorruptTable(format!("{:?} has an empty code", symbol)));
            }
            if let Some(prev) = table.insert(symbol, code) {
                return Err(Error::CorruptTable(format!(
                    "symbol listed twice (code {})",
                    code_string(&prev)
                )));
            }
        }
        let table = Self { codes: table };
        table.check_prefix_free()?;
        Ok(table)
    }

    /// Code for `symbol`.
    pub fn get(&self, symbol: &S) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(symbol).map(|c| c.as_bitslice())
    }

    /// Total encoded length in bits of a message with these frequencies.
    ///
    /// # Errors
    /// - `Error::MissingSymbol` if a counted symbol has no code.
    /// - `Error::WeightOverflow` if the bit count exceeds `u64::MAX`.
    pub fn encoded_len(&self, freq: &FrequencyTable<S>) -> Result<u64> {
        freq.iter().try_fold(0u64, |acc, (symbol, count)| {
            let code = self
                .codes
                .get(symbol)
                .ok_or_else(|| Error::MissingSymbol(format!("{:?}", symbol)))?;
            count
                .checked_mul(code.len() as u64)
                .and_then(|bits| acc.checked_add(bits))
                .ok_or(Error::WeightOverflow)
        })
    }

    /// True if no code is a prefix of another and none is empty.
    pub fn is_prefix_free(&self) -> bool {
        self.check_prefix_free().is_ok()
    }

    fn check_prefix_free(&self) -> Result<()> {
        let mut sorted: Vec<&BitSlice<u8, Msb0>> =
            self.codes.values().map(|c| c.as_bitslice()).collect();
        sorted.sort();

        // In lexicographic order a prefix sorts right before its extensions.
        if sorted.first().is_some_and(|c| c.is_empty()) {
            return Err(Error::CorruptTable("empty code".into()));
        }
        for pair in sorted.windows(2) {
            if pair[1].starts_with(pair[0]) {
                return Err(Error::CorruptTable(format!(
                    "code {} is a prefix of {}",
                    code_string(pair[0]),
                    code_string(pair[1])
                )));
            }
        }
        Ok(())
    }
}

impl<S: Ord> CodeTable<S> {
    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True if the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Iterate `(symbol, code)` in ascending symbol order.
    pub fn iter(&self) -> Iter<'_, S> {
        Iter {
            inner: self.codes.iter(),
        }
    }
}

impl<S: Ord + fmt::Display> fmt::Display for CodeTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in &self.codes {
            writeln!(f, "{}\t{}", symbol, code_string(code))?;
        }
        Ok(())
    }
}

/// Iterator over a [`CodeTable`].
pub struct Iter<'a, S> {
    inner: btree_map::Iter<'a, S, Bits>,
}

impl<'a, S> Iterator for Iter<'a, S> {
    type Item = (&'a S, &'a BitSlice<u8, Msb0>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(s, c)| (s, c.as_bitslice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, S> ExactSizeIterator for Iter<'a, S> {}

/// Render bits as a string of `'0'` and `'1'`.
pub fn code_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}

/// Parse a string of `'0'` and `'1'` into bits. Any other character yields `None`.
pub fn parse_code(s: &str) -> Option<Bits> {
    s.chars()
        .map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

fn assign_codes<S: Clone + Ord>(node: &Node<S>, prefix: &mut Bits, codes: &mut BTreeMap<S, Bits>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(symbol.clone(), prefix.clone());
        }
        Node::Internal { left, right, .. } => {
            prefix.push(false);
            assign_codes(left, prefix, codes);
            prefix.pop();

            prefix.push(true);
            assign_codes(right, prefix, codes);
            prefix.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worked_example() -> CodeTable<char> {
        let input: Vec<char> = "AAAAAAABBBCCCCCCCDDEEEEEE".chars().collect();
        HuffmanTree::from_symbols(&input).unwrap().code_table()
    }

    fn code_of(table: &CodeTable<char>, c: char) -> String {
        code_string(table.get(&c).unwrap())
    }

    #[test]
    fn test_worked_example_codes() {
        let table = worked_example();
        assert_eq!(table.len(), 5);
        assert_eq!(code_of(&table, 'D'), "000");
        assert_eq!(code_of(&table, 'B'), "001");
        assert_eq!(code_of(&table, 'E'), "01");
        assert_eq!(code_of(&table, 'A'), "10");
        assert_eq!(code_of(&table, 'C'), "11");
        assert_eq!(table.max_code_len(), 3);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_encoded_len() {
        let input: Vec<char> = "AAAAAAABBBCCCCCCCDDEEEEEE".chars().collect();
        let freq = FrequencyTable::from_symbols(&input);
        let table = worked_example();
        // 7*2 + 3*3 + 7*2 + 2*3 + 6*2
        assert_eq!(table.encoded_len(&freq).unwrap(), 55);

        let other = FrequencyTable::from_symbols(&['Q']);
        assert_eq!(
            table.encoded_len(&other).unwrap_err(),
            Error::MissingSymbol("'Q'".into())
        );
    }

    #[test]
    fn test_encoded_len_overflow() {
        let freq = FrequencyTable::from_counts([('a', u64::MAX / 2 + 1), ('b', 1)]).unwrap();
        let table = HuffmanTree::from_frequencies(&freq).unwrap().code_table();
        // Each code is one bit, so the length equals the total.
        assert_eq!(table.encoded_len(&freq).unwrap(), u64::MAX / 2 + 2);

        let table = CodeTable::from_codes([
            ('a', parse_code("11").unwrap()),
            ('b', parse_code("0").unwrap()),
        ])
        .unwrap();
        assert_eq!(table.encoded_len(&freq).unwrap_err(), Error::WeightOverflow);
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let tree = HuffmanTree::from_symbols(&[9u8, 9, 9]).unwrap();
        let table = tree.code_table();
        assert_eq!(code_string(table.get(&9).unwrap()), "0");
    }

    #[test]
    fn test_from_codes_accepts_valid() {
        let table = CodeTable::from_codes([
            ('x', parse_code("0").unwrap()),
            ('y', parse_code("10").unwrap()),
            ('z', parse_code("11").unwrap()),
        ])
        .unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_from_codes_rejects_prefix() {
        let err = CodeTable::from_codes([
            ('x', parse_code("1").unwrap()),
            ('y', parse_code("10").unwrap()),
        ])
        .unwrap_err();
        assert_eq!(err, Error::CorruptTable("code 1 is a prefix of 10".into()));
    }

    #[test]
    fn test_from_codes_rejects_empty_and_duplicates() {
        assert!(matches!(
            CodeTable::from_codes([('x', Bits::new())]),
            Err(Error::CorruptTable(_))
        ));
        assert!(matches!(
            CodeTable::from_codes([
                ('x', parse_code("0").unwrap()),
                ('y', parse_code("0").unwrap()),
            ]),
            Err(Error::CorruptTable(_))
        ));
        assert!(matches!(
            CodeTable::from_codes([
                ('x', parse_code("0").unwrap()),
                ('x', parse_code("1").unwrap()),
            ]),
            Err(Error::CorruptTable(_))
        ));
    }

    #[test]
    fn test_code_string_roundtrip() {
        assert_eq!(parse_code("0110").map(|b| code_string(&b)).as_deref(), Some("0110"));
        assert_eq!(parse_code("01a"), None);
    }

    #[test]
    fn test_display() {
        let table = worked_example();
        let rendered = table.to_string();
        assert_eq!(rendered, "A\t10\nB\t001\nC\t11\nD\t000\nE\t01\n");
    }
}
