//! The code table maps each symbol to its huffman code.
//!
//! Tables come from two places: a freshly built tree (prefix-free by construction), or an
//! artifact being decoded. The second kind is checked with validate() before it is used.

use std::collections::btree_map;
use std::collections::BTreeMap;

use log::trace;
use rustc_hash::FxHashMap;

use super::huffman::HuffmanTree;
use crate::bitstream::bitstring::BitString;
use crate::error::{HuffError, Result};
use crate::tools::freq_count::FreqTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitString>,
}

impl CodeTable {
    /// Generate the table by walking the tree. A new map is built on every call.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let codes = tree.codes();
        for (sym, code) in &codes {
            trace!("Code for {:#04x} is {}", sym, code);
        }
        Self { codes }
    }

    /// Accept an externally supplied table, rejecting it unless it is a usable prefix code.
    pub fn from_codes(codes: BTreeMap<u8, BitString>) -> Result<Self> {
        let table = Self { codes };
        table.validate()?;
        Ok(table)
    }

    /// Check that the table is non-empty, holds no empty code, and that no code is a prefix of
    /// another.
    pub fn validate(&self) -> Result<()> {
        if self.codes.is_empty() {
            return Err(HuffError::InvalidCodeTable("table holds no codes".to_string()));
        }
        if let Some((sym, _)) = self.codes.iter().find(|(_, code)| code.is_empty()) {
            return Err(HuffError::InvalidCodeTable(format!(
                "empty code for symbol {:#04x}",
                sym
            )));
        }

        // Sorted by bits, any code that prefixes another sits directly before one of the codes it prefixes.
        let mut sorted: Vec<(&BitString, u8)> =
            self.codes.iter().map(|(sym, code)| (code, *sym)).collect();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            let (shorter, short_sym) = pair[0];
            let (longer, long_sym) = pair[1];
            if shorter.is_prefix_of(longer) {
                return Err(HuffError::InvalidCodeTable(format!(
                    "code {} for symbol {:#04x} is a prefix of code {} for symbol {:#04x}",
                    shorter, short_sym, longer, long_sym
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, symbol: u8) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate (symbol, code) in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, u8, BitString> {
        self.codes.iter()
    }

    /// Length in bits of the longest code (0 for an empty table).
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|code| code.len()).max().unwrap_or(0)
    }

    /// The inverted table used by the decoder: code -> symbol.
    pub fn inverse(&self) -> FxHashMap<BitString, u8> {
        self.codes
            .iter()
            .map(|(sym, code)| (code.clone(), *sym))
            .collect()
    }

    /// Sum of frequency x code length over the symbols this table covers: the number of bits
    /// the encoded payload will hold.
    pub fn weighted_length(&self, frequencies: &FreqTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(sym, count)| self.get(*sym).map(|code| count * code.len() as u64))
            .sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn table(entries: &[(u8, &str)]) -> BTreeMap<u8, BitString> {
        entries
            .iter()
            .map(|(sym, bits)| (*sym, bits.parse().unwrap()))
            .collect()
    }

    #[test]
    fn from_tree_is_valid_test() {
        let tree = HuffmanTree::from_bytes(b"mississippi river").unwrap();
        let codes = CodeTable::from_tree(&tree);
        assert!(codes.validate().is_ok());
        assert_eq!(codes.len(), 8);
    }

    #[test]
    fn prefix_rejected_test() {
        let result = CodeTable::from_codes(table(&[(b'a', "0"), (b'b', "01"), (b'c', "1")]));
        assert!(matches!(result, Err(HuffError::InvalidCodeTable(_))));
    }

    #[test]
    fn prefix_with_gap_rejected_test() {
        // "0" prefixes "011" with "010" sorting between them
        let result = CodeTable::from_codes(table(&[(1, "0"), (2, "010"), (3, "011")]));
        assert!(matches!(result, Err(HuffError::InvalidCodeTable(_))));
    }

    #[test]
    fn duplicate_rejected_test() {
        let result = CodeTable::from_codes(table(&[(1, "10"), (2, "10")]));
        assert!(matches!(result, Err(HuffError::InvalidCodeTable(_))));
    }

    #[test]
    fn empty_rejected_test() {
        assert!(CodeTable::from_codes(BTreeMap::new()).is_err());
        assert!(CodeTable::from_codes(table(&[(1, "")])).is_err());
    }

    #[test]
    fn incomplete_table_accepted_test() {
        // Prefix-free but not every path is used
        let codes = CodeTable::from_codes(table(&[(7, "0")])).unwrap();
        assert_eq!(codes.max_code_len(), 1);
        let codes = CodeTable::from_codes(table(&[(1, "00"), (2, "1")])).unwrap();
        assert_eq!(codes.max_code_len(), 2);
    }

    #[test]
    fn inverse_and_weight_test() {
        let f = crate::tools::freq_count::freqs(b"aaabbc");
        let codes = CodeTable::from_tree(&HuffmanTree::from_frequencies(&f).unwrap());
        assert_eq!(codes.weighted_length(&f), 9);
        let inverse = codes.inverse();
        assert_eq!(inverse.len(), 3);
        for (sym, code) in codes.iter() {
            assert_eq!(inverse[code], *sym);
        }
    }
}
