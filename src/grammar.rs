//! The in-memory grammar: rule productions, the start rule, expansion, and
//! size statistics.

use crate::csa::Csa;
use ahash::AHashMap as HashMap;
use std::io::{self, Write};

/// An ordered sequence of symbol ids. Ids below `sigma` are terminals in the
/// compact alphabet; ids at or above `sigma` are non-terminals.
pub type Production = Vec<u64>;

/// A context-free grammar whose unique derivation is the input string.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: HashMap<u64, Production>,
    start: u64,
}

/// Size statistics over a finished grammar, mirroring what the driver
/// reports.
#[derive(Debug, Clone, Copy)]
pub struct GrammarStats {
    /// Rule count, terminals included.
    pub num_rules: u64,
    /// Length of the start rule's production.
    pub start_len: u64,
    /// Total grammar size: `sigma` terminals plus every production length.
    pub total_size: u64,
    /// Input length, sentinel included.
    pub input_len: u64,
}

impl GrammarStats {
    /// Grammar size as a percentage of the input length.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        self.total_size as f64 / self.input_len as f64 * 100.0
    }
}

impl Grammar {
    pub(crate) fn new(rules: HashMap<u64, Production>, start: u64) -> Self {
        Self { rules, start }
    }

    /// The start rule's id.
    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// All non-terminal rules, the start rule included.
    #[inline]
    pub fn rules(&self) -> &HashMap<u64, Production> {
        &self.rules
    }

    /// The production of one rule, if it exists.
    #[inline]
    pub fn get(&self, id: u64) -> Option<&Production> {
        self.rules.get(&id)
    }

    /// Expands the start rule back into the input bytes.
    ///
    /// The sentinel terminal is skipped, so the result equals the original
    /// input exactly.
    pub fn expand(&self, csa: &Csa) -> Vec<u8> {
        self.expand_rule(csa, self.start)
    }

    /// Expands one rule into the byte string it produces.
    pub fn expand_rule(&self, csa: &Csa, id: u64) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_rule(csa, id, &mut out)
            .expect("writing to a Vec cannot fail");
        out
    }

    /// Walks the start rule and writes every terminal byte except the
    /// sentinel; the verification pass of the driver.
    pub fn write_expansion<W: Write>(&self, csa: &Csa, out: &mut W) -> io::Result<()> {
        self.write_rule(csa, self.start, out)
    }

    /// Iterative expansion with an explicit stack of (rule, offset) frames,
    /// so deep rule chains cannot overflow the call stack.
    fn write_rule<W: Write>(&self, csa: &Csa, id: u64, out: &mut W) -> io::Result<()> {
        let sigma = csa.sigma();
        if id < sigma {
            if id > 0 {
                out.write_all(&[csa.comp2char(id)])?;
            }
            return Ok(());
        }
        let mut stack: Vec<(u64, usize)> = vec![(id, 0)];
        while let Some((rule, offset)) = stack.pop() {
            let production = self
                .rules
                .get(&rule)
                .expect("production referenced but never installed");
            if offset == production.len() {
                continue;
            }
            stack.push((rule, offset + 1));
            let symbol = production[offset];
            if symbol < sigma {
                if symbol > 0 {
                    out.write_all(&[csa.comp2char(symbol)])?;
                }
            } else {
                stack.push((symbol, 0));
            }
        }
        Ok(())
    }

    /// Computes the driver's size statistics.
    pub fn stats(&self, csa: &Csa) -> GrammarStats {
        let sigma = csa.sigma();
        let start_len = self.rules[&self.start].len() as u64;
        let total_size = sigma + self.rules.values().map(|p| p.len() as u64).sum::<u64>();
        GrammarStats {
            num_rules: self.rules.len() as u64 + sigma,
            start_len,
            total_size,
            input_len: csa.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar_over(text: &[u8], rules: Vec<(u64, Production)>, start: u64) -> (Csa, Grammar) {
        let csa = Csa::new(text.to_vec());
        let map: HashMap<u64, Production> = rules.into_iter().collect();
        (csa, Grammar::new(map, start))
    }

    #[test]
    fn test_expand_terminals_only() {
        // "ab$": sentinel 0, a -> 1, b -> 2; start covers the whole text.
        let (csa, grammar) = grammar_over(b"ab", vec![(3, vec![1, 2, 0])], 3);
        assert_eq!(grammar.expand(&csa), b"ab");
    }

    #[test]
    fn test_expand_nested_rules() {
        // "abab$": rule 3 = "ab", start = 3 3 sentinel.
        let (csa, grammar) = grammar_over(b"abab", vec![(3, vec![1, 2]), (4, vec![3, 3, 0])], 4);
        assert_eq!(grammar.expand(&csa), b"abab");
        assert_eq!(grammar.expand_rule(&csa, 3), b"ab");
    }

    #[test]
    fn test_write_expansion_skips_sentinel() {
        let (csa, grammar) = grammar_over(b"ab", vec![(3, vec![0, 1, 2, 0])], 3);
        let mut out = Vec::new();
        grammar.write_expansion(&csa, &mut out).unwrap();
        assert_eq!(out, b"ab");
    }

    #[test]
    fn test_stats() {
        let (csa, grammar) = grammar_over(b"abab", vec![(3, vec![1, 2]), (4, vec![3, 3, 0])], 4);
        let stats = grammar.stats(&csa);
        assert_eq!(stats.num_rules, 5);
        assert_eq!(stats.start_len, 3);
        assert_eq!(stats.total_size, 3 + 2 + 3);
        assert_eq!(stats.input_len, 5);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        // A chain of 10k rules, each wrapping the previous one.
        let csa = Csa::new(b"a".to_vec());
        let mut rules: HashMap<u64, Production> = HashMap::new();
        rules.insert(2, vec![1, 1]);
        for id in 3..10_002u64 {
            rules.insert(id, vec![id - 1]);
        }
        let grammar = Grammar::new(rules, 10_001);
        assert_eq!(grammar.expand(&csa), b"aa");
    }
}
