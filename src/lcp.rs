//! Length-lexicographic LCP-interval enumeration.
//!
//! An implementation of the algorithm from "Space-Efficient Computation of
//! Maximal and Supermaximal Repeats in Genome Sequences" by Beller et al.:
//! every LCP-interval of the text is produced from the FM-index alone, in
//! order of LCP value and, within one value, in alphabetical order. Runs in
//! O(n log sigma) BWT operations.
//!
//! The enumerator is a lazy pull iterator. An LCP-interval surfaces as a
//! chain of adjacent queue ranges; the chain's final visit emits a single
//! [`LcpInterval`] record carrying the accumulated left-extension count.

use crate::csa::{Csa, SymbolRanks};
use ahash::AHashSet;
use std::collections::VecDeque;

/// One emitted LCP-interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcpInterval {
    /// Length of the common prefix shared by every suffix in the range.
    pub lcp: u64,
    /// First suffix-array position of the range.
    pub begin: u64,
    /// Last suffix-array position of the range, inclusive.
    pub end: u64,
    /// Number of distinct symbols preceding the range's suffixes. The
    /// sentinel counts as an extension; an interval is a maximal repeat
    /// exactly when this exceeds 1.
    pub extensions: u64,
    /// Whether no visited part of the interval was wider than one suffix
    /// (used by supermaximal-repeat consumers; the grammar ignores it).
    pub local_max: bool,
}

/// Lazy producer of every LCP-interval of a text, in length-lex order.
///
/// The first emitted interval is always the length-0 interval spanning the
/// whole suffix array; grammar construction discards it.
pub struct LcpIntervals<'a> {
    csa: &'a Csa,
    /// One FIFO of `[lb, rb)` ranges per compact symbol.
    queues: Vec<VecDeque<(u64, u64)>>,
    /// Per-queue range counts snapshotted at the start of the current level.
    level_sizes: Vec<usize>,
    /// Queue cursor within the current level.
    symbol: usize,
    /// Ranges currently queued across all levels.
    pending: u64,
    /// LCP value of the current level.
    lcp: u64,
    /// SA positions already used as the right boundary of a closed interval.
    finished: Vec<bool>,
    last_lb: u64,
    last_idx: u64,
    local_max: bool,
    extensions: AHashSet<u64>,
    ranks: SymbolRanks,
}

impl<'a> LcpIntervals<'a> {
    pub fn new(csa: &'a Csa) -> Self {
        let sigma = csa.sigma() as usize;
        let n = csa.size() as usize;

        let mut queues = vec![VecDeque::new(); sigma];
        for (k, queue) in queues.iter_mut().enumerate() {
            queue.push_back((csa.c(k as u64), csa.c(k as u64 + 1)));
        }

        let mut finished = vec![false; n + 1];
        finished[0] = true;
        finished[n] = true;

        Self {
            csa,
            queues,
            level_sizes: vec![1; sigma],
            symbol: 0,
            pending: sigma as u64,
            lcp: 0,
            finished,
            last_lb: 0,
            last_idx: 0,
            local_max: true,
            extensions: AHashSet::new(),
            ranks: SymbolRanks::new(csa),
        }
    }
}

impl Iterator for LcpIntervals<'_> {
    type Item = LcpInterval;

    fn next(&mut self) -> Option<LcpInterval> {
        let sigma = self.queues.len();
        loop {
            // Advance to the next queue with ranges left at this level,
            // moving to the next LCP value when the level is exhausted.
            while self.symbol < sigma && self.level_sizes[self.symbol] == 0 {
                self.symbol += 1;
            }
            if self.symbol == sigma {
                if self.pending == 0 {
                    return None;
                }
                self.lcp += 1;
                for (k, size) in self.level_sizes.iter_mut().enumerate() {
                    *size = self.queues[k].len();
                }
                self.symbol = 0;
                continue;
            }

            self.level_sizes[self.symbol] -= 1;
            let (lb, rb) = self.queues[self.symbol]
                .pop_front()
                .expect("level size out of sync with queue");
            self.pending -= 1;

            // Ranges whose right boundary is already closed and which do not
            // extend the current chain were subsumed by an earlier interval.
            if self.finished[rb as usize] && self.last_idx != lb {
                continue;
            }

            // Queue every left extension of the range for the next level;
            // the sentinel is recorded as an extension but never queued.
            self.csa.interval_symbols(lb, rb, &mut self.ranks);
            for j in 0..self.ranks.symbols.len() {
                let k = self.ranks.symbols[j];
                self.extensions.insert(k);
                if k == 0 {
                    continue;
                }
                let child_lb = self.csa.c(k) + self.ranks.rank_lb[j];
                let child_rb = self.csa.c(k) + self.ranks.rank_rb[j];
                self.queues[k as usize].push_back((child_lb, child_rb));
                self.pending += 1;
            }

            if rb - lb > 1 {
                self.local_max = false;
            }

            if !self.finished[rb as usize] {
                // First or intermediate visit: extend the chain.
                self.finished[rb as usize] = true;
                if self.last_idx != lb {
                    self.last_lb = lb;
                }
                self.last_idx = rb;
            } else {
                // Final visit: the chain is complete, emit the interval.
                let record = LcpInterval {
                    lcp: self.lcp,
                    begin: self.last_lb,
                    end: rb - 1,
                    extensions: self.extensions.len() as u64,
                    local_max: self.local_max,
                };
                self.extensions.clear();
                self.last_lb = 0;
                self.last_idx = 0;
                self.local_max = true;
                return Some(record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intervals(text: &[u8]) -> Vec<LcpInterval> {
        let csa = Csa::new(text.to_vec());
        LcpIntervals::new(&csa).collect()
    }

    #[test]
    fn test_first_interval_spans_everything() {
        for text in [b"abab".as_slice(), b"mississippi", b"aaaaaa", b"x"] {
            let csa = Csa::new(text.to_vec());
            let first = LcpIntervals::new(&csa).next().expect("no intervals");
            assert_eq!(first.lcp, 0);
            assert_eq!(first.begin, 0);
            assert_eq!(first.end, csa.size() - 1);
        }
    }

    #[test]
    fn test_abab_intervals() {
        // "abab$": sa = [4, 2, 0, 3, 1]. Beyond the length-0 interval there
        // are exactly two: the "b" interval and the "ab" interval.
        let got = intervals(b"abab");
        assert_eq!(
            got,
            vec![
                LcpInterval {
                    lcp: 0,
                    begin: 0,
                    end: 4,
                    extensions: 3,
                    local_max: false,
                },
                LcpInterval {
                    lcp: 1,
                    begin: 3,
                    end: 4,
                    extensions: 1,
                    local_max: true,
                },
                LcpInterval {
                    lcp: 2,
                    begin: 1,
                    end: 2,
                    extensions: 2,
                    local_max: true,
                },
            ]
        );
    }

    #[test]
    fn test_run_intervals() {
        // "aaaaaa$": the hierarchy [k, 6] for k = 1..=5, one per LCP value,
        // each left-extended by both 'a' and the sentinel.
        let got = intervals(b"aaaaaa");
        assert_eq!(got.len(), 6);
        for (k, interval) in got.iter().enumerate().skip(1) {
            assert_eq!(interval.lcp, k as u64);
            assert_eq!(interval.begin, k as u64);
            assert_eq!(interval.end, 6);
            assert_eq!(interval.extensions, 2);
        }
    }

    #[test]
    fn test_length_lex_order() {
        let got = intervals(b"mississippi");
        for pair in got.windows(2) {
            assert!(pair[0].lcp <= pair[1].lcp);
        }
    }

    #[test]
    fn test_each_range_emitted_once() {
        let got = intervals(b"abracadabra");
        let mut seen = std::collections::HashSet::new();
        for interval in got {
            assert!(seen.insert((interval.begin, interval.end)));
        }
    }

    #[test]
    fn test_empty_text() {
        let got = intervals(b"");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].lcp, 0);
        assert_eq!(got[0].begin, 0);
        assert_eq!(got[0].end, 0);
    }
}
