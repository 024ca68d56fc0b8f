//! Rule-id assignment for maximal-repeat equivalence classes.

use crate::csa::Csa;
use ahash::AHashMap as HashMap;

/// Assigns stable non-terminal ids to LCP-intervals.
///
/// An interval `(lcp, begin, ..)` is keyed by `sa[begin] + lcp` — the text
/// position just past the repeat's first-in-SA occurrence. Intervals that are
/// left-to-right suffixes of one another share that end position and
/// therefore share an id until [`RepeatIds::remove_id`] severs the chain.
pub struct RepeatIds<'a> {
    csa: &'a Csa,
    next: u64,
    by_end_position: HashMap<u64, u64>,
}

impl<'a> RepeatIds<'a> {
    /// The first `sigma` ids are reserved for the terminals.
    pub fn new(csa: &'a Csa) -> Self {
        Self {
            csa,
            next: csa.sigma(),
            by_end_position: HashMap::new(),
        }
    }

    /// The id the next unseen interval would receive.
    #[inline]
    pub fn next_id(&self) -> u64 {
        self.next
    }

    /// Returns the id for the interval, allocating one on first sight.
    pub fn get_id(&mut self, lcp: u64, begin: u64) -> u64 {
        let key = self.csa.sa(begin) + lcp;
        let next = &mut self.next;
        *self.by_end_position.entry(key).or_insert_with(|| {
            let id = *next;
            *next += 1;
            id
        })
    }

    /// Forgets the interval's key so a longer left-extension at the same
    /// first-occurrence end position receives a fresh id. A no-op for keys
    /// never allocated.
    pub fn remove_id(&mut self, lcp: u64, begin: u64) {
        let key = self.csa.sa(begin) + lcp;
        self.by_end_position.remove(&key);
    }
}
