//! Stabbing queries on nested intervals over suffix-array positions.
//!
//! Three structures answer the same two-operation contract with different
//! build/space/time trade-offs. Every registered interval is either disjoint
//! from or strictly nested in the previously registered ones; partial overlap
//! is not a legal input.

use crate::csa::Csa;
use crate::lcp::LcpIntervals;
use ahash::AHashMap as HashMap;
use roaring::RoaringTreemap;
use std::collections::BTreeMap;

/// Stabbing queries and updates over a nested interval family.
pub trait IntervalStabber {
    /// Returns the id of the deepest updated interval containing `p`, if any.
    ///
    /// Only the deepest interval is needed: the grammar builder must prefer
    /// the longest matching rule.
    fn stab(&self, p: u64) -> Option<u64>;

    /// Registers the interval `[begin, end]` (inclusive) under `id`.
    fn update(&mut self, begin: u64, end: u64, id: u64);
}

// ============================================================================
// ONLINE
// ============================================================================

/// Sorted-map stabber: no preprocessing, O(log k) per operation where `k` is
/// the number of updates so far.
///
/// Every interval contributes a boundary at `begin` holding its id and a
/// boundary at `end + 1` restoring the enclosing interval's id (`None` at the
/// outermost level). A stab resolves to the value at the greatest boundary at
/// or before the point.
#[derive(Debug, Default)]
pub struct OnlineStabber {
    lookup: BTreeMap<u64, Option<u64>>,
}

impl OnlineStabber {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntervalStabber for OnlineStabber {
    fn stab(&self, p: u64) -> Option<u64> {
        match self.lookup.range(..=p).next_back() {
            Some((_, &id)) => id,
            None => None,
        }
    }

    fn update(&mut self, begin: u64, end: u64, id: u64) {
        let parent = self.stab(begin);
        // If end + 1 already carries a boundary it is either another
        // interval's end restore or a begin, and must not change.
        self.lookup.entry(end + 1).or_insert(parent);
        self.lookup.insert(begin, Some(id));
    }
}

// ============================================================================
// FAST
// ============================================================================

/// Compressed-bitmap stabber: boundary positions live in a dynamic roaring
/// bitmap, ids in a side map keyed by boundary position.
///
/// Near-constant dynamic inserts; rank/select over the bitmap resolves a stab
/// to its governing boundary. End restores with no enclosing interval are
/// boundaries without a map entry.
#[derive(Debug, Default)]
pub struct FastStabber {
    position_bits: RoaringTreemap,
    lookup: HashMap<u64, u64>,
}

impl FastStabber {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntervalStabber for FastStabber {
    fn stab(&self, p: u64) -> Option<u64> {
        let rank = self.position_bits.rank(p);
        if rank == 0 {
            return None;
        }
        let boundary = self
            .position_bits
            .select(rank - 1)
            .expect("rank and select out of sync");
        self.lookup.get(&boundary).copied()
    }

    fn update(&mut self, begin: u64, end: u64, id: u64) {
        let parent = self.stab(begin);
        if !self.position_bits.contains(end + 1) {
            self.position_bits.insert(end + 1);
            // Only non-empty restores are stored.
            if let Some(parent) = parent {
                self.lookup.insert(end + 1, parent);
            }
        }
        self.position_bits.insert(begin);
        self.lookup.insert(begin, id);
    }
}

// ============================================================================
// OPTIMAL
// ============================================================================

/// Preprocessing-heavy stabber with O(m/w)-word stabs, `m` the number of
/// maximal repeats.
///
/// Every maximal-repeat interval the enumerator reports is indexed up front.
/// Intervals receive ancestor-encoded binary ids: a compressed bit set
/// holding one bit per interval on the path from the outermost ancestor down
/// to the interval itself, assigned in left-to-right discovery order so that
/// deeper intervals always carry larger bits. The deepest updated ancestor of
/// a point is then the maximum bit of `binary_id & updated`, where `updated`
/// accumulates the binary ids of every externally registered interval.
/// Depth-first bit layout keeps the bitmaps run-length friendly.
pub struct OptimalStabber {
    /// Begin and end+1 positions of every indexed interval.
    position_bits: RoaringTreemap,
    /// Boundary position -> bit of the deepest interval governing it.
    lookup: HashMap<u64, usize>,
    /// Binary ids, indexed by the interval's own bit.
    ids: Vec<RoaringTreemap>,
    /// Union of the binary ids of updated intervals.
    updated: RoaringTreemap,
    /// Own bit -> external id, for updated intervals.
    id_map: HashMap<u64, u64>,
}

impl OptimalStabber {
    /// Indexes every maximal-repeat LCP-interval of the text.
    ///
    /// One enumeration pass collects interval boundaries and bins intervals
    /// by begin position (outermost first, the enumerator's emission order);
    /// a left-to-right sweep with a containment stack then derives each
    /// interval's binary id from its parent's. O(n) plus bitmap copies.
    pub fn new(csa: &Csa) -> Self {
        let n = csa.size();

        let mut position_bits = RoaringTreemap::new();
        let mut bins: HashMap<u64, Vec<u64>> = HashMap::new();
        let mut num_repeats = 0usize;

        let mut intervals = LcpIntervals::new(csa);
        intervals.next(); // the length-0 interval is not a repeat
        for interval in intervals {
            if interval.extensions > 1 {
                num_repeats += 1;
                position_bits.insert(interval.begin);
                if interval.end + 1 < n {
                    position_bits.insert(interval.end + 1);
                }
                bins.entry(interval.begin).or_default().push(interval.end);
            }
        }

        let mut ids: Vec<RoaringTreemap> = Vec::with_capacity(num_repeats);
        let mut lookup = HashMap::with_capacity(position_bits.len() as usize);
        let mut end_stack: Vec<u64> = Vec::new();
        let mut bit_stack: Vec<usize> = Vec::new();

        // Dovetail begin and end events left to right. Intervals never begin
        // at the last position, and an end there has no end+1 boundary.
        for i in 0..n.saturating_sub(1) {
            if end_stack.last() == Some(&i) {
                while end_stack.last() == Some(&i) {
                    end_stack.pop();
                    bit_stack.pop();
                }
                // The boundary at i + 1 is governed by the deepest interval
                // still open once every interval ending at i has closed; with
                // none open the boundary stays silent.
                if let Some(&parent) = bit_stack.last() {
                    lookup.insert(i + 1, parent);
                }
            }
            if let Some(ends) = bins.get(&i) {
                for &end in ends {
                    let bit = ids.len();
                    let mut binary_id = match bit_stack.last() {
                        Some(&parent) => ids[parent].clone(),
                        None => RoaringTreemap::new(),
                    };
                    binary_id.insert(bit as u64);
                    ids.push(binary_id);
                    end_stack.push(end);
                    bit_stack.push(bit);
                }
                let deepest = *bit_stack.last().expect("bins entry pushed nothing");
                lookup.insert(i, deepest);
            }
        }

        Self {
            position_bits,
            lookup,
            ids,
            updated: RoaringTreemap::new(),
            id_map: HashMap::new(),
        }
    }

    /// The binary id of the deepest indexed interval containing `p`.
    fn binary_stab(&self, p: u64) -> Option<&RoaringTreemap> {
        let rank = self.position_bits.rank(p);
        if rank == 0 {
            return None;
        }
        let boundary = self
            .position_bits
            .select(rank - 1)
            .expect("rank and select out of sync");
        self.lookup.get(&boundary).map(|&bit| &self.ids[bit])
    }
}

impl IntervalStabber for OptimalStabber {
    fn stab(&self, p: u64) -> Option<u64> {
        let binary_id = self.binary_stab(p)?;
        let mut ancestors = binary_id & &self.updated;
        // Bits can enter the updated set as ancestors carried by a deeper
        // registration; skip past any that were never registered themselves.
        while let Some(bit) = ancestors.max() {
            if let Some(&id) = self.id_map.get(&bit) {
                return Some(id);
            }
            ancestors.remove(bit);
        }
        None
    }

    fn update(&mut self, begin: u64, end: u64, id: u64) {
        // The two endpoint stabs meet exactly at the interval's own binary
        // id: its descendants cover at most one endpoint, its ancestors both.
        let interval_id = {
            let begin_id = self
                .binary_stab(begin)
                .expect("updated interval was never indexed");
            let end_id = self
                .binary_stab(end)
                .expect("updated interval was never indexed");
            begin_id & end_id
        };
        let own_bit = interval_id
            .max()
            .expect("endpoint stabs share no interval");
        self.id_map.insert(own_bit, id);
        self.updated |= interval_id;
    }
}
