//! Grammar construction: drives the LCP-interval enumerator, allocates rule
//! ids, synthesizes productions by stabbing in suffix-array order, and emits
//! the start rule last.

use crate::csa::Csa;
use crate::grammar::{Grammar, Production};
use crate::ids::RepeatIds;
use crate::lcp::LcpIntervals;
use crate::stab::{FastStabber, IntervalStabber, OnlineStabber, OptimalStabber};
use ahash::AHashMap as HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Which nested-interval stabbing structure backs the construction.
///
/// All three produce equivalent grammars; they differ in build cost and
/// query cost only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabberKind {
    /// Preprocessed rank/select with ancestor-encoded bit ids; O(1)-ish stabs.
    Optimal,
    /// Sorted map; no preprocessing, logarithmic operations.
    Online,
    /// Compressed dynamic bitmap; near-constant inserts.
    Fast,
}

/// Error for an unrecognized stabber selector.
#[derive(Debug, Error)]
#[error("unknown algorithm {0:?}, expected OPTIMAL, ONLINE, or FAST")]
pub struct UnknownStabber(String);

impl FromStr for StabberKind {
    type Err = UnknownStabber;

    fn from_str(s: &str) -> Result<Self, UnknownStabber> {
        if s.eq_ignore_ascii_case("OPTIMAL") {
            Ok(StabberKind::Optimal)
        } else if s.eq_ignore_ascii_case("ONLINE") {
            Ok(StabberKind::Online)
        } else if s.eq_ignore_ascii_case("FAST") {
            Ok(StabberKind::Fast)
        } else {
            Err(UnknownStabber(s.to_string()))
        }
    }
}

/// Builds the maximal-repeat grammar of the indexed text.
pub fn build_grammar(csa: &Csa, kind: StabberKind) -> Grammar {
    match kind {
        StabberKind::Optimal => drive(csa, OptimalStabber::new(csa)),
        StabberKind::Online => drive(csa, OnlineStabber::new()),
        StabberKind::Fast => drive(csa, FastStabber::new()),
    }
}

/// The construction loop, generic over the stabber variant.
///
/// Every enumerated interval bumps the occurrence chain of its id; an
/// interval with more than one left extension is a maximal repeat and gets a
/// rule whose production covers its first occurrence. Single-symbol
/// productions are dictionary-useless and discarded. Either way the id chain
/// is severed so a longer repeat ending at the same text position starts
/// fresh.
fn drive<S: IntervalStabber>(csa: &Csa, mut stabber: S) -> Grammar {
    let sigma = csa.sigma();

    let mut rules: HashMap<u64, Production> = HashMap::new();
    let mut sizes: HashMap<u64, u64> = HashMap::new();
    for terminal in 0..sigma {
        sizes.insert(terminal, 1);
    }

    let mut ids = RepeatIds::new(csa);

    let mut intervals = LcpIntervals::new(csa);
    intervals.next(); // the length-0 interval spans the whole text
    for interval in intervals {
        let rid = ids.get_id(interval.lcp, interval.begin);
        let size = {
            let entry = sizes.entry(rid).or_insert(0);
            *entry += 1;
            *entry
        };
        if interval.extensions > 1 {
            let begin = csa.sa(interval.begin);
            let production = compute_production(csa, &stabber, &sizes, begin, begin + size);
            if production.len() > 1 {
                rules.insert(rid, production);
                stabber.update(interval.begin, interval.end, rid);
            } else {
                sizes.remove(&rid);
            }
            ids.remove_id(interval.lcp, interval.begin);
        }
    }

    let start = ids.next_id();
    let production = compute_production(csa, &stabber, &sizes, 0, csa.size());
    rules.insert(start, production);

    Grammar::new(rules, start)
}

/// Synthesizes the production covering text positions `[i, n)`.
///
/// Greedily consumes the longest installed rule whose suffix-array interval
/// is stabbed by `isa[i]`, falling back to single terminals. O(n - i) stabs
/// and index accesses.
fn compute_production<S: IntervalStabber>(
    csa: &Csa,
    stabber: &S,
    sizes: &HashMap<u64, u64>,
    mut i: u64,
    n: u64,
) -> Production {
    let mut production = Production::new();
    while i < n {
        let j = csa.isa(i);
        match stabber.stab(j) {
            Some(rid) => {
                production.push(rid);
                i += sizes
                    .get(&rid)
                    .copied()
                    .expect("stabbed rule has no recorded size");
            }
            None => {
                production.push(csa.symbol_at(i));
                i += 1;
            }
        }
    }
    production
}
