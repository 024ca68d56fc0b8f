//! # mrcfg — Maximal-Repeat Grammar Compression
//!
//! Builds a small context-free grammar whose unique derivation is the input
//! byte string. Every non-terminal corresponds to a *maximal repeat* — a
//! substring occurring at least twice that cannot be extended left or right
//! without losing an occurrence — discovered by enumerating the LCP-intervals
//! of an FM-index in length-lexicographic order and greedily replacing
//! occurrences via nested-interval stabbing queries on suffix-array
//! positions.
//!
//! ## Example
//!
//! ```
//! use mrcfg::{build_grammar, Csa, StabberKind};
//!
//! let csa = Csa::new(b"abcabcabc".to_vec());
//! let grammar = build_grammar(&csa, StabberKind::Online);
//!
//! // The grammar derives exactly the input.
//! assert_eq!(grammar.expand(&csa), b"abcabcabc");
//! ```
//!
//! ## Stabber variants
//!
//! Construction is parameterized by the nested-interval stabbing structure:
//! [`StabberKind::Online`] (sorted map, no preprocessing),
//! [`StabberKind::Fast`] (compressed dynamic bitmap), and
//! [`StabberKind::Optimal`] (preprocessed rank/select with ancestor-encoded
//! bit ids). All three yield equivalent grammars.

mod builder;
mod csa;
mod grammar;
mod ids;
mod lcp;
mod stab;

#[cfg(test)]
mod tests;

pub use builder::{build_grammar, StabberKind, UnknownStabber};
pub use csa::{Csa, SymbolRanks};
pub use grammar::{Grammar, GrammarStats, Production};
pub use ids::RepeatIds;
pub use lcp::{LcpInterval, LcpIntervals};
pub use stab::{FastStabber, IntervalStabber, OnlineStabber, OptimalStabber};
