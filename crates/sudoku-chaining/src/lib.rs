//! Chain and loop inference engine for logical Sudoku solving.
//!
//! Rules turn a [`CandidateFabric`] into strong and weak [`LinkDictionary`]s.
//! A search walks those dictionaries into a [`NodeArena`]; terminal nodes are
//! then captured as [`ChainOrLoop`]s, which validate alternation, settle on a
//! canonical direction, and derive their eliminations. Forcing chains and
//! blossom loops group several branches behind one conclusion set.

pub mod bitset;
pub mod blossom;
pub mod chain;
pub mod conclusion;
pub mod error;
pub mod fabric;
pub mod forcing;
pub mod link;
pub mod link_dictionary;
pub mod node;
pub mod options;
pub mod rule;
pub mod rules;
pub mod types;

pub use bitset::{
    candidate, cell_of, digit_of, BitSet, Candidate, CandidateMap, CellMap, CANDIDATE_COUNT,
};
pub use blossom::{BlossomLoop, BlossomLoopEntry};
pub use chain::{BranchKind, ChainFormat, ChainOrLoop, ChainOrLoopComparison, ChainShape};
pub use conclusion::{Conclusion, ConclusionKind, ConclusionSet};
pub use error::{ChainingError, Result};
pub use fabric::CandidateFabric;
pub use forcing::MultipleForcingChains;
pub use link::{AlmostLockedSetPattern, Link, LinkPattern, UndirectedLink};
pub use link_dictionary::{GroupedLinkPool, LinkDictionary, LinkPools};
pub use node::{Node, NodeArena, NodeComparison, NodeId};
pub use options::{ChainingOptions, LinkOption, LinkType};
pub use rule::{ChainingRule, ChainingRuleLinkContext, ChainingRules};
pub use types::Technique;
