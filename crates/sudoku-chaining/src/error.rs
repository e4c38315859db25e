use crate::bitset::{Candidate, CandidateMap};

/// Result type for chaining operations
pub type Result<T> = std::result::Result<T, ChainingError>;

/// Errors raised at construction and comparison boundaries of the engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainingError {
    /// A node was built from an empty candidate map
    #[error("a node must cover at least one candidate")]
    EmptyNodeMap,
    /// Integer value does not name a `NodeComparison`
    #[error("invalid node comparison value: {0}")]
    InvalidNodeComparison(u8),
    /// Integer value does not name a `ChainOrLoopComparison`
    #[error("invalid chain comparison value: {0}")]
    InvalidChainComparison(u8),
    /// Two neighbouring nodes share the same polarity
    #[error("node polarity does not alternate at index {index}")]
    BrokenAlternation { index: usize },
    /// Not enough nodes to form the requested shape
    #[error("a chain of {len} node(s) is too short")]
    ChainTooShort { len: usize },
    /// Both ends of a chain carry the same polarity
    #[error("chain ends must carry opposite polarity")]
    MismatchedEnds,
    /// Walking the parents of a loop's last node never returned to it
    #[error("loop does not return to its last node")]
    UnclosedLoop,
    /// A forcing branch with no nodes
    #[error("forcing branch is empty")]
    EmptyBranch,
    /// Two branches keyed by the same candidate
    #[error("candidate {0} already owns a branch")]
    DuplicateBranch(Candidate),
    /// A forcing branch keyed by a candidate other than its root
    #[error("branch keyed by candidate {key} does not start from it")]
    BranchRootMismatch { key: Candidate },
    /// Something other than a branch was added to a forcing chains set
    #[error("forcing chains only hold branches")]
    NotABranch,
    /// A blossom branch with the same start and exit is already present
    #[error("blossom branch {} -> {} already present", CandidateMap::from_candidate(*start), CandidateMap::from_candidate(*end))]
    DuplicateBlossomEntry { start: Candidate, end: Candidate },
    /// Candidate index outside 0..729
    #[error("candidate {0} is out of range")]
    CandidateOutOfRange(Candidate),
    /// Puzzle text could not be parsed
    #[error("invalid puzzle: {0}")]
    InvalidPuzzle(String),
    /// Cell index outside 0..81
    #[error("cell {0} is out of range")]
    CellOutOfRange(usize),
    /// Digit outside 1..=9
    #[error("digit {0} is out of range")]
    DigitOutOfRange(u8),
}
