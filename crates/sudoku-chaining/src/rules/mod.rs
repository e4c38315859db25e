//! Concrete chaining rules.

mod almost_locked_sets;
mod cell;
mod house;
mod locked_candidates;

pub use almost_locked_sets::{enumerate_als, AlmostLockedSetRule};
pub use cell::CellLinkRule;
pub use house::HouseLinkRule;
pub use locked_candidates::LockedCandidatesRule;
