use serde::{Deserialize, Serialize};

/// Family of links a chaining rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// Candidates of one cell
    Cell,
    /// One digit inside a house
    House,
    /// One digit confined to a box/line intersection
    LockedCandidates,
    /// Almost locked sets
    AlmostLockedSet,
}

/// How much of a link family is gathered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LinkOption {
    /// Produce nothing
    None,
    /// Grouped endpoints must sit in a box/line intersection
    Intersection,
    /// Grouped endpoints must share a house
    House,
    /// No restriction
    All,
}

impl LinkOption {
    pub fn is_enabled(self) -> bool {
        self != LinkOption::None
    }
}

/// Configuration for link gathering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainingOptions {
    pub cell: LinkOption,
    pub house: LinkOption,
    pub locked_candidates: LinkOption,
    pub almost_locked_set: LinkOption,
    /// Largest ALS (in cells) turned into links
    pub max_als_size: usize,
}

impl Default for ChainingOptions {
    fn default() -> Self {
        Self {
            cell: LinkOption::All,
            house: LinkOption::All,
            locked_candidates: LinkOption::House,
            almost_locked_set: LinkOption::House,
            max_als_size: 5,
        }
    }
}

impl ChainingOptions {
    /// Single-candidate links only (X-Chains, XY-Chains, plain AICs)
    pub fn elementary() -> Self {
        Self {
            locked_candidates: LinkOption::None,
            almost_locked_set: LinkOption::None,
            ..Self::default()
        }
    }

    pub fn link_option(&self, link_type: LinkType) -> LinkOption {
        match link_type {
            LinkType::Cell => self.cell,
            LinkType::House => self.house,
            LinkType::LockedCandidates => self.locked_candidates,
            LinkType::AlmostLockedSet => self.almost_locked_set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elementary_disables_grouped_links() {
        let options = ChainingOptions::elementary();
        assert!(options.link_option(LinkType::Cell).is_enabled());
        assert!(!options.link_option(LinkType::LockedCandidates).is_enabled());
        assert!(!options.link_option(LinkType::AlmostLockedSet).is_enabled());
        assert_eq!(options.max_als_size, 5);
    }
}
