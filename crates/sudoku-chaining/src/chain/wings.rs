//! Shape classification of named chains.
//!
//! The six-node wings are matched on the digit mask of each valid node. All
//! templates require single-digit nodes.

use crate::bitset::{cell_of, digit_of, BitSet};
use crate::fabric::CandidateFabric;
use crate::link::LinkPattern;
use crate::types::Technique;

use super::{ChainOrLoop, ChainShape};

impl ChainOrLoop {
    /// Digit masks of a six-node single-digit chain
    fn wing_masks(&self) -> Option<[BitSet; 6]> {
        if self.shape != ChainShape::Chain {
            return None;
        }
        let span = self.valid_nodes();
        if span.len() != 6 || span.iter().any(|n| !n.digits().is_single()) {
            return None;
        }
        Some(std::array::from_fn(|i| span[i].digits()))
    }

    /// W-Wing: x=y-y=y-y=x
    pub fn is_woods_wing(&self) -> bool {
        let Some([m1, m2, m3, m4, m5, m6]) = self.wing_masks() else {
            return false;
        };
        m2 == m3 && m3 == m4 && m4 == m5 && m1 == m6 && m1 != m2
    }

    /// M-Wing: x=y-y=x-x=x, or its mirror
    pub fn is_medusa_wing(&self) -> bool {
        let Some([m1, m2, m3, m4, m5, m6]) = self.wing_masks() else {
            return false;
        };
        (m1 == m5 && m5 == m6 && m2 == m3 && m3 == m4 && m1 != m2)
            || (m1 == m2 && m2 == m6 && m3 == m4 && m4 == m5 && m2 != m3)
    }

    /// S-Wing: x=x-x=y-y=y
    pub fn is_split_wing(&self) -> bool {
        let Some([m1, m2, m3, m4, m5, m6]) = self.wing_masks() else {
            return false;
        };
        m1 == m2 && m2 == m3 && m4 == m5 && m5 == m6 && m1 != m4
    }

    /// L-Wing: x=x-y=y-z=z
    pub fn is_local_wing(&self) -> bool {
        let Some([m1, m2, m3, m4, m5, m6]) = self.wing_masks() else {
            return false;
        };
        m1 == m2 && m3 == m4 && m5 == m6 && m1 != m3 && m1 != m5
    }

    /// H-Wing: two mixed layouts of three digits
    pub fn is_hybrid_wing(&self) -> bool {
        let Some([m1, m2, m3, m4, m5, m6]) = self.wing_masks() else {
            return false;
        };
        (m2 == m3 && m4 == m5 && m5 == m6 && m1 != m2 && m2 != m4)
            || (m1 == m2 && m2 == m3 && m4 == m5 && m1 != m4 && m1 != m6 && m4 != m6)
    }

    /// An open chain whose ends close on one cell or one house.
    pub fn is_implicit_loop(&self) -> bool {
        if self.shape != ChainShape::Chain || !self.is_weak_start() {
            return false;
        }
        let (Some(a), Some(b)) = (self.first().candidate(), self.last().candidate()) else {
            return false;
        };
        if cell_of(a) == cell_of(b) {
            return true;
        }
        if digit_of(a) != digit_of(b) {
            return false;
        }
        let cells = self.first().cells() | self.last().cells();
        cells.shared_houses() != 0
    }

    /// W-Wing whose outer strong links come from bivalue cells or ALSs.
    pub fn is_almost_locked_set_w_wing(&self, grid: &CandidateFabric) -> bool {
        if !self.is_woods_wing() {
            return false;
        }
        let links = self.links();
        let (Some(first), Some(last)) = (links.first(), links.last()) else {
            return false;
        };
        [first, last].iter().all(|link| {
            matches!(link.pattern, Some(LinkPattern::AlmostLockedSet(_)))
                || link.is_bivalue_cell_link(grid)
        })
    }

    /// Technique this pattern is reported as; branches are not named.
    pub fn technique(&self, grid: &CandidateFabric) -> Option<Technique> {
        let grouped = self.is_grouped();
        match self.shape {
            ChainShape::Branch(_) => None,
            ChainShape::Loop => Some(if grouped {
                Technique::GroupedContinuousNiceLoop
            } else {
                Technique::ContinuousNiceLoop
            }),
            ChainShape::Chain => Some(if self.is_almost_locked_set_w_wing(grid) {
                if self.links().iter().any(|l| l.pattern.is_some()) {
                    Technique::AlsWWing
                } else {
                    Technique::WWing
                }
            } else if self.is_woods_wing() {
                Technique::WWing
            } else if self.is_medusa_wing() {
                Technique::MWing
            } else if self.is_split_wing() {
                Technique::SplitWing
            } else if self.is_local_wing() {
                Technique::LocalWing
            } else if self.is_hybrid_wing() {
                Technique::HybridWing
            } else if self.satisfies_x_rule() {
                if grouped {
                    Technique::GroupedXChain
                } else {
                    Technique::XChain
                }
            } else if grouped {
                Technique::GroupedAIC
            } else if self.is_implicit_loop() {
                Technique::DiscontinuousNiceLoop
            } else if self.satisfies_y_rule() {
                Technique::XyChain
            } else {
                Technique::AIC
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bitset::{candidate, CandidateMap};
    use crate::chain::{ChainOrLoop, ChainShape};
    use crate::fabric::CandidateFabric;
    use crate::link_dictionary::LinkPools;
    use crate::node::Node;
    use crate::types::Technique;

    fn n(cell: usize, digit: u8, is_on: bool) -> Node {
        Node::from_candidate(candidate(cell, digit), is_on, false).unwrap()
    }

    /// Strong-start chain from `(cell, digit)` steps listed root first
    fn chain(steps: &[(usize, u8)]) -> ChainOrLoop {
        let path: Vec<Node> = steps
            .iter()
            .enumerate()
            .map(|(i, &(cell, digit))| n(cell, digit, i % 2 == 1))
            .collect();
        ChainOrLoop::from_path(&path, ChainShape::Chain, LinkPools::default()).unwrap()
    }

    #[test]
    fn test_woods_wing() {
        // r1c1 {1,2} and r5c1 {1,2} bridged by the strong link r1c5(2)=r5c5(2)
        let wing = chain(&[(0, 1), (0, 2), (4, 2), (40, 2), (36, 2), (36, 1)]);
        assert!(wing.is_woods_wing());
        assert!(!wing.is_split_wing());
        assert!(!wing.is_local_wing());

        let grid = CandidateFabric::empty()
            .with_candidates(0, &[1, 2])
            .unwrap()
            .with_candidates(36, &[1, 2])
            .unwrap();
        assert!(wing.is_almost_locked_set_w_wing(&grid));
        assert_eq!(wing.technique(&grid), Some(Technique::WWing));

        let loose = CandidateFabric::empty();
        assert!(!wing.is_almost_locked_set_w_wing(&loose));
    }

    #[test]
    fn test_split_and_local_wings() {
        let split = chain(&[(0, 1), (4, 1), (13, 1), (13, 2), (22, 2), (40, 2)]);
        assert!(split.is_split_wing());
        assert!(!split.is_woods_wing());

        let local = chain(&[(0, 1), (4, 1), (4, 2), (22, 2), (22, 3), (40, 3)]);
        assert!(local.is_local_wing());
        assert!(!local.is_split_wing());
        assert_eq!(
            local.technique(&CandidateFabric::empty()),
            Some(Technique::LocalWing)
        );
    }

    #[test]
    fn test_medusa_wing_layouts() {
        // Read from the last inference: 1 2 2 2 1 1
        let tail = chain(&[(0, 1), (4, 1), (4, 2), (22, 2), (24, 2), (24, 1)]);
        assert!(tail.is_medusa_wing());
        assert!(!tail.is_woods_wing());
        assert!(!tail.is_hybrid_wing());
        assert_eq!(tail.technique(&CandidateFabric::empty()), Some(Technique::MWing));

        // Read from the last inference: 1 1 2 2 2 1
        let head = chain(&[(0, 1), (0, 2), (4, 2), (22, 2), (22, 1), (24, 1)]);
        assert!(head.is_medusa_wing());
        assert_eq!(head.technique(&CandidateFabric::empty()), Some(Technique::MWing));

        let woods = chain(&[(0, 1), (0, 2), (4, 2), (40, 2), (36, 2), (36, 1)]);
        assert!(!woods.is_medusa_wing());
        let split = chain(&[(0, 1), (4, 1), (13, 1), (13, 2), (22, 2), (40, 2)]);
        assert!(!split.is_medusa_wing());
    }

    #[test]
    fn test_hybrid_wing_layouts() {
        // Read from the last inference: 3 2 2 1 1 1
        let three_tail = chain(&[(0, 1), (4, 1), (13, 1), (13, 2), (22, 2), (22, 3)]);
        assert!(three_tail.is_hybrid_wing());
        assert!(!three_tail.is_medusa_wing());
        assert!(!three_tail.is_local_wing());
        assert_eq!(
            three_tail.technique(&CandidateFabric::empty()),
            Some(Technique::HybridWing)
        );

        // Read from the last inference: 1 1 1 2 2 3
        let three_head = chain(&[(0, 3), (0, 2), (4, 2), (4, 1), (13, 1), (22, 1)]);
        assert!(three_head.is_hybrid_wing());
        assert!(!three_head.is_split_wing());
        assert_eq!(
            three_head.technique(&CandidateFabric::empty()),
            Some(Technique::HybridWing)
        );

        let local = chain(&[(0, 1), (4, 1), (4, 2), (22, 2), (22, 3), (40, 3)]);
        assert!(!local.is_hybrid_wing());
        let woods = chain(&[(0, 1), (0, 2), (4, 2), (40, 2), (36, 2), (36, 1)]);
        assert!(!woods.is_hybrid_wing());
    }

    #[test]
    fn test_xy_chain_naming() {
        // Bivalue hops r1c1 {1,2} and r1c5 {1,2}
        let xy = chain(&[(0, 1), (0, 2), (4, 2), (4, 1)]);
        assert!(xy.satisfies_y_rule());
        assert!(!xy.satisfies_x_rule());
        assert_eq!(xy.technique(&CandidateFabric::empty()), Some(Technique::XyChain));

        let aic = chain(&[(0, 1), (0, 2), (4, 2), (22, 2)]);
        assert!(!aic.satisfies_y_rule());
        assert_eq!(aic.technique(&CandidateFabric::empty()), Some(Technique::AIC));
    }

    #[test]
    fn test_multi_digit_node_disables_wings() {
        let pair: CandidateMap = [candidate(0, 1), candidate(0, 2)].into_iter().collect();
        let path = [
            Node::new(pair, false, false).unwrap(),
            n(4, 1, true),
            n(4, 2, false),
            n(22, 2, true),
            n(22, 3, false),
            n(40, 3, true),
        ];
        let mixed = ChainOrLoop::from_path(&path, ChainShape::Chain, LinkPools::default()).unwrap();
        assert!(!mixed.is_local_wing());
        assert!(!mixed.is_woods_wing());
        assert!(!mixed.is_hybrid_wing());

        let short = chain(&[(0, 1), (4, 1), (4, 2), (22, 2)]);
        assert!(!short.is_local_wing());
    }

    #[test]
    fn test_x_chain_naming() {
        let x = chain(&[(0, 1), (4, 1), (40, 1), (36, 1)]);
        assert_eq!(x.technique(&CandidateFabric::empty()), Some(Technique::XChain));
    }

    #[test]
    fn test_implicit_loop() {
        let path = [
            n(0, 3, true),
            n(0, 1, false),
            n(4, 1, true),
            n(4, 2, false),
            n(8, 2, true),
            n(8, 1, false),
            n(6, 1, true),
            n(0, 1, false),
        ];
        let chain = ChainOrLoop::from_path(&path, ChainShape::Chain, LinkPools::default()).unwrap();
        assert!(chain.is_weak_start());
        // Valid ends r1c1(1) and r1c5(1) share row 1
        assert!(chain.is_implicit_loop());
    }
}
