use crate::bitset::candidate;
use crate::node::Node;
use crate::options::LinkType;
use crate::rule::{ChainingRule, ChainingRuleLinkContext};

/// Links between the cells of a house holding one digit.
///
/// Conjugate pairs (exactly two cells) give a strong link; any two cells are weakly linked.
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseLinkRule;

impl ChainingRule for HouseLinkRule {
    fn link_type(&self) -> LinkType {
        LinkType::House
    }

    fn get_links(&self, ctx: &mut ChainingRuleLinkContext<'_>) {
        for sector in 0..27 {
            for digit in 1..=9u8 {
                if ctx.grid.sector_cand_count(sector, digit) < 2 {
                    continue;
                }
                let nodes: Vec<Node> = ctx
                    .grid
                    .sector_cells_with_candidate(sector, digit)
                    .into_iter()
                    .filter_map(|cell| Node::from_candidate(candidate(cell, digit), true, false).ok())
                    .collect();

                if nodes.len() == 2 {
                    ctx.add_strong(nodes[0], nodes[1], None);
                }
                for i in 0..nodes.len() {
                    for j in (i + 1)..nodes.len() {
                        ctx.add_weak(nodes[i], nodes[j], None);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::CandidateFabric;
    use crate::link_dictionary::LinkDictionary;
    use crate::options::ChainingOptions;

    #[test]
    fn test_conjugate_pair_in_row() {
        // Digit 5 survives only in r1c1 and r1c9 of row 1
        let mut grid = CandidateFabric::empty();
        for col in 1..8 {
            grid.set_candidates(col, [1, 2, 3].into_iter().collect()).unwrap();
        }
        let options = ChainingOptions::default();
        let (mut strong, mut weak) = (LinkDictionary::new(), LinkDictionary::new());
        HouseLinkRule.get_links(&mut ChainingRuleLinkContext {
            grid: &grid,
            strong: &mut strong,
            weak: &mut weak,
            options: &options,
        });

        let on = |cell, d| Node::from_candidate(candidate(cell, d), true, false).unwrap();
        assert!(strong.contains_link(&!on(0, 5), &on(8, 5)));
        assert!(weak.contains_link(&on(0, 5), &!on(8, 5)));
        // Column 1 still holds 5 in nine cells
        assert!(!strong.contains_link(&!on(0, 5), &on(9, 5)));
        assert!(weak.contains_link(&on(0, 5), &!on(9, 5)));
    }
}
