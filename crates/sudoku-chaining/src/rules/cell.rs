use crate::bitset::candidate;
use crate::node::Node;
use crate::options::LinkType;
use crate::rule::{ChainingRule, ChainingRuleLinkContext};

/// Links between the candidates of one cell.
///
/// A bivalue cell gives a strong link; any two candidates of a cell are weakly linked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellLinkRule;

impl ChainingRule for CellLinkRule {
    fn link_type(&self) -> LinkType {
        LinkType::Cell
    }

    fn get_links(&self, ctx: &mut ChainingRuleLinkContext<'_>) {
        for idx in ctx.grid.empty_cells().iter() {
            let nodes: Vec<Node> = ctx.grid.cell_cands[idx]
                .iter()
                .filter_map(|d| Node::from_candidate(candidate(idx, d), true, false).ok())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::CandidateFabric;
    use crate::link_dictionary::LinkDictionary;
    use crate::options::ChainingOptions;

    #[test]
    fn test_bivalue_cell_links() {
        let grid = CandidateFabric::empty()
            .with_candidates(10, &[3, 8])
            .unwrap()
            .with_candidates(11, &[1, 2, 3])
            .unwrap();
        let options = ChainingOptions::default();
        let (mut strong, mut weak) = (LinkDictionary::new(), LinkDictionary::new());
        CellLinkRule.get_links(&mut ChainingRuleLinkContext {
            grid: &grid,
            strong: &mut strong,
            weak: &mut weak,
            options: &options,
        });

        let on = |cell, d| Node::from_candidate(candidate(cell, d), true, false).unwrap();
        assert!(strong.contains_link(&!on(10, 3), &on(10, 8)));
        assert!(strong.contains_link(&!on(10, 8), &on(10, 3)));
        assert!(!strong.contains_link(&!on(11, 1), &on(11, 2)));
        assert!(weak.contains_link(&on(11, 1), &!on(11, 3)));
        assert!(weak.contains_link(&on(10, 3), &!on(10, 8)));
    }
}
