use crate::bitset::CellMap;
use crate::fabric::{sector_map, SECTOR_BOX_BASE, SECTOR_COL_BASE};
use crate::link::LinkPattern;
use crate::node::Node;
use crate::options::LinkType;
use crate::rule::{ChainingRule, ChainingRuleLinkContext};

/// Grouped links over box/line intersections.
///
/// Inside a house, the cells holding a digit are split by the crossing
/// houses (boxes for a line, rows or columns for a box). Each piece is a
/// node; two pieces give a strong link, and every pair of pieces with a
/// grouped member is weakly linked.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockedCandidatesRule;

impl ChainingRule for LockedCandidatesRule {
    fn link_type(&self) -> LinkType {
        LinkType::LockedCandidates
    }

    fn get_links(&self, ctx: &mut ChainingRuleLinkContext<'_>) {
        for house in 0..27 {
            for digit in 1..=9u8 {
                let cells = sector_map(house) & ctx.grid.candidates_map(digit);
                if cells.len() < 2 {
                    continue;
                }
                for partition in crossing_houses(house) {
                    let segments: Vec<CellMap> = partition
                        .iter()
                        .map(|&s| cells & sector_map(s))
                        .filter(|seg| !seg.is_empty())
                        .collect();
                    add_segment_links(ctx, house, digit, &segments);
                }
            }
        }
    }
}

/// Sets of houses that split `house` into intersections
fn crossing_houses(house: usize) -> Vec<Vec<usize>> {
    if house >= SECTOR_BOX_BASE {
        let b = house - SECTOR_BOX_BASE;
        let rows = (0..3).map(|i| (b / 3) * 3 + i).collect();
        let cols = (0..3).map(|i| SECTOR_COL_BASE + (b % 3) * 3 + i).collect();
        vec![rows, cols]
    } else {
        vec![(0..9).map(|i| SECTOR_BOX_BASE + i).collect()]
    }
}

fn add_segment_links(
    ctx: &mut ChainingRuleLinkContext<'_>,
    house: usize,
    digit: u8,
    segments: &[CellMap],
) {
    if segments.len() < 2 || segments.iter().all(|s| s.len() == 1) {
        return;
    }
    let pattern = Some(LinkPattern::LockedCandidates { house, digit });
    let nodes: Vec<Node> = segments
        .iter()
        .filter_map(|seg| Node::new(seg.with_digit(digit), true, false).ok())
        .collect();

    if nodes.len() == 2 {
        ctx.add_strong(nodes[0], nodes[1], pattern);
    }
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if nodes[i].is_grouped() || nodes[j].is_grouped() {
                ctx.add_weak(nodes[i], nodes[j], pattern);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::{candidate, CandidateMap};
    use crate::fabric::CandidateFabric;
    use crate::link_dictionary::LinkDictionary;
    use crate::options::ChainingOptions;

    fn group(cells: &[usize], digit: u8) -> Node {
        let map: CandidateMap = cells.iter().map(|&c| candidate(c, digit)).collect();
        Node::new(map, true, false).unwrap()
    }

    #[test]
    fn test_two_segments_in_row_make_strong_link() {
        // Row 1 keeps digit 4 only in r1c12 (box 1) and r1c7 (box 3)
        let mut grid = CandidateFabric::empty();
        for col in [2, 3, 4, 5, 7, 8] {
            grid.set_candidates(col, [1, 2].into_iter().collect()).unwrap();
        }
        let options = ChainingOptions::default();
        let (mut strong, mut weak) = (LinkDictionary::new(), LinkDictionary::new());
        LockedCandidatesRule.get_links(&mut ChainingRuleLinkContext {
            grid: &grid,
            strong: &mut strong,
            weak: &mut weak,
            options: &options,
        });

        let pair = group(&[0, 1], 4);
        let single = group(&[6], 4);
        assert!(strong.contains_link(&!pair, &single));
        assert!(weak.contains_link(&pair, &!single));
        assert_eq!(
            strong.pattern(&!pair, &single, true),
            Some(&LinkPattern::LockedCandidates { house: 0, digit: 4 })
        );
    }

    #[test]
    fn test_crossing_houses_of_box() {
        let parts = crossing_houses(SECTOR_BOX_BASE + 4);
        assert_eq!(parts[0], vec![3, 4, 5]);
        assert_eq!(parts[1], vec![12, 13, 14]);
    }
}
