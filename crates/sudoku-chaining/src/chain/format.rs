//! Text notation for chains and loops.

use crate::bitset::CellMap;
use crate::node::Node;

use super::{ChainOrLoop, ChainShape};

/// How links and nodes are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainFormat {
    pub strong: &'static str,
    pub weak: &'static str,
    /// Write digits before cells and fold links inside one cell: `(3=7)r1c5`
    pub fold_cells: bool,
}

impl ChainFormat {
    /// `r1c2(3)=r1c5(3)-r1c5(7)=r3c5(7)`
    pub const fn standard() -> Self {
        ChainFormat {
            strong: "=",
            weak: "-",
            fold_cells: false,
        }
    }

    /// `r1c2(3) == r1c5(3) -- r1c5(7) == r3c5(7)`
    pub const fn spaced() -> Self {
        ChainFormat {
            strong: " == ",
            weak: " -- ",
            fold_cells: false,
        }
    }

    /// `(3)r1c2=(3-7)r1c5=(7)r3c5`
    pub const fn eureka() -> Self {
        ChainFormat {
            strong: "=",
            weak: "-",
            fold_cells: true,
        }
    }
}

impl Default for ChainFormat {
    fn default() -> Self {
        Self::standard()
    }
}

impl ChainOrLoop {
    /// Render the valid nodes; a loop repeats its first node at the end.
    pub fn to_string_with(&self, format: &ChainFormat) -> String {
        let mut nodes: Vec<Node> = self.valid_nodes().to_vec();
        if self.shape == ChainShape::Loop {
            nodes.push(nodes[0]);
        }
        let ops: Vec<&str> = self
            .links()
            .iter()
            .map(|l| if l.is_strong { format.strong } else { format.weak })
            .collect();

        if format.fold_cells {
            eureka(&nodes, &ops)
        } else {
            let mut out = nodes[0].to_string();
            for (node, op) in nodes[1..].iter().zip(&ops) {
                out.push_str(op);
                out.push_str(&node.to_string());
            }
            out
        }
    }
}

fn digits_text(node: &Node) -> String {
    node.digits().iter().map(|d| char::from(b'0' + d)).collect()
}

/// Consecutive nodes on the same cells collapse into one `(d1=d2)cells` run.
fn eureka(nodes: &[Node], ops: &[&str]) -> String {
    let mut out = String::new();
    let mut run = digits_text(&nodes[0]);
    let mut cells: CellMap = nodes[0].cells();

    for (node, op) in nodes[1..].iter().zip(ops) {
        if node.cells() == cells {
            run.push_str(op);
            run.push_str(&digits_text(node));
        } else {
            out.push_str(&format!("({run}){cells}{op}"));
            run = digits_text(node);
            cells = node.cells();
        }
    }
    out.push_str(&format!("({run}){cells}"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::candidate;
    use crate::link_dictionary::LinkPools;

    fn n(cell: usize, digit: u8, is_on: bool) -> Node {
        Node::from_candidate(candidate(cell, digit), is_on, false).unwrap()
    }

    /// r1c2(3)=r1c5(3)-r1c5(7)=r3c5(7)
    fn sample() -> ChainOrLoop {
        let path = [n(22, 7, false), n(4, 7, true), n(4, 3, false), n(1, 3, true)];
        ChainOrLoop::from_path(&path, ChainShape::Chain, LinkPools::default()).unwrap()
    }

    #[test]
    fn test_standard() {
        assert_eq!(sample().to_string(), "r1c2(3)=r1c5(3)-r1c5(7)=r3c5(7)");
    }

    #[test]
    fn test_spaced() {
        assert_eq!(
            sample().to_string_with(&ChainFormat::spaced()),
            "r1c2(3) == r1c5(3) -- r1c5(7) == r3c5(7)"
        );
    }

    #[test]
    fn test_eureka_folds_cell_links() {
        assert_eq!(
            sample().to_string_with(&ChainFormat::eureka()),
            "(3)r1c2=(3-7)r1c5=(7)r3c5"
        );
    }

    #[test]
    fn test_loop_closes_on_first_node() {
        let path = [n(0, 3, true), n(4, 3, false), n(40, 3, true), n(36, 3, false)];
        let lp = ChainOrLoop::from_path(&path, ChainShape::Loop, LinkPools::default()).unwrap();
        assert_eq!(lp.to_string(), "r1c1(3)=r5c1(3)-r5c5(3)=r1c5(3)-r1c1(3)");
    }
}
