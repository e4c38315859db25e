//! The contract every link-producing technique implements, and the registry
//! that runs them.
//!
//! Strong links are stored as `(off, on)` and weak links as `(on, off)`, so a
//! search walking the dictionaries alternates polarity at every step.

use tracing::debug;

use crate::conclusion::ConclusionSet;
use crate::fabric::CandidateFabric;
use crate::link::{Link, LinkPattern};
use crate::link_dictionary::LinkDictionary;
use crate::node::Node;
use crate::options::{ChainingOptions, LinkOption, LinkType};
use crate::rules::{AlmostLockedSetRule, CellLinkRule, HouseLinkRule, LockedCandidatesRule};

/// Inputs and outputs of one `get_links` call.
pub struct ChainingRuleLinkContext<'a> {
    pub grid: &'a CandidateFabric,
    pub strong: &'a mut LinkDictionary,
    pub weak: &'a mut LinkDictionary,
    pub options: &'a ChainingOptions,
}

impl ChainingRuleLinkContext<'_> {
    /// "At least one of `a`, `b` holds": stored as `!a => b`.
    pub fn add_strong(&mut self, a: Node, b: Node, pattern: Option<LinkPattern>) {
        self.strong
            .add_entry(a.with_polarity(false), b.with_polarity(true), true, pattern);
    }

    /// "`a` and `b` cannot both hold": stored as `a => !b`.
    pub fn add_weak(&mut self, a: Node, b: Node, pattern: Option<LinkPattern>) {
        self.weak
            .add_entry(a.with_polarity(true), b.with_polarity(false), false, pattern);
    }
}

/// A technique that recognises strong and weak links in a grid.
pub trait ChainingRule: Send + Sync {
    /// Option key controlling this rule
    fn link_type(&self) -> LinkType;

    /// Insert every link this rule recognises. Must not touch the grid.
    fn get_links(&self, ctx: &mut ChainingRuleLinkContext<'_>);

    /// Extra eliminations that only hold because `links` close a loop.
    fn loop_conclusions(&self, _grid: &CandidateFabric, _links: &[Link]) -> ConclusionSet {
        ConclusionSet::new()
    }
}

/// Ordered set of rules sharing one set of options.
pub struct ChainingRules {
    rules: Vec<Box<dyn ChainingRule>>,
    options: ChainingOptions,
}

impl ChainingRules {
    pub fn new(options: ChainingOptions) -> Self {
        Self {
            rules: Vec::new(),
            options,
        }
    }

    /// Cell, house, locked-candidates, and ALS rules
    pub fn with_defaults(options: ChainingOptions) -> Self {
        let mut rules = Self::new(options);
        rules.push(Box::new(CellLinkRule));
        rules.push(Box::new(HouseLinkRule));
        rules.push(Box::new(LockedCandidatesRule));
        rules.push(Box::new(AlmostLockedSetRule));
        rules
    }

    pub fn push(&mut self, rule: Box<dyn ChainingRule>) {
        self.rules.push(rule);
    }

    pub fn options(&self) -> &ChainingOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every enabled rule into a fresh `(strong, weak)` pair.
    pub fn collect_links(&self, grid: &CandidateFabric) -> (LinkDictionary, LinkDictionary) {
        let mut strong = LinkDictionary::new();
        let mut weak = LinkDictionary::new();

        for rule in &self.rules {
            let link_type = rule.link_type();
            if self.options.link_option(link_type) == LinkOption::None {
                continue;
            }
            let before = (strong.link_count(), weak.link_count());
            let mut ctx = ChainingRuleLinkContext {
                grid,
                strong: &mut strong,
                weak: &mut weak,
                options: &self.options,
            };
            rule.get_links(&mut ctx);
            debug!(
                ?link_type,
                strong = strong.link_count() - before.0,
                weak = weak.link_count() - before.1,
                "collected links"
            );
        }

        (strong, weak)
    }

    /// Union of every enabled rule's loop conclusions.
    pub fn loop_conclusions(&self, grid: &CandidateFabric, links: &[Link]) -> ConclusionSet {
        let mut result = ConclusionSet::new();
        for rule in &self.rules {
            if self.options.link_option(rule.link_type()).is_enabled() {
                result.merge(rule.loop_conclusions(grid, links));
            }
        }
        result
    }
}

impl Default for ChainingRules {
    fn default() -> Self {
        Self::with_defaults(ChainingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::candidate;

    #[test]
    fn test_registry_respects_disabled_rules() {
        let grid = CandidateFabric::empty()
            .with_candidates(0, &[1, 2])
            .unwrap();
        let mut options = ChainingOptions::elementary();
        options.cell = LinkOption::None;
        let rules = ChainingRules::with_defaults(options);
        let (strong, _) = rules.collect_links(&grid);

        let a = Node::from_candidate(candidate(0, 1), false, false).unwrap();
        let b = Node::from_candidate(candidate(0, 2), true, false).unwrap();
        assert!(!strong.contains_link(&a, &b));
    }

    #[test]
    fn test_context_normalises_polarity() {
        let grid = CandidateFabric::empty();
        let options = ChainingOptions::default();
        let mut strong = LinkDictionary::new();
        let mut weak = LinkDictionary::new();
        let mut ctx = ChainingRuleLinkContext {
            grid: &grid,
            strong: &mut strong,
            weak: &mut weak,
            options: &options,
        };
        let a = Node::from_candidate(0, true, false).unwrap();
        let b = Node::from_candidate(1, true, false).unwrap();
        ctx.add_strong(a, b, None);
        ctx.add_weak(a, b, None);

        assert!(strong.contains_link(&!a, &b));
        assert!(weak.contains_link(&a, &!b));
    }
}
