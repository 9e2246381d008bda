//! Arena of software items with explicit parent/child links.
//!
//! The tree owns traversal order. Sibling order is insertion order, and the
//! calculation driver visits Units before CSCIs within each parent.

use std::collections::{BTreeMap, HashSet};

use super::node::SoftwareNode;
use super::{Level, SoftwareId};
use crate::error::{Result, SwRiskError};

#[derive(Debug, Clone, Default)]
pub struct SoftwareTree {
    nodes: BTreeMap<SoftwareId, SoftwareNode>,
    children: BTreeMap<SoftwareId, Vec<SoftwareId>>,
    roots: Vec<SoftwareId>,
}

impl SoftwareTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from nodes listed in any order.
    ///
    /// Parents are linked before their children regardless of where they
    /// appear in `nodes`; siblings keep their relative order.
    pub fn from_nodes(nodes: Vec<SoftwareNode>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(node.software_id) {
                return Err(SwRiskError::DuplicateNode(node.software_id));
            }
        }

        let mut tree = Self::new();
        let mut pending = nodes;

        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();

            for node in pending {
                let ready = node
                    .parent_id
                    .map_or(true, |parent| tree.contains(parent));
                if ready {
                    tree.insert(node)?;
                } else {
                    deferred.push(node);
                }
            }

            if deferred.len() == before {
                // Report a missing parent first; otherwise the stuck items
                // can only be waiting on each other.
                let orphan = deferred.iter().find_map(|node| {
                    node.parent_id
                        .filter(|parent| !seen.contains(parent))
                        .map(|parent| (node.software_id, parent))
                });
                return Err(match orphan {
                    Some((id, parent)) => SwRiskError::UnknownParent { id, parent },
                    None => SwRiskError::Cycle(deferred[0].software_id),
                });
            }

            pending = deferred;
        }

        Ok(tree)
    }

    /// Add an item under its `parent_id`, or as a root when it has none.
    pub fn insert(&mut self, node: SoftwareNode) -> Result<()> {
        let id = node.software_id;
        if self.nodes.contains_key(&id) {
            return Err(SwRiskError::DuplicateNode(id));
        }

        match node.parent_id {
            Some(parent) => {
                let parent_node = self
                    .nodes
                    .get(&parent)
                    .ok_or(SwRiskError::UnknownParent { id, parent })?;
                if !parent_node.level.is_aggregate() {
                    return Err(SwRiskError::LeafParent { id, parent });
                }
                self.children.entry(parent).or_default().push(id);
            }
            None => self.roots.push(id),
        }

        self.nodes.insert(id, node);
        Ok(())
    }

    /// Remove an item and everything below it.
    ///
    /// The item is detached from its parent's child list first, so no
    /// traversal can reach a half-removed subtree. Returns the removed items,
    /// children before parents.
    pub fn remove(&mut self, id: SoftwareId) -> Result<Vec<SoftwareNode>> {
        let parent = self
            .nodes
            .get(&id)
            .ok_or(SwRiskError::UnknownNode(id))?
            .parent_id;

        match parent {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(&parent) {
                    siblings.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        let order = self.post_order(id)?;
        let removed = order
            .into_iter()
            .filter_map(|member| {
                self.children.remove(&member);
                self.nodes.remove(&member)
            })
            .collect();
        Ok(removed)
    }

    pub fn get(&self, id: SoftwareId) -> Option<&SoftwareNode> {
        self.nodes.get(&id)
    }

    /// Mutable access for editing inputs.
    ///
    /// `software_id` and `parent_id` belong to the tree; edit them by
    /// removing and re-inserting the item.
    pub fn get_mut(&mut self, id: SoftwareId) -> Option<&mut SoftwareNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: SoftwareId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn children(&self, id: SoftwareId) -> &[SoftwareId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[SoftwareId] {
        &self.roots
    }

    /// Direct children that are Units.
    pub fn units_of(&self, id: SoftwareId) -> Vec<SoftwareId> {
        self.children_where(id, |level| level == Level::Unit)
    }

    /// Direct children that are CSCIs (or nested Systems).
    pub fn cscis_of(&self, id: SoftwareId) -> Vec<SoftwareId> {
        self.children_where(id, Level::is_aggregate)
    }

    fn children_where(&self, id: SoftwareId, keep: impl Fn(Level) -> bool) -> Vec<SoftwareId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.nodes.get(child).is_some_and(|n| keep(n.level)))
            .collect()
    }

    /// Calculation order for the subtree at `id`: for every item, its Units,
    /// then its CSCIs (each recursively), then the item itself.
    pub fn post_order(&self, id: SoftwareId) -> Result<Vec<SoftwareId>> {
        if !self.contains(id) {
            return Err(SwRiskError::UnknownNode(id));
        }
        let mut order = Vec::new();
        self.collect_post_order(id, &mut order);
        Ok(order)
    }

    fn collect_post_order(&self, id: SoftwareId, order: &mut Vec<SoftwareId>) {
        for child in self.units_of(id).into_iter().chain(self.cscis_of(id)) {
            self.collect_post_order(child, order);
        }
        order.push(id);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &SoftwareNode> {
        self.nodes.values()
    }

    /// Items in id order, for bulk input edits.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SoftwareNode> {
        self.nodes.values_mut()
    }

    /// Check every item's questionnaire against the worksheet lengths.
    pub fn validate(&self) -> Result<()> {
        for node in self.iter() {
            if let Some(problem) = node.questionnaire.validate().into_iter().next() {
                return Err(SwRiskError::QuestionnaireLength {
                    id: node.software_id,
                    sheet: problem.sheet,
                    expected: problem.expected,
                    actual: problem.actual,
                });
            }
        }
        Ok(())
    }
}
