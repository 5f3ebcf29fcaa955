use indexmap::IndexMap;

use super::RuleId;

/// A selector of a rule, by position in the rule's selector list
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(super) struct SelectorNode {
    pub rule: RuleId,
    pub index: usize,
}

/// Index into the request list built by collection
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(super) struct RequestId(pub usize);

/// Edges from each selector to the requests whose target it satisfies
#[derive(Debug, Default)]
pub(super) struct ExtendGraph {
    edges: IndexMap<SelectorNode, Vec<RequestId>>,
}

impl ExtendGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the node satisfies nothing, in which case it is not
    /// recorded
    pub fn insert(&mut self, node: SelectorNode, edges: Vec<RequestId>) -> bool {
        if edges.is_empty() {
            return false;
        }

        self.edges.insert(node, edges);
        true
    }

    pub fn edges(&self, node: SelectorNode) -> &[RequestId] {
        self.edges.get(&node).map_or(&[], Vec::as_slice)
    }
}
