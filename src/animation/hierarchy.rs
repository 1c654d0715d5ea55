use glam::Mat4;

/// One node of an asset's transform hierarchy.
///
/// Built once at import time and shared read-only (behind an `Arc`) by every
/// clip of the asset. Nodes that are not animated keep `rest_transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub name: String,
    pub rest_transform: Mat4,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    #[must_use]
    pub fn new(name: impl Into<String>, rest_transform: Mat4) -> Self {
        Self {
            name: name.into(),
            rest_transform,
            children: Vec::new(),
        }
    }

    /// Builder helper: appends `child` and returns `self`.
    #[must_use]
    pub fn with_child(mut self, child: HierarchyNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Number of levels in this subtree (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Pre-order search by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&HierarchyNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Visits every node in pre-order, children in list order.
    pub fn visit_pre_order<'a>(&'a self, visitor: &mut impl FnMut(&'a HierarchyNode)) {
        visitor(self);
        for child in &self.children {
            child.visit_pre_order(visitor);
        }
    }
}
