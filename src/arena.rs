//! Slot storage shared by both tree variants.

use std::cmp::Ordering;

use crate::node::{Node, NodeId, Side};

/// Node arena with a free list of vacated slots.
///
/// Links between nodes are [`NodeId`] handles into this arena, so a tree owns
/// its whole node graph through a single `Vec`.
#[derive(Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            id
        } else {
            let id = NodeId::from_index(self.nodes.len());
            self.nodes.push(node);
            id
        }
    }

    /// Vacates a slot and hands back its node. The caller must already have
    /// unlinked it from the tree.
    pub(crate) fn release(&mut self, id: NodeId) -> Node {
        let vacant = Node::new(String::new());
        let node = std::mem::replace(&mut self.nodes[id.index()], vacant);
        self.free.push(id);
        node
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    #[inline]
    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.get(id).child(side)
    }

    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_leaf()
    }

    /// The slot `id` occupies under its parent, `None` for the root.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.get(id).parent?;
        if self.get(parent).left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id).parent?;
        let side = self.side_of(id)?;
        self.child(parent, side.opposite())
    }

    /// Points `parent`'s `side` slot at `child` and fixes the back-reference.
    pub(crate) fn link(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        self.get_mut(parent).set_child(side, child);
        if let Some(child) = child {
            self.get_mut(child).parent = Some(parent);
        }
    }

    /// Descends from `root` toward `key`.
    ///
    /// Returns the exact match if there is one, otherwise the node a new entry
    /// for `key` would be attached to. `None` only if `root` is `None`.
    pub fn locate(&self, root: Option<NodeId>, key: &str) -> Option<NodeId> {
        let mut current = root?;
        loop {
            let node = self.get(current);
            let next = match key.cmp(node.key.as_str()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => None,
            };
            match next {
                Some(next) => current = next,
                None => return Some(current),
            }
        }
    }

    /// Rightmost node of the left subtree.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id).left?;
        while let Some(right) = self.get(current).right {
            current = right;
        }
        Some(current)
    }

    /// Leftmost node of the right subtree.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id).right?;
        while let Some(left) = self.get(current).left {
            current = left;
        }
        Some(current)
    }
}
