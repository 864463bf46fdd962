//! Read-only walks over a tree stored in a [`NodeArena`].

use crate::arena::NodeArena;
use crate::node::{Node, NodeId, Side};
use crate::queue::Queue;

/// One node as seen by a breadth-first walk.
#[derive(Clone, Copy, Debug)]
pub struct LevelEntry<'a> {
    pub id: NodeId,
    pub node: &'a Node,
    /// Distance from the root, which is at depth 0.
    pub depth: usize,
    pub parent: Option<&'a Node>,
    /// Slot under `parent`; `None` for the root.
    pub side: Option<Side>,
}

/// Breadth-first iterator, left child before right child.
pub struct LevelOrder<'a> {
    arena: &'a NodeArena,
    queue: Queue<(NodeId, usize)>,
}

impl<'a> LevelOrder<'a> {
    pub(crate) fn new(arena: &'a NodeArena, root: Option<NodeId>) -> Self {
        let mut queue = Queue::new();
        if let Some(root) = root {
            queue.enqueue((root, 0));
        }
        Self { arena, queue }
    }
}

impl<'a> Iterator for LevelOrder<'a> {
    type Item = LevelEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let (id, depth) = self.queue.dequeue()?;
        let node = arena.get(id);
        if let Some(left) = node.left {
            self.queue.enqueue((left, depth + 1));
        }
        if let Some(right) = node.right {
            self.queue.enqueue((right, depth + 1));
        }
        Some(LevelEntry {
            id,
            node,
            depth,
            parent: node.parent.map(|p| arena.get(p)),
            side: arena.side_of(id),
        })
    }
}

/// Shape summary produced by a full breadth-first walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeStats {
    /// Distinct keys.
    pub size: usize,
    /// Depth of the shallowest node missing at least one child.
    pub min_depth: usize,
    /// Depth of the deepest node missing at least one child.
    pub max_depth: usize,
}

impl TreeStats {
    /// `None` for an empty tree.
    pub(crate) fn collect(arena: &NodeArena, root: Option<NodeId>) -> Option<Self> {
        let mut size = 0;
        let mut min_depth = None;
        let mut max_depth = 0;
        for entry in LevelOrder::new(arena, root) {
            size += 1;
            if entry.node.left.is_none() || entry.node.right.is_none() {
                // Depths come out of the queue in non-decreasing order.
                min_depth.get_or_insert(entry.depth);
                max_depth = entry.depth;
            }
        }
        Some(Self {
            size,
            min_depth: min_depth?,
            max_depth,
        })
    }
}

/// In-order iterator over `(key, count)` pairs.
pub struct Iter<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeId>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(arena: &'a NodeArena, root: Option<NodeId>) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.arena.get(id).left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let id = self.stack.pop()?;
        let node = arena.get(id);
        self.push_left_spine(node.right);
        Some((node.key.as_str(), node.count))
    }
}

/// Height of the subtree at `root` by traversal, ignoring cached heights.
pub(crate) fn measured_height(arena: &NodeArena, root: Option<NodeId>) -> u32 {
    LevelOrder::new(arena, root)
        .map(|entry| entry.depth as u32 + 1)
        .max()
        .unwrap_or(0)
}
