//! Unbalanced binary search tree with the same counting semantics as
//! [`AvlTree`](crate::AvlTree), kept as a baseline for comparing shapes.

use std::cmp::Ordering;

use log::debug;

use crate::arena::NodeArena;
use crate::error::TreeError;
use crate::node::{Node, NodeId, Side};
use crate::tree::{FrequencyTree, TreeKind};

#[derive(Clone, Default)]
pub struct BstTree {
    arena: NodeArena,
    root: Option<NodeId>,
}

impl BstTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Puts `replacement` in the slot `n` occupies.
    fn replace(&mut self, n: NodeId, replacement: Option<NodeId>) {
        match (self.arena.parent(n), self.arena.side_of(n)) {
            (Some(parent), Some(side)) => self.arena.link(parent, side, replacement),
            _ => {
                if let Some(r) = replacement {
                    self.arena.get_mut(r).parent = None;
                }
                self.root = replacement;
            }
        }
    }

    fn remove_node(&mut self, n: NodeId) {
        let node = self.arena.get(n);
        match (node.left, node.right) {
            (None, None) => self.replace(n, None),
            (Some(child), None) | (None, Some(child)) => self.replace(n, Some(child)),
            (Some(left), Some(right)) => {
                let s = self.arena.successor(n).expect("right subtree is non-empty");
                if s != right {
                    // Lift the successor out; it has no left child.
                    let s_right = self.arena.child(s, Side::Right);
                    let s_parent = self.arena.parent(s).expect("successor has a parent");
                    self.arena.link(s_parent, Side::Left, s_right);
                    self.arena.link(s, Side::Right, Some(right));
                }
                self.arena.link(s, Side::Left, Some(left));
                self.replace(n, Some(s));
            }
        }
        self.arena.release(n);
    }
}

impl FrequencyTree for BstTree {
    const KIND: TreeKind = TreeKind::Bst;

    fn arena(&self) -> &NodeArena {
        &self.arena
    }

    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn insert(&mut self, key: String) -> u32 {
        let Some(t) = self.arena.locate(self.root, &key) else {
            self.root = Some(self.arena.alloc(Node::new(key)));
            return 1;
        };

        let ordering = key.as_str().cmp(self.arena.get(t).key());
        let side = match ordering {
            Ordering::Equal => return self.arena.get_mut(t).increment(),
            Ordering::Less => Side::Left,
            Ordering::Greater => Side::Right,
        };
        let n = self.arena.alloc(Node::new(key));
        self.arena.link(t, side, Some(n));
        1
    }

    fn delete(&mut self, key: &str) -> Result<u32, TreeError> {
        let n = self
            .arena
            .locate(self.root, key)
            .ok_or(TreeError::EmptyTree)?;
        if self.arena.get(n).key() != key {
            return Err(TreeError::NotFound {
                key: key.to_string(),
            });
        }

        let node = self.arena.get_mut(n);
        node.count -= 1;
        if node.count > 0 {
            return Ok(node.count);
        }

        self.remove_node(n);
        debug!("removed {key:?}, {} keys remain", self.arena.len());
        Ok(0)
    }
}

impl std::fmt::Debug for BstTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl BstTree {
    /// Panics unless parent links, ordering and `len` are consistent.
    pub(crate) fn validate(&self) {
        let mut reachable = 0;
        for entry in self.level_order() {
            reachable += 1;
            if let Some(parent) = entry.node.parent() {
                let side = entry.side.expect("non-root has a side");
                assert_eq!(self.arena.child(parent, side), Some(entry.id));
            } else {
                assert_eq!(self.root, Some(entry.id));
            }
            assert!(entry.node.count() >= 1);
        }
        assert_eq!(reachable, self.len());

        let keys: Vec<&str> = self.iter().map(|(k, _)| k).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[&str]) -> BstTree {
        let mut t = BstTree::new();
        for k in keys {
            t.insert(k.to_string());
        }
        t
    }

    fn keys(t: &BstTree) -> Vec<&str> {
        t.level_order().map(|e| e.node.key()).collect()
    }

    #[test]
    fn test_no_rebalancing() {
        let t = build(&["a", "b", "c", "d"]);
        t.validate();
        assert_eq!(keys(&t), vec!["a", "b", "c", "d"]);
        assert_eq!(t.height(), 4);
        let stats = t.stats().unwrap();
        assert_eq!((stats.min_depth, stats.max_depth), (0, 3));
    }

    #[test]
    fn test_counts() {
        let mut t = build(&["m", "m", "a"]);
        assert_eq!(t.frequency("m"), Ok(2));
        assert_eq!(t.delete("m"), Ok(1));
        assert_eq!(t.delete("m"), Ok(0));
        assert_eq!(
            t.frequency("m"),
            Err(TreeError::NotFound { key: "m".into() })
        );
        assert_eq!(keys(&t), vec!["a"]);
        t.validate();
    }

    #[test]
    fn test_delete_shapes() {
        //      h
        //    /   \
        //   d     l
        //  / \   / \
        // b   f j   n
        //        \
        //         k
        let base = build(&["h", "d", "l", "b", "f", "j", "n", "k"]);
        base.validate();

        // Leaf.
        let mut t = base.clone();
        t.delete("b").unwrap();
        t.validate();
        assert_eq!(keys(&t), vec!["h", "d", "l", "f", "j", "n", "k"]);

        // One child.
        let mut t = base.clone();
        t.delete("j").unwrap();
        t.validate();
        assert_eq!(keys(&t), vec!["h", "d", "l", "b", "f", "k", "n"]);

        // Two children, successor is the right child.
        let mut t = base.clone();
        t.delete("d").unwrap();
        t.validate();
        assert_eq!(keys(&t), vec!["h", "f", "l", "b", "j", "n", "k"]);

        // Root with two children, successor deeper down with a right child.
        let mut t = base.clone();
        t.delete("h").unwrap();
        t.validate();
        assert_eq!(keys(&t), vec!["j", "d", "l", "b", "f", "k", "n"]);
    }

    #[test]
    fn test_delete_root_chain() {
        let mut t = build(&["a", "b"]);
        t.delete("a").unwrap();
        t.validate();
        assert_eq!(keys(&t), vec!["b"]);
        t.delete("b").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.delete("b"), Err(TreeError::EmptyTree));
    }

    #[test]
    #[should_panic(expected = "count overflows u32")]
    fn test_count_overflow_panics() {
        let mut t = build(&["m"]);
        let root = t.root().unwrap();
        t.arena.get_mut(root).count = u32::MAX;
        t.insert("m".to_string());
    }
}
