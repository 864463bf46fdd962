//! Height-balanced tree driven by each node's favorite child.
//!
//! Every node caches the heights of its two subtrees and remembers which side
//! is strictly taller (its *favorite*). After an insertion or deletion the
//! engine walks from the changed position toward the root, refreshing those
//! caches and rotating wherever a node would become two levels heavier on
//! one side.
//!
//! Whether one rotation or two are needed is read off the favorites: if the
//! heavy path continues in the same direction for two levels the shape is
//! *linear* and a single rotation fixes it, otherwise it is *nonlinear* and
//! the grandchild is rotated up twice.
//!
//! ## Example
//!
//! ```rust
//! use fav_tree::{AvlTree, FrequencyTree};
//!
//! let mut tree = AvlTree::new();
//! for word in ["c", "b", "a", "b"] {
//!     tree.insert(word.to_string());
//! }
//!
//! assert_eq!(tree.frequency("b"), Ok(2));
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.height(), 2);
//! ```

use std::cmp::Ordering;

use log::{debug, trace};

use crate::arena::NodeArena;
use crate::error::TreeError;
use crate::node::{Node, NodeId, Side};
use crate::tree::{FrequencyTree, TreeKind};

#[derive(Clone, Default)]
pub struct AvlTree {
    arena: NodeArena,
    root: Option<NodeId>,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn get(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    fn favorite_child(&self, id: NodeId) -> Option<NodeId> {
        let node = self.arena.get(id);
        node.favorite.and_then(|side| node.child(side))
    }

    /// Recomputes the cached heights and favorite of `id` from its children.
    /// The children's own caches must already be current.
    fn set_balance(&mut self, id: NodeId) {
        let node = self.arena.get(id);
        let left_height = node.left.map_or(0, |c| self.arena.get(c).height);
        let right_height = node.right.map_or(0, |c| self.arena.get(c).height);

        let node = self.arena.get_mut(id);
        node.left_height = left_height;
        node.right_height = right_height;
        node.height = left_height.max(right_height) + 1;
        node.favorite = match left_height.cmp(&right_height) {
            Ordering::Greater => Some(Side::Left),
            Ordering::Less => Some(Side::Right),
            Ordering::Equal => None,
        };
    }

    // =========================================================================
    // Rotations
    // =========================================================================

    /// Moves `n` up past its parent `p`, where `n` is `p`'s `side` child.
    ///
    /// `p` becomes `n`'s child on the opposite side and takes over `n`'s inner
    /// subtree. When `p` is the root, `n` becomes the new root. Cached heights
    /// are left stale; callers rebalance `p` then `n`.
    fn rotate(&mut self, n: NodeId, side: Side) {
        let p = self.arena.parent(n).expect("rotated node has a parent");
        debug_assert_eq!(self.arena.side_of(n), Some(side));

        let inner = self.arena.child(n, side.opposite());
        match (self.arena.parent(p), self.arena.side_of(p)) {
            (Some(grandparent), Some(p_side)) => self.arena.link(grandparent, p_side, Some(n)),
            _ => {
                self.arena.get_mut(n).parent = None;
                self.root = Some(n);
            }
        }
        self.arena.link(p, side, inner);
        self.arena.link(n, side.opposite(), Some(p));
    }

    /// Rotates a left child up: its parent becomes its right child.
    fn rotate_right(&mut self, n: NodeId) {
        self.rotate(n, Side::Left);
    }

    /// Rotates a right child up: its parent becomes its left child.
    fn rotate_left(&mut self, n: NodeId) {
        self.rotate(n, Side::Right);
    }

    fn rotate_up(&mut self, n: NodeId) {
        match self.arena.side_of(n).expect("rotated node has a parent") {
            Side::Left => self.rotate_right(n),
            Side::Right => self.rotate_left(n),
        }
    }

    /// Whether `n`'s favorite lies on the same side as `n` does under its
    /// parent.
    fn is_linear(&self, n: NodeId) -> bool {
        match self.arena.side_of(n) {
            Some(side) => self.arena.get(n).favorite == Some(side),
            None => false,
        }
    }

    fn linear_rotate(&mut self, n: NodeId) {
        trace!("linear rotation of {:?}", self.arena.get(n).key);
        self.rotate_up(n);
    }

    /// Rotates `n`'s favorite child up twice, above both `n` and `n`'s parent.
    fn nonlinear_rotate(&mut self, n: NodeId) {
        let f = self
            .favorite_child(n)
            .expect("nonlinear rotation needs a favorite child");
        trace!("nonlinear rotation of {:?}", self.arena.get(f).key);
        self.rotate_up(f);
        self.rotate_up(f);
    }

    // =========================================================================
    // Fixups
    // =========================================================================

    /// Restores balance after `n` was attached as a new leaf.
    fn insert_fixup(&mut self, mut n: NodeId) {
        while let Some(p) = self.arena.parent(n) {
            let side = self.arena.side_of(n).expect("child has a side");
            let favorite = self.arena.get(p).favorite;
            match favorite {
                // The sibling was taller: `p` just evened out.
                Some(favorite) if favorite != side => {
                    self.set_balance(p);
                    return;
                }
                // `p` was even and has grown by one.
                None => {
                    self.set_balance(p);
                    n = p;
                }
                // `p` would be two taller on `n`'s side.
                Some(_) => {
                    match self.favorite_child(n) {
                        Some(f) if !self.is_linear(n) => {
                            self.nonlinear_rotate(n);
                            self.set_balance(n);
                            self.set_balance(p);
                            self.set_balance(f);
                        }
                        _ => {
                            self.linear_rotate(n);
                            self.set_balance(p);
                            self.set_balance(n);
                        }
                    }
                    // The rotated subtree is back to its height before the
                    // insertion, so nothing above it changes.
                    return;
                }
            }
        }
    }

    /// Restores balance before the surplus node `n` is unlinked.
    ///
    /// `n` has at most one child, which will take its place.
    fn delete_fixup(&mut self, mut n: NodeId) {
        let node = self.arena.get(n);
        let remaining = node
            .left
            .or(node.right)
            .map_or(0, |c| self.arena.get(c).height);
        self.arena.get_mut(n).height = remaining;

        while let Some(p) = self.arena.parent(n) {
            let side = self.arena.side_of(n).expect("child has a side");
            let favorite = self.arena.get(p).favorite;
            match favorite {
                // The taller side shrank, so `p` shrank too.
                Some(favorite) if favorite == side => {
                    self.set_balance(p);
                    n = p;
                }
                // `p` was even; its height is unchanged.
                None => {
                    self.set_balance(p);
                    return;
                }
                // The sibling is now two taller.
                Some(_) => {
                    let s = self
                        .arena
                        .child(p, side.opposite())
                        .expect("favorite side has a child");
                    match self.favorite_child(s) {
                        Some(f) if !self.is_linear(s) => {
                            self.nonlinear_rotate(s);
                            self.set_balance(p);
                            self.set_balance(s);
                            self.set_balance(f);
                            n = f;
                        }
                        f => {
                            self.linear_rotate(s);
                            self.set_balance(p);
                            self.set_balance(s);
                            // An even sibling leaves the subtree height as it was.
                            if f.is_none() {
                                return;
                            }
                            n = s;
                        }
                    }
                }
            }
        }
    }

    /// Picks the node to physically remove in place of `n`.
    ///
    /// An interior node takes over the key and count of its in-order
    /// predecessor (or successor when it has no left child), which is then the
    /// node to remove. A leaf is removed itself.
    fn take_neighbor(&mut self, n: NodeId) -> NodeId {
        let neighbor = self
            .arena
            .predecessor(n)
            .or_else(|| self.arena.successor(n));
        let Some(s) = neighbor else {
            return n;
        };

        let donor = self.arena.get_mut(s);
        let key = std::mem::take(&mut donor.key);
        let count = donor.count;
        let target = self.arena.get_mut(n);
        target.key = key;
        target.count = count;
        s
    }

    /// Unlinks a node with at most one child, splicing the child into its slot.
    fn trim(&mut self, s: NodeId) {
        let node = self.arena.get(s);
        let child = node.left.or(node.right);
        let parent = node.parent.expect("trimmed node is never the root");
        let side = self.arena.side_of(s).expect("child has a side");

        self.arena.link(parent, side, child);
        self.set_balance(parent);
        self.arena.release(s);
    }
}

impl FrequencyTree for AvlTree {
    const KIND: TreeKind = TreeKind::Avl;

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
        self.insert_fixup(n);
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

        if self.root == Some(n) && self.arena.is_leaf(n) {
            debug!("removed last key {key:?}, tree is now empty");
            self.clear();
            return Ok(0);
        }

        let s = self.take_neighbor(n);
        self.delete_fixup(s);
        self.trim(s);
        debug!("removed {key:?}, {} keys remain", self.arena.len());
        Ok(0)
    }

    fn height(&self) -> u32 {
        self.root.map_or(0, |root| self.arena.get(root).height)
    }
}

impl FromIterator<String> for AvlTree {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<String> for AvlTree {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl std::fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl AvlTree {
    /// Panics unless every structural invariant holds.
    pub(crate) fn validate(&self) {
        fn walk(t: &AvlTree, id: NodeId, parent: Option<NodeId>, reachable: &mut usize) -> u32 {
            *reachable += 1;
            let node = t.arena.get(id);
            assert_eq!(node.parent, parent, "parent link of {:?}", node.key);
            assert!(node.count >= 1, "live entry {:?} has count 0", node.key);

            let lh = match node.left {
                Some(c) => walk(t, c, Some(id), reachable),
                None => 0,
            };
            let rh = match node.right {
                Some(c) => walk(t, c, Some(id), reachable),
                None => 0,
            };
            assert_eq!(node.left_height, lh, "left height of {:?}", node.key);
            assert_eq!(node.right_height, rh, "right height of {:?}", node.key);
            assert_eq!(node.height, lh.max(rh) + 1, "height of {:?}", node.key);
            assert!(lh.abs_diff(rh) <= 1, "{:?} is out of balance", node.key);

            let favorite = match lh.cmp(&rh) {
                Ordering::Greater => Some(Side::Left),
                Ordering::Less => Some(Side::Right),
                Ordering::Equal => None,
            };
            assert_eq!(node.favorite, favorite, "favorite of {:?}", node.key);
            node.height
        }

        let mut reachable = 0;
        if let Some(root) = self.root {
            walk(self, root, None, &mut reachable);
        }
        assert_eq!(reachable, self.len(), "reachable nodes must match len");

        let keys: Vec<&str> = self.iter().map(|(k, _)| k).collect();
        assert!(
            keys.windows(2).all(|w| w[0] < w[1]),
            "in-order keys must be strictly increasing"
        );
    }
}
