//! Tree node and the handles used to link nodes inside a [`NodeArena`].
//!
//! [`NodeArena`]: crate::arena::NodeArena

/// Handle to a node slot inside a [`NodeArena`](crate::arena::NodeArena).
///
/// Handles are only meaningful for the arena that issued them, and a freed
/// handle may be reissued for a different node later.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("arena exceeds u32 slots"))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A dictionary entry.
///
/// `left_height`, `right_height`, `height` and `favorite` are a cache of the
/// subtree shape. The AVL engine recomputes them bottom-up after every
/// structural change; the plain BST leaves them at their initial values.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) key: String,
    pub(crate) count: u32,
    pub(crate) left_height: u32,
    pub(crate) right_height: u32,
    pub(crate) height: u32,
    /// The strictly taller child slot, `None` on a tie.
    pub(crate) favorite: Option<Side>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// `None` for the root.
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// A detached entry with count 1.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            count: 1,
            left_height: 0,
            right_height: 0,
            height: 1,
            favorite: None,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// Records one more occurrence of the key and returns the new count.
    pub(crate) fn increment(&mut self) -> u32 {
        self.count = self.count.checked_add(1).expect("key count overflows u32");
        self.count
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn left_height(&self) -> u32 {
        self.left_height
    }

    #[inline]
    pub fn right_height(&self) -> u32 {
        self.right_height
    }

    #[inline]
    pub fn favorite(&self) -> Option<Side> {
        self.favorite
    }

    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}
