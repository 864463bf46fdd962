use std::fmt;

use crate::arena::NodeArena;
use crate::error::TreeError;
use crate::node::NodeId;
use crate::traverse::{self, Iter, LevelOrder, TreeStats};

/// Which tree variant a run builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeKind {
    Avl,
    Bst,
}

impl TreeKind {
    pub fn label(self) -> &'static str {
        match self {
            TreeKind::Avl => "AVL",
            TreeKind::Bst => "BST",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered multiset of strings stored in a [`NodeArena`].
///
/// Implementors provide the mutating operations; lookups and read-only walks
/// are shared.
pub trait FrequencyTree {
    const KIND: TreeKind;

    fn arena(&self) -> &NodeArena;

    fn root(&self) -> Option<NodeId>;

    /// Adds one occurrence of `key` and returns its new count.
    fn insert(&mut self, key: String) -> u32;

    /// Removes one occurrence of `key` and returns the remaining count. The
    /// entry itself disappears once the count reaches 0.
    fn delete(&mut self, key: &str) -> Result<u32, TreeError>;

    /// Number of distinct keys.
    fn len(&self) -> usize {
        self.arena().len()
    }

    fn is_empty(&self) -> bool {
        self.root().is_none()
    }

    /// Number of nodes on the longest root-to-leaf path.
    fn height(&self) -> u32 {
        traverse::measured_height(self.arena(), self.root())
    }

    fn frequency(&self, key: &str) -> Result<u32, TreeError> {
        let id = self
            .arena()
            .locate(self.root(), key)
            .ok_or(TreeError::EmptyTree)?;
        let node = self.arena().get(id);
        if node.key() == key {
            Ok(node.count())
        } else {
            Err(TreeError::NotFound {
                key: key.to_string(),
            })
        }
    }

    fn contains_key(&self, key: &str) -> bool {
        self.frequency(key).is_ok()
    }

    fn level_order(&self) -> LevelOrder<'_> {
        LevelOrder::new(self.arena(), self.root())
    }

    fn stats(&self) -> Result<TreeStats, TreeError> {
        TreeStats::collect(self.arena(), self.root()).ok_or(TreeError::EmptyTree)
    }

    fn iter(&self) -> Iter<'_> {
        Iter::new(self.arena(), self.root())
    }
}
