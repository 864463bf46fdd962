//! # fav-tree
//!
//! A frequency-counting dictionary of strings kept in a height-balanced
//! binary search tree.
//!
//! Each node caches the heights of its subtrees and names its *favorite*
//! child, the strictly taller one. Insertions and deletions repair those
//! caches on the way back to the root and rotate wherever a node would end
//! up two levels heavier on one side, so lookups, insertions and deletions
//! stay logarithmic in the number of distinct keys.
//!
//! An unbalanced [`BstTree`] with the same interface is included for
//! comparison, along with the token reader and instruction driver used by
//! the `fav-tree` binary.
//!
//! ## Example
//!
//! ```rust
//! use fav_tree::{AvlTree, FrequencyTree, TreeError};
//!
//! let mut tree = AvlTree::new();
//! tree.insert("hello".to_string());
//! tree.insert("world".to_string());
//! tree.insert("hello".to_string());
//!
//! assert_eq!(tree.frequency("hello"), Ok(2));
//! assert_eq!(tree.delete("world"), Ok(0));
//! assert_eq!(
//!     tree.frequency("world"),
//!     Err(TreeError::NotFound { key: "world".to_string() })
//! );
//! ```

#![forbid(unsafe_code)]

pub mod arena;
pub mod avl;
pub mod bst;
pub mod config;
pub mod driver;
pub mod error;
pub mod node;
pub mod queue;
pub mod report;
pub mod scanner;
pub mod traverse;
pub mod tree;

pub use avl::AvlTree;
pub use bst::BstTree;
pub use config::Config;
pub use error::{DriverError, TreeError};
pub use node::{Node, NodeId, Side};
pub use traverse::{LevelEntry, TreeStats};
pub use tree::{FrequencyTree, TreeKind};

#[cfg(test)]
mod proptests;
