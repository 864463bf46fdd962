use std::path::PathBuf;

use crate::tree::TreeKind;

/// Everything a driver run needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub kind: TreeKind,
    /// Text whose tokens populate the tree before any instruction runs.
    pub corpus: PathBuf,
    /// Opcode/token records executed against the populated tree.
    pub instructions: PathBuf,
}

impl Config {
    pub fn new(kind: TreeKind, corpus: impl Into<PathBuf>, instructions: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            corpus: corpus.into(),
            instructions: instructions.into(),
        }
    }
}
