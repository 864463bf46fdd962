//! Human-readable output for the instruction driver.

use std::io::{self, Write};

use crate::node::{Node, Side};
use crate::traverse::{LevelEntry, TreeStats};
use crate::tree::{FrequencyTree, TreeKind};

fn heavy(node: &Node) -> &'static str {
    match node.favorite() {
        Some(Side::Left) => "-",
        Some(Side::Right) => "+",
        None => "",
    }
}

fn write_entry(out: &mut impl Write, entry: &LevelEntry<'_>) -> io::Result<()> {
    let node = entry.node;
    // The root reports itself as its own parent.
    let parent = entry.parent.unwrap_or(node);
    let side = match entry.side {
        Some(Side::Left) => 'L',
        Some(Side::Right) => 'R',
        None => 'X',
    };
    write!(
        out,
        "{}{}{}({}{}){}{}",
        if node.is_leaf() { "=" } else { "" },
        node.key(),
        heavy(node),
        parent.key(),
        heavy(parent),
        node.count(),
        side
    )
}

/// Writes one line per depth, listing that level's nodes left to right.
///
/// Each node shows as `[=]key[+|-](parent[+|-])countSIDE`, where `=` marks a
/// leaf, `+`/`-` a right/left favorite and SIDE is `L`, `R` or `X` for the
/// root.
pub fn write_level_order<T: FrequencyTree>(out: &mut impl Write, tree: &T) -> io::Result<()> {
    let mut level = None;
    for entry in tree.level_order() {
        if level != Some(entry.depth) {
            if level.is_some() {
                writeln!(out)?;
            }
            level = Some(entry.depth);
            match T::KIND {
                TreeKind::Avl => write!(out, "{}:", entry.depth)?,
                TreeKind::Bst => write!(out, "{}: ", entry.depth)?,
            }
        }
        match T::KIND {
            TreeKind::Avl => {
                write!(out, " ")?;
                write_entry(out, &entry)?;
            }
            TreeKind::Bst => {
                write_entry(out, &entry)?;
                write!(out, " ")?;
            }
        }
    }
    if level.is_some() {
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_stats(out: &mut impl Write, kind: TreeKind, stats: &TreeStats) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Number of Nodes in {kind}: {}", stats.size)?;
    writeln!(out, "Distance to Closest Null Child: {}", stats.min_depth)?;
    writeln!(out, "Distance to Furthest Null Child: {}", stats.max_depth)
}

pub fn write_frequency(out: &mut impl Write, key: &str, count: u32) -> io::Result<()> {
    writeln!(out, "\"{key}\" has frequency {count}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AvlTree, BstTree};

    fn render<T: FrequencyTree>(tree: &T) -> String {
        let mut out = Vec::new();
        write_level_order(&mut out, tree).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_avl_dump() {
        let mut t = AvlTree::new();
        for k in ["b", "a", "c", "d", "a"] {
            t.insert(k.to_string());
        }
        assert_eq!(
            render(&t),
            "0: b+(b+)1X\n1: =a(b+)2L c+(b+)1R\n2: =d(c+)1R\n"
        );
    }

    #[test]
    fn test_bst_dump() {
        let mut t = BstTree::new();
        for k in ["b", "c", "a"] {
            t.insert(k.to_string());
        }
        assert_eq!(render(&t), "0: b(b)1X \n1: =a(b)1L =c(b)1R \n");
    }

    #[test]
    fn test_empty_dump() {
        assert_eq!(render(&AvlTree::new()), "");
    }

    #[test]
    fn test_stats_lines() {
        let mut out = Vec::new();
        let stats = TreeStats {
            size: 4,
            min_depth: 1,
            max_depth: 2,
        };
        write_stats(&mut out, TreeKind::Avl, &stats).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nNumber of Nodes in AVL: 4\n\
             Distance to Closest Null Child: 1\n\
             Distance to Furthest Null Child: 2\n"
        );
    }
}
