//! Builds a tree from a corpus and runs an instruction file against it.
//!
//! Instruction records are a single-letter opcode, followed by a token for
//! the opcodes that take one:
//!
//! | opcode | effect                              |
//! |--------|-------------------------------------|
//! | `i w`  | insert `w`                          |
//! | `d w`  | delete one occurrence of `w`        |
//! | `f w`  | report the frequency of `w`         |
//! | `r`    | report node count and null depths   |
//! | `s`    | show the tree level by level        |

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};

use crate::avl::AvlTree;
use crate::bst::BstTree;
use crate::config::Config;
use crate::error::{DriverError, TreeError};
use crate::report;
use crate::scanner::Scanner;
use crate::tree::{FrequencyTree, TreeKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Insert(String),
    Delete(String),
    Frequency(String),
    Report,
    Show,
}

impl Instruction {
    /// Reads the next record, `None` at end of input.
    pub fn read(scanner: &mut Scanner<'_>) -> Option<Result<Self, DriverError>> {
        let opcode = scanner.next_opcode()?;
        let mut operand = || scanner.next_token().ok_or(DriverError::MissingOperand(opcode));
        let instruction = match opcode {
            'i' => operand().map(Instruction::Insert),
            'd' => operand().map(Instruction::Delete),
            'f' => operand().map(Instruction::Frequency),
            'r' => Ok(Instruction::Report),
            's' => Ok(Instruction::Show),
            other => Err(DriverError::InvalidInstruction(other)),
        };
        Some(instruction)
    }

    fn key(&self) -> Option<&str> {
        match self {
            Instruction::Insert(k) | Instruction::Delete(k) | Instruction::Frequency(k) => Some(k),
            Instruction::Report | Instruction::Show => None,
        }
    }
}

fn read(path: &Path) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs `config` to completion, writing every report to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> Result<(), DriverError> {
    let corpus = read(&config.corpus)?;
    let instructions = read(&config.instructions)?;

    match config.kind {
        TreeKind::Avl => {
            let mut tree = AvlTree::new();
            load_corpus(&mut tree, &corpus);
            execute(&mut tree, &instructions, out)
        }
        TreeKind::Bst => {
            let mut tree = BstTree::new();
            load_corpus(&mut tree, &corpus);
            execute(&mut tree, &instructions, out)
        }
    }
}

/// Inserts every non-empty key in `corpus` and returns how many were
/// inserted.
pub fn load_corpus<T: FrequencyTree>(tree: &mut T, corpus: &str) -> usize {
    let mut inserted = 0;
    for key in Scanner::new(corpus) {
        if key.is_empty() {
            continue;
        }
        tree.insert(key);
        inserted += 1;
    }
    info!(
        "loaded {inserted} tokens into {} ({} distinct)",
        T::KIND,
        tree.len()
    );
    inserted
}

fn report_error(out: &mut impl Write, err: TreeError) -> Result<(), DriverError> {
    writeln!(out, "{err}")?;
    Ok(())
}

/// Applies one instruction to `tree`.
pub fn apply<T: FrequencyTree>(
    tree: &mut T,
    instruction: Instruction,
    out: &mut impl Write,
) -> Result<(), DriverError> {
    debug!("{instruction:?}");
    if instruction.key() == Some("") {
        warn!("skipping {instruction:?}: token has no letters left after normalization");
        return Ok(());
    }

    match instruction {
        Instruction::Insert(key) => {
            tree.insert(key);
        }
        Instruction::Delete(key) => {
            if let Err(err) = tree.delete(&key) {
                report_error(out, err)?;
            }
        }
        Instruction::Frequency(key) => match tree.frequency(&key) {
            Ok(count) => report::write_frequency(out, &key, count)?,
            Err(err) => report_error(out, err)?,
        },
        Instruction::Report => match tree.stats() {
            Ok(stats) => report::write_stats(out, T::KIND, &stats)?,
            Err(err) => report_error(out, err)?,
        },
        Instruction::Show => {
            if tree.is_empty() {
                report_error(out, TreeError::EmptyTree)?;
            } else {
                report::write_level_order(out, tree)?;
            }
        }
    }
    Ok(())
}

/// Runs every record of `instructions` against `tree`, stopping at the first
/// malformed one.
pub fn execute<T: FrequencyTree>(
    tree: &mut T,
    instructions: &str,
    out: &mut impl Write,
) -> Result<(), DriverError> {
    let mut scanner = Scanner::new(instructions);
    let mut executed = 0usize;
    while let Some(instruction) = Instruction::read(&mut scanner) {
        apply(tree, instruction?, out)?;
        executed += 1;
    }
    info!("executed {executed} instructions");
    Ok(())
}
