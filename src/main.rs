//! Builds an AVL tree or a plain BST from a corpus file and runs an
//! instruction file against it.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueHint};

use fav_tree::{driver, Config, TreeKind};

#[derive(Parser)]
#[command(
    name = "fav-tree",
    about = "Count words in a balanced (or plain) binary search tree and run edit/report instructions against it.",
    version
)]
#[command(group(ArgGroup::new("tree").required(true).args(["avl", "bst"])))]
struct Cli {
    /// Build a self-balancing AVL tree.
    #[arg(short = 'a')]
    avl: bool,
    /// Build a plain, unbalanced binary search tree.
    #[arg(short = 'b')]
    bst: bool,
    /// Text file whose words populate the tree.
    #[arg(value_hint = ValueHint::FilePath)]
    corpus: PathBuf,
    /// Instruction file: `i`, `d`, `f` followed by a word, or `r`, `s`.
    #[arg(value_hint = ValueHint::FilePath)]
    instructions: PathBuf,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let kind = if cli.bst { TreeKind::Bst } else { TreeKind::Avl };
        Config::new(kind, cli.corpus, cli.instructions)
    }
}

fn main() {
    let cli = Cli::parse();

    let _r = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_target(false)
        .format_timestamp(None)
        .try_init();

    let config = Config::from(cli);
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let result = driver::run(&config, &mut out);
    let flushed = out.flush();

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
    if let Err(err) = flushed {
        eprintln!("failed to write output: {err}");
        std::process::exit(5);
    }
}
