//! Tree command - Generate and inspect a search tree

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cli::output,
    tree::SearchTree,
    types::constants,
};

#[derive(Parser, Debug)]
#[command(about = "Generate and print a search tree")]
pub struct TreeArgs {
    /// Levels of the search tree below the root
    #[arg(long, short = 'd', default_value_t = 4)]
    pub depth: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: TreeArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let tree = SearchTree::generate(args.depth, constants::ROOT_VALUE, &mut rng);

    print!("{}", tree.format());

    let best = tree.best_node();
    output::print_section("Tree summary");
    output::print_stats_table(&[
        ("Depth", tree.depth().to_string()),
        ("Nodes", tree.len().to_string()),
        (
            "Best node value",
            format!("{:.2}", tree.node(best).value()),
        ),
        ("Best node depth", tree.node_depth(best).to_string()),
    ]);

    Ok(())
}
