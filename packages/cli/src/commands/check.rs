use super::{node_label, open_store};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Print the full outline
    #[arg(long)]
    pub tree: bool,
}

pub async fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let (gateway, tree) = open_store(cwd).await?;
    let counts = tree.counts();

    println!(
        "{} {} is valid",
        "✓".green(),
        gateway.path().display().to_string().bright_white()
    );
    println!(
        "  {} sections, {} subsections, {} units",
        counts.sections, counts.subsections, counts.units
    );

    if args.tree {
        println!();
        println!("{}", tree.id.to_string().bright_white().bold());
        for (path, node) in tree.nodes() {
            println!("{}{}", "  ".repeat(path.depth()), node_label(node));
        }
    }

    Ok(())
}
