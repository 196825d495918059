use super::open_store;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use outline_model::BlockId;
use outline_planner::{accepts_droppable, can_move, compute_drop_move, Direction, MoveStrategy};

#[derive(Debug, Args)]
pub struct MovesArgs {
    /// Node to inspect
    pub id: String,
}

pub async fn moves(args: MovesArgs, cwd: &str) -> Result<()> {
    let (_, tree) = open_store(cwd).await?;
    let id = BlockId::new(args.id);
    let (path, node) = tree
        .get(&id)
        .ok_or_else(|| anyhow!("Node not found: {}", id))?;

    println!("{} {} at {}", node.kind, id.to_string().bright_white().bold(), path);
    if !node.is_draggable() {
        println!("  {}", "pinned: cannot be moved".yellow());
        return Ok(());
    }

    for direction in [Direction::Up, Direction::Down] {
        let enabled = can_move(&tree, &id, direction);
        let mark = if enabled { "✓".green() } else { "✗".red() };
        println!("  {} move {:?}", mark, direction);
    }

    println!();
    println!("Drop targets:");
    let mut found = 0;
    for (_, candidate) in tree.nodes() {
        if !accepts_droppable(&tree, &id, &candidate.id) {
            continue;
        }
        let Some(target) = compute_drop_move(&tree, &id, &candidate.id, false) else {
            continue;
        };
        found += 1;
        let how = match target.strategy {
            MoveStrategy::Reorder => format!("reorder to #{}", target.to_index),
            MoveStrategy::Relocate => format!(
                "into {} at #{}",
                tree.container_id(&target.to_container).map(|c| c.to_string()).unwrap_or_default(),
                target.to_index
            ),
        };
        println!("  {} {}", candidate.id.to_string().cyan(), how);
    }
    if found == 0 {
        println!("  {}", "none".dimmed());
    }

    Ok(())
}
