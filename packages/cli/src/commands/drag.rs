use super::{open_store, persist, print_container_of};
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use outline_editor::OutlineEditor;
use outline_model::BlockId;

#[derive(Debug, Args)]
pub struct DragArgs {
    /// Node to pick up
    pub dragged: String,

    /// Node to drop onto
    pub over: String,

    /// Drop below the middle of the target instead of above it
    #[arg(long)]
    pub below: bool,
}

pub async fn drag(args: DragArgs, cwd: &str) -> Result<()> {
    let (gateway, tree) = open_store(cwd).await?;
    let mut editor = OutlineEditor::new(tree);
    let dragged = BlockId::new(args.dragged);
    let over = BlockId::new(args.over);

    if !editor.drag_start(&dragged)? {
        bail!("{} cannot be dragged", dragged);
    }
    if editor.drag_over(&over, args.below)?.is_none() {
        editor.drag_cancel()?;
        println!("{} {} cannot be dropped on {}", "⚠️".yellow(), dragged, over);
        return Ok(());
    }

    if editor.drag_end()?.is_none() {
        println!("{} Dropped in place, nothing to save", "•".dimmed());
        return Ok(());
    }

    persist(&mut editor, &gateway).await?;
    println!();
    print_container_of(editor.tree(), &dragged);
    Ok(())
}
