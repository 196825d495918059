pub mod check;
pub mod drag;
pub mod init;
pub mod moves;
pub mod step;

pub use check::{check, CheckArgs};
pub use drag::{drag, DragArgs};
pub use init::{init, InitArgs};
pub use moves::{moves, MovesArgs};
pub use step::{step, StepArgs};

use crate::config::Config;
use crate::gateway::FileGateway;
use anyhow::{anyhow, bail, Result};
use colored::Colorize;
use outline_editor::{OutlineEditor, WriteResolution};
use outline_model::{BlockId, OutlineNode, OutlineTree};

/// Open the outline file named by the config in `cwd`
pub(crate) async fn open_store(cwd: &str) -> Result<(FileGateway, OutlineTree)> {
    let config = Config::load(cwd)?;
    let path = config.outline_path(cwd);
    if !path.exists() {
        return Err(anyhow!(
            "Outline file does not exist: {} (run `outline init`)",
            path.display()
        ));
    }

    let gateway = FileGateway::new(path, config.pretty);
    let tree = gateway.load().await?;
    Ok((gateway, tree))
}

/// Send every ready write to the file and pull back the touched sections
pub(crate) async fn persist(editor: &mut OutlineEditor, gateway: &FileGateway) -> Result<()> {
    for (id, resolution) in editor.flush(gateway).await? {
        match resolution {
            WriteResolution::Confirmed { refresh_sections } => {
                let sections = gateway.fetch_sections(&refresh_sections).await?;
                editor.replace_sections(sections)?;
                println!("  {} Saved {} to {}", "✓".green(), id, gateway.path().display());
            }
            WriteResolution::RolledBack { discarded } => {
                bail!(
                    "{} was rejected by the store; {} later write(s) dropped, outline unchanged",
                    id,
                    discarded.len()
                );
            }
            WriteResolution::Ignored => {}
        }
    }
    Ok(())
}

/// Print the container holding `id`, marking `id`
pub(crate) fn print_container_of(tree: &OutlineTree, id: &BlockId) {
    let Some(container) = tree.find(id).and_then(|path| path.parent()) else {
        return;
    };
    let name = tree
        .container_id(&container)
        .map(|c| c.to_string())
        .unwrap_or_default();
    println!("{}", name.bright_white().bold());
    for child in tree.children(&container).unwrap_or_default() {
        if &child.id == id {
            println!("  {} {}", "→".cyan(), child.id.to_string().cyan().bold());
        } else {
            println!("    {}", child.id);
        }
    }
}

pub(crate) fn node_label(node: &OutlineNode) -> String {
    let mut label = node.id.to_string();
    if !node.display_name.is_empty() {
        label.push_str(&format!(" \"{}\"", node.display_name));
    }
    if !node.is_draggable() {
        label.push_str(&format!(" {}", "[pinned]".yellow()));
    }
    if node.kind.is_container() && !node.is_child_addable() {
        label.push_str(&format!(" {}", "[closed]".yellow()));
    }
    label
}
