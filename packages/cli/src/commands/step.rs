use super::{open_store, persist, print_container_of};
use anyhow::Result;
use clap::{ArgGroup, Args};
use colored::Colorize;
use outline_editor::OutlineEditor;
use outline_model::BlockId;
use outline_planner::Direction;

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("direction").required(true).args(["up", "down"])))]
pub struct StepArgs {
    /// Node to move
    pub id: String,

    /// Move one position up
    #[arg(long)]
    pub up: bool,

    /// Move one position down
    #[arg(long)]
    pub down: bool,
}

impl StepArgs {
    fn direction(&self) -> Direction {
        if self.up {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

pub async fn step(args: StepArgs, cwd: &str) -> Result<()> {
    let (gateway, tree) = open_store(cwd).await?;
    let mut editor = OutlineEditor::new(tree);
    let direction = args.direction();
    let id = BlockId::new(args.id);

    if editor.step_move(&id, direction)?.is_none() {
        println!("{} {} cannot move {:?}", "⚠️".yellow(), id, direction);
        return Ok(());
    }

    persist(&mut editor, &gateway).await?;
    println!();
    print_container_of(editor.tree(), &id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, InitArgs};
    use crate::gateway::FileGateway;
    use outline_model::TreePath;

    fn children(tree: &outline_model::OutlineTree, path: &[usize]) -> Vec<String> {
        tree.ordered_child_ids(&TreePath::from_indices(path.to_vec()))
            .unwrap()
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    fn step_args(id: &str, up: bool) -> StepArgs {
        StepArgs {
            id: id.to_string(),
            up,
            down: !up,
        }
    }

    #[tokio::test]
    async fn test_step_persists_to_outline_file() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        init(
            InitArgs {
                outline_file: "outline.json".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        step(step_args("unit-3", true), &cwd).await.unwrap();
        step(step_args("unit-5", true), &cwd).await.unwrap();

        let stored = FileGateway::new(dir.path().join("outline.json"), true)
            .load()
            .await
            .unwrap();
        assert_eq!(children(&stored, &[0, 0]), vec!["unit-1", "unit-2", "unit-3"]);
        assert_eq!(children(&stored, &[0, 1]), vec!["unit-5"]);
        assert_eq!(children(&stored, &[2, 0]), vec!["unit-6"]);
    }

    #[tokio::test]
    async fn test_blocked_step_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        init(
            InitArgs {
                outline_file: "outline.json".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();
        let before = std::fs::read_to_string(dir.path().join("outline.json")).unwrap();

        step(step_args("unit-1", false), &cwd).await.unwrap();
        step(step_args("section-1", true), &cwd).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("outline.json")).unwrap(),
            before
        );
    }
}
