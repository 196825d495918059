use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use outline_model::{OutlineNode, OutlineTree};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Outline file to create
    #[arg(short, long, default_value = "outline.json")]
    pub outline_file: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing outline...".bright_blue().bold());

    let config = Config {
        outline_file: args.outline_file.clone(),
        ..Config::default()
    };

    let outline_path = config.outline_path(cwd);
    if !outline_path.exists() || args.force {
        if let Some(parent) = outline_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&outline_path, sample_outline()?.to_outline_index_json(config.pretty)?)?;
        println!("  {} Created {}", "✓".green(), args.outline_file);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Outline initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: outline check --tree");
    println!("  2. Run: outline step unit-2 --up");

    Ok(())
}

/// Three sections, the middle one closed to new children
fn sample_outline() -> Result<OutlineTree> {
    let tree = OutlineTree::new(
        "course",
        [
            OutlineNode::section("section-1").named("Getting Started").with_children([
                OutlineNode::subsection("subsection-1").named("Welcome").with_children([
                    OutlineNode::unit("unit-1").named("Course overview").draggable(false),
                    OutlineNode::unit("unit-2").named("Meet your instructors"),
                ]),
                OutlineNode::subsection("subsection-2")
                    .named("Setup")
                    .with_children([OutlineNode::unit("unit-3").named("Install the tools")]),
            ]),
            OutlineNode::section("section-2")
                .named("Archived")
                .child_addable(false)
                .with_children([OutlineNode::subsection("subsection-3")
                    .named("Old material")
                    .with_children([OutlineNode::unit("unit-4").named("Legacy lab")])]),
            OutlineNode::section("section-3").named("Core Concepts").with_children([
                OutlineNode::subsection("subsection-4").named("Fundamentals").with_children([
                    OutlineNode::unit("unit-5").named("First principles"),
                    OutlineNode::unit("unit-6").named("Worked example"),
                ]),
            ]),
        ],
    )?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_and_outline() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        init(
            InitArgs {
                outline_file: "store/outline.json".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.outline_file, "store/outline.json");

        let json = fs::read_to_string(config.outline_path(&cwd)).unwrap();
        let tree = OutlineTree::from_outline_index(&json).unwrap();
        assert_eq!(tree.counts().units, 6);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{"pretty": false}"#).unwrap();

        init(
            InitArgs {
                outline_file: "outline.json".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        assert!(!Config::load(&cwd).unwrap().pretty);
        assert!(!dir.path().join("outline.json").exists());
    }
}
