//! Build helpers for sylba: man pages and shell completions.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for sylba")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and each subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
        /// Only generate for this shell
        #[arg(long, value_enum)]
        shell: Option<Shell>,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => man(&out),
        Task::Completions { out, shell } => completions(&out, shell),
    }
}

fn man(out: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;

    let cmd = sylba::command();
    let name = cmd.get_name().to_string();
    render_man(cmd.clone(), &name, &out.join(format!("{name}.1")))?;

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let title = format!("{name}-{}", sub.get_name());
        render_man(sub.clone(), &title, &out.join(format!("{title}.1")))?;
    }
    Ok(())
}

fn render_man(cmd: clap::Command, title: &str, path: &Path) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd).title(title).render(&mut buf)?;
    fs::write(path, buf).with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn completions(out: &Path, shell: Option<Shell>) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;

    let shells = shell.map_or_else(|| Shell::value_variants().to_vec(), |s| vec![s]);
    let mut cmd = sylba::command();
    for shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, "sylba", out)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
