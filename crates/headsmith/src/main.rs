//! Headsmith command line.
//!
//! Usage:
//!   # Replay an edit script, print the resulting timeline
//!   headsmith replay session.hs --export out.png
//!
//!   # Write the 32x32 head preview of a skin
//!   headsmith preview skin.png --out head.png
//!
//!   # Print a /give command for a player head wearing a skin
//!   headsmith give skin.png

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use headsmith::{EditorConfig, EditorSession, NoLookup, SkinDirectory, SkinLookup, render_timeline, script};
use headsmith_history::TimelineRow;
use headsmith_texture::SkinCanvas;
use tracing_subscriber::{EnvFilter, fmt};

/// Player-head skin editor with branching history.
#[derive(Parser, Debug)]
#[command(name = "headsmith")]
#[command(about = "Player-head skin editor with branching history")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an edit script and print the final timeline
    Replay {
        /// Script file
        script: PathBuf,

        /// Editor config (default: ~/.config/headsmith/editor.ron)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the final skin here
        #[arg(long)]
        export: Option<PathBuf>,

        /// Directory of <username>.png skins for `import <username>`
        #[arg(long)]
        skins: Option<PathBuf>,

        /// Print the timeline as JSON rows instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Write the head preview of a skin
    Preview {
        /// 64x64 skin PNG
        skin: PathBuf,

        /// Output PNG
        #[arg(long)]
        out: PathBuf,
    },

    /// Print a /give command for a player head wearing a skin
    Give {
        /// 64x64 skin PNG
        skin: PathBuf,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Command::Replay { script, config, export, skins, json } => {
            replay(script, config, export, skins, json)
        }
        Command::Preview { skin, out } => preview(skin, out),
        Command::Give { skin } => give(skin),
    };

    result.inspect_err(|e| tracing::error!("{e:#}"))
}

fn replay(
    script_path: PathBuf,
    config: Option<PathBuf>,
    export: Option<PathBuf>,
    skins: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = EditorConfig::load(config.as_deref()).context("loading editor config")?;
    let steps = script::load(&script_path)?;

    let lookup: Box<dyn SkinLookup> = match skins {
        Some(dir) => Box::new(SkinDirectory::new(dir)),
        None => Box::new(NoLookup),
    };

    let mut session = EditorSession::new(&config)?;
    tracing::info!(script = %script_path.display(), steps = steps.len(), "replaying");

    for text in script::run(&mut session, &steps, lookup.as_ref())? {
        print!("{text}");
        println!();
    }

    if json {
        let rows: Vec<TimelineRow> = session.history().timeline().collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_timeline(session.history()));
    }

    if let Some(path) = export {
        session.export_png(&path)?;
    }
    Ok(())
}

fn preview(skin: PathBuf, out: PathBuf) -> Result<()> {
    let canvas = SkinCanvas::load(&skin).with_context(|| format!("loading {}", skin.display()))?;
    canvas
        .save_head_preview(&out)
        .with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(out = %out.display(), "wrote head preview");
    Ok(())
}

fn give(skin: PathBuf) -> Result<()> {
    let canvas = SkinCanvas::load(&skin).with_context(|| format!("loading {}", skin.display()))?;
    println!("{}", headsmith::give_command(&canvas.to_data_uri()?));
    Ok(())
}
