use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use npc_app::driver::AppDriver;
use npc_app::prefs::{load_prefs, load_prefs_from};
use npc_app::script::run_script;

#[derive(Parser)]
#[command(name = "npc_script")]
#[command(about = "Replay a spawn/undo/redo script and print the resulting roster as JSON")]
struct Cli {
    /// Script file to replay
    #[arg(short, long)]
    script: PathBuf,

    /// Prefs file to use instead of the user's config
    #[arg(short, long)]
    prefs: Option<PathBuf>,

    /// Override the undo history limit
    #[arg(short, long)]
    limit: Option<usize>,
}

fn main() -> ExitCode {
    npc_app::init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut prefs = match &cli.prefs {
        Some(path) => load_prefs_from(path)?,
        None => load_prefs()?,
    };
    if let Some(limit) = cli.limit {
        prefs.history_limit = limit;
    }

    let content = std::fs::read_to_string(&cli.script)
        .map_err(|err| format!("read {}: {err}", cli.script.display()))?;

    let mut driver = AppDriver::with_prefs(prefs);
    let steps = run_script(&mut driver, &content)?;
    tracing::info!(steps, npcs = driver.state().records().len(), "script finished");

    let snapshot = driver.snapshot();
    eprintln!(
        "steps={} npcs={} undo={} redo={}",
        steps, snapshot.npc_count, snapshot.undo_depth, snapshot.redo_depth
    );
    println!("{}", serde_json::to_string_pretty(driver.state().records())?);
    Ok(())
}
