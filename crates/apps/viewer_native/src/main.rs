use std::path::PathBuf;

use clap::{Parser, Subcommand};
use session::{FileStore, KeyValueStore, StateKeys, decode_list, decode_vec3};
use tracing::info;
use tracing_subscriber::EnvFilter;
use visibility::{RecordingControls, RecordingEngine, Settings, VisibilityManager};

mod replay;

#[derive(Debug, Parser)]
#[command(name = "chartview", about = "Headless chart globe session tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Restore a session from the store, replay a script, print the result.
    Replay {
        /// JSON-lines script of page events.
        script: PathBuf,
        /// Settings JSON; defaults apply when omitted.
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Persisted state file, created if missing.
        #[arg(long, default_value = "cookies.json")]
        store: PathBuf,
    },
    /// Print the persisted state.
    State {
        #[arg(long, default_value = "cookies.json")]
        store: PathBuf,
        #[arg(long, default_value = "map")]
        prefix: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Replay {
            script,
            settings,
            store,
        } => cmd_replay(script, settings, store),
        Command::State { store, prefix } => cmd_state(store, &prefix),
    }
}

fn cmd_replay(
    script: PathBuf,
    settings: Option<PathBuf>,
    store: PathBuf,
) -> Result<(), String> {
    let settings = match settings {
        Some(path) => Settings::load(&path).map_err(|e| e.to_string())?,
        None => Settings::default(),
    };
    let raw = std::fs::read_to_string(&script).map_err(|e| format!("read {script:?}: {e}"))?;
    let steps = replay::parse_script(&raw)?;
    let store = FileStore::open(&store).map_err(|e| e.to_string())?;

    let mut manager = VisibilityManager::new(
        settings,
        RecordingEngine::new(),
        store,
        RecordingControls::default(),
    );
    manager.init();
    manager.restore_state();
    let handled = replay::replay(&mut manager, steps);
    info!(handled, "replay finished");

    let summary = replay::summarize(&manager);
    let out = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
    println!("{out}");
    let _ = manager.teardown();
    Ok(())
}

fn cmd_state(store: PathBuf, prefix: &str) -> Result<(), String> {
    let store = FileStore::open(&store).map_err(|e| e.to_string())?;
    let keys = StateKeys::with_prefix(prefix);
    let get = |key: &str| store.get(key).map_err(|e| e.to_string());

    match get(&keys.layers)? {
        Some(raw) => println!("layers:    {}", decode_list(&raw).join(" ")),
        None => println!("layers:    (default)"),
    }
    let airports = get(&keys.airports)?.unwrap_or_default();
    println!("airports:  {}", decode_list(&airports).join(" "));
    for (label, key) in [
        ("position", &keys.camera_position),
        ("direction", &keys.camera_direction),
        ("up", &keys.camera_up),
    ] {
        match get(key)? {
            Some(raw) => match decode_vec3(&raw) {
                Ok(v) => println!("{label:<10} {} {} {}", v.x, v.y, v.z),
                Err(e) => println!("{label:<10} invalid ({e})"),
            },
            None => println!("{label:<10} -"),
        }
    }
    Ok(())
}
