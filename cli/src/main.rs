use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use gemswap_core as game;

mod command;
mod render;
mod settings;

use command::Command;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file overriding the game rules
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print snapshots as JSON instead of a text grid
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(args.verbose.tracing_level_filter())
        .init();

    let config = match &args.config {
        Some(path) => settings::load(path)?,
        None => game::GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {}, config: {:?}", seed, config);

    let mut engine = game::MatchEngine::new(config, seed);
    let mut out = io::stdout().lock();
    let view = render::View::new(args.json);

    view.snapshot(&mut out, &engine.snapshot())?;
    render::prompt(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read from stdin")?;
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => run(&mut engine, command, &view, &mut out)?,
            Err(err) => writeln!(out, "{err}")?,
        }
        render::prompt(&mut out)?;
    }

    Ok(())
}

fn run<W: Write>(
    engine: &mut game::MatchEngine,
    cmd: Command,
    view: &render::View,
    out: &mut W,
) -> anyhow::Result<()> {
    match cmd {
        Command::Tap(coords) => match engine.tap(coords) {
            Ok(game::TapOutcome::Swapped) => {
                view.events(out, engine.drain_events())?;
                // every pass is a frame
                while let game::StepOutcome::Pass { .. } = engine.step() {
                    view.events(out, engine.drain_events())?;
                    view.snapshot(out, &engine.snapshot())?;
                }
                view.events(out, engine.drain_events())?;
                view.snapshot(out, &engine.snapshot())?;
            }
            Ok(outcome) => {
                view.events(out, engine.drain_events())?;
                if outcome.has_update() {
                    view.snapshot(out, &engine.snapshot())?;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        },
        Command::Hint => match engine.request_hint() {
            Ok(_) => view.events(out, engine.drain_events())?,
            Err(err) => writeln!(out, "{err}")?,
        },
        Command::NewGame => {
            engine.start_new_game();
            view.events(out, engine.drain_events())?;
            view.snapshot(out, &engine.snapshot())?;
        }
        Command::EndGame => match engine.end_game() {
            Ok(_) => view.events(out, engine.drain_events())?,
            Err(err) => writeln!(out, "{err}")?,
        },
        Command::Show => view.snapshot(out, &engine.snapshot())?,
        Command::Help => writeln!(out, "{}", command::HELP)?,
        Command::Quit => {}
    }
    Ok(())
}

fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
