use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use reflex_duel::config::{POINTS_PER_HIT, RACE_WINDOW_MS, SETTLE_MS, SWEEP_STEP_MS, WIN_THRESHOLD};
use reflex_duel::cores::raster;
use reflex_duel::host::bot::{BotHost, BotProfile};
use reflex_duel::host::{LoggedPanel, PanelView, QuitFlag};
use reflex_duel::{DisplayOutput, GameConfig, IndicatorOutput, InputSource, ReactionGame, SystemClock};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HostKind {
    /// Both players simulated; plays itself.
    Demo,
    /// Keyboard in this terminal (needs the `terminal` feature).
    Terminal,
}

#[derive(Parser, Debug)]
#[command(version, about = "Two-player reaction duel", long_about = None)]
struct Args {
    #[arg(long, value_enum, default_value_t = HostKind::Demo)]
    host: HostKind,

    #[arg(long, env = "REFLEX_DUEL_RACE_WINDOW_MS", default_value_t = RACE_WINDOW_MS, help = "Time player two has to answer")]
    race_window_ms: u64,

    #[arg(long, env = "REFLEX_DUEL_WIN_THRESHOLD", default_value_t = WIN_THRESHOLD, help = "A score above this ends the match")]
    win_threshold: u32,

    #[arg(long, env = "REFLEX_DUEL_POINTS_PER_HIT", default_value_t = POINTS_PER_HIT)]
    points_per_hit: u32,

    #[arg(long, env = "REFLEX_DUEL_SETTLE_MS", default_value_t = SETTLE_MS, help = "Pause on the final score")]
    settle_ms: u64,

    #[arg(long, env = "REFLEX_DUEL_SWEEP_STEP_MS", default_value_t = SWEEP_STEP_MS, help = "LED walk step at match start/end")]
    sweep_step_ms: u64,

    #[arg(long, default_value_t = 0, help = "Stop after this many matches (0 = run forever)")]
    matches: u64,

    #[arg(long, env = "REFLEX_DUEL_SEED", help = "Seed for the demo players")]
    seed: Option<u64>,

    #[arg(long, help = "Write a PNG of the panel after every match (needs `screenshot`)")]
    snapshot: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            race_window_ms: self.race_window_ms,
            win_threshold: self.win_threshold,
            points_per_hit: self.points_per_hit,
            settle_ms: self.settle_ms,
            sweep_step_ms: self.sweep_step_ms,
            ..GameConfig::default()
        }
    }
}

/// Exit status after a Ctrl-C quit, as a shell reports SIGINT.
const INTERRUPTED: u8 = 130;

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.snapshot.is_some() && !cfg!(feature = "screenshot") {
        bail!("--snapshot needs a build with the `screenshot` feature");
    }
    let config = args.config();

    match args.host {
        HostKind::Demo => {
            let rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let input = BotHost::new(SystemClock::new(), rng, BotProfile::default());
            let game = ReactionGame::new(input, LoggedPanel::new(), SystemClock::new(), config)
                .context("failed to set up the game")?;
            run(game, args.matches, args.snapshot.as_deref(), &QuitFlag::new())
        }
        HostKind::Terminal => run_terminal(config, args.matches, args.snapshot.as_deref()),
    }
}

#[cfg(feature = "terminal")]
fn run_terminal(
    config: GameConfig,
    matches: u64,
    snapshot: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    use reflex_duel::host::terminal::{TerminalInput, TerminalPanel};

    let input = TerminalInput::new().context("failed to enable raw terminal mode")?;
    let quit = input.quit_flag();
    let game = ReactionGame::new(input, TerminalPanel::new(), SystemClock::new(), config)
        .context("failed to set up the game")?;
    // The game (and raw mode with it) is dropped before this returns.
    let status = run(game, matches, snapshot, &quit)?;
    println!();
    Ok(status)
}

#[cfg(not(feature = "terminal"))]
fn run_terminal(
    _config: GameConfig,
    _matches: u64,
    _snapshot: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    bail!("this build has no terminal host; rebuild with `--features terminal`")
}

/// Play matches back to back. With `matches == 0` this only returns once
/// `quit` is raised, which is checked between steps.
fn run<I, O>(
    mut game: ReactionGame<I, O, SystemClock>,
    matches: u64,
    snapshot: Option<&Path>,
    quit: &QuitFlag,
) -> anyhow::Result<ExitCode>
where
    I: InputSource,
    O: DisplayOutput + IndicatorOutput + PanelView,
{
    let mut played = 0u64;
    loop {
        let Some(report) = game.run_match_until(|| quit.is_requested()) else {
            info!("quit requested after {played} matches");
            return Ok(ExitCode::from(INTERRUPTED));
        };
        played += 1;
        info!(
            "match {played}: {:?} ahead, {} / {} after {} races",
            report.winner, report.player_one_score, report.player_two_score, report.races
        );

        if let Some(path) = snapshot {
            save_snapshot(&raster::render(game.output().panel()), path)?;
        }
        if matches != 0 && played >= matches {
            return Ok(ExitCode::SUCCESS);
        }
    }
}

#[cfg(feature = "screenshot")]
fn save_snapshot(snap: &raster::Snapshot, path: &Path) -> anyhow::Result<()> {
    snap.save_png(path)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))
}

#[cfg(not(feature = "screenshot"))]
fn save_snapshot(_snap: &raster::Snapshot, _path: &Path) -> anyhow::Result<()> {
    Ok(())
}
