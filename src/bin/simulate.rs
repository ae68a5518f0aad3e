use chrono::{SecondsFormat, Utc};
use clap::Parser;
use inertia_puzzle::board::Board;
use inertia_puzzle::constants::{DEFAULT_LEVEL, DEFAULT_MAX_MOVES, DEFAULT_UNDO_CHANCE};
use inertia_puzzle::error::{MoveError, TileError};
use inertia_puzzle::game::{GameOptions, GameState};
use inertia_puzzle::tiles::{board_from_text, board_from_tiles, render_board};
use inertia_puzzle::types::{Direction, GameSummary, MoveOutcome};
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    board: Option<PathBuf>,
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Starting lives. Omitted or -1 means unlimited; any other count below 1 starts an already-lost game."
    )]
    lives: Option<i32>,
    #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
    max_moves: u32,
    #[arg(long, default_value_t = DEFAULT_UNDO_CHANCE)]
    undo_chance: f64,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    steps: bool,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("failed to read level: {0}")]
    Io(#[from] io::Error),
    #[error("invalid level: {0}")]
    Tiles(#[from] TileError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Move(Direction),
    Undo,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct StepLine {
    step: u32,
    action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<MoveOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    undone: Option<bool>,
    score: i64,
    lives: i32,
}

#[derive(Clone, Debug, PartialEq)]
struct SessionRun {
    summary: GameSummary,
    steps: Vec<StepLine>,
    invalid_moves: u32,
    final_board: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    seed: u64,
    #[serde(rename = "finishedAt")]
    finished_at: String,
    #[serde(rename = "stepCount")]
    step_count: usize,
    #[serde(rename = "invalidMoves")]
    invalid_moves: u32,
    #[serde(flatten)]
    game: GameSummary,
    #[serde(rename = "finalBoard")]
    final_board: Vec<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let board = match load_board(cli.board.as_deref()) {
        Ok(board) => board,
        Err(error) => {
            error!("{error}");
            std::process::exit(2);
        }
    };
    let seed = cli.seed.unwrap_or_else(rand::random::<u64>);
    info!(
        "simulating {}x{} board, seed {}, up to {} steps",
        board.rows(),
        board.cols(),
        seed,
        cli.max_moves
    );

    let options = GameOptions { lives: cli.lives };
    let run = match run_session(board, options, seed, cli.max_moves, cli.undo_chance) {
        Ok(run) => run,
        Err(error) => {
            error!("session aborted: {error}");
            std::process::exit(2);
        }
    };

    if cli.steps {
        for step in &run.steps {
            match serde_json::to_string(step) {
                Ok(line) => println!("{line}"),
                Err(error) => error!("failed to serialize step {}: {error}", step.step),
            }
        }
    }

    let finished_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let summary = build_run_summary(seed, run, finished_at);
    info!(
        "finished: score {}, won {}, lost {}",
        summary.game.score, summary.game.won, summary.game.lost
    );
    match serde_json::to_string(&summary) {
        Ok(line) => println!("{line}"),
        Err(error) => error!("failed to serialize summary: {error}"),
    }

    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            error!("failed to write summary to {}: {error}", path.display());
            std::process::exit(2);
        }
    }
}

fn load_board(path: Option<&Path>) -> Result<Board, LoadError> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(board_from_text(&text)?)
        }
        None => Ok(board_from_tiles(&DEFAULT_LEVEL)?),
    }
}

fn pick_action(rng: &mut impl Rng, undo_chance: f64, can_undo: bool) -> Action {
    if can_undo && rng.random_bool(undo_chance.clamp(0.0, 1.0)) {
        return Action::Undo;
    }
    Action::Move(Direction::ALL[rng.random_range(0..Direction::ALL.len())])
}

fn run_session(
    board: Board,
    options: GameOptions,
    seed: u64,
    max_moves: u32,
    undo_chance: f64,
) -> Result<SessionRun, MoveError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameState::with_options(board, options);
    let mut steps = Vec::new();
    let mut invalid_moves = 0;

    for step in 0..max_moves {
        if game.has_won() || game.has_lost() {
            break;
        }
        let action = pick_action(&mut rng, undo_chance, !game.history().is_empty());
        let (label, outcome, undone) = match action {
            Action::Undo => ("undo".to_string(), None, Some(game.process_undo()?)),
            Action::Move(dir) => {
                let outcome = game.process_move(dir)?;
                if matches!(outcome, MoveOutcome::Invalid { .. }) {
                    invalid_moves += 1;
                }
                (format!("{dir:?}").to_lowercase(), Some(outcome), None)
            }
        };
        steps.push(StepLine {
            step,
            action: label,
            outcome,
            undone,
            score: game.score(),
            lives: game.num_lives(),
        });
    }

    Ok(SessionRun {
        summary: game.summary(),
        steps,
        invalid_moves,
        final_board: render_board(game.board()),
    })
}

fn build_run_summary(seed: u64, run: SessionRun, finished_at: String) -> RunSummary {
    RunSummary {
        seed,
        finished_at,
        step_count: run.steps.len(),
        invalid_moves: run.invalid_moves,
        game: run.summary,
        final_board: run.final_board,
    }
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, summary_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tiny_board() -> Board {
        board_from_tiles(&["@*W"]).expect("tiny board should build")
    }

    #[test]
    fn default_level_is_a_valid_board() {
        let board = load_board(None).expect("built-in level should load");
        assert_eq!(board.rows(), DEFAULT_LEVEL.len());
        assert_eq!(board.num_gems(), 4);
    }

    #[test]
    fn same_seed_produces_same_session() {
        let level = load_board(None).expect("built-in level should load");
        let first = run_session(level.clone(), GameOptions::default(), 7, 80, 0.2)
            .expect("session runs");
        let second =
            run_session(level, GameOptions::default(), 7, 80, 0.2).expect("session runs");
        assert_eq!(first, second);
    }

    #[test]
    fn session_stops_once_won() {
        let run = run_session(tiny_board(), GameOptions::default(), 3, 50, 0.0)
            .expect("session runs");
        assert!(run.summary.won);
        assert!(run.steps.len() < 50);
        assert_eq!(
            run.steps
                .last()
                .and_then(|step| step.outcome.as_ref())
                .map(MoveOutcome::is_alive),
            Some(true)
        );
        assert_eq!(run.final_board, vec![".@W"]);
    }

    #[test]
    fn session_stops_once_lives_run_out() {
        let board = board_from_tiles(&["@X*"]).expect("board should build");
        let run = run_session(board, GameOptions { lives: Some(1) }, 11, 50, 0.0)
            .expect("session runs");
        assert!(run.summary.lost);
        assert_eq!(run.summary.deaths, 1);
    }

    #[test]
    fn negative_lives_below_unlimited_end_session_before_first_step() {
        let cli = Cli::try_parse_from(["simulate", "--lives", "-3"]).expect("negative lives parse");
        assert_eq!(cli.lives, Some(-3));

        let run = run_session(tiny_board(), GameOptions { lives: cli.lives }, 5, 50, 0.0)
            .expect("session runs");
        assert!(run.steps.is_empty());
        assert!(run.summary.lost);
        assert!(!run.summary.unlimited_lives);
        assert_eq!(run.summary.lives, -3);
    }

    #[test]
    fn never_undoes_without_history() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_ne!(pick_action(&mut rng, 1.0, false), Action::Undo);
        }
        assert_eq!(pick_action(&mut rng, 1.0, true), Action::Undo);
    }

    #[test]
    fn run_summary_flattens_game_summary() {
        let run = run_session(tiny_board(), GameOptions::default(), 3, 50, 0.0)
            .expect("session runs");
        let summary = build_run_summary(3, run, "2026-01-01T00:00:00.000Z".to_string());
        let value = serde_json::to_value(&summary).expect("summary should serialize");
        assert_eq!(value["seed"], 3);
        assert_eq!(value["won"], true);
        assert_eq!(value["finalBoard"][0], ".@W");
    }

    #[test]
    fn write_summary_returns_error_when_parent_does_not_exist() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let target = std::env::temp_dir()
            .join(format!("inertia-puzzle-missing-{now}"))
            .join("summary.json");
        let run = run_session(tiny_board(), GameOptions::default(), 3, 50, 0.0)
            .expect("session runs");
        let summary = build_run_summary(3, run, "2026-01-01T00:00:00.000Z".to_string());
        assert!(write_summary(&target, &summary).is_err());
    }

    #[test]
    fn missing_level_file_is_an_io_error() {
        let err = load_board(Some(Path::new("/nonexistent/inertia/level.txt")))
            .expect_err("file does not exist");
        assert!(matches!(err, LoadError::Io(_)));
    }
}
