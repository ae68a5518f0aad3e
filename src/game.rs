use log::{debug, info};
use serde::Deserialize;

use crate::board::Board;
use crate::constants::{score_for, UNLIMITED_LIVES};
use crate::error::{BoardError, MoveError};
use crate::history::MoveHistory;
use crate::resolver::{commit_move, resolve_move, revert_move};
use crate::types::{AliveMove, Direction, GameSummary, MoveOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lives {
    Unlimited,
    Finite(i32),
}

impl Lives {
    pub fn from_count(count: i32) -> Self {
        if count == UNLIMITED_LIVES {
            Self::Unlimited
        } else {
            Self::Finite(count)
        }
    }

    pub fn count(self) -> i32 {
        match self {
            Self::Unlimited => i32::MAX,
            Self::Finite(count) => count,
        }
    }

    fn adjust(&mut self, delta: i32) -> i32 {
        if let Self::Finite(count) = self {
            *count = count.saturating_add(delta);
        }
        self.count()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GameOptions {
    pub lives: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    history: MoveHistory,
    lives: Lives,
    moves: u32,
    deaths: u32,
    initial_gems: usize,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        Self::with_options(board, GameOptions::default())
    }

    pub fn with_lives(board: Board, lives: i32) -> Self {
        Self::with_options(board, GameOptions { lives: Some(lives) })
    }

    pub fn with_options(board: Board, options: GameOptions) -> Self {
        let initial_gems = board.num_gems();
        Self {
            board,
            history: MoveHistory::new(),
            lives: options.lives.map_or(Lives::Unlimited, Lives::from_count),
            moves: 0,
            deaths: 0,
            initial_gems,
        }
    }

    pub fn process_move(&mut self, dir: Direction) -> Result<MoveOutcome, MoveError> {
        let outcome = resolve_move(&self.board, dir)?;
        commit_move(&mut self.board, &outcome)?;

        match &outcome {
            MoveOutcome::Invalid { .. } => {}
            MoveOutcome::Dead { .. } => {
                self.moves += 1;
                self.deaths += 1;
                self.lives.adjust(-1);
            }
            MoveOutcome::Alive(alive) => {
                self.moves += 1;
                self.lives.adjust(extra_lives(alive));
                self.history.push(alive.clone());
            }
        }
        debug!("move {:?}: {:?}", dir, outcome);

        if self.has_won() {
            info!("all gems collected after {} moves", self.moves);
        } else if self.has_lost() {
            info!("out of lives after {} deaths", self.deaths);
        }
        Ok(outcome)
    }

    pub fn process_undo(&mut self) -> Result<bool, BoardError> {
        let Some(last) = self.history.peek() else {
            debug!("undo requested with empty history");
            return Ok(false);
        };
        revert_move(&mut self.board, last)?;

        if let Some(undone) = self.history.pop() {
            self.lives.adjust(extra_lives(&undone).saturating_neg());
            debug!("undid move {} -> {}", undone.from, undone.to);
        }
        Ok(true)
    }

    pub fn increase_lives(&mut self, delta: i32) -> i32 {
        self.lives.adjust(delta)
    }

    pub fn decrease_lives(&mut self, delta: i32) -> i32 {
        self.lives.adjust(-delta)
    }

    pub fn has_won(&self) -> bool {
        self.board.num_gems() == 0
    }

    pub fn has_lost(&self) -> bool {
        matches!(self.lives, Lives::Finite(count) if count <= 0)
    }

    pub fn has_unlimited_lives(&self) -> bool {
        self.lives == Lives::Unlimited
    }

    pub fn score(&self) -> i64 {
        score_for(
            self.board.rows(),
            self.board.cols(),
            self.initial_gems.saturating_sub(self.board.num_gems()),
            self.moves,
            self.history.undo_count(),
            self.deaths,
        )
    }

    pub fn num_lives(&self) -> i32 {
        self.lives.count()
    }

    pub fn num_moves(&self) -> u32 {
        self.moves
    }

    pub fn num_deaths(&self) -> u32 {
        self.deaths
    }

    pub fn num_undos(&self) -> u32 {
        self.history.undo_count()
    }

    pub fn num_gems(&self) -> usize {
        self.board.num_gems()
    }

    pub fn initial_gems(&self) -> usize {
        self.initial_gems
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score(),
            won: self.has_won(),
            lost: self.has_lost(),
            moves: self.moves,
            deaths: self.deaths,
            undos: self.num_undos(),
            lives: self.num_lives(),
            unlimited_lives: self.has_unlimited_lives(),
            gems_remaining: self.num_gems(),
            initial_gems: self.initial_gems,
        }
    }
}

fn extra_lives(alive: &AliveMove) -> i32 {
    i32::try_from(alive.collected_extra_lives.len()).unwrap_or(i32::MAX)
}
