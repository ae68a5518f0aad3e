use thiserror::Error;

use crate::types::{Entity, Position};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error(
        "board size mismatch: declared {expected_rows}x{expected_cols}, grid is {actual_rows}x{actual_cols}"
    )]
    SizeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },
    #[error("expected exactly one player, found {0}")]
    PlayerCount(usize),
    #[error("board has no gems")]
    NoGems,
    #[error("{unreachable} of {total} gems cannot be reached from the player")]
    UnreachableGems { unreachable: usize, total: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("cell at {0} is not an entity cell")]
    NotEntityCell(Position),
    #[error("stop cells only accept the player, got {0:?}")]
    StopCellRejects(Entity),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("player is not placed on the board")]
    PlayerNotPlaced,
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("unknown glyph {glyph:?} at row {row}, col {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}
