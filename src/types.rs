use std::fmt;

use serde::Serialize;

use crate::error::BoardError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Player,
    Gem,
    ExtraLife,
    Mine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityCellKind {
    Normal,
    Stop,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityCell {
    kind: EntityCellKind,
    entity: Option<Entity>,
}

impl EntityCell {
    pub fn kind(&self) -> EntityCellKind {
        self.kind
    }

    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    pub fn is_stop(&self) -> bool {
        self.kind == EntityCellKind::Stop
    }

    pub fn set_entity(&mut self, entity: Option<Entity>) -> Result<Option<Entity>, BoardError> {
        if let Some(value) = entity {
            if self.is_stop() && value != Entity::Player {
                return Err(BoardError::StopCellRejects(value));
            }
        }
        Ok(std::mem::replace(&mut self.entity, entity))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Entity(EntityCell),
}

impl Cell {
    pub fn normal(entity: Option<Entity>) -> Self {
        Cell::Entity(EntityCell {
            kind: EntityCellKind::Normal,
            entity,
        })
    }

    pub fn empty() -> Self {
        Self::normal(None)
    }

    pub fn stop() -> Self {
        Cell::Entity(EntityCell {
            kind: EntityCellKind::Stop,
            entity: None,
        })
    }

    pub fn stop_with_player() -> Self {
        Cell::Entity(EntityCell {
            kind: EntityCellKind::Stop,
            entity: Some(Entity::Player),
        })
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Cell::Entity(cell) if cell.is_stop())
    }

    pub fn entity(&self) -> Option<Entity> {
        match self {
            Cell::Wall => None,
            Cell::Entity(cell) => cell.entity(),
        }
    }

    pub fn as_entity_cell(&self) -> Option<&EntityCell> {
        match self {
            Cell::Wall => None,
            Cell::Entity(cell) => Some(cell),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AliveMove {
    pub from: Position,
    pub to: Position,
    #[serde(rename = "collectedGems")]
    pub collected_gems: Vec<Position>,
    #[serde(rename = "collectedExtraLives")]
    pub collected_extra_lives: Vec<Position>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveOutcome {
    Invalid { at: Position },
    Alive(AliveMove),
    Dead { from: Position, at: Position },
}

impl MoveOutcome {
    pub fn is_alive(&self) -> bool {
        matches!(self, MoveOutcome::Alive(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub score: i64,
    pub won: bool,
    pub lost: bool,
    pub moves: u32,
    pub deaths: u32,
    pub undos: u32,
    pub lives: i32,
    #[serde(rename = "unlimitedLives")]
    pub unlimited_lives: bool,
    #[serde(rename = "gemsRemaining")]
    pub gems_remaining: usize,
    #[serde(rename = "initialGems")]
    pub initial_gems: usize,
}
