use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::error::{BoardError, ConstructionError};
use crate::geometry::neighbors;
use crate::types::{Cell, Entity, EntityCell, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
    player: Option<Position>,
}

impl Board {
    pub fn new(rows: usize, cols: usize, cells: Vec<Vec<Cell>>) -> Result<Self, ConstructionError> {
        if cells.len() != rows || cells.iter().any(|row| row.len() != cols) {
            let actual_cols = cells
                .iter()
                .map(Vec::len)
                .find(|len| *len != cols)
                .unwrap_or(cols);
            return Err(ConstructionError::SizeMismatch {
                expected_rows: rows,
                expected_cols: cols,
                actual_rows: cells.len(),
                actual_cols,
            });
        }

        let mut players = Vec::new();
        let mut gems = Vec::new();
        for (row, line) in cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                match cell.entity() {
                    Some(Entity::Player) => players.push(Position::new(row, col)),
                    Some(Entity::Gem) => gems.push(Position::new(row, col)),
                    _ => {}
                }
            }
        }

        let &[player] = players.as_slice() else {
            return Err(ConstructionError::PlayerCount(players.len()));
        };
        if gems.is_empty() {
            return Err(ConstructionError::NoGems);
        }

        let reachable = build_reachable_cells(&cells, rows, cols, player);
        let unreachable = gems.iter().filter(|gem| !reachable.contains(*gem)).count();
        if unreachable > 0 {
            return Err(ConstructionError::UnreachableGems {
                unreachable,
                total: gems.len(),
            });
        }

        debug!(
            "board {}x{} built: player at {}, {} gems, {} reachable cells",
            rows,
            cols,
            player,
            gems.len(),
            reachable.len()
        );
        Ok(Self {
            rows,
            cols,
            cells,
            player: Some(player),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, position: Position) -> Result<&Cell, BoardError> {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .ok_or(BoardError::OutOfBounds(position))
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell, BoardError> {
        self.cell(Position::new(row, col))
    }

    pub fn row(&self, row: usize) -> Result<&[Cell], BoardError> {
        self.cells
            .get(row)
            .map(Vec::as_slice)
            .ok_or(BoardError::OutOfBounds(Position::new(row, 0)))
    }

    pub fn col(&self, col: usize) -> Result<Vec<&Cell>, BoardError> {
        if col >= self.cols {
            return Err(BoardError::OutOfBounds(Position::new(0, col)));
        }
        Ok(self.cells.iter().map(|row| &row[col]).collect())
    }

    pub fn entity_cell(&self, position: Position) -> Result<&EntityCell, BoardError> {
        self.cell(position)?
            .as_entity_cell()
            .ok_or(BoardError::NotEntityCell(position))
    }

    pub fn player_position(&self) -> Option<Position> {
        self.player
    }

    pub fn num_gems(&self) -> usize {
        self.count_entities(Entity::Gem)
    }

    pub fn count_entities(&self, entity: Entity) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.entity() == Some(entity))
            .count()
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        matches!(self.cell(position), Ok(cell) if !cell.is_wall())
    }

    pub fn reachable_from(&self, start: Position) -> HashSet<Position> {
        if !self.is_walkable(start) {
            return HashSet::new();
        }
        build_reachable_cells(&self.cells, self.rows, self.cols, start)
    }

    // Overwriting the player's cell leaves the player unplaced.
    pub fn set_entity(
        &mut self,
        position: Position,
        entity: Option<Entity>,
    ) -> Result<Option<Entity>, BoardError> {
        let previous = self.entity_cell_mut(position)?.set_entity(entity)?;

        if entity == Some(Entity::Player) {
            if let Some(old) = self.player.filter(|old| *old != position) {
                self.entity_cell_mut(old)?.set_entity(None)?;
            }
            self.player = Some(position);
        } else if previous == Some(Entity::Player) {
            self.player = None;
        }
        Ok(previous)
    }

    fn entity_cell_mut(&mut self, position: Position) -> Result<&mut EntityCell, BoardError> {
        match self
            .cells
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.col))
        {
            None => Err(BoardError::OutOfBounds(position)),
            Some(Cell::Wall) => Err(BoardError::NotEntityCell(position)),
            Some(Cell::Entity(cell)) => Ok(cell),
        }
    }
}

fn build_reachable_cells(
    cells: &[Vec<Cell>],
    rows: usize,
    cols: usize,
    start: Position,
) -> HashSet<Position> {
    let mut out = HashSet::new();
    let mut queue = VecDeque::new();
    out.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in neighbors(current, rows, cols) {
            if cells[next.row][next.col].is_wall() {
                continue;
            }
            if out.insert(next) {
                queue.push_back(next);
            }
        }
    }

    out
}
