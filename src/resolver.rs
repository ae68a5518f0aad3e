use log::trace;

use crate::board::Board;
use crate::error::{BoardError, MoveError};
use crate::geometry::offset;
use crate::types::{AliveMove, Cell, Direction, Entity, MoveOutcome};

pub fn resolve_move(board: &Board, dir: Direction) -> Result<MoveOutcome, MoveError> {
    let from = board.player_position().ok_or(MoveError::PlayerNotPlaced)?;
    let (rows, cols) = (board.rows(), board.cols());

    let first = offset(from, dir, rows, cols).filter(|pos| board.is_walkable(*pos));
    let Some(mut next) = first else {
        trace!("{:?} from {} blocked immediately", dir, from);
        return Ok(MoveOutcome::Invalid { at: from });
    };

    let mut last = from;
    let mut collected_gems = Vec::new();
    let mut collected_extra_lives = Vec::new();

    let to = loop {
        let cell = board.cell(next)?;
        if cell.entity() == Some(Entity::Mine) {
            return Ok(MoveOutcome::Dead { from, at: next });
        }
        match cell {
            Cell::Wall => break last,
            Cell::Entity(entity_cell) if entity_cell.is_stop() => break next,
            Cell::Entity(entity_cell) => match entity_cell.entity() {
                Some(Entity::Gem) => collected_gems.push(next),
                Some(Entity::ExtraLife) => collected_extra_lives.push(next),
                _ => {}
            },
        }

        last = next;
        match offset(next, dir, rows, cols) {
            Some(pos) => next = pos,
            None => break last,
        }
    };

    Ok(MoveOutcome::Alive(AliveMove {
        from,
        to,
        collected_gems,
        collected_extra_lives,
    }))
}

// Every position is checked before the first write.
pub fn commit_move(board: &mut Board, outcome: &MoveOutcome) -> Result<(), BoardError> {
    let alive = match outcome {
        MoveOutcome::Invalid { .. } | MoveOutcome::Dead { .. } => return Ok(()),
        MoveOutcome::Alive(alive) => alive,
    };
    check_positions(board, alive)?;

    for pos in alive.collected_gems.iter().chain(&alive.collected_extra_lives) {
        board.set_entity(*pos, None)?;
    }
    board.set_entity(alive.from, None)?;
    board.set_entity(alive.to, Some(Entity::Player))?;
    Ok(())
}

pub fn revert_move(board: &mut Board, alive: &AliveMove) -> Result<(), BoardError> {
    check_positions(board, alive)?;

    board.set_entity(alive.to, None)?;
    board.set_entity(alive.from, Some(Entity::Player))?;
    for pos in &alive.collected_gems {
        board.set_entity(*pos, Some(Entity::Gem))?;
    }
    for pos in &alive.collected_extra_lives {
        board.set_entity(*pos, Some(Entity::ExtraLife))?;
    }
    Ok(())
}

fn check_positions(board: &Board, alive: &AliveMove) -> Result<(), BoardError> {
    for pos in [alive.from, alive.to] {
        board.entity_cell(pos)?;
    }
    for (positions, entity) in [
        (&alive.collected_gems, Entity::Gem),
        (&alive.collected_extra_lives, Entity::ExtraLife),
    ] {
        for pos in positions {
            if board.entity_cell(*pos)?.is_stop() {
                return Err(BoardError::StopCellRejects(entity));
            }
        }
    }
    Ok(())
}
