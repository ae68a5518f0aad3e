use crate::types::{Direction, Position};

pub fn offset(position: Position, dir: Direction, rows: usize, cols: usize) -> Option<Position> {
    let (d_row, d_col) = dir.offset();
    let row = position.row.checked_add_signed(d_row)?;
    let col = position.col.checked_add_signed(d_col)?;
    if row >= rows || col >= cols {
        return None;
    }
    Some(Position::new(row, col))
}

pub fn neighbors(position: Position, rows: usize, cols: usize) -> impl Iterator<Item = Position> {
    Direction::ALL
        .into_iter()
        .filter_map(move |dir| offset(position, dir, rows, cols))
}
