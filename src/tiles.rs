use crate::board::Board;
use crate::constants::{
    GLYPH_EMPTY, GLYPH_EXTRA_LIFE, GLYPH_GEM, GLYPH_MINE, GLYPH_PLAYER, GLYPH_PLAYER_ON_STOP,
    GLYPH_STOP, GLYPH_WALL,
};
use crate::error::TileError;
use crate::types::{Cell, Entity, EntityCellKind};

impl Cell {
    pub fn glyph(&self) -> char {
        match self {
            Cell::Wall => GLYPH_WALL,
            Cell::Entity(cell) => match (cell.kind(), cell.entity()) {
                (EntityCellKind::Stop, Some(Entity::Player)) => GLYPH_PLAYER_ON_STOP,
                (EntityCellKind::Stop, _) => GLYPH_STOP,
                (EntityCellKind::Normal, None) => GLYPH_EMPTY,
                (EntityCellKind::Normal, Some(Entity::Player)) => GLYPH_PLAYER,
                (EntityCellKind::Normal, Some(Entity::Gem)) => GLYPH_GEM,
                (EntityCellKind::Normal, Some(Entity::ExtraLife)) => GLYPH_EXTRA_LIFE,
                (EntityCellKind::Normal, Some(Entity::Mine)) => GLYPH_MINE,
            },
        }
    }
}

fn cell_from_glyph(glyph: char) -> Option<Cell> {
    let cell = match glyph {
        GLYPH_WALL => Cell::Wall,
        GLYPH_EMPTY => Cell::empty(),
        GLYPH_STOP => Cell::stop(),
        GLYPH_PLAYER_ON_STOP => Cell::stop_with_player(),
        GLYPH_PLAYER => Cell::normal(Some(Entity::Player)),
        GLYPH_GEM => Cell::normal(Some(Entity::Gem)),
        GLYPH_EXTRA_LIFE => Cell::normal(Some(Entity::ExtraLife)),
        GLYPH_MINE => Cell::normal(Some(Entity::Mine)),
        _ => return None,
    };
    Some(cell)
}

pub fn parse_tiles<S: AsRef<str>>(rows: &[S]) -> Result<Vec<Vec<Cell>>, TileError> {
    rows.iter()
        .enumerate()
        .map(|(row, line)| {
            line.as_ref()
                .chars()
                .enumerate()
                .map(|(col, glyph)| {
                    cell_from_glyph(glyph).ok_or(TileError::UnknownGlyph { row, col, glyph })
                })
                .collect::<Result<Vec<Cell>, TileError>>()
        })
        .collect()
}

pub fn board_from_tiles<S: AsRef<str>>(rows: &[S]) -> Result<Board, TileError> {
    let cells = parse_tiles(rows)?;
    let cols = rows.first().map_or(0, |row| row.as_ref().chars().count());
    Ok(Board::new(rows.len(), cols, cells)?)
}

pub fn board_from_text(text: &str) -> Result<Board, TileError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    board_from_tiles(&rows)
}

pub fn render_board(board: &Board) -> Vec<String> {
    (0..board.rows())
        .map(|row| {
            board
                .row(row)
                .map(|cells| cells.iter().map(Cell::glyph).collect())
                .unwrap_or_default()
        })
        .collect()
}
