pub const UNLIMITED_LIVES: i32 = -1;

pub const GEM_SCORE: i64 = 10;
pub const MOVE_PENALTY: i64 = 1;
pub const UNDO_PENALTY: i64 = 2;
pub const DEATH_PENALTY: i64 = 4;

pub const GLYPH_WALL: char = 'W';
pub const GLYPH_EMPTY: char = '.';
pub const GLYPH_STOP: char = '#';
pub const GLYPH_PLAYER: char = '@';
pub const GLYPH_PLAYER_ON_STOP: char = '&';
pub const GLYPH_GEM: char = '*';
pub const GLYPH_EXTRA_LIFE: char = '+';
pub const GLYPH_MINE: char = 'X';

pub const DEFAULT_MAX_MOVES: u32 = 200;
pub const DEFAULT_UNDO_CHANCE: f64 = 0.1;

pub const DEFAULT_LEVEL: [&str; 8] = [
    "WWWWWWWWWW",
    "W@...*..#W",
    "W.WW.WW..W",
    "W*..+..X.W",
    "W.W#.W...W",
    "W...*..W*W",
    "W#..X...#W",
    "WWWWWWWWWW",
];

pub fn score_for(
    rows: usize,
    cols: usize,
    gems_collected: usize,
    moves: u32,
    undos: u32,
    deaths: u32,
) -> i64 {
    (rows * cols) as i64 + GEM_SCORE * gems_collected as i64
        - MOVE_PENALTY * moves as i64
        - UNDO_PENALTY * undos as i64
        - DEATH_PENALTY * deaths as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_starts_at_board_area() {
        assert_eq!(score_for(4, 5, 0, 0, 0, 0), 20);
    }

    #[test]
    fn score_applies_each_weight() {
        assert_eq!(score_for(1, 3, 1, 1, 0, 0), 12);
        assert_eq!(score_for(1, 3, 0, 2, 1, 1), 3 - 2 - 2 - 4);
    }
}
