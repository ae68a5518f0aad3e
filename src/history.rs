use crate::types::AliveMove;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<AliveMove>,
    undo_count: u32,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, alive: AliveMove) {
        self.moves.push(alive);
    }

    pub fn pop(&mut self) -> Option<AliveMove> {
        let alive = self.moves.pop()?;
        self.undo_count += 1;
        Some(alive)
    }

    pub fn peek(&self) -> Option<&AliveMove> {
        self.moves.last()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn undo_count(&self) -> u32 {
        self.undo_count
    }
}
