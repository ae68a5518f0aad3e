pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod geometry;
pub mod history;
pub mod resolver;
pub mod tiles;
pub mod types;
