pub mod game;
pub mod scoreboard;
