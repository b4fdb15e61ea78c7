pub mod clues;
pub mod coords;
pub mod grid;
pub mod rules;
pub mod tile;
