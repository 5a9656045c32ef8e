//! slidedeck: Present JSON slide decks in the terminal.

pub mod deck;
pub mod gesture;
pub mod loader;
pub mod report;
pub mod slide;
pub mod tui;
pub mod types;
