//! TUI module for the interactive presenter.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Screen, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering and hit-testing
//! - `run`: Effects (terminal, input threads, loader thread)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
