//! Kanji Battle - a terminal kanji-reading battle game.
//!
//! The library holds the game rules and the screen state machine; the
//! binary adds the terminal front end.

pub mod battle;
pub mod build_info;
pub mod collection;
pub mod core;
pub mod screens;
pub mod stages;
