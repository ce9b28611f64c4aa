//! Core game state and rules shared by every screen.

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod events;
pub mod normalize;
pub mod progression;

pub use config::{BattleTuning, Settings};
pub use constants::*;
pub use context::GameContext;
pub use error::{BattleError, ScreenError, StageDataError};
pub use events::{GameEvent, MusicTrack, ScreenArg, SoundEffect};
pub use normalize::normalize;
pub use progression::{LevelUp, PlayerStats};
