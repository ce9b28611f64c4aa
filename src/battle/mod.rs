//! Kanji battles: damage rules, the turn scheduler and the session engine.

pub mod damage;
pub mod scheduler;
pub mod session;
pub mod types;

pub use damage::{apply_bonuses, roll_base_damage, ComboCounter};
pub use scheduler::{TurnScheduler, TurnStep};
pub use session::BattleSession;
pub use types::*;
