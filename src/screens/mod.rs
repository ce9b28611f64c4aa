//! Named screens and the single-active-screen state machine.
//!
//! Every screen implements [`Screen`]; all lifecycle hooks default to no-ops.
//! The concrete screens are gathered in the tagged [`ScreenKind`] registry and
//! hosted by a [`ScreenMachine`].

pub mod battle;
pub mod dex;
pub mod game_over;
pub mod machine;
pub mod menu;
pub mod registry;
pub mod result_win;
pub mod settings;
pub mod stage_select;
pub mod title;

pub use battle::BattleScreen;
pub use dex::{DexEntry, DexKind, DexScreen};
pub use game_over::GameOverScreen;
pub use machine::ScreenMachine;
pub use menu::{MainMenuScreen, MenuList};
pub use registry::{build_registry, ScreenKind};
pub use result_win::ResultWinScreen;
pub use settings::{SettingsRow, SettingsScreen};
pub use stage_select::StageSelectScreen;
pub use title::TitleScreen;

use crate::core::context::GameContext;
use crate::core::events::ScreenArg;

/// Registry names of the fixed screens. Battle screens are registered under
/// their stage id.
pub mod names {
    pub const TITLE: &str = "title";
    pub const MENU: &str = "menu";
    pub const STAGE_SELECT: &str = "stageSelect";
    pub const SETTINGS: &str = "settings";
    pub const KANJI_DEX: &str = "kanjiDex";
    pub const MONSTER_DEX: &str = "monsterDex";
    pub const GAME_OVER: &str = "gameOver";
    pub const RESULT_WIN: &str = "resultWin";
    pub const REVIEW_STAGE: &str = crate::stages::REVIEW_STAGE_ID;

    pub const ALL: [&str; 9] = [
        TITLE,
        MENU,
        STAGE_SELECT,
        SETTINGS,
        KANJI_DEX,
        MONSTER_DEX,
        GAME_OVER,
        RESULT_WIN,
        REVIEW_STAGE,
    ];
}

/// Keyboard input after the host has translated terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenInput {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Tab,
    PageUp,
    PageDown,
    /// Function key F1..F12.
    Function(u8),
}

/// A unit of the navigation state machine.
///
/// Between `enter` and `exit` the screen owns whatever it set up. Navigation
/// is requested through `ctx.request_screen_change`, never performed directly.
pub trait Screen {
    fn enter(&mut self, _ctx: &mut GameContext, _arg: Option<ScreenArg>) {}

    fn update(&mut self, _ctx: &mut GameContext, _dt: f64) {}

    fn exit(&mut self, _ctx: &mut GameContext) {}

    fn handle_input(&mut self, _ctx: &mut GameContext, _input: ScreenInput) {}
}
