use super::{
    names, BattleScreen, DexKind, DexScreen, GameOverScreen, MainMenuScreen, ResultWinScreen,
    Screen, ScreenInput, ScreenMachine, SettingsScreen, StageSelectScreen, TitleScreen,
};
use crate::core::config::BattleTuning;
use crate::core::context::GameContext;
use crate::core::events::ScreenArg;
use crate::stages::{StageCatalog, StageSource};
use std::path::PathBuf;
use std::rc::Rc;

/// Every concrete screen the game registers.
pub enum ScreenKind {
    Title(TitleScreen),
    Menu(MainMenuScreen),
    StageSelect(StageSelectScreen),
    Settings(SettingsScreen),
    Dex(DexScreen),
    GameOver(GameOverScreen),
    ResultWin(ResultWinScreen),
    Battle(BattleScreen),
}

impl ScreenKind {
    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Title(s) => s,
            Self::Menu(s) => s,
            Self::StageSelect(s) => s,
            Self::Settings(s) => s,
            Self::Dex(s) => s,
            Self::GameOver(s) => s,
            Self::ResultWin(s) => s,
            Self::Battle(s) => s,
        }
    }
}

impl Screen for ScreenKind {
    fn enter(&mut self, ctx: &mut GameContext, arg: Option<ScreenArg>) {
        self.as_screen_mut().enter(ctx, arg);
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f64) {
        self.as_screen_mut().update(ctx, dt);
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        self.as_screen_mut().exit(ctx);
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        self.as_screen_mut().handle_input(ctx, input);
    }
}

/// Register the fixed screens plus one battle screen per stage id.
///
/// `save_dir` is where the settings screen persists changes; `None` keeps
/// everything in memory.
pub fn build_registry(
    stages: Rc<StageCatalog>,
    tuning: BattleTuning,
    save_dir: Option<PathBuf>,
) -> ScreenMachine {
    let mut machine = ScreenMachine::new();
    machine.register(names::TITLE, ScreenKind::Title(TitleScreen::default()));
    machine.register(names::MENU, ScreenKind::Menu(MainMenuScreen::default()));
    machine.register(
        names::STAGE_SELECT,
        ScreenKind::StageSelect(StageSelectScreen::new(stages.clone())),
    );
    machine.register(
        names::SETTINGS,
        ScreenKind::Settings(SettingsScreen::new(save_dir)),
    );
    machine.register(
        names::KANJI_DEX,
        ScreenKind::Dex(DexScreen::new(DexKind::Kanji, stages.clone())),
    );
    machine.register(
        names::MONSTER_DEX,
        ScreenKind::Dex(DexScreen::new(DexKind::Monster, stages.clone())),
    );
    machine.register(names::GAME_OVER, ScreenKind::GameOver(GameOverScreen::default()));
    machine.register(names::RESULT_WIN, ScreenKind::ResultWin(ResultWinScreen));
    machine.register(
        names::REVIEW_STAGE,
        ScreenKind::Battle(BattleScreen::review(stages.clone(), tuning.clone())),
    );

    let source: Rc<dyn StageSource> = stages.clone();
    for stage in stages.stage_list() {
        if names::ALL.contains(&stage.id.as_str()) {
            tracing::warn!(stage = %stage.id, "stage id collides with a screen name; skipped");
            continue;
        }
        machine.register(
            stage.id.clone(),
            ScreenKind::Battle(BattleScreen::new(stage.id.clone(), source.clone(), tuning.clone())),
        );
    }

    tracing::debug!(screens = machine.len(), "screen registry built");
    machine
}
