use super::{names, Screen, ScreenInput};
use crate::battle::Challenge;
use crate::core::context::GameContext;
use crate::core::events::{MusicTrack, ScreenArg, SoundEffect};

/// Victory screen listing the kanji missed during the last battle.
#[derive(Default)]
pub struct ResultWinScreen;

impl ResultWinScreen {
    /// Wrongly answered kanji of the last battle, each listed once.
    pub fn missed_kanji(ctx: &GameContext) -> Vec<&Challenge> {
        let mut missed: Vec<&Challenge> = Vec::new();
        if let Some(report) = &ctx.last_report {
            for challenge in &report.wrong {
                if !missed.iter().any(|c| c.id == challenge.id) {
                    missed.push(challenge);
                }
            }
        }
        missed
    }
}

impl Screen for ResultWinScreen {
    fn enter(&mut self, ctx: &mut GameContext, _arg: Option<ScreenArg>) {
        ctx.play_sound(SoundEffect::Victory);
        ctx.play_music(MusicTrack::Victory);
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        if matches!(input, ScreenInput::Enter | ScreenInput::Escape) {
            ctx.play_sound(SoundEffect::Decide);
            ctx.request_screen_change(names::STAGE_SELECT, None);
        }
    }
}
