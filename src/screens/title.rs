use super::menu::MenuList;
use super::{names, Screen, ScreenInput};
use crate::core::context::GameContext;
use crate::core::events::{MusicTrack, ScreenArg, SoundEffect};

/// Title screen. Plays the title music and offers Start / Settings.
pub struct TitleScreen {
    menu: MenuList,
}

impl Default for TitleScreen {
    fn default() -> Self {
        Self {
            menu: MenuList::new(vec!["Start", "Settings"]),
        }
    }
}

impl TitleScreen {
    pub fn menu(&self) -> &MenuList {
        &self.menu
    }
}

impl Screen for TitleScreen {
    fn enter(&mut self, ctx: &mut GameContext, _arg: Option<ScreenArg>) {
        self.menu.reset();
        ctx.play_music(MusicTrack::Title);
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        if !self.menu.navigate(input) {
            return;
        }
        ctx.play_sound(SoundEffect::Decide);
        match self.menu.selected() {
            0 => ctx.request_screen_change(names::STAGE_SELECT, None),
            _ => ctx.request_screen_change(names::SETTINGS, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::GameEvent;

    #[test]
    fn test_enter_plays_title_music() {
        let mut ctx = GameContext::with_seed(1);
        let mut screen = TitleScreen::default();
        screen.enter(&mut ctx, None);
        assert_eq!(
            ctx.drain_events(),
            vec![GameEvent::PlayMusic(MusicTrack::Title)]
        );
    }

    #[test]
    fn test_start_goes_to_stage_select() {
        let mut ctx = GameContext::with_seed(1);
        let mut screen = TitleScreen::default();
        screen.handle_input(&mut ctx, ScreenInput::Enter);
        assert_eq!(
            ctx.drain_screen_requests(),
            vec![(names::STAGE_SELECT.to_string(), None)]
        );
    }
}
