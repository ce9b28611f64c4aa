use super::menu::MenuList;
use super::{names, Screen, ScreenInput};
use crate::core::context::GameContext;
use crate::core::events::{ScreenArg, SoundEffect};

pub struct GameOverScreen {
    menu: MenuList,
}

impl Default for GameOverScreen {
    fn default() -> Self {
        Self {
            menu: MenuList::new(vec!["Retry", "Title"]),
        }
    }
}

impl GameOverScreen {
    pub fn menu(&self) -> &MenuList {
        &self.menu
    }
}

impl Screen for GameOverScreen {
    fn enter(&mut self, _ctx: &mut GameContext, _arg: Option<ScreenArg>) {
        self.menu.reset();
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        if !self.menu.navigate(input) {
            return;
        }
        ctx.play_sound(SoundEffect::Decide);
        match self.menu.selected() {
            0 => ctx.request_screen_change(names::STAGE_SELECT, None),
            _ => ctx.request_screen_change(names::TITLE, None),
        }
    }
}
