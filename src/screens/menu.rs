use super::{names, Screen, ScreenInput};
use crate::core::context::GameContext;
use crate::core::events::{ScreenArg, SoundEffect};

/// A vertical list of labelled choices with a wrapping cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuList {
    labels: Vec<&'static str>,
    selected: usize,
}

impl MenuList {
    pub fn new(labels: Vec<&'static str>) -> Self {
        Self {
            labels,
            selected: 0,
        }
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> Option<&'static str> {
        self.labels.get(self.selected).copied()
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    pub fn move_up(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        self.selected = match self.selected {
            0 => self.labels.len() - 1,
            n => n - 1,
        };
    }

    pub fn move_down(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.labels.len();
    }

    /// Apply cursor movement. Returns true if the input was Enter.
    pub fn navigate(&mut self, input: ScreenInput) -> bool {
        match input {
            ScreenInput::Up => self.move_up(),
            ScreenInput::Down | ScreenInput::Tab => self.move_down(),
            ScreenInput::Enter => return true,
            _ => {}
        }
        false
    }
}

/// The in-game menu: Start or Settings.
pub struct MainMenuScreen {
    menu: MenuList,
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self {
            menu: MenuList::new(vec!["Start", "Settings"]),
        }
    }
}

impl MainMenuScreen {
    pub fn menu(&self) -> &MenuList {
        &self.menu
    }
}

impl Screen for MainMenuScreen {
    fn enter(&mut self, _ctx: &mut GameContext, _arg: Option<ScreenArg>) {
        self.menu.reset();
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        if input == ScreenInput::Escape {
            ctx.play_sound(SoundEffect::Cancel);
            ctx.request_screen_change(names::TITLE, None);
            return;
        }
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
    fn test_menu_list_wraps() {
        let mut menu = MenuList::new(vec!["a", "b", "c"]);
        menu.move_up();
        assert_eq!(menu.selected(), 2);
        menu.move_down();
        assert_eq!(menu.selected(), 0);
        assert_eq!(menu.selected_label(), Some("a"));
    }

    #[test]
    fn test_empty_menu_does_not_move() {
        let mut menu = MenuList::new(Vec::new());
        menu.move_down();
        menu.move_up();
        assert_eq!(menu.selected(), 0);
        assert_eq!(menu.selected_label(), None);
    }

    #[test]
    fn test_menu_settings_choice() {
        let mut ctx = GameContext::with_seed(1);
        let mut screen = MainMenuScreen::default();
        screen.handle_input(&mut ctx, ScreenInput::Down);
        screen.handle_input(&mut ctx, ScreenInput::Enter);
        assert_eq!(
            ctx.drain_screen_requests(),
            vec![(names::SETTINGS.to_string(), None)]
        );
        assert!(ctx
            .pending_events()
            .contains(&GameEvent::PlaySound(SoundEffect::Decide)));
    }
}
