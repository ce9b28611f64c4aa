use super::{names, Screen, ScreenInput};
use crate::core::context::GameContext;
use crate::core::events::{ScreenArg, SoundEffect};
use crate::stages::{StageCatalog, StageInfo};
use std::rc::Rc;

/// Highest school grade shown as a tab.
pub const MAX_GRADE: u8 = 6;

/// Stage list with grade tabs (0 = all grades, then 1..=6).
///
/// Enter starts the selected stage. `r` starts a review battle when the
/// review queue has kanji in it. `k` / `m` open the kanji and monster dex;
/// Escape goes back to the title.
pub struct StageSelectScreen {
    stages: Rc<StageCatalog>,
    grade: u8,
    selected: usize,
    notice: Option<String>,
}

impl StageSelectScreen {
    pub fn new(stages: Rc<StageCatalog>) -> Self {
        Self {
            stages,
            grade: 0,
            selected: 0,
            notice: None,
        }
    }

    pub fn grade(&self) -> u8 {
        self.grade
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Message left by a redirect (e.g. a stage that could not start).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn visible_stages(&self) -> Vec<&StageInfo> {
        self.stages.stages_for_grade(self.grade)
    }

    pub fn set_grade(&mut self, grade: u8) {
        self.grade = grade.min(MAX_GRADE);
        self.selected = 0;
    }

    fn next_grade(&mut self) {
        self.set_grade(if self.grade >= MAX_GRADE { 0 } else { self.grade + 1 });
    }

    fn previous_grade(&mut self) {
        self.set_grade(if self.grade == 0 { MAX_GRADE } else { self.grade - 1 });
    }

    fn start_selected(&mut self, ctx: &mut GameContext) {
        let Some(stage_id) = self
            .visible_stages()
            .get(self.selected)
            .map(|s| s.id.clone())
        else {
            return;
        };
        ctx.play_sound(SoundEffect::Decide);
        ctx.request_screen_change(stage_id, None);
    }

    fn start_review(&mut self, ctx: &mut GameContext) {
        if ctx.collection.review_queue.is_empty() {
            ctx.play_sound(SoundEffect::Cancel);
            self.notice = Some("Nothing to review yet.".to_string());
            return;
        }
        ctx.play_sound(SoundEffect::Decide);
        ctx.request_screen_change(names::REVIEW_STAGE, None);
    }
}

impl Screen for StageSelectScreen {
    fn enter(&mut self, _ctx: &mut GameContext, arg: Option<ScreenArg>) {
        self.notice = match arg {
            Some(ScreenArg::Notice(message)) => Some(message),
            None => None,
        };
        let count = self.visible_stages().len();
        if self.selected >= count {
            self.selected = 0;
        }
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        let count = self.visible_stages().len();
        match input {
            ScreenInput::Up if count > 0 => {
                self.selected = (self.selected + count - 1) % count;
            }
            ScreenInput::Down if count > 0 => {
                self.selected = (self.selected + 1) % count;
            }
            ScreenInput::Right | ScreenInput::Tab => self.next_grade(),
            ScreenInput::Left => self.previous_grade(),
            ScreenInput::Enter => self.start_selected(ctx),
            ScreenInput::Char('r') => self.start_review(ctx),
            ScreenInput::Char('k') => {
                ctx.play_sound(SoundEffect::Decide);
                ctx.request_screen_change(names::KANJI_DEX, None);
            }
            ScreenInput::Char('m') => {
                ctx.play_sound(SoundEffect::Decide);
                ctx.request_screen_change(names::MONSTER_DEX, None);
            }
            ScreenInput::Escape => {
                ctx.play_sound(SoundEffect::Cancel);
                ctx.request_screen_change(names::TITLE, None);
            }
            _ => {}
        }
    }
}
