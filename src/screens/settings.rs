use super::{names, Screen, ScreenInput};
use crate::collection::persistence;
use crate::core::constants::VOLUME_STEP;
use crate::core::context::GameContext;
use crate::core::events::{ScreenArg, SoundEffect};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    BgmVolume,
    SeVolume,
    ResetData,
    Back,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 4] = [
        SettingsRow::BgmVolume,
        SettingsRow::SeVolume,
        SettingsRow::ResetData,
        SettingsRow::Back,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::BgmVolume => "BGM Volume",
            Self::SeVolume => "SE Volume",
            Self::ResetData => "Reset All Data",
            Self::Back => "Back",
        }
    }
}

/// Volume sliders and the data reset. Changes are written to `save_dir`
/// immediately when one is configured.
pub struct SettingsScreen {
    selected: usize,
    confirming_reset: bool,
    save_dir: Option<PathBuf>,
}

impl SettingsScreen {
    pub fn new(save_dir: Option<PathBuf>) -> Self {
        Self {
            selected: 0,
            confirming_reset: false,
            save_dir,
        }
    }

    pub fn selected_row(&self) -> SettingsRow {
        SettingsRow::ALL[self.selected]
    }

    pub fn confirming_reset(&self) -> bool {
        self.confirming_reset
    }

    fn adjust(&mut self, ctx: &mut GameContext, direction: f32) {
        let delta = VOLUME_STEP * direction;
        match self.selected_row() {
            SettingsRow::BgmVolume => ctx.settings.adjust_bgm_volume(delta),
            SettingsRow::SeVolume => ctx.settings.adjust_se_volume(delta),
            _ => return,
        }
        ctx.play_sound(SoundEffect::Decide);
        if let Some(dir) = &self.save_dir {
            if let Err(e) = persistence::save_settings(dir, &ctx.settings) {
                tracing::warn!(error = %e, "failed to save settings");
            }
        }
    }

    fn confirm_reset(&mut self, ctx: &mut GameContext) {
        self.confirming_reset = false;
        ctx.reset_progress();
        ctx.play_sound(SoundEffect::Decide);
        if let Some(dir) = &self.save_dir {
            if let Err(e) = persistence::save_progress(dir, ctx) {
                tracing::warn!(error = %e, "failed to save reset progress");
            }
        }
    }

    fn activate(&mut self, ctx: &mut GameContext) {
        match self.selected_row() {
            SettingsRow::ResetData => {
                self.confirming_reset = true;
                ctx.play_sound(SoundEffect::Decide);
            }
            SettingsRow::Back => {
                ctx.play_sound(SoundEffect::Cancel);
                ctx.request_screen_change(names::TITLE, None);
            }
            SettingsRow::BgmVolume | SettingsRow::SeVolume => {}
        }
    }
}

impl Screen for SettingsScreen {
    fn enter(&mut self, _ctx: &mut GameContext, _arg: Option<ScreenArg>) {
        self.selected = 0;
        self.confirming_reset = false;
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        if self.confirming_reset {
            match input {
                ScreenInput::Char('y') | ScreenInput::Char('Y') | ScreenInput::Enter => {
                    self.confirm_reset(ctx)
                }
                ScreenInput::Char('n') | ScreenInput::Char('N') | ScreenInput::Escape => {
                    self.confirming_reset = false;
                    ctx.play_sound(SoundEffect::Cancel);
                }
                _ => {}
            }
            return;
        }

        let rows = SettingsRow::ALL.len();
        match input {
            ScreenInput::Up => self.selected = (self.selected + rows - 1) % rows,
            ScreenInput::Down | ScreenInput::Tab => self.selected = (self.selected + 1) % rows,
            ScreenInput::Left => self.adjust(ctx, -1.0),
            ScreenInput::Right => self.adjust(ctx, 1.0),
            ScreenInput::Enter => self.activate(ctx),
            ScreenInput::Escape => {
                ctx.play_sound(SoundEffect::Cancel);
                ctx.request_screen_change(names::TITLE, None);
            }
            _ => {}
        }
    }
}
