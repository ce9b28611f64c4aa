//! Battle screen: hosts one `BattleSession` per visit to a stage, or to the
//! review stage built from the review queue.

use super::{names, Screen, ScreenInput};
use crate::battle::{BattleCommand, BattleSession};
use crate::core::config::BattleTuning;
use crate::core::constants::LOG_VISIBLE_LINES;
use crate::core::context::GameContext;
use crate::core::events::{ScreenArg, SoundEffect};
use crate::stages::{StageCatalog, StageSource, REVIEW_STAGE_ID};
use chrono::Utc;
use std::rc::Rc;

enum BattleSource {
    Stage(Rc<dyn StageSource>),
    /// Rebuilt from the review queue on every enter.
    Review(Rc<StageCatalog>),
}

/// Key bindings: typed characters fill the answer, Enter repeats the last
/// command, F1/F2/F3 attack/heal/hint, Up/Down scroll the log, Escape goes
/// back to stage select and F10 to the title.
pub struct BattleScreen {
    stage_id: String,
    source: BattleSource,
    tuning: BattleTuning,
    session: Option<BattleSession>,
}

impl BattleScreen {
    pub fn new(stage_id: impl Into<String>, stages: Rc<dyn StageSource>, tuning: BattleTuning) -> Self {
        Self {
            stage_id: stage_id.into(),
            source: BattleSource::Stage(stages),
            tuning,
            session: None,
        }
    }

    /// Battle over the kanji currently in the review queue. Clearing it does
    /// not count as clearing a stage.
    pub fn review(catalog: Rc<StageCatalog>, tuning: BattleTuning) -> Self {
        Self {
            stage_id: REVIEW_STAGE_ID.to_string(),
            source: BattleSource::Review(catalog),
            tuning,
            session: None,
        }
    }

    pub fn is_review(&self) -> bool {
        matches!(self.source, BattleSource::Review(_))
    }

    pub fn stage_id(&self) -> &str {
        &self.stage_id
    }

    /// The running session, if the screen is active and the stage started.
    pub fn session(&self) -> Option<&BattleSession> {
        self.session.as_ref()
    }

    fn leave(&mut self, ctx: &mut GameContext, target: &str) {
        ctx.play_sound(SoundEffect::Cancel);
        ctx.request_screen_change(target, None);
    }
}

impl Screen for BattleScreen {
    fn enter(&mut self, ctx: &mut GameContext, _arg: Option<ScreenArg>) {
        if let Some(mut stale) = self.session.take() {
            stale.cancel();
        }

        let started = match &self.source {
            BattleSource::Stage(stages) => {
                BattleSession::start(&self.stage_id, stages.as_ref(), self.tuning.clone(), ctx)
            }
            BattleSource::Review(catalog) => {
                let review = catalog.review_catalog(ctx.collection.review_queue.iter());
                BattleSession::start(&self.stage_id, &review, self.tuning.clone(), ctx)
                    .map(BattleSession::clearing_reviews)
            }
        };

        match started {
            Ok(session) => {
                let cleared_stage = (!self.is_review()).then(|| self.stage_id.clone());
                let session = session
                    .on_complete(move |ctx| {
                        if let Some(stage_id) = cleared_stage {
                            ctx.collection
                                .record_stage_clear(&stage_id, Utc::now().timestamp());
                        }
                        ctx.request_screen_change(names::RESULT_WIN, None);
                    })
                    .on_defeat(|ctx| ctx.request_screen_change(names::GAME_OVER, None));
                self.session = Some(session);
            }
            Err(err) => {
                tracing::warn!(stage = %self.stage_id, error = %err, "battle aborted");
                ctx.request_screen_change(
                    names::STAGE_SELECT,
                    Some(ScreenArg::Notice(err.to_string())),
                );
            }
        }
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f64) {
        if let Some(session) = self.session.as_mut() {
            session.update(ctx, dt);
        }
    }

    fn exit(&mut self, _ctx: &mut GameContext) {
        if let Some(mut session) = self.session.take() {
            session.cancel();
        }
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        match input {
            ScreenInput::Escape => return self.leave(ctx, names::STAGE_SELECT),
            ScreenInput::Function(10) => return self.leave(ctx, names::TITLE),
            _ => {}
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        match input {
            ScreenInput::Char(c) => session.push_char(c),
            ScreenInput::Backspace => session.pop_char(),
            ScreenInput::Enter => {
                session.repeat_last_command(ctx);
            }
            ScreenInput::Function(1) => {
                session.run_command(ctx, BattleCommand::Attack);
            }
            ScreenInput::Function(2) => {
                session.run_command(ctx, BattleCommand::Heal);
            }
            ScreenInput::Function(3) | ScreenInput::Tab => {
                session.run_command(ctx, BattleCommand::Hint);
            }
            ScreenInput::Up | ScreenInput::PageUp => session.scroll_log_older(LOG_VISIBLE_LINES),
            ScreenInput::Down | ScreenInput::PageDown => session.scroll_log_newer(),
            _ => {}
        }
    }
}
