//! The battle turn engine.
//!
//! A `BattleSession` owns one stage's worth of battle state. Player commands
//! resolve synchronously; the rest of the turn (enemy attack, handing the
//! turn back, next enemy, victory/defeat signals) is chained through the
//! session's [`TurnScheduler`] and driven by [`BattleSession::update`].

use super::damage::{apply_bonuses, roll_base_damage, ComboCounter};
use super::scheduler::{TurnScheduler, TurnStep};
use super::types::*;
use crate::core::config::BattleTuning;
use crate::core::constants::{
    ENEMY_ATTACK_ANIM_FRAMES, ENEMY_DAMAGE_ANIM_FRAMES, ENEMY_DEFEAT_ANIM_FRAMES,
    PLAYER_HP_ANIM_STEP,
};
use crate::core::context::GameContext;
use crate::core::error::BattleError;
use crate::core::events::{MusicTrack, SoundEffect};
use crate::core::normalize::normalize;
use crate::stages::StageSource;
use rand::Rng;

type SessionCallback = Box<dyn FnOnce(&mut GameContext)>;

pub struct BattleSession {
    stage_id: String,
    tuning: BattleTuning,
    enemies: Vec<Enemy>,
    current_enemy_index: usize,
    enemies_defeated: usize,
    challenge_pool: Vec<Challenge>,
    current_challenge: Challenge,
    turn_owner: TurnOwner,
    input_enabled: bool,
    phase: BattlePhase,
    combo: ComboCounter,
    animation: EnemyAnimation,
    player_hp: PlayerHpGauge,
    log: Vec<String>,
    log_offset: usize,
    show_hint: bool,
    input: String,
    last_command: BattleCommand,
    last_answered: Option<Challenge>,
    correct: Vec<Challenge>,
    wrong: Vec<Challenge>,
    scheduler: TurnScheduler,
    clears_reviews: bool,
    on_complete: Option<SessionCallback>,
    on_defeat: Option<SessionCallback>,
}

impl BattleSession {
    /// Start a session for `stage_id`: copy the stage's enemies and kanji,
    /// restore the player's hp, spawn the first enemy and draw a challenge.
    pub fn start(
        stage_id: &str,
        source: &dyn StageSource,
        tuning: BattleTuning,
        ctx: &mut GameContext,
    ) -> Result<Self, BattleError> {
        if source.stage(stage_id).is_none() {
            return Err(BattleError::UnknownStage(stage_id.to_string()));
        }

        let challenge_pool: Vec<Challenge> = source
            .challenges_by_stage(stage_id)
            .iter()
            .map(Challenge::from_template)
            .filter(|c| !c.accepted_readings.is_empty())
            .collect();
        if challenge_pool.is_empty() {
            tracing::warn!(stage = stage_id, "stage has no usable kanji");
            return Err(BattleError::EmptyChallengePool(stage_id.to_string()));
        }

        let enemies: Vec<Enemy> = source
            .enemies_by_stage(stage_id)
            .iter()
            .map(Enemy::from_template)
            .collect();
        if enemies.is_empty() {
            tracing::warn!(stage = stage_id, "stage has no enemies");
            return Err(BattleError::NoEnemies(stage_id.to_string()));
        }

        ctx.player.restore_full();
        ctx.play_music(MusicTrack::Battle);

        let mut session = Self {
            stage_id: stage_id.to_string(),
            tuning,
            current_challenge: challenge_pool[0].clone(),
            challenge_pool,
            enemies,
            current_enemy_index: 0,
            enemies_defeated: 0,
            turn_owner: TurnOwner::Player,
            input_enabled: false,
            phase: BattlePhase::AwaitingPlayerInput,
            combo: ComboCounter::default(),
            animation: EnemyAnimation::None,
            player_hp: PlayerHpGauge::new(ctx.player.hp),
            log: Vec::new(),
            log_offset: 0,
            show_hint: false,
            input: String::new(),
            last_command: BattleCommand::default(),
            last_answered: None,
            correct: Vec::new(),
            wrong: Vec::new(),
            scheduler: TurnScheduler::new(),
            clears_reviews: false,
            on_complete: None,
            on_defeat: None,
        };

        session.spawn_enemy(ctx);
        session.draw_challenge(ctx);
        session.input_enabled = true;

        tracing::info!(
            stage = stage_id,
            enemies = session.enemies.len(),
            kanji = session.challenge_pool.len(),
            "battle session started"
        );
        Ok(session)
    }

    /// Called once, after the last enemy falls.
    pub fn on_complete(mut self, callback: impl FnOnce(&mut GameContext) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Review battle: kanji read correctly leave the review queue.
    pub fn clearing_reviews(mut self) -> Self {
        self.clears_reviews = true;
        self
    }

    /// Called once, after the player's hp reaches zero.
    pub fn on_defeat(mut self, callback: impl FnOnce(&mut GameContext) + 'static) -> Self {
        self.on_defeat = Some(Box::new(callback));
        self
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn stage_id(&self) -> &str {
        &self.stage_id
    }

    pub fn tuning(&self) -> &BattleTuning {
        &self.tuning
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn current_enemy(&self) -> &Enemy {
        &self.enemies[self.current_enemy_index]
    }

    pub fn current_enemy_index(&self) -> usize {
        self.current_enemy_index
    }

    pub fn current_challenge(&self) -> &Challenge {
        &self.current_challenge
    }

    pub fn turn_owner(&self) -> TurnOwner {
        self.turn_owner
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn combo_count(&self) -> u32 {
        self.combo.count()
    }

    pub fn animation(&self) -> EnemyAnimation {
        self.animation
    }

    pub fn player_hp(&self) -> PlayerHpGauge {
        self.player_hp
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn show_hint(&self) -> bool {
        self.show_hint
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn last_command(&self) -> BattleCommand {
        self.last_command
    }

    pub fn last_answered(&self) -> Option<&Challenge> {
        self.last_answered.as_ref()
    }

    pub fn pending_step(&self) -> Option<TurnStep> {
        self.scheduler.pending()
    }

    /// True only while waiting on a player decision.
    pub fn accepts_input(&self) -> bool {
        self.turn_owner == TurnOwner::Player && self.input_enabled
    }

    // ── Text input ─────────────────────────────────────────────────────

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    // ── Player commands ────────────────────────────────────────────────

    /// Run a command against the current input buffer and remember it as
    /// the command Enter repeats.
    pub fn run_command(
        &mut self,
        ctx: &mut GameContext,
        command: BattleCommand,
    ) -> Option<AnswerOutcome> {
        self.last_command = command;
        let raw = self.input.clone();
        match command {
            BattleCommand::Attack => self.submit_answer(ctx, &raw),
            BattleCommand::Heal => self.heal(ctx, &raw),
            BattleCommand::Hint => {
                self.toggle_hint();
                None
            }
        }
    }

    /// Enter key: repeat the last command, only while input is accepted.
    pub fn repeat_last_command(&mut self, ctx: &mut GameContext) -> Option<AnswerOutcome> {
        if !self.accepts_input() {
            return None;
        }
        self.run_command(ctx, self.last_command)
    }

    /// Answer the current challenge with an attack.
    ///
    /// Ignored (returns `None`) unless it is the player's turn and input is
    /// enabled. All state changes happen before returning; only the next
    /// turn stage is deferred.
    pub fn submit_answer(&mut self, ctx: &mut GameContext, raw: &str) -> Option<AnswerOutcome> {
        if !self.accepts_input() {
            return None;
        }
        self.input_enabled = false;

        let answer = normalize(raw);
        let challenge = self.current_challenge.clone();
        self.last_answered = Some(challenge.clone());
        let readings = challenge.reading_summary();

        if !challenge.accepts(&answer) {
            self.phase = BattlePhase::Resolving(AnswerKind::Incorrect);
            self.log.push(format!("Attack failed! Correct readings: {}", readings));
            ctx.play_sound(SoundEffect::Wrong);

            let outcome = self.punish_wrong_answer(ctx, &challenge);
            if self.phase != BattlePhase::Defeat {
                self.pass_turn_to_enemy();
            }
            return Some(outcome);
        }

        self.phase = BattlePhase::Resolving(AnswerKind::Correct);
        self.correct.push(challenge.clone());
        self.clear_review(ctx, &challenge);
        ctx.collection.kanji_dex.record_collected(challenge.id.clone());
        self.grant_experience(ctx, self.tuning.exp_correct);

        let combo_bonus = self.combo.register_hit(self.tuning.combo_threshold);
        let base = roll_base_damage(&self.tuning.damage_range, &mut ctx.rng);
        if combo_bonus {
            self.grant_experience(ctx, self.tuning.exp_combo_bonus);
            self.log.push("Combo bonus!".to_string());
        }

        let weakness_hit = challenge.reading_kind(&answer) == Some(challenge.weakness);
        if weakness_hit {
            self.log
                .push(format!("Weak point hit! ({} reading)", challenge.weakness.label()));
        }

        let damage = apply_bonuses(base, combo_bonus, weakness_hit, &self.tuning);
        let idx = self.current_enemy_index;
        self.enemies[idx].take_damage(damage);
        self.log.push(format!(
            "Correct! {}. {} takes {} damage!",
            readings, self.enemies[idx].name, damage
        ));
        ctx.play_sound(SoundEffect::Correct);
        self.animation = EnemyAnimation::Damage(ENEMY_DAMAGE_ANIM_FRAMES);

        let enemy_defeated = self.enemies[idx].is_defeated();
        if enemy_defeated {
            self.on_enemy_defeated(ctx);
        } else {
            self.pass_turn_to_enemy();
        }

        tracing::debug!(base, damage, combo_bonus, weakness_hit, enemy_defeated, "attack resolved");
        Some(AnswerOutcome::Hit {
            damage,
            combo_bonus,
            weakness_hit,
            enemy_defeated,
        })
    }

    /// Answer the current challenge to heal. A wrong answer still costs the
    /// enemy's attack.
    pub fn heal(&mut self, ctx: &mut GameContext, raw: &str) -> Option<AnswerOutcome> {
        if !self.accepts_input() {
            return None;
        }
        self.input_enabled = false;

        let challenge = self.current_challenge.clone();
        self.last_answered = Some(challenge.clone());
        let readings = challenge.reading_summary();

        let outcome = if challenge.matches_raw(raw) {
            self.phase = BattlePhase::Resolving(AnswerKind::Correct);
            self.correct.push(challenge.clone());
            self.clear_review(ctx, &challenge);
            ctx.play_sound(SoundEffect::Heal);

            let amount = ctx.player.heal(self.tuning.heal_amount);
            self.player_hp.set_target(ctx.player.hp);
            self.log.push(format!(
                "Heal succeeded! +{} HP. Correct readings: {}",
                amount, readings
            ));
            AnswerOutcome::Healed { amount }
        } else {
            self.phase = BattlePhase::Resolving(AnswerKind::Incorrect);
            self.log.push(format!("Heal failed! Correct readings: {}", readings));
            ctx.play_sound(SoundEffect::Damage);
            self.punish_wrong_answer(ctx, &challenge)
        };

        if self.phase != BattlePhase::Defeat {
            self.pass_turn_to_enemy();
        }
        Some(outcome)
    }

    /// Show or hide the meaning hint. Does not use up the turn.
    pub fn toggle_hint(&mut self) -> bool {
        self.show_hint = !self.show_hint;
        if self.show_hint {
            self.log.push(format!("Hint: {}", self.current_challenge.meaning));
        } else {
            self.log.push("Hint hidden.".to_string());
        }
        self.show_hint
    }

    // ── Tick ───────────────────────────────────────────────────────────

    /// Let `dt` seconds pass: fire any turn steps that came due, then
    /// advance the cosmetic animations by one frame.
    pub fn update(&mut self, ctx: &mut GameContext, dt: f64) {
        let mut budget = dt;
        while let Some((step, leftover)) = self.scheduler.advance(budget) {
            self.run_step(ctx, step);
            budget = leftover;
        }
        self.tick_animations();
    }

    /// One render frame of animation. Never touches turn state.
    pub fn tick_animations(&mut self) {
        self.animation.tick();
        self.player_hp.tick(PLAYER_HP_ANIM_STEP);
    }

    /// Cancel everything outstanding: pending turn steps, animations and
    /// callbacks. Called when the battle screen is left.
    pub fn cancel(&mut self) {
        if let Some(step) = self.scheduler.cancel() {
            tracing::debug!(?step, stage = %self.stage_id, "pending turn step cancelled");
        }
        self.animation = EnemyAnimation::None;
        self.player_hp.snap();
        self.input_enabled = false;
        self.on_complete = None;
        self.on_defeat = None;
    }

    // ── Log ────────────────────────────────────────────────────────────

    /// The `lines` log entries visible at the current scroll offset.
    pub fn visible_log(&self, lines: usize) -> &[String] {
        let len = self.log.len();
        let offset = self.log_offset.min(len.saturating_sub(lines));
        let start = len.saturating_sub(lines + offset);
        let end = (start + lines).min(len);
        &self.log[start..end]
    }

    pub fn scroll_log_older(&mut self, lines: usize) {
        let max_offset = self.log.len().saturating_sub(lines);
        self.log_offset = (self.log_offset + 1).min(max_offset);
    }

    pub fn scroll_log_newer(&mut self) {
        self.log_offset = self.log_offset.saturating_sub(1);
    }

    pub fn log_offset(&self) -> usize {
        self.log_offset
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn enemy_attack_power(&self) -> u32 {
        match self.current_enemy().attack_power {
            0 => self.tuning.fallback_enemy_attack,
            atk => atk,
        }
    }

    /// Apply the current enemy's attack to the player. Returns hp lost.
    fn apply_enemy_damage(&mut self, ctx: &mut GameContext) -> u32 {
        let lost = ctx.player.take_damage(self.enemy_attack_power());
        self.player_hp.set_target(ctx.player.hp);
        lost
    }

    fn punish_wrong_answer(&mut self, ctx: &mut GameContext, challenge: &Challenge) -> AnswerOutcome {
        self.wrong.push(challenge.clone());
        ctx.collection.review_queue.enqueue(challenge.id.clone());

        let damage_taken = self.apply_enemy_damage(ctx);
        let player_defeated = !ctx.player.is_alive();
        if player_defeated {
            self.begin_defeat(ctx, self.tuning.defeat_after_answer_delay);
        }
        AnswerOutcome::Missed {
            damage_taken,
            player_defeated,
        }
    }

    fn clear_review(&mut self, ctx: &mut GameContext, challenge: &Challenge) {
        if self.clears_reviews && ctx.collection.review_queue.remove(&challenge.id) {
            self.log.push(format!("「{}」 reviewed!", challenge.text));
        }
    }

    fn grant_experience(&mut self, ctx: &mut GameContext, amount: u64) {
        if let Some(level_up) = ctx.player.grant_experience(amount) {
            self.log.push(format!(
                "{} reached level {}!",
                ctx.player_name, level_up.new_level
            ));
            self.player_hp.set_target(ctx.player.hp);
        }
    }

    fn pass_turn_to_enemy(&mut self) {
        self.input.clear();
        self.turn_owner = TurnOwner::Enemy;
        self.phase = BattlePhase::EnemyTurnPending;
        self.scheduler
            .schedule(TurnStep::EnemyAttack, self.tuning.enemy_turn_delay);
    }

    fn return_turn_to_player(&mut self) {
        self.turn_owner = TurnOwner::Player;
        self.input_enabled = true;
        self.phase = BattlePhase::AwaitingPlayerInput;
    }

    fn on_enemy_defeated(&mut self, ctx: &mut GameContext) {
        let idx = self.current_enemy_index;
        let enemy_id = self.enemies[idx].id.clone();
        self.log.push(format!(
            "{} defeated {}!",
            ctx.player_name, self.enemies[idx].name
        ));
        ctx.play_sound(SoundEffect::Defeat);
        self.animation = EnemyAnimation::Defeat(ENEMY_DEFEAT_ANIM_FRAMES);
        ctx.collection.monster_dex.record_collected(enemy_id);
        self.grant_experience(ctx, self.tuning.exp_enemy_defeat);
        self.enemies_defeated += 1;

        if idx + 1 < self.enemies.len() {
            self.scheduler
                .schedule(TurnStep::AdvanceEnemy, self.tuning.defeat_advance_delay);
        } else {
            self.phase = BattlePhase::Victory;
            self.scheduler
                .schedule(TurnStep::StageClear, self.tuning.defeat_advance_delay);
        }
    }

    fn begin_defeat(&mut self, ctx: &GameContext, delay: f64) {
        self.phase = BattlePhase::Defeat;
        self.input_enabled = false;
        self.log.push(format!("{} collapsed...", ctx.player_name));
        self.scheduler.schedule(TurnStep::SignalDefeat, delay);
    }

    fn run_step(&mut self, ctx: &mut GameContext, step: TurnStep) {
        tracing::debug!(?step, stage = %self.stage_id, "turn step fired");
        match step {
            TurnStep::AdvanceEnemy => {
                self.input.clear();
                self.current_enemy_index += 1;
                self.spawn_enemy(ctx);
                self.draw_challenge(ctx);
                self.return_turn_to_player();
            }
            TurnStep::StageClear => {
                self.input.clear();
                self.finish(ctx, true);
            }
            TurnStep::EnemyAttack => self.resolve_enemy_attack(ctx),
            TurnStep::ReturnTurn => self.return_turn_to_player(),
            TurnStep::SignalDefeat => self.finish(ctx, false),
        }
    }

    fn resolve_enemy_attack(&mut self, ctx: &mut GameContext) {
        self.animation = EnemyAnimation::Attack(ENEMY_ATTACK_ANIM_FRAMES);
        let atk = self.enemy_attack_power();
        self.log.push(format!(
            "{} attacks! {} takes {} damage!",
            self.current_enemy().name,
            ctx.player_name,
            atk
        ));
        self.apply_enemy_damage(ctx);
        ctx.play_sound(SoundEffect::Damage);

        if !ctx.player.is_alive() {
            self.begin_defeat(ctx, self.tuning.defeat_after_attack_delay);
            return;
        }

        self.draw_challenge(ctx);
        self.phase = BattlePhase::EnemyTurnResolved;
        self.scheduler
            .schedule(TurnStep::ReturnTurn, self.tuning.return_turn_delay);
    }

    fn spawn_enemy(&mut self, ctx: &mut GameContext) {
        let name = self.current_enemy().name.clone();
        self.log.push(format!("{} appeared!", name));
        ctx.play_sound(SoundEffect::Appear);
    }

    fn draw_challenge(&mut self, ctx: &mut GameContext) {
        let idx = ctx.rng.gen_range(0..self.challenge_pool.len());
        self.current_challenge = self.challenge_pool[idx].clone();
        self.show_hint = false;
        self.log
            .push(format!("Read 「{}」!", self.current_challenge.text));
    }

    fn finish(&mut self, ctx: &mut GameContext, victory: bool) {
        ctx.last_report = Some(BattleReport {
            stage_id: self.stage_id.clone(),
            victory,
            enemies_defeated: self.enemies_defeated,
            correct: self.correct.clone(),
            wrong: self.wrong.clone(),
        });

        if victory {
            tracing::info!(stage = %self.stage_id, "stage cleared");
            if let Some(callback) = self.on_complete.take() {
                callback(ctx);
            }
        } else {
            tracing::info!(stage = %self.stage_id, "player defeated");
            if let Some(callback) = self.on_defeat.take() {
                callback(ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::{ChallengeTemplate, EnemyTemplate, ReadingKind, StageCatalog, StageInfo};
    use std::cell::Cell;
    use std::rc::Rc;

    fn catalog(enemies: &[(u32, u32)], weakness: ReadingKind) -> StageCatalog {
        let enemy_templates: Vec<EnemyTemplate> = enemies
            .iter()
            .enumerate()
            .map(|(i, &(hp, atk))| EnemyTemplate {
                id: format!("e{}", i),
                name: format!("Enemy {}", i),
                level: 1,
                max_hp: hp,
                attack_power: atk,
            })
            .collect();
        let stage = StageInfo {
            id: "s1".to_string(),
            name: "Test".to_string(),
            grade: 1,
            enemy_ids: enemy_templates.iter().map(|e| e.id.clone()).collect(),
            challenge_ids: vec!["k-yama".to_string()],
        };
        let kanji = ChallengeTemplate {
            id: "k-yama".to_string(),
            text: "山".to_string(),
            onyomi: vec!["サン".to_string()],
            kunyomi: vec!["やま".to_string()],
            weakness,
            meaning: "mountain".to_string(),
            stroke_count: 3,
        };
        StageCatalog::from_parts(vec![stage], enemy_templates, vec![kanji])
    }

    fn start(
        enemies: &[(u32, u32)],
        damage: u32,
        ctx: &mut GameContext,
    ) -> BattleSession {
        let source = catalog(enemies, ReadingKind::Kunyomi);
        BattleSession::start(
            "s1",
            &source,
            BattleTuning::default().with_fixed_damage(damage),
            ctx,
        )
        .unwrap()
    }

    #[test]
    fn test_session_starts_on_player_turn() {
        let mut ctx = GameContext::with_seed(1);
        ctx.player.hp = 40;
        let session = start(&[(10, 5)], 4, &mut ctx);

        assert_eq!(session.turn_owner(), TurnOwner::Player);
        assert!(session.input_enabled());
        assert_eq!(session.current_enemy_index(), 0);
        assert_eq!(session.phase(), BattlePhase::AwaitingPlayerInput);
        assert_eq!(ctx.player.hp, ctx.player.max_hp);
        assert_eq!(session.log()[0], "Enemy 0 appeared!");
    }

    #[test]
    fn test_submission_ignored_during_enemy_turn() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 5)], 1, &mut ctx);

        assert!(session.submit_answer(&mut ctx, "さん").is_some());
        assert_eq!(session.turn_owner(), TurnOwner::Enemy);
        assert!(session.submit_answer(&mut ctx, "さん").is_none());
        assert!(session.heal(&mut ctx, "さん").is_none());
        assert_eq!(session.current_enemy().hp, 49);
    }

    #[test]
    fn test_weakness_multiplies_damage() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 5)], 4, &mut ctx);

        let outcome = session.submit_answer(&mut ctx, "ヤマ").unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome::Hit {
                damage: 6,
                combo_bonus: false,
                weakness_hit: true,
                enemy_defeated: false
            }
        );
        assert_eq!(session.current_enemy().hp, 44);
    }

    #[test]
    fn test_hint_does_not_consume_turn() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 5)], 4, &mut ctx);

        assert!(session.toggle_hint());
        assert!(session.accepts_input());
        assert_eq!(session.log().last().unwrap(), "Hint: mountain");
        assert!(!session.toggle_hint());
        assert_eq!(session.turn_owner(), TurnOwner::Player);
    }

    #[test]
    fn test_heal_restores_capped_hp() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 5)], 4, &mut ctx);
        ctx.player.hp = 85;

        let outcome = session.heal(&mut ctx, "やま").unwrap();
        assert_eq!(outcome, AnswerOutcome::Healed { amount: 15 });
        assert_eq!(ctx.player.hp, 100);
        assert_eq!(session.turn_owner(), TurnOwner::Enemy);
        assert_eq!(session.current_enemy().hp, 50);
    }

    #[test]
    fn test_failed_heal_costs_enemy_attack() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 7)], 4, &mut ctx);

        let outcome = session.heal(&mut ctx, "かわ").unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome::Missed {
                damage_taken: 7,
                player_defeated: false
            }
        );
        assert_eq!(ctx.player.hp, 93);
        assert!(ctx.collection.review_queue.iter().any(|id| id == "k-yama"));
    }

    #[test]
    fn test_zero_attack_uses_fallback() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 0)], 4, &mut ctx);

        session.submit_answer(&mut ctx, "wrong");
        assert_eq!(ctx.player.hp, 95);
    }

    #[test]
    fn test_cancel_drops_pending_steps_and_callbacks() {
        let mut ctx = GameContext::with_seed(1);
        let completed = Rc::new(Cell::new(false));
        let flag = completed.clone();
        let mut session = start(&[(1, 5)], 4, &mut ctx).on_complete(move |_| flag.set(true));

        session.submit_answer(&mut ctx, "やま");
        assert_eq!(session.pending_step(), Some(TurnStep::StageClear));
        assert_ne!(session.animation(), EnemyAnimation::None);

        session.cancel();
        assert_eq!(session.pending_step(), None);
        assert_eq!(session.animation(), EnemyAnimation::None);

        session.update(&mut ctx, 5.0);
        assert!(!completed.get());
    }

    #[test]
    fn test_animation_runs_while_step_pending() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 5)], 4, &mut ctx);

        session.submit_answer(&mut ctx, "さん");
        assert_eq!(session.animation(), EnemyAnimation::Damage(10));
        session.update(&mut ctx, 0.1);
        assert_eq!(session.animation(), EnemyAnimation::Damage(9));
        assert_eq!(session.pending_step(), Some(TurnStep::EnemyAttack));
        assert_eq!(session.turn_owner(), TurnOwner::Enemy);
    }

    #[test]
    fn test_log_scrolling_is_clamped() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 5)], 4, &mut ctx);
        for _ in 0..6 {
            session.toggle_hint();
        }
        let len = session.log().len();
        assert_eq!(session.visible_log(4).len(), 4);
        assert_eq!(session.visible_log(4).last(), session.log().last());

        for _ in 0..100 {
            session.scroll_log_older(4);
        }
        assert_eq!(session.log_offset(), len - 4);
        assert_eq!(session.visible_log(4)[0], session.log()[0]);

        session.scroll_log_newer();
        assert_eq!(session.log_offset(), len - 5);
    }

    #[test]
    fn test_enter_repeats_last_command() {
        let mut ctx = GameContext::with_seed(1);
        let mut session = start(&[(50, 5)], 4, &mut ctx);
        ctx.player.hp = 50;

        for c in "やま".chars() {
            session.push_char(c);
        }
        session.last_command = BattleCommand::Heal;
        let outcome = session.repeat_last_command(&mut ctx).unwrap();
        assert_eq!(outcome, AnswerOutcome::Healed { amount: 30 });
        assert_eq!(session.input(), "");
    }

    #[test]
    fn test_unknown_stage_rejected() {
        let mut ctx = GameContext::with_seed(1);
        let source = catalog(&[(10, 5)], ReadingKind::Onyomi);
        let result = BattleSession::start("missing", &source, BattleTuning::default(), &mut ctx);
        assert!(matches!(result, Err(BattleError::UnknownStage(_))));
    }
}
