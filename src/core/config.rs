//! Runtime configuration: battle tuning and persisted user settings.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Balance knobs for one battle session.
///
/// `Default` reproduces the shipped game. Tests narrow `damage_range` to pin
/// the damage roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleTuning {
    pub damage_range: RangeInclusive<u32>,
    pub combo_threshold: u32,
    pub combo_factor: f64,
    pub weakness_factor: f64,
    pub heal_amount: u32,
    pub fallback_enemy_attack: u32,
    pub exp_correct: u64,
    pub exp_combo_bonus: u64,
    pub exp_enemy_defeat: u64,
    pub defeat_advance_delay: f64,
    pub enemy_turn_delay: f64,
    pub return_turn_delay: f64,
    pub defeat_after_answer_delay: f64,
    pub defeat_after_attack_delay: f64,
}

impl Default for BattleTuning {
    fn default() -> Self {
        Self {
            damage_range: BASE_DAMAGE_MIN..=BASE_DAMAGE_MAX,
            combo_threshold: COMBO_THRESHOLD,
            combo_factor: COMBO_DAMAGE_FACTOR,
            weakness_factor: WEAKNESS_DAMAGE_FACTOR,
            heal_amount: HEAL_AMOUNT,
            fallback_enemy_attack: FALLBACK_ENEMY_ATTACK,
            exp_correct: EXP_CORRECT_ANSWER,
            exp_combo_bonus: EXP_COMBO_BONUS,
            exp_enemy_defeat: EXP_ENEMY_DEFEAT,
            defeat_advance_delay: ENEMY_DEFEAT_ADVANCE_SECONDS,
            enemy_turn_delay: ENEMY_TURN_DELAY_SECONDS,
            return_turn_delay: RETURN_TURN_DELAY_SECONDS,
            defeat_after_answer_delay: DEFEAT_AFTER_ANSWER_SECONDS,
            defeat_after_attack_delay: DEFEAT_AFTER_ENEMY_ATTACK_SECONDS,
        }
    }
}

impl BattleTuning {
    /// Same tuning with the damage roll pinned to a single value.
    pub fn with_fixed_damage(mut self, damage: u32) -> Self {
        self.damage_range = damage..=damage;
        self
    }
}

/// User-facing settings, persisted as `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bgm_volume: f32,
    pub se_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bgm_volume: DEFAULT_VOLUME,
            se_volume: DEFAULT_VOLUME,
        }
    }
}

impl Settings {
    pub fn set_bgm_volume(&mut self, value: f32) {
        self.bgm_volume = clamp_volume(value);
    }

    pub fn set_se_volume(&mut self, value: f32) {
        self.se_volume = clamp_volume(value);
    }

    pub fn adjust_bgm_volume(&mut self, delta: f32) {
        self.set_bgm_volume(self.bgm_volume + delta);
    }

    pub fn adjust_se_volume(&mut self, delta: f32) {
        self.set_se_volume(self.se_volume + delta);
    }
}

/// Clamp to 0.0..=1.0 and round to one decimal so repeated steps don't drift.
fn clamp_volume(value: f32) -> f32 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 10.0).round() / 10.0
}
