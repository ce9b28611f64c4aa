//! Battle types: enemies, challenges, turn/phase enums, animations.

use crate::core::normalize::{normalize, normalize_reading_list};
use crate::stages::{ChallengeTemplate, EnemyTemplate, ReadingKind};
use std::collections::BTreeSet;

/// An enemy in the session's queue. `hp` is only changed by the battle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack_power: u32,
}

impl Enemy {
    pub fn new(id: &str, name: &str, max_hp: u32, attack_power: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            level: 1,
            hp: max_hp,
            max_hp,
            attack_power,
        }
    }

    /// Copy a template into a fresh, full-hp enemy.
    pub fn from_template(template: &EnemyTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            level: template.level,
            hp: template.max_hp,
            max_hp: template.max_hp,
            attack_power: template.attack_power,
        }
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }
}

/// A kanji to read, with its readings already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub id: String,
    pub text: String,
    pub onyomi: Vec<String>,
    pub kunyomi: Vec<String>,
    pub accepted_readings: BTreeSet<String>,
    pub weakness: ReadingKind,
    pub meaning: String,
    pub stroke_count: u32,
}

impl Challenge {
    pub fn from_template(template: &ChallengeTemplate) -> Self {
        let onyomi = normalize_reading_list(&template.onyomi);
        let kunyomi = normalize_reading_list(&template.kunyomi);
        let accepted_readings = kunyomi.iter().chain(onyomi.iter()).cloned().collect();

        Self {
            id: template.id.clone(),
            text: template.text.clone(),
            onyomi,
            kunyomi,
            accepted_readings,
            weakness: template.weakness,
            meaning: template.meaning.clone(),
            stroke_count: template.stroke_count,
        }
    }

    /// True if the normalized answer is one of the accepted readings.
    pub fn accepts(&self, answer: &str) -> bool {
        !answer.is_empty() && self.accepted_readings.contains(answer)
    }

    /// Category of a normalized answer. Kun-yomi wins when a reading appears
    /// in both lists.
    pub fn reading_kind(&self, answer: &str) -> Option<ReadingKind> {
        if self.kunyomi.iter().any(|r| r == answer) {
            Some(ReadingKind::Kunyomi)
        } else if self.onyomi.iter().any(|r| r == answer) {
            Some(ReadingKind::Onyomi)
        } else {
            None
        }
    }

    /// "on: さん / kun: やま" style summary of the correct readings.
    pub fn reading_summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.onyomi.is_empty() {
            parts.push(format!("on: {}", self.onyomi.join(", ")));
        }
        if !self.kunyomi.is_empty() {
            parts.push(format!("kun: {}", self.kunyomi.join(", ")));
        }
        parts.join(" / ")
    }

    /// Does a raw (unnormalized) submission match?
    pub fn matches_raw(&self, raw: &str) -> bool {
        self.accepts(&normalize(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Correct,
    Incorrect,
}

/// Where the turn engine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitingPlayerInput,
    /// An answer was judged; waiting on the follow-up (e.g. next enemy).
    Resolving(AnswerKind),
    EnemyTurnPending,
    EnemyTurnResolved,
    Victory,
    Defeat,
}

impl BattlePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Player commands available on the battle screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattleCommand {
    #[default]
    Attack,
    Heal,
    Hint,
}

/// What a submitted answer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Hit {
        damage: u32,
        combo_bonus: bool,
        weakness_hit: bool,
        enemy_defeated: bool,
    },
    Healed {
        amount: u32,
    },
    Missed {
        damage_taken: u32,
        player_defeated: bool,
    },
}

/// Cosmetic enemy animation; counts down once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyAnimation {
    #[default]
    None,
    Damage(u32),
    Attack(u32),
    Defeat(u32),
}

impl EnemyAnimation {
    pub fn frames_remaining(&self) -> u32 {
        match *self {
            Self::None => 0,
            Self::Damage(n) | Self::Attack(n) | Self::Defeat(n) => n,
        }
    }

    /// Advance one frame; reaching zero returns to `None`.
    pub fn tick(&mut self) {
        *self = match *self {
            Self::None => Self::None,
            Self::Damage(n) if n > 1 => Self::Damage(n - 1),
            Self::Attack(n) if n > 1 => Self::Attack(n - 1),
            Self::Defeat(n) if n > 1 => Self::Defeat(n - 1),
            _ => Self::None,
        };
    }
}

/// Displayed player hp, easing toward the authoritative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHpGauge {
    pub display: u32,
    pub target: u32,
    pub animating: bool,
}

impl PlayerHpGauge {
    pub fn new(hp: u32) -> Self {
        Self {
            display: hp,
            target: hp,
            animating: false,
        }
    }

    pub fn set_target(&mut self, hp: u32) {
        self.target = hp;
        self.animating = self.display != hp;
    }

    pub fn tick(&mut self, step: u32) {
        if !self.animating {
            return;
        }
        if self.display.abs_diff(self.target) <= step {
            self.display = self.target;
            self.animating = false;
        } else if self.display < self.target {
            self.display += step;
        } else {
            self.display -= step;
        }
    }

    pub fn snap(&mut self) {
        self.display = self.target;
        self.animating = false;
    }
}

/// Summary of a finished session, kept for the result screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub stage_id: String,
    pub victory: bool,
    pub enemies_defeated: usize,
    pub correct: Vec<Challenge>,
    pub wrong: Vec<Challenge>,
}
