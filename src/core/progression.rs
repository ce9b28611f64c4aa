//! Player stats and experience/leveling rules.
//!
//! `PlayerStats` outlives any single battle; it is mutated by the battle
//! engine (hp) and by [`PlayerStats::grant_experience`] (exp, level, max hp).

use crate::core::constants::{
    BASE_ATTACK_POWER, BASE_HEAL_CHARGES, BASE_NEXT_LEVEL_EXP, BASE_PLAYER_HP,
    LEVEL_UP_MAX_HP_INCREMENT, LEVEL_UP_NEXT_EXP_INCREMENT,
};
use serde::{Deserialize, Serialize};

/// Long-lived player record. Invariant: `hp <= max_hp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: u32,
    pub max_hp: u32,
    pub level: u32,
    pub exp: u64,
    pub next_level_exp: u64,
    pub attack_power: u32,
    pub heal_charges: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            hp: BASE_PLAYER_HP,
            max_hp: BASE_PLAYER_HP,
            level: 1,
            exp: 0,
            next_level_exp: BASE_NEXT_LEVEL_EXP,
            attack_power: BASE_ATTACK_POWER,
            heal_charges: BASE_HEAL_CHARGES,
        }
    }
}

/// Outcome of a level-up, for logging and UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    pub new_max_hp: u32,
}

impl PlayerStats {
    /// Add experience, then run a single level-up check.
    ///
    /// At most one level is gained per call even if `amount` crosses several
    /// thresholds; leftover exp waits for the next grant.
    pub fn grant_experience(&mut self, amount: u64) -> Option<LevelUp> {
        self.exp += amount;

        if self.exp < self.next_level_exp {
            return None;
        }

        self.exp -= self.next_level_exp;
        self.level += 1;
        self.max_hp += LEVEL_UP_MAX_HP_INCREMENT;
        self.hp = self.max_hp;
        self.next_level_exp += LEVEL_UP_NEXT_EXP_INCREMENT;

        tracing::info!(level = self.level, max_hp = self.max_hp, "player leveled up");

        Some(LevelUp {
            new_level: self.level,
            new_max_hp: self.max_hp,
        })
    }

    /// Apply damage, flooring hp at 0. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        before - self.hp
    }

    /// Restore hp, capped at `max_hp`. Returns the hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = PlayerStats::default();
        assert_eq!(stats.hp, 100);
        assert_eq!(stats.max_hp, 100);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.exp, 0);
        assert_eq!(stats.next_level_exp, 100);
        assert_eq!(stats.heal_charges, 3);
    }

    #[test]
    fn test_grant_below_threshold() {
        let mut stats = PlayerStats::default();
        assert!(stats.grant_experience(99).is_none());
        assert_eq!(stats.exp, 99);
        assert_eq!(stats.level, 1);
    }

    #[test]
    fn test_exact_threshold_levels_up() {
        let mut stats = PlayerStats::default();
        let level_up = stats.grant_experience(100).unwrap();
        assert_eq!(level_up.new_level, 2);
        assert_eq!(stats.exp, 0);
        assert_eq!(stats.next_level_exp, 115);
    }

    #[test]
    fn test_level_up_restores_hp() {
        let mut stats = PlayerStats {
            hp: 12,
            ..PlayerStats::default()
        };
        stats.grant_experience(100);
        assert_eq!(stats.max_hp, 105);
        assert_eq!(stats.hp, 105);
    }

    #[test]
    fn test_large_grant_only_levels_once() {
        let mut stats = PlayerStats::default();
        // 250 crosses both 100 and 100+115, but only one level is granted
        stats.grant_experience(250);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.exp, 150);
        assert_eq!(stats.next_level_exp, 115);

        // The leftover is picked up by the next grant
        stats.grant_experience(0);
        assert_eq!(stats.level, 3);
        assert_eq!(stats.exp, 35);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut stats = PlayerStats {
            hp: 3,
            ..PlayerStats::default()
        };
        assert_eq!(stats.take_damage(10), 3);
        assert_eq!(stats.hp, 0);
        assert!(!stats.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut stats = PlayerStats {
            hp: 90,
            ..PlayerStats::default()
        };
        assert_eq!(stats.heal(30), 10);
        assert_eq!(stats.hp, 100);
    }
}
