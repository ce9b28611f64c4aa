//! Damage rolls and the combo counter.
//!
//! Bonuses are applied base -> combo -> weakness, flooring after each
//! multiplication.

use crate::core::config::BattleTuning;
use rand::Rng;
use std::ops::RangeInclusive;

/// Roll a base damage value uniformly from the range.
pub fn roll_base_damage(range: &RangeInclusive<u32>, rng: &mut impl Rng) -> u32 {
    rng.gen_range(range.clone())
}

fn scale_floor(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).floor() as u32
}

/// Apply the combo and weakness multipliers to a base roll.
pub fn apply_bonuses(base: u32, combo_bonus: bool, weakness_hit: bool, tuning: &BattleTuning) -> u32 {
    let mut damage = base;
    if combo_bonus {
        damage = scale_floor(damage, tuning.combo_factor);
    }
    if weakness_hit {
        damage = scale_floor(damage, tuning.weakness_factor);
    }
    damage
}

/// Correct answers since the last payout. Misses leave the count alone;
/// only paying out at the threshold (or a new session) clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboCounter {
    count: u32,
}

impl ComboCounter {
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Count a correct answer. Returns true when this answer completes the
    /// combo; the counter is then back at 0.
    pub fn register_hit(&mut self, threshold: u32) -> bool {
        self.count += 1;
        if self.count >= threshold {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let range = 1..=5;
        for _ in 0..1000 {
            let roll = roll_base_damage(&range, &mut rng);
            assert!((1..=5).contains(&roll));
        }
    }

    #[test]
    fn test_roll_covers_whole_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let range = 1..=5;
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[(roll_base_damage(&range, &mut rng) - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_fixed_range_roll() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(roll_base_damage(&(4..=4), &mut rng), 4);
    }

    #[test]
    fn test_no_bonus() {
        let tuning = BattleTuning::default();
        assert_eq!(apply_bonuses(4, false, false, &tuning), 4);
    }

    #[test]
    fn test_single_bonus_floors() {
        let tuning = BattleTuning::default();
        assert_eq!(apply_bonuses(3, true, false, &tuning), 4);
        assert_eq!(apply_bonuses(3, false, true, &tuning), 4);
        assert_eq!(apply_bonuses(1, false, true, &tuning), 1);
    }

    #[test]
    fn test_stacked_bonus_floors_after_each_step() {
        let tuning = BattleTuning::default();
        // 5 -> floor(7.5)=7 -> floor(10.5)=10, not floor(5*2.25)=11
        assert_eq!(apply_bonuses(5, true, true, &tuning), 10);
        // 3 -> 4 -> 6
        assert_eq!(apply_bonuses(3, true, true, &tuning), 6);
    }

    #[test]
    fn test_combo_pays_on_fifth_and_restarts() {
        let mut combo = ComboCounter::default();
        for expected in 1..=4 {
            assert!(!combo.register_hit(5));
            assert_eq!(combo.count(), expected);
        }
        assert!(combo.register_hit(5));
        assert_eq!(combo.count(), 0);
        assert!(!combo.register_hit(5));
        assert_eq!(combo.count(), 1);
    }
}
