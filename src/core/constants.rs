// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 16; // ~60 FPS render/update tick
pub const SECONDS_PER_TICK: f64 = TICK_INTERVAL_MS as f64 / 1000.0;
pub const ENEMY_DEFEAT_ADVANCE_SECONDS: f64 = 0.5;
pub const ENEMY_TURN_DELAY_SECONDS: f64 = 1.0;
pub const RETURN_TURN_DELAY_SECONDS: f64 = 0.5;
pub const DEFEAT_AFTER_ANSWER_SECONDS: f64 = 0.5;
pub const DEFEAT_AFTER_ENEMY_ATTACK_SECONDS: f64 = 1.5;

// Damage resolution
pub const BASE_DAMAGE_MIN: u32 = 1;
pub const BASE_DAMAGE_MAX: u32 = 5;
pub const COMBO_THRESHOLD: u32 = 5;
pub const COMBO_DAMAGE_FACTOR: f64 = 1.5;
pub const WEAKNESS_DAMAGE_FACTOR: f64 = 1.5;
pub const FALLBACK_ENEMY_ATTACK: u32 = 5;
pub const HEAL_AMOUNT: u32 = 30;

// Experience rewards
pub const EXP_CORRECT_ANSWER: u64 = 3;
pub const EXP_COMBO_BONUS: u64 = 10;
pub const EXP_ENEMY_DEFEAT: u64 = 30;

// Leveling
pub const LEVEL_UP_MAX_HP_INCREMENT: u32 = 5;
pub const LEVEL_UP_NEXT_EXP_INCREMENT: u64 = 15;

// Initial player stats
pub const BASE_PLAYER_HP: u32 = 100;
pub const BASE_NEXT_LEVEL_EXP: u64 = 100;
pub const BASE_ATTACK_POWER: u32 = 10;
pub const BASE_HEAL_CHARGES: u32 = 3;

// Cosmetic animation (frames, decremented once per tick)
pub const ENEMY_DAMAGE_ANIM_FRAMES: u32 = 10;
pub const ENEMY_ATTACK_ANIM_FRAMES: u32 = 15;
pub const ENEMY_DEFEAT_ANIM_FRAMES: u32 = 30;
pub const PLAYER_HP_ANIM_STEP: u32 = 2;

// Battle log
pub const LOG_VISIBLE_LINES: usize = 4;

// Review battles
pub const REVIEW_STAGE_NAME: &str = "Review";
pub const REVIEW_MAX_ENEMIES: usize = 3;

// Settings
pub const DEFAULT_VOLUME: f32 = 1.0;
pub const VOLUME_STEP: f32 = 0.1;

// Save directory (under the user's home directory)
pub const SAVE_DIR_NAME: &str = ".kanji-battle";
