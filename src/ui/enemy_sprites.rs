//! Enemy sprite art for the battle scene.

use std::collections::HashSet;

pub struct EnemySprite {
    pub art: &'static str,
    pub height: u16,
}

impl EnemySprite {
    pub const fn new(art: &'static str, height: u16) -> Self {
        Self { art, height }
    }
}

// ── Sprite archetypes ───────────────────────────────────────────────

pub const SPRITE_BEAST: EnemySprite = EnemySprite::new(
    r"   ╱▲      ▲╲
  │ ●  ╱╲  ● │
  │   ╱▼▼╲   │
   ╲▐██████▌╱
    ╱╱ ╲╱ ╲╲
   ╰╯      ╰╯",
    6,
);

pub const SPRITE_BIRD: EnemySprite = EnemySprite::new(
    r"    ╱◉  ◉╲
 ╱══╡  ▼  ╞══╲
╱   │▓▓▓▓▓│   ╲
    ╰┬───┬╯
     ╯   ╰",
    5,
);

pub const SPRITE_SHELL: EnemySprite = EnemySprite::new(
    r" ╭╮  ◆  ◆  ╭╮
 ╰╯╲ ╭──╮ ╱╰╯
   ╱▒▒▒▒▒▒╲
  ╱╱ ╱  ╲ ╲╲",
    4,
);

pub const SPRITE_YOKAI: EnemySprite = EnemySprite::new(
    r"     ╱▓▓╲
    │ ●  ● │
    ╰┬ ══ ┬╯
   ╱─┤████├─╲
     │████│
     ╱    ╲",
    6,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteArchetype {
    Beast,
    Bird,
    Shell,
    Yokai,
}

impl SpriteArchetype {
    pub fn sprite(&self) -> &'static EnemySprite {
        match self {
            Self::Beast => &SPRITE_BEAST,
            Self::Bird => &SPRITE_BIRD,
            Self::Shell => &SPRITE_SHELL,
            Self::Yokai => &SPRITE_YOKAI,
        }
    }
}

/// Art for the built-in enemies. Catalog overrides may bring enemies with
/// no art; those get a name box instead.
pub fn archetype_for_enemy(enemy_id: &str) -> Option<SpriteArchetype> {
    match enemy_id {
        "hkd-01" | "hkd-03" | "hkd-04" => Some(SpriteArchetype::Beast),
        "hkd-02" => Some(SpriteArchetype::Bird),
        "hkd-05" => Some(SpriteArchetype::Shell),
        "thk-01" | "thk-02" => Some(SpriteArchetype::Yokai),
        _ => None,
    }
}

/// Sprite lookup that reports each missing sprite only once.
#[derive(Default)]
pub struct SpriteBook {
    reported_missing: HashSet<String>,
}

impl SpriteBook {
    pub fn sprite_for(&mut self, enemy_id: &str) -> Option<&'static EnemySprite> {
        let sprite = archetype_for_enemy(enemy_id).map(|a| a.sprite());
        if sprite.is_none() && self.reported_missing.insert(enemy_id.to_string()) {
            tracing::debug!(enemy = enemy_id, "no sprite for enemy, drawing name box");
        }
        sprite
    }
}
