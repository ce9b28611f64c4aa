//! Stage, enemy and kanji templates as supplied by the stage-data source.
//!
//! Templates are never mutated by the battle engine; a session copies what it
//! needs into its own enemy queue and challenges.

use serde::{Deserialize, Serialize};

/// Reading category of a kanji. A challenge declares one as its weakness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingKind {
    Onyomi,
    Kunyomi,
}

impl ReadingKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Onyomi => "on",
            Self::Kunyomi => "kun",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageInfo {
    pub id: String,
    pub name: String,
    pub grade: u8,
    pub enemy_ids: Vec<String>,
    pub challenge_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(alias = "hp")]
    pub max_hp: u32,
    #[serde(alias = "atk")]
    pub attack_power: u32,
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeTemplate {
    pub id: String,
    /// The kanji itself.
    #[serde(alias = "kanji")]
    pub text: String,
    /// On-yomi, usually katakana. Entries may hold several space-separated readings.
    #[serde(default)]
    pub onyomi: Vec<String>,
    /// Kun-yomi, usually hiragana.
    #[serde(default)]
    pub kunyomi: Vec<String>,
    pub weakness: ReadingKind,
    #[serde(default)]
    pub meaning: String,
    #[serde(default, alias = "strokes")]
    pub stroke_count: u32,
}
