//! Events emitted by screens and the battle engine for outside collaborators
//! (navigation, audio).

use serde::{Deserialize, Serialize};

/// Optional argument passed to a screen's `enter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenArg {
    /// User-facing notice shown by the receiving screen (recoverable redirects).
    Notice(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    Appear,
    Attack,
    Damage,
    Heal,
    Correct,
    Wrong,
    Decide,
    Cancel,
    Defeat,
    Victory,
}

impl SoundEffect {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Appear => "appear",
            Self::Attack => "attack",
            Self::Damage => "damage",
            Self::Heal => "heal",
            Self::Correct => "correct",
            Self::Wrong => "wrong",
            Self::Decide => "decide",
            Self::Cancel => "cancel",
            Self::Defeat => "defeat",
            Self::Victory => "victory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicTrack {
    Title,
    Battle,
    Victory,
}

impl MusicTrack {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Battle => "battle",
            Self::Victory => "victory",
        }
    }
}

/// Something a collaborator outside the core should act on.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ChangeScreen {
        name: String,
        arg: Option<ScreenArg>,
    },
    PlaySound(SoundEffect),
    PlayMusic(MusicTrack),
}
