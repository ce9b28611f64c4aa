//! The explicit game context handed to every screen and to the battle engine.
//!
//! Holds everything that lives longer than one screen: player stats,
//! settings, the collection records, the last battle report, the RNG, and the
//! outbox of events for audio/navigation collaborators.

use crate::battle::BattleReport;
use crate::collection::Collection;
use crate::core::config::Settings;
use crate::core::events::{GameEvent, MusicTrack, ScreenArg, SoundEffect};
use crate::core::progression::PlayerStats;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const DEFAULT_PLAYER_NAME: &str = "Player";

pub struct GameContext {
    pub player: PlayerStats,
    pub player_name: String,
    pub settings: Settings,
    pub collection: Collection,
    pub last_report: Option<BattleReport>,
    pub rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameContext {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self::with_rng(player_name.into(), StdRng::from_entropy())
    }

    /// Deterministic context for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(DEFAULT_PLAYER_NAME.to_string(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(player_name: String, rng: StdRng) -> Self {
        let player_name = match player_name.trim() {
            "" => DEFAULT_PLAYER_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        Self {
            player: PlayerStats::default(),
            player_name,
            settings: Settings::default(),
            collection: Collection::default(),
            last_report: None,
            rng,
            events: Vec::new(),
        }
    }

    pub fn request_screen_change(&mut self, name: impl Into<String>, arg: Option<ScreenArg>) {
        self.events.push(GameEvent::ChangeScreen {
            name: name.into(),
            arg,
        });
    }

    pub fn play_sound(&mut self, effect: SoundEffect) {
        self.events.push(GameEvent::PlaySound(effect));
    }

    pub fn play_music(&mut self, track: MusicTrack) {
        self.events.push(GameEvent::PlayMusic(track));
    }

    /// Pending events, oldest first, without removing them.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Remove and return every pending event.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove and return only the screen-change requests, leaving audio
    /// events queued for the host.
    pub fn drain_screen_requests(&mut self) -> Vec<(String, Option<ScreenArg>)> {
        let mut requests = Vec::new();
        self.events.retain(|event| match event {
            GameEvent::ChangeScreen { name, arg } => {
                requests.push((name.clone(), arg.clone()));
                false
            }
            _ => true,
        });
        requests
    }

    /// Wipe all progress: stats, collection, clears and the last report.
    /// Settings are kept.
    pub fn reset_progress(&mut self) {
        self.player = PlayerStats::default();
        self.collection = Collection::default();
        self.last_report = None;
        tracing::info!("progress reset");
    }
}
