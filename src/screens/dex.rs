use super::{names, Screen, ScreenInput};
use crate::core::context::GameContext;
use crate::core::events::{ScreenArg, SoundEffect};
use crate::stages::StageCatalog;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexKind {
    Kanji,
    Monster,
}

impl DexKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Kanji => "Kanji Dex",
            Self::Monster => "Monster Dex",
        }
    }
}

/// One catalog row as shown in a dex. Details are hidden until collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DexEntry {
    pub id: String,
    pub label: String,
    pub detail: String,
    pub collected: bool,
}

pub struct DexScreen {
    kind: DexKind,
    stages: Rc<StageCatalog>,
    scroll: usize,
}

impl DexScreen {
    pub fn new(kind: DexKind, stages: Rc<StageCatalog>) -> Self {
        Self {
            kind,
            stages,
            scroll: 0,
        }
    }

    pub fn kind(&self) -> DexKind {
        self.kind
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Every catalog entry of this dex's kind, in catalog order.
    pub fn entries(&self, ctx: &GameContext) -> Vec<DexEntry> {
        match self.kind {
            DexKind::Kanji => self
                .stages
                .challenge_list()
                .iter()
                .map(|kanji| {
                    let collected = ctx.collection.kanji_dex.contains(&kanji.id);
                    DexEntry {
                        id: kanji.id.clone(),
                        label: if collected { kanji.text.clone() } else { "？".to_string() },
                        detail: if collected {
                            format!(
                                "on: {} / kun: {} / {} ({} strokes)",
                                kanji.onyomi.join(", "),
                                kanji.kunyomi.join(", "),
                                kanji.meaning,
                                kanji.stroke_count
                            )
                        } else {
                            "???".to_string()
                        },
                        collected,
                    }
                })
                .collect(),
            DexKind::Monster => self
                .stages
                .enemy_list()
                .iter()
                .map(|enemy| {
                    let collected = ctx.collection.monster_dex.contains(&enemy.id);
                    DexEntry {
                        id: enemy.id.clone(),
                        label: if collected { enemy.name.clone() } else { "???".to_string() },
                        detail: if collected {
                            format!(
                                "Lv {}  HP {}  ATK {}",
                                enemy.level, enemy.max_hp, enemy.attack_power
                            )
                        } else {
                            String::new()
                        },
                        collected,
                    }
                })
                .collect(),
        }
    }

    /// (collected, total) for the header.
    pub fn progress(&self, ctx: &GameContext) -> (usize, usize) {
        let entries = self.entries(ctx);
        let collected = entries.iter().filter(|e| e.collected).count();
        (collected, entries.len())
    }

    fn total(&self) -> usize {
        match self.kind {
            DexKind::Kanji => self.stages.challenge_list().len(),
            DexKind::Monster => self.stages.enemy_list().len(),
        }
    }
}

impl Screen for DexScreen {
    fn enter(&mut self, _ctx: &mut GameContext, _arg: Option<ScreenArg>) {
        self.scroll = 0;
    }

    fn handle_input(&mut self, ctx: &mut GameContext, input: ScreenInput) {
        match input {
            ScreenInput::Up | ScreenInput::PageUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            ScreenInput::Down | ScreenInput::PageDown => {
                self.scroll = (self.scroll + 1).min(self.total().saturating_sub(1));
            }
            ScreenInput::Enter | ScreenInput::Escape => {
                ctx.play_sound(SoundEffect::Cancel);
                ctx.request_screen_change(names::STAGE_SELECT, None);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::builtin_catalog;

    #[test]
    fn test_only_collected_entries_revealed() {
        let catalog = Rc::new(builtin_catalog());
        let first_kanji = catalog.challenge_list()[0].clone();
        let screen = DexScreen::new(DexKind::Kanji, catalog.clone());

        let mut ctx = GameContext::with_seed(1);
        assert_eq!(screen.progress(&ctx).0, 0);

        ctx.collection.kanji_dex.record_collected(first_kanji.id.clone());
        let entries = screen.entries(&ctx);
        assert!(entries[0].collected);
        assert_eq!(entries[0].label, first_kanji.text);
        assert!(!entries[1].collected);
        assert_eq!(entries[1].detail, "???");
        assert_eq!(screen.progress(&ctx), (1, catalog.challenge_list().len()));
    }

    #[test]
    fn test_monster_dex_counts() {
        let catalog = Rc::new(builtin_catalog());
        let screen = DexScreen::new(DexKind::Monster, catalog.clone());
        let mut ctx = GameContext::with_seed(1);
        ctx.collection.monster_dex.record_collected("hkd-01".to_string());
        assert_eq!(screen.progress(&ctx), (1, catalog.enemy_list().len()));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let catalog = Rc::new(builtin_catalog());
        let total = catalog.enemy_list().len();
        let mut screen = DexScreen::new(DexKind::Monster, catalog);
        let mut ctx = GameContext::with_seed(1);
        for _ in 0..50 {
            screen.handle_input(&mut ctx, ScreenInput::Down);
        }
        assert_eq!(screen.scroll(), total - 1);
        screen.enter(&mut ctx, None);
        assert_eq!(screen.scroll(), 0);
    }
}
