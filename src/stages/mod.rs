//! Stage data: which enemies and kanji belong to which stage.
//!
//! The battle engine only talks to the [`StageSource`] trait; the game ships
//! a built-in catalog and can load a replacement from JSON.

mod data;
pub mod types;

pub use data::builtin_catalog;
pub use types::*;

/// Stage id of the generated review battle.
pub const REVIEW_STAGE_ID: &str = "reviewStage";

use crate::core::constants::{REVIEW_MAX_ENEMIES, REVIEW_STAGE_NAME};
use crate::core::error::StageDataError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Stage-data collaborator consulted when a battle session starts.
pub trait StageSource {
    fn stage_list(&self) -> &[StageInfo];

    fn stage(&self, stage_id: &str) -> Option<&StageInfo> {
        self.stage_list().iter().find(|s| s.id == stage_id)
    }

    /// Enemy templates for a stage, in fight order.
    fn enemies_by_stage(&self, stage_id: &str) -> Vec<EnemyTemplate>;

    /// Kanji templates for a stage, in catalog order.
    fn challenges_by_stage(&self, stage_id: &str) -> Vec<ChallengeTemplate>;

    fn enemy(&self, enemy_id: &str) -> Option<&EnemyTemplate>;

    fn challenge(&self, challenge_id: &str) -> Option<&ChallengeTemplate>;
}

/// In-memory stage catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCatalog {
    stages: Vec<StageInfo>,
    enemies: Vec<EnemyTemplate>,
    challenges: Vec<ChallengeTemplate>,
}

impl StageCatalog {
    pub fn from_parts(
        stages: Vec<StageInfo>,
        enemies: Vec<EnemyTemplate>,
        challenges: Vec<ChallengeTemplate>,
    ) -> Self {
        Self {
            stages,
            enemies,
            challenges,
        }
    }

    /// Parse and validate a catalog.
    pub fn from_json(json: &str) -> Result<Self, StageDataError> {
        let catalog: StageCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, StageDataError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject duplicate ids and stages that reference unknown entries.
    pub fn validate(&self) -> Result<(), StageDataError> {
        check_unique("stage", self.stages.iter().map(|s| s.id.as_str()))?;
        check_unique("enemy", self.enemies.iter().map(|e| e.id.as_str()))?;
        check_unique("kanji", self.challenges.iter().map(|c| c.id.as_str()))?;

        for stage in &self.stages {
            for id in &stage.enemy_ids {
                if self.enemy(id).is_none() {
                    return Err(StageDataError::UnknownReference {
                        stage: stage.id.clone(),
                        kind: "enemy",
                        id: id.clone(),
                    });
                }
            }
            for id in &stage.challenge_ids {
                if self.challenge(id).is_none() {
                    return Err(StageDataError::UnknownReference {
                        stage: stage.id.clone(),
                        kind: "kanji",
                        id: id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn enemy_list(&self) -> &[EnemyTemplate] {
        &self.enemies
    }

    pub fn challenge_list(&self) -> &[ChallengeTemplate] {
        &self.challenges
    }

    /// Stages of one grade; grade 0 means all stages.
    pub fn stages_for_grade(&self, grade: u8) -> Vec<&StageInfo> {
        self.stages
            .iter()
            .filter(|s| grade == 0 || s.grade == grade)
            .collect()
    }

    /// A one-stage catalog for reviewing missed kanji.
    ///
    /// The stage (`REVIEW_STAGE_ID`) holds the queued kanji still present in
    /// this catalog, in queue order. Its enemies are the first enemy of each
    /// stage that teaches one of them, up to `REVIEW_MAX_ENEMIES`.
    pub fn review_catalog<'a>(&self, queued: impl IntoIterator<Item = &'a str>) -> StageCatalog {
        let challenges: Vec<ChallengeTemplate> = queued
            .into_iter()
            .filter_map(|id| self.challenge(id).cloned())
            .collect();

        let mut enemy_ids: Vec<String> = Vec::new();
        for stage in &self.stages {
            let teaches_queued = stage
                .challenge_ids
                .iter()
                .any(|id| challenges.iter().any(|c| &c.id == id));
            if !teaches_queued {
                continue;
            }
            if let Some(first) = stage.enemy_ids.first() {
                if !enemy_ids.contains(first) {
                    enemy_ids.push(first.clone());
                }
            }
            if enemy_ids.len() >= REVIEW_MAX_ENEMIES {
                break;
            }
        }
        let enemies: Vec<EnemyTemplate> = enemy_ids
            .iter()
            .filter_map(|id| self.enemy(id).cloned())
            .collect();

        let stage = StageInfo {
            id: REVIEW_STAGE_ID.to_string(),
            name: REVIEW_STAGE_NAME.to_string(),
            grade: 0,
            enemy_ids,
            challenge_ids: challenges.iter().map(|c| c.id.clone()).collect(),
        };
        StageCatalog::from_parts(vec![stage], enemies, challenges)
    }
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), StageDataError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StageDataError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

impl StageSource for StageCatalog {
    fn stage_list(&self) -> &[StageInfo] {
        &self.stages
    }

    fn enemies_by_stage(&self, stage_id: &str) -> Vec<EnemyTemplate> {
        self.stage(stage_id)
            .map(|stage| {
                stage
                    .enemy_ids
                    .iter()
                    .filter_map(|id| self.enemy(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn challenges_by_stage(&self, stage_id: &str) -> Vec<ChallengeTemplate> {
        self.stage(stage_id)
            .map(|stage| {
                stage
                    .challenge_ids
                    .iter()
                    .filter_map(|id| self.challenge(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn enemy(&self, enemy_id: &str) -> Option<&EnemyTemplate> {
        self.enemies.iter().find(|e| e.id == enemy_id)
    }

    fn challenge(&self, challenge_id: &str) -> Option<&ChallengeTemplate> {
        self.challenges.iter().find(|c| c.id == challenge_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "stages": [
            {"id": "s1", "name": "First", "grade": 1, "enemyIds": ["e1"], "challengeIds": ["k1"]}
        ],
        "enemies": [
            {"id": "e1", "name": "Slime", "maxHp": 10, "atk": 5}
        ],
        "challenges": [
            {"id": "k1", "kanji": "山", "onyomi": ["サン"], "kunyomi": ["やま"],
             "weakness": "kunyomi", "meaning": "mountain", "strokes": 3}
        ]
    }"#;

    #[test]
    fn test_from_json_parses_aliases() {
        let catalog = StageCatalog::from_json(SAMPLE).unwrap();
        let enemies = catalog.enemies_by_stage("s1");
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].attack_power, 5);
        assert_eq!(enemies[0].level, 1);

        let kanji = catalog.challenges_by_stage("s1");
        assert_eq!(kanji[0].text, "山");
        assert_eq!(kanji[0].stroke_count, 3);
        assert_eq!(kanji[0].weakness, ReadingKind::Kunyomi);
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let json = SAMPLE.replace(r#""challengeIds": ["k1"]"#, r#""challengeIds": ["k9"]"#);
        let err = StageCatalog::from_json(&json).unwrap_err();
        assert!(matches!(err, StageDataError::UnknownReference { kind: "kanji", .. }));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = builtin_catalog();
        let first = catalog.enemies[0].clone();
        catalog.enemies.push(first);
        assert!(matches!(
            catalog.validate(),
            Err(StageDataError::DuplicateId { kind: "enemy", .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            StageCatalog::from_json("[]"),
            Err(StageDataError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_stage_yields_empty_lists() {
        let catalog = builtin_catalog();
        assert!(catalog.enemies_by_stage("nowhere").is_empty());
        assert!(catalog.challenges_by_stage("nowhere").is_empty());
    }

    #[test]
    fn test_stages_for_grade() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.stages_for_grade(0).len(), 3);
        assert_eq!(catalog.stages_for_grade(1).len(), 2);
        assert_eq!(catalog.stages_for_grade(2).len(), 1);
        assert!(catalog.stages_for_grade(6).is_empty());
    }

    #[test]
    fn test_review_catalog_follows_queue() {
        let catalog = builtin_catalog();
        let review = catalog.review_catalog(["g2-umi", "g1-yama", "g9-gone", "g1-kawa"]);

        let kanji: Vec<String> = review
            .challenges_by_stage(REVIEW_STAGE_ID)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(kanji, vec!["g2-umi", "g1-yama", "g1-kawa"]);

        let enemies: Vec<String> = review
            .enemies_by_stage(REVIEW_STAGE_ID)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(enemies, vec!["hkd-01", "thk-01"]);
        assert!(review.validate().is_ok());
    }

    #[test]
    fn test_review_catalog_of_nothing_is_empty() {
        let review = builtin_catalog().review_catalog(std::iter::empty());
        assert_eq!(review.stage_list().len(), 1);
        assert!(review.challenges_by_stage(REVIEW_STAGE_ID).is_empty());
        assert!(review.enemies_by_stage(REVIEW_STAGE_ID).is_empty());
    }
}
