//! Built-in stage catalog.

use super::types::{ChallengeTemplate, EnemyTemplate, ReadingKind, StageInfo};
use super::StageCatalog;

fn kanji(
    id: &str,
    text: &str,
    onyomi: &[&str],
    kunyomi: &[&str],
    weakness: ReadingKind,
    meaning: &str,
    stroke_count: u32,
) -> ChallengeTemplate {
    ChallengeTemplate {
        id: id.to_string(),
        text: text.to_string(),
        onyomi: onyomi.iter().map(|s| s.to_string()).collect(),
        kunyomi: kunyomi.iter().map(|s| s.to_string()).collect(),
        weakness,
        meaning: meaning.to_string(),
        stroke_count,
    }
}

fn enemy(id: &str, name: &str, level: u32, max_hp: u32, attack_power: u32) -> EnemyTemplate {
    EnemyTemplate {
        id: id.to_string(),
        name: name.to_string(),
        level,
        max_hp,
        attack_power,
    }
}

fn stage(id: &str, name: &str, grade: u8, enemy_ids: &[&str], challenge_ids: &[&str]) -> StageInfo {
    StageInfo {
        id: id.to_string(),
        name: name.to_string(),
        grade,
        enemy_ids: enemy_ids.iter().map(|s| s.to_string()).collect(),
        challenge_ids: challenge_ids.iter().map(|s| s.to_string()).collect(),
    }
}

/// Returns the catalog shipped with the game.
pub fn builtin_catalog() -> StageCatalog {
    use ReadingKind::{Kunyomi, Onyomi};

    let challenges = vec![
        // Grade 1
        kanji("g1-yama", "山", &["サン"], &["やま"], Kunyomi, "mountain", 3),
        kanji("g1-kawa", "川", &["セン"], &["かわ"], Kunyomi, "river", 3),
        kanji("g1-ki", "木", &["ボク", "モク"], &["き"], Onyomi, "tree", 4),
        kanji("g1-hi", "火", &["カ"], &["ひ"], Onyomi, "fire", 4),
        kanji("g1-mizu", "水", &["スイ"], &["みず"], Kunyomi, "water", 4),
        kanji("g1-nichi", "日", &["ニチ", "ジツ"], &["ひ"], Onyomi, "sun, day", 4),
        kanji("g1-tsuki", "月", &["ゲツ", "ガツ"], &["つき"], Kunyomi, "moon, month", 4),
        kanji("g1-ue", "上", &["ジョウ"], &["うえ"], Kunyomi, "up, above", 3),
        kanji("g1-shita", "下", &["カ", "ゲ"], &["した"], Onyomi, "down, below", 3),
        kanji("g1-oo", "大", &["ダイ", "タイ"], &["おお"], Onyomi, "big", 3),
        kanji("g1-chii", "小", &["ショウ"], &["ちい", "こ"], Kunyomi, "small", 3),
        kanji("g1-naka", "中", &["チュウ"], &["なか"], Onyomi, "middle, inside", 4),
        kanji("g1-hito", "人", &["ジン", "ニン"], &["ひと"], Kunyomi, "person", 2),
        kanji("g1-kuchi", "口", &["コウ", "ク"], &["くち"], Onyomi, "mouth", 3),
        // Grade 2
        kanji("g2-sora", "空", &["クウ"], &["そら"], Kunyomi, "sky", 8),
        kanji("g2-umi", "海", &["カイ"], &["うみ"], Onyomi, "sea", 9),
        kanji("g2-yuki", "雪", &["セツ"], &["ゆき"], Kunyomi, "snow", 11),
        kanji("g2-hoshi", "星", &["セイ"], &["ほし"], Onyomi, "star", 9),
        kanji("g2-kaze", "風", &["フウ"], &["かぜ"], Kunyomi, "wind", 9),
    ];

    let enemies = vec![
        enemy("hkd-01", "Snow Fox", 1, 12, 4),
        enemy("hkd-02", "Frost Owl", 1, 15, 5),
        enemy("hkd-03", "Ice Bear", 2, 22, 6),
        enemy("hkd-04", "Drift Seal", 2, 18, 5),
        enemy("hkd-05", "Glacier Crab", 3, 26, 7),
        enemy("thk-01", "Mountain Tengu", 4, 30, 8),
        enemy("thk-02", "Storm Kappa", 4, 28, 9),
    ];

    let stages = vec![
        stage(
            "hokkaido_area1",
            "Hokkaido: Frozen Coast",
            1,
            &["hkd-01", "hkd-02", "hkd-03"],
            &["g1-yama", "g1-kawa", "g1-ki", "g1-hi", "g1-mizu", "g1-nichi", "g1-tsuki"],
        ),
        stage(
            "hokkaido_area2",
            "Hokkaido: Drift Ice Bay",
            1,
            &["hkd-04", "hkd-05"],
            &["g1-ue", "g1-shita", "g1-oo", "g1-chii", "g1-naka", "g1-hito", "g1-kuchi"],
        ),
        stage(
            "tohoku_area1",
            "Tohoku: Windy Peaks",
            2,
            &["thk-01", "thk-02"],
            &["g2-sora", "g2-umi", "g2-yuki", "g2-hoshi", "g2-kaze"],
        ),
    ];

    StageCatalog::from_parts(stages, enemies, challenges)
}
