//! Buff tables for generated enemies and weapons.
//!
//! Every magnitude in these tables scales with the spawn factor
//! (`level + 1`), so the same archetype stays threatening as a run goes on.
//! Elite epithets are fixed strings; common enemy descriptions are rendered
//! from the delta itself so text and effect cannot drift apart.

use crate::card::attributes::{AttackDirection, AttackType, BuffDelta};

/// A buff paired with its display text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EnemyBuff {
    pub buff: BuffDelta,
    pub epithet: String,
}

/// The elite buff list for the given spawn factor.
///
/// The generator walks this list with a rotating cursor rather than drawing
/// at random, so every entry appears once per cycle and no entry repeats
/// back-to-back.
pub(crate) fn elite_buffs(factor: i32) -> Vec<EnemyBuff> {
    vec![
        EnemyBuff {
            buff: BuffDelta {
                attack_direction: Some(AttackDirection::Around),
                health: Some(2 * factor),
                ..BuffDelta::default()
            },
            epithet: "\"Whirlstriker\"\nRange: around".to_string(),
        },
        EnemyBuff {
            buff: BuffDelta {
                attack_direction: Some(AttackDirection::Cross),
                attack: Some(2 * factor),
                health: Some(factor),
                ..BuffDelta::default()
            },
            epithet: "\"Spearman\"\nRange: cross".to_string(),
        },
        EnemyBuff {
            buff: BuffDelta {
                hit_back: Some(3 * factor),
                health: Some(2 * factor),
                ..BuffDelta::default()
            },
            epithet: format!("\"Counterstriker\"\nHit back: {}", 3 * factor),
        },
        EnemyBuff {
            buff: BuffDelta {
                shield: Some(4 * factor),
                ..BuffDelta::default()
            },
            epithet: format!("\"Guardian\"\nShield: {}", 4 * factor),
        },
        EnemyBuff {
            buff: BuffDelta {
                attack_type: Some(AttackType::Penetrate),
                attack: Some(2 * factor),
                ..BuffDelta::default()
            },
            epithet: "\"Penetrator\"\nPenetrate shield".to_string(),
        },
        EnemyBuff {
            buff: BuffDelta {
                attack_direction: Some(AttackDirection::Around),
                attack_type: Some(AttackType::Penetrate),
                shield: Some(5 * factor),
                ..BuffDelta::default()
            },
            epithet: "\"Stormpiercer\"\nPenetrate, around".to_string(),
        },
    ]
}

/// The common enemy buff list for the given spawn factor.
///
/// Each entry trades one strength for one weakness; the generator picks
/// uniformly among them.
pub(crate) fn common_buffs(factor: i32) -> Vec<EnemyBuff> {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let half_factor_malus = (-0.5 * factor as f32).floor() as i32;
    let deltas = [
        BuffDelta {
            shield: Some(2 * factor),
            health: Some(-2 * factor),
            ..BuffDelta::default()
        },
        BuffDelta {
            health: Some(factor),
            attack: Some(half_factor_malus),
            ..BuffDelta::default()
        },
        BuffDelta {
            critical: Some(0.05 * factor as f32),
            health: Some(-2 * factor),
            ..BuffDelta::default()
        },
        BuffDelta {
            attack: Some(factor),
            hit_rate: Some(-0.2),
            ..BuffDelta::default()
        },
    ];
    deltas
        .into_iter()
        .map(|buff| EnemyBuff {
            epithet: buff.describe(),
            buff,
        })
        .collect()
}

/// A generated item's stat line: buff, duration, and carry weight.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ItemSpec {
    pub buff: BuffDelta,
    pub duration: i32,
    pub weight: i32,
}

/// The weapon archetype list for the given spawn factor.
///
/// `bow_direction` is the pre-rolled area pattern for the bow entry; the
/// rest of the list is fixed.
pub(crate) fn weapon_archetypes(factor: i32, bow_direction: AttackDirection) -> Vec<ItemSpec> {
    vec![
        // Sword: heavy swings, poor crits.
        ItemSpec {
            buff: BuffDelta {
                attack: Some(2 * factor),
                critical: Some(-0.1),
                ..BuffDelta::default()
            },
            duration: 2,
            weight: 2,
        },
        // Dagger: light but vicious.
        ItemSpec {
            buff: BuffDelta {
                attack: Some(factor),
                critical: Some(0.2),
                ..BuffDelta::default()
            },
            duration: 2,
            weight: 1,
        },
        // Balanced grip: accuracy over flair.
        ItemSpec {
            buff: BuffDelta {
                hit_rate: Some(0.1),
                critical: Some(-0.1),
                ..BuffDelta::default()
            },
            duration: 4,
            weight: 2,
        },
        // Axe: all power, wild aim.
        ItemSpec {
            buff: BuffDelta {
                attack: Some(3 * factor),
                hit_rate: Some(-0.3),
                ..BuffDelta::default()
            },
            duration: 3,
            weight: 3,
        },
        // Bow: modest power, area pattern.
        ItemSpec {
            buff: BuffDelta {
                attack: Some(factor),
                attack_direction: Some(bow_direction),
                ..BuffDelta::default()
            },
            duration: 3,
            weight: 4,
        },
    ]
}

/// The deterministic shield item for the given spawn factor.
pub(crate) fn shield_item(factor: i32) -> ItemSpec {
    ItemSpec {
        buff: BuffDelta {
            shield: Some(factor),
            ..BuffDelta::default()
        },
        duration: 2,
        weight: 1,
    }
}
