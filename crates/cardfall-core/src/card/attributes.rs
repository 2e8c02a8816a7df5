//! Combat attributes and the buff model.
//!
//! [`CombatantAttributes`] is the full stat block shared by the templar and
//! enemy cards. [`BuffDelta`] is a partial view over the same keys: numeric
//! fields are additive offsets, enum fields are overrides. Applying a delta
//! never fails - absent keys are no-ops.
//!
//! # Invariants
//!
//! - `shield` never goes negative; it is clamped to 0 after every merge.
//! - `health` may go negative transiently; the owning layer interprets
//!   `health <= 0` as defeated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The tile pattern an attack reaches.
///
/// Eligibility checks against the pattern are owned by the board layer; the
/// core only stores and overrides the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackDirection {
    /// The single adjacent tile the combatant faces.
    Front,
    /// Every tile along the facing row or column.
    Line,
    /// All surrounding tiles.
    Around,
    /// The four orthogonally adjacent tiles.
    Cross,
}

impl fmt::Display for AttackDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => write!(f, "front"),
            Self::Line => write!(f, "line"),
            Self::Around => write!(f, "around"),
            Self::Cross => write!(f, "cross"),
        }
    }
}

/// How an attack interacts with the defender's shield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    /// Damage is absorbed by shield before reaching health.
    Normal,
    /// Damage bypasses shield entirely.
    Penetrate,
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Penetrate => write!(f, "penetrate"),
        }
    }
}

/// Full stat block for a combat participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantAttributes {
    /// Remaining health. `<= 0` means defeated.
    pub health: i32,
    /// Damage buffer consumed before health. Never negative.
    pub shield: i32,
    /// Base attack power.
    pub attack: i32,
    /// Probability in `[0, 1]` that an outgoing attack connects.
    pub hit_rate: f32,
    /// Probability in `[0, 1]` that an outgoing attack is critical.
    pub critical: f32,
    /// Tile pattern of outgoing attacks.
    pub attack_direction: AttackDirection,
    /// Shield interaction of outgoing attacks.
    pub attack_type: AttackType,
    /// Damage reflected to an attacker whose hit connects.
    pub hit_back: i32,
}

impl CombatantAttributes {
    /// Stat block of the player card at the start of a run.
    #[must_use]
    pub fn templar() -> Self {
        Self {
            health: 10,
            shield: 0,
            attack: 4,
            hit_rate: 0.8,
            critical: 0.2,
            attack_direction: AttackDirection::Front,
            attack_type: AttackType::Normal,
            hit_back: 0,
        }
    }

    /// Fresh enemy stat block for the given difficulty level.
    ///
    /// Elite enemies never land criticals; their edge comes from the buff
    /// set layered on top by the generator.
    #[must_use]
    pub fn enemy_at_level(level: u32, elite: bool) -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let level = level as i32;
        Self {
            health: 5 + 2 * level,
            shield: 0,
            attack: 2 + level,
            hit_rate: 0.8,
            critical: if elite { 0.0 } else { 0.1 },
            attack_direction: AttackDirection::Front,
            attack_type: AttackType::Normal,
            hit_back: 0,
        }
    }

    /// Merges a buff delta into this stat block.
    ///
    /// Numeric keys add, enum keys replace, absent keys leave the field
    /// untouched. Shield is clamped to 0 afterwards.
    pub fn apply_buff(&mut self, delta: &BuffDelta) {
        if let Some(health) = delta.health {
            self.health += health;
        }
        if let Some(shield) = delta.shield {
            self.shield += shield;
        }
        if let Some(attack) = delta.attack {
            self.attack += attack;
        }
        if let Some(hit_rate) = delta.hit_rate {
            self.hit_rate += hit_rate;
        }
        if let Some(critical) = delta.critical {
            self.critical += critical;
        }
        if let Some(direction) = delta.attack_direction {
            self.attack_direction = direction;
        }
        if let Some(attack_type) = delta.attack_type {
            self.attack_type = attack_type;
        }
        if let Some(hit_back) = delta.hit_back {
            self.hit_back += hit_back;
        }
        self.shield = self.shield.max(0);
    }

    /// Returns `true` once health has dropped to or below zero.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// A partial stat change: offsets for numeric keys, overrides for enum keys.
///
/// Deltas are plain data. They carry no lifecycle of their own - items hold
/// a delta plus a duration, enemies bake one in at spawn time.
///
/// # Example
///
/// ```
/// use cardfall_core::{BuffDelta, CombatantAttributes};
///
/// let mut templar = CombatantAttributes::templar();
/// templar.apply_buff(&BuffDelta {
///     attack: Some(2),
///     critical: Some(-0.1),
///     ..BuffDelta::default()
/// });
///
/// assert_eq!(templar.attack, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuffDelta {
    /// Health offset.
    pub health: Option<i32>,
    /// Shield offset.
    pub shield: Option<i32>,
    /// Attack offset.
    pub attack: Option<i32>,
    /// Hit rate offset.
    pub hit_rate: Option<f32>,
    /// Critical rate offset.
    pub critical: Option<f32>,
    /// Attack direction override.
    pub attack_direction: Option<AttackDirection>,
    /// Attack type override.
    pub attack_type: Option<AttackType>,
    /// Hit-back offset.
    pub hit_back: Option<i32>,
}

impl BuffDelta {
    /// Returns `true` if no key is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.health.is_none()
            && self.shield.is_none()
            && self.attack.is_none()
            && self.hit_rate.is_none()
            && self.critical.is_none()
            && self.attack_direction.is_none()
            && self.attack_type.is_none()
            && self.hit_back.is_none()
    }

    /// Renders the delta as display text, one line per present key.
    ///
    /// The text is derived from the same values that `apply_buff` consumes,
    /// so description and effect cannot drift apart.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();
        if let Some(health) = self.health {
            lines.push(format!("health {health:+}"));
        }
        if let Some(shield) = self.shield {
            lines.push(format!("shield {shield:+}"));
        }
        if let Some(attack) = self.attack {
            lines.push(format!("attack {attack:+}"));
        }
        if let Some(hit_rate) = self.hit_rate {
            lines.push(format!("hit rate {hit_rate:+.2}"));
        }
        if let Some(critical) = self.critical {
            lines.push(format!("critical {critical:+.2}"));
        }
        if let Some(direction) = self.attack_direction {
            lines.push(format!("range: {direction}"));
        }
        if let Some(AttackType::Penetrate) = self.attack_type {
            lines.push("penetrates shield".to_string());
        }
        if let Some(hit_back) = self.hit_back {
            lines.push(format!("hit back {hit_back:+}"));
        }
        lines.join("\n")
    }
}
