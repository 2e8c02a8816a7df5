//! Numeric combat resolution.
//!
//! The resolver is the arithmetic half of an attack. The board layer owns
//! everything positional - whether the defender's tile pattern makes it
//! eligible at all - and the caller decides the critical roll up front. What
//! remains here is a pure mutation of the defender's stat block given an
//! already-shaped attack, which keeps the math testable without a board or
//! rendering context.
//!
//! Hit-back is reported in the result for the caller to apply; the resolver
//! never recurses into a second resolution, so reflected damage cannot chain
//! into mutual retaliation.

use rand::Rng;

use crate::card::attributes::{AttackType, CombatantAttributes};
use crate::card::Direction;

/// A fully shaped attack, ready for numeric resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackInput {
    /// Incoming direction, for observability only; eligibility was already
    /// confirmed by the board layer.
    pub direction: Direction,
    /// Whether the caller's critical roll succeeded.
    pub is_critical: bool,
    /// Whether the attack bypasses shield.
    pub is_penetrating: bool,
    /// Base damage before the critical boost.
    pub power: i32,
}

/// Outcome of one attack resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageResult {
    /// Whether the attack connected at all.
    pub hit: bool,
    /// Damage that reached the defender's health.
    pub damage_dealt: i32,
    /// Damage soaked by the defender's shield.
    pub shield_absorbed: i32,
    /// Damage the caller must reflect onto the attacker.
    pub hit_back_damage: i32,
    /// Whether the defender's health dropped to or below zero.
    pub defender_defeated: bool,
}

impl DamageResult {
    const MISS: Self = Self {
        hit: false,
        damage_dealt: 0,
        shield_absorbed: 0,
        hit_back_damage: 0,
        defender_defeated: false,
    };
}

/// Rolls whether an attack by `attacker` is critical.
///
/// Kept separate from [`apply_damage`] so the caller can shape the attack
/// (boost power, pick targets for area patterns) knowing the outcome.
pub fn roll_critical<R: Rng>(rng: &mut R, attacker: &CombatantAttributes) -> bool {
    rng.gen_bool(f64::from(attacker.critical.clamp(0.0, 1.0)))
}

/// Resolves an attack against `defender`, mutating its stat block.
///
/// The sequence:
///
/// 1. Bernoulli draw against the attacker's hit rate; a miss returns early
///    with no side effects.
/// 2. Damage is `power`, doubled on a critical.
/// 3. Shield soaks first unless the attack penetrates; overflow carries to
///    health.
/// 4. A connecting hit against a defender with hit-back reports the
///    reflected amount without applying it.
///
/// # Example
///
/// ```
/// use cardfall_core::combat::{apply_damage, AttackInput};
/// use cardfall_core::{CombatantAttributes, Direction};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let mut attacker = CombatantAttributes::templar();
/// attacker.hit_rate = 1.0;
/// let mut defender = CombatantAttributes::enemy_at_level(0, false);
///
/// let result = apply_damage(&mut rng, &attacker, &mut defender, AttackInput {
///     direction: Direction::Up,
///     is_critical: false,
///     is_penetrating: false,
///     power: attacker.attack,
/// });
/// assert!(result.hit);
/// assert_eq!(defender.health, 1);
/// ```
pub fn apply_damage<R: Rng>(
    rng: &mut R,
    attacker: &CombatantAttributes,
    defender: &mut CombatantAttributes,
    attack: AttackInput,
) -> DamageResult {
    let connects = rng.gen_bool(f64::from(attacker.hit_rate.clamp(0.0, 1.0)));
    if !connects {
        tracing::trace!(direction = %attack.direction, "attack missed");
        return DamageResult::MISS;
    }

    let mut damage = attack.power.max(0);
    if attack.is_critical {
        damage *= 2;
    }

    let shield_absorbed = if attack.is_penetrating {
        0
    } else {
        let absorbed = damage.min(defender.shield);
        defender.shield -= absorbed;
        absorbed
    };
    let damage_dealt = damage - shield_absorbed;
    defender.health -= damage_dealt;

    let hit_back_damage = defender.hit_back.max(0);

    let result = DamageResult {
        hit: true,
        damage_dealt,
        shield_absorbed,
        hit_back_damage,
        defender_defeated: defender.is_defeated(),
    };
    tracing::debug!(
        direction = %attack.direction,
        critical = attack.is_critical,
        penetrating = attack.is_penetrating,
        damage_dealt,
        shield_absorbed,
        defeated = result.defender_defeated,
        "attack resolved"
    );
    result
}

/// Resolves a wizard strike against `defender`.
///
/// Spells never crit; they penetrate exactly when the wizard's own attack
/// type does, and their power scales with the session level.
pub fn wizard_strike<R: Rng>(
    rng: &mut R,
    wizard: &CombatantAttributes,
    defender: &mut CombatantAttributes,
    spell_level: u32,
    session_level: u32,
) -> DamageResult {
    #[allow(clippy::cast_possible_wrap)]
    let power = (spell_level * session_level) as i32;
    apply_damage(
        rng,
        wizard,
        defender,
        AttackInput {
            direction: Direction::Up,
            is_critical: false,
            is_penetrating: wizard.attack_type == AttackType::Penetrate,
            power,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn sure_attacker() -> CombatantAttributes {
        let mut attrs = CombatantAttributes::templar();
        attrs.hit_rate = 1.0;
        attrs
    }

    fn attack(power: i32) -> AttackInput {
        AttackInput {
            direction: Direction::Up,
            is_critical: false,
            is_penetrating: false,
            power,
        }
    }

    mod hit_roll_tests {
        use super::*;

        #[test]
        fn zero_hit_rate_always_misses() {
            let mut attacker = sure_attacker();
            attacker.hit_rate = 0.0;
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            let before = defender.clone();

            let result = apply_damage(&mut rng(), &attacker, &mut defender, attack(5));

            assert!(!result.hit);
            assert_eq!(result.damage_dealt, 0);
            assert_eq!(result.hit_back_damage, 0);
            assert_eq!(defender, before);
        }

        #[test]
        fn out_of_range_hit_rate_is_clamped() {
            let mut attacker = sure_attacker();
            attacker.hit_rate = 1.7;
            let mut defender = CombatantAttributes::enemy_at_level(0, false);

            let result = apply_damage(&mut rng(), &attacker, &mut defender, attack(1));
            assert!(result.hit);
        }
    }

    mod shield_tests {
        use super::*;

        #[test]
        fn shield_soaks_then_overflows_to_health() {
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            defender.shield = 3;
            let health_before = defender.health;

            let result = apply_damage(&mut rng(), &sure_attacker(), &mut defender, attack(5));

            assert_eq!(result.shield_absorbed, 3);
            assert_eq!(result.damage_dealt, 2);
            assert_eq!(defender.shield, 0);
            assert_eq!(defender.health, health_before - 2);
        }

        #[test]
        fn shield_fully_absorbs_small_hits() {
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            defender.shield = 6;
            let health_before = defender.health;

            let result = apply_damage(&mut rng(), &sure_attacker(), &mut defender, attack(4));

            assert_eq!(result.shield_absorbed, 4);
            assert_eq!(result.damage_dealt, 0);
            assert_eq!(defender.shield, 2);
            assert_eq!(defender.health, health_before);
        }

        #[test]
        fn penetrating_attack_never_touches_shield() {
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            defender.shield = 10;
            let health_before = defender.health;

            let result = apply_damage(
                &mut rng(),
                &sure_attacker(),
                &mut defender,
                AttackInput {
                    is_penetrating: true,
                    ..attack(5)
                },
            );

            assert_eq!(result.shield_absorbed, 0);
            assert_eq!(result.damage_dealt, 5);
            assert_eq!(defender.shield, 10);
            assert_eq!(defender.health, health_before - 5);
        }
    }

    mod critical_tests {
        use super::*;

        #[test]
        fn critical_doubles_power() {
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            let health_before = defender.health;

            let result = apply_damage(
                &mut rng(),
                &sure_attacker(),
                &mut defender,
                AttackInput {
                    is_critical: true,
                    ..attack(3)
                },
            );

            assert_eq!(result.damage_dealt, 6);
            assert_eq!(defender.health, health_before - 6);
        }

        #[test]
        fn roll_critical_respects_extremes() {
            let mut certain = sure_attacker();
            certain.critical = 1.0;
            assert!(roll_critical(&mut rng(), &certain));

            let mut never = sure_attacker();
            never.critical = 0.0;
            assert!(!roll_critical(&mut rng(), &never));
        }
    }

    mod hit_back_tests {
        use super::*;

        #[test]
        fn connecting_hit_reports_reflection() {
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            defender.hit_back = 3;

            let result = apply_damage(&mut rng(), &sure_attacker(), &mut defender, attack(2));

            assert!(result.hit);
            assert_eq!(result.hit_back_damage, 3);
        }

        #[test]
        fn reflection_is_not_applied_by_the_resolver() {
            let attacker = sure_attacker();
            let attacker_before = attacker.clone();
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            defender.hit_back = 3;

            let _ = apply_damage(&mut rng(), &attacker, &mut defender, attack(2));

            assert_eq!(attacker, attacker_before);
        }
    }

    mod defeat_tests {
        use super::*;

        #[test]
        fn exact_lethal_defeats() {
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            let lethal_damage = attack(defender.health);
            let result = apply_damage(&mut rng(), &sure_attacker(), &mut defender, lethal_damage);

            assert!(result.defender_defeated);
            assert_eq!(defender.health, 0);
        }

        #[test]
        fn overkill_defeats() {
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            let result = apply_damage(&mut rng(), &sure_attacker(), &mut defender, attack(99));

            assert!(result.defender_defeated);
            assert!(defender.health < 0);
        }
    }

    mod wizard_strike_tests {
        use super::*;

        #[test]
        fn power_scales_with_session_level() {
            let wizard = sure_attacker();
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            let health_before = defender.health;

            let result = wizard_strike(&mut rng(), &wizard, &mut defender, 2, 3);

            assert_eq!(result.damage_dealt, 6);
            assert_eq!(defender.health, health_before - 6);
        }

        #[test]
        fn penetration_follows_the_wizard_attack_type() {
            let mut wizard = sure_attacker();
            wizard.attack_type = AttackType::Penetrate;
            let mut defender = CombatantAttributes::enemy_at_level(0, false);
            defender.shield = 10;

            let result = wizard_strike(&mut rng(), &wizard, &mut defender, 1, 4);

            assert_eq!(result.shield_absorbed, 0);
            assert_eq!(result.damage_dealt, 4);
            assert_eq!(defender.shield, 10);
        }
    }
}
