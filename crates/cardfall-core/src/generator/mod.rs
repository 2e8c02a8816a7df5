//! Weighted card generation.
//!
//! The generator decides what the board reveals next and constructs the
//! card for it. It owns a seeded RNG so identical seeds replay identical
//! runs, and it composes enemy spawns with the session's pool: base stats
//! are re-derived from the current level, one buff set is layered on top,
//! and the finished record goes through [`EnemyPool::spawn`] so retired
//! slots get recycled.

mod tables;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::attributes::{AttackDirection, CombatantAttributes};
use crate::card::item::ItemCard;
use crate::card::{Card, CardKind};
use crate::pool::{EnemyPool, EnemyRecord};

/// Weighted draw pool for non-enemy reveals.
///
/// Currently a single entry, but the draw goes through the weighted pick so
/// new item kinds only need a row here.
const ITEM_DRAW_POOL: &[(CardKind, u32)] = &[(CardKind::Shield, 1)];

/// Session-derived inputs for one spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnContext {
    /// Current difficulty level (`move / 5`).
    pub level: u32,
    /// Whether the move-count predicate marks this spawn as elite.
    pub elite: bool,
}

/// Decides and constructs the next card.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    rng: ChaCha8Rng,
    /// Last elite buff index handed out; `None` before the first elite.
    elite_cursor: Option<usize>,
}

impl CardGenerator {
    /// Creates a generator with its own deterministic RNG stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            elite_cursor: None,
        }
    }

    /// Decides which card kind the given move reveals.
    ///
    /// Every even move and every thirteenth move is an enemy; anything else
    /// draws from the weighted item pool. The enemy/non-enemy branch is a
    /// pure function of `move_count`.
    pub fn decide_next_kind(&mut self, move_count: u32) -> CardKind {
        if move_count % 13 == 0 || move_count % 2 == 0 {
            CardKind::Enemy
        } else {
            self.weighted_item_kind()
        }
    }

    /// Builds a card of the given kind at `position`.
    ///
    /// Enemy spawns go through `pool` so a retired record is recycled when
    /// enough are waiting. Item magnitudes scale with `ctx.level + 1`.
    ///
    /// # Panics
    ///
    /// Panics on a kind the generator has no recipe for (currently
    /// [`CardKind::Potion`]); a missing recipe is a programming error, not a
    /// runtime condition.
    pub fn build_card(
        &mut self,
        kind: CardKind,
        position: IVec2,
        ctx: SpawnContext,
        pool: &mut EnemyPool,
    ) -> Card {
        #[allow(clippy::cast_possible_wrap)]
        let factor = (ctx.level + 1) as i32;
        tracing::debug!(%kind, level = ctx.level, elite = ctx.elite, "building card");
        match kind {
            CardKind::Templar => Card::templar(position),
            CardKind::Enemy => {
                let record = self.derive_enemy(ctx, factor);
                let handle = pool.spawn(record);
                Card::enemy(position, handle)
            }
            CardKind::Weapon => {
                let spec = self.pick_weapon(factor);
                Card::item(kind, position, ItemCard::new(spec.buff, spec.duration, spec.weight))
            }
            CardKind::Shield => {
                let spec = tables::shield_item(factor);
                Card::item(kind, position, ItemCard::new(spec.buff, spec.duration, spec.weight))
            }
            CardKind::Potion => panic!("no recipe for card kind: {kind}"),
        }
    }

    /// Re-derives a full enemy record from the current level and eliteness.
    fn derive_enemy(&mut self, ctx: SpawnContext, factor: i32) -> EnemyRecord {
        let mut attrs = CombatantAttributes::enemy_at_level(ctx.level, ctx.elite);
        let entry = if ctx.elite {
            let mut list = tables::elite_buffs(factor);
            let index = self.advance_elite_cursor(list.len());
            list.swap_remove(index)
        } else {
            let mut list = tables::common_buffs(factor);
            let index = self.rng.gen_range(0..list.len());
            list.swap_remove(index)
        };
        attrs.apply_buff(&entry.buff);
        EnemyRecord {
            attrs,
            epithet: entry.epithet,
        }
    }

    /// Steps the elite cursor one entry forward, wrapping only after the
    /// last entry. Guarantees full coverage before any repeat and never the
    /// same entry twice in a row.
    fn advance_elite_cursor(&mut self, len: usize) -> usize {
        let next = match self.elite_cursor {
            Some(last) if last + 1 < len => last + 1,
            _ => 0,
        };
        self.elite_cursor = Some(next);
        next
    }

    fn pick_weapon(&mut self, factor: i32) -> tables::ItemSpec {
        // The bow's area pattern is a fair coin, rolled before the pick so
        // the archetype list is fully formed.
        let bow_direction = if self.rng.gen_bool(0.5) {
            AttackDirection::Around
        } else {
            AttackDirection::Line
        };
        let mut list = tables::weapon_archetypes(factor, bow_direction);
        let index = self.rng.gen_range(0..list.len());
        list.swap_remove(index)
    }

    fn weighted_item_kind(&mut self) -> CardKind {
        let total: u32 = ITEM_DRAW_POOL.iter().map(|(_, weight)| weight).sum();
        let mut roll = self.rng.gen_range(0..total);
        for &(kind, weight) in ITEM_DRAW_POOL {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        unreachable!("weighted draw total covers every entry")
    }
}
