//! Card types for the board grid.
//!
//! A [`Card`] is a tagged variant over the things that can occupy a tile:
//! the templar (the player), an enemy, or an equippable item. Combat stats
//! live inline for the templar and behind an [`EnemyHandle`] for enemies,
//! whose records are owned by the session's pool.
//!
//! Cards are exclusively owned by the board that placed them. The generator
//! constructs or recycles instances but never retains them.

pub mod attributes;
pub mod item;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pool::EnemyHandle;

pub use attributes::{AttackDirection, AttackType, BuffDelta, CombatantAttributes};
pub use item::ItemCard;

/// A swipe direction on the board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Swipe toward the top of the grid.
    Up,
    /// Swipe toward the bottom of the grid.
    Down,
    /// Swipe toward the left edge.
    Left,
    /// Swipe toward the right edge.
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Classification tag for a card.
///
/// The tag decides which capability a card exposes: templar and enemy cards
/// are combat participants, the rest are inventory items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// The player card. Exactly one per run.
    Templar,
    /// A hostile combatant.
    Enemy,
    /// A weapon item.
    Weapon,
    /// A shield item.
    Shield,
    /// A potion item.
    Potion,
}

impl CardKind {
    /// Returns `true` for cards that carry combat attributes.
    #[must_use]
    pub const fn is_combat_participant(self) -> bool {
        matches!(self, Self::Templar | Self::Enemy)
    }

    /// Returns `true` for cards the templar can pick up and equip.
    #[must_use]
    pub const fn is_inventory_item(self) -> bool {
        matches!(self, Self::Weapon | Self::Shield | Self::Potion)
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Templar => write!(f, "templar"),
            Self::Enemy => write!(f, "enemy"),
            Self::Weapon => write!(f, "weapon"),
            Self::Shield => write!(f, "shield"),
            Self::Potion => write!(f, "potion"),
        }
    }
}

/// Variant-specific payload of a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardInner {
    /// The player's stat block, stored inline.
    Templar(CombatantAttributes),
    /// Handle into the enemy pool that owns the stat record.
    Enemy(EnemyHandle),
    /// An equippable item.
    Item(ItemCard),
}

/// A card placed on the board grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    kind: CardKind,
    position: IVec2,
    active: bool,
    inner: CardInner,
}

impl Card {
    /// Creates the player card at the given grid position.
    #[must_use]
    pub fn templar(position: IVec2) -> Self {
        Self {
            kind: CardKind::Templar,
            position,
            active: true,
            inner: CardInner::Templar(CombatantAttributes::templar()),
        }
    }

    /// Creates an enemy card backed by a pool record.
    #[must_use]
    pub const fn enemy(position: IVec2, handle: EnemyHandle) -> Self {
        Self {
            kind: CardKind::Enemy,
            position,
            active: true,
            inner: CardInner::Enemy(handle),
        }
    }

    /// Creates an item card of the given item kind.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is not an inventory item kind; pairing a combat tag
    /// with an item payload is a programming error.
    #[must_use]
    pub fn item(kind: CardKind, position: IVec2, item: ItemCard) -> Self {
        assert!(kind.is_inventory_item(), "{kind} is not an item kind");
        Self {
            kind,
            position,
            active: true,
            inner: CardInner::Item(item),
        }
    }

    /// The card's classification tag.
    #[must_use]
    pub const fn kind(&self) -> CardKind {
        self.kind
    }

    /// Current grid position.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Moves the card to a new grid position.
    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    /// Whether the card still participates in board resolution.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Removes the card from board resolution without destroying it.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// The variant payload.
    #[must_use]
    pub const fn inner(&self) -> &CardInner {
        &self.inner
    }

    /// Inline combat stats, present only on the templar card.
    #[must_use]
    pub const fn as_combatant(&self) -> Option<&CombatantAttributes> {
        match &self.inner {
            CardInner::Templar(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Mutable inline combat stats, present only on the templar card.
    #[must_use]
    pub fn as_combatant_mut(&mut self) -> Option<&mut CombatantAttributes> {
        match &mut self.inner {
            CardInner::Templar(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// The pool handle, present only on enemy cards.
    #[must_use]
    pub const fn enemy_handle(&self) -> Option<EnemyHandle> {
        match &self.inner {
            CardInner::Enemy(handle) => Some(*handle),
            _ => None,
        }
    }

    /// The item payload, present only on item cards.
    #[must_use]
    pub const fn as_item(&self) -> Option<&ItemCard> {
        match &self.inner {
            CardInner::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Mutable item payload, present only on item cards.
    #[must_use]
    pub fn as_item_mut(&mut self) -> Option<&mut ItemCard> {
        match &mut self.inner {
            CardInner::Item(item) => Some(item),
            _ => None,
        }
    }
}
