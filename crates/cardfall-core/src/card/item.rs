//! Equippable item cards: a buff plus a remaining-use counter.

use serde::{Deserialize, Serialize};

use super::attributes::BuffDelta;

/// Minimum number of uses granted when an item is equipped.
const MIN_EQUIP_DURATION: i32 = 2;

/// An equippable item: a stat delta, how many turns it lasts, and how much
/// it weighs against the carrier's capacity.
///
/// Duration bookkeeping is the item's only lifecycle. The session decrements
/// durations at the end of each turn and discards items that report
/// exhaustion from [`ItemCard::update_duration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCard {
    buff: BuffDelta,
    duration: i32,
    weight: i32,
}

impl ItemCard {
    /// Creates an item card from its stat delta, duration, and weight.
    #[must_use]
    pub const fn new(buff: BuffDelta, duration: i32, weight: i32) -> Self {
        Self {
            buff,
            duration,
            weight,
        }
    }

    /// The stat delta this item grants while equipped.
    #[must_use]
    pub const fn buff(&self) -> &BuffDelta {
        &self.buff
    }

    /// Remaining uses before the item is discarded.
    #[must_use]
    pub const fn duration(&self) -> i32 {
        self.duration
    }

    /// Encumbrance cost counted against inventory capacity.
    #[must_use]
    pub const fn weight(&self) -> i32 {
        self.weight
    }

    /// Adds `delta` to the remaining duration.
    ///
    /// Returns `false` when the result drops to or below zero, signalling
    /// the item should be discarded. Otherwise the item stays equipped.
    ///
    /// # Example
    ///
    /// ```
    /// use cardfall_core::{BuffDelta, ItemCard};
    ///
    /// let mut item = ItemCard::new(BuffDelta::default(), 2, 1);
    /// assert!(item.update_duration(-1));
    /// assert_eq!(item.duration(), 1);
    /// assert!(!item.update_duration(-1));
    /// ```
    pub fn update_duration(&mut self, delta: i32) -> bool {
        self.duration += delta;
        self.duration > 0
    }

    /// Marks the item as equipped.
    ///
    /// Equipment always grants at least two uses, even when generated with
    /// less. The accompanying animation and sound are the presentation
    /// layer's concern; the session emits the command for them.
    pub fn equip(&mut self) {
        self.duration = self.duration.max(MIN_EQUIP_DURATION);
    }

    /// Caps the remaining duration at `max`, leaving shorter durations alone.
    pub fn clamp_duration(&mut self, max: i32) {
        self.duration = self.duration.min(max);
    }

    /// Display text for the item's effect, rendered from the delta itself.
    #[must_use]
    pub fn describe(&self) -> String {
        self.buff.describe()
    }
}
