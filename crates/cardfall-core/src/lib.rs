//! # Cardfall Core
//!
//! Turn and combat core for Cardfall, a swipe-driven card battler.
//!
//! This crate is the deterministic half of the game: the turn state
//! machine, the combat/buff resolution, and the weighted card generation.
//! Rendering, sprite composition, tween execution, audio playback, and
//! gesture detection are external collaborators that consume the session's
//! output queue and feed completion signals back in.
//!
//! ## Architecture
//!
//! - **Session**: one [`session::GameSession`] per run owns the canonical
//!   state and gates input by the turn state machine.
//! - **Combat**: [`combat::apply_damage`] mutates stat blocks numerically;
//!   tile eligibility stays with the board layer.
//! - **Generation**: [`generator::CardGenerator`] decides and builds the
//!   next card, recycling retired enemy records through [`pool::EnemyPool`].
//! - **Outputs**: every transition queues [`output::Event`]s and
//!   [`output::Command`]s for the presentation layer to drain.
//!
//! ## Usage
//!
//! ```
//! use cardfall_core::{Direction, GameSession, TemplarClass};
//!
//! let mut session = GameSession::new(42);
//! session.start();
//! session.select_class(TemplarClass::Knight);
//! session.intro_finished();
//!
//! assert!(session.swipe(Direction::Left));
//! session.swipe_finished();
//! assert_eq!(session.move_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod card;
pub mod combat;
pub mod generator;
pub mod output;
pub mod pool;
pub mod session;

pub use card::attributes::{AttackDirection, AttackType, BuffDelta, CombatantAttributes};
pub use card::item::ItemCard;
pub use card::{Card, CardInner, CardKind, Direction};
pub use combat::{AttackInput, DamageResult};
pub use generator::{CardGenerator, SpawnContext};
pub use output::{Command, Event, Outbox, Output, OutputKind, SoundCue};
pub use pool::{EnemyHandle, EnemyPool, EnemyRecord, PoolError};
pub use session::{GameSession, GameState, Playback, ScoreSink, Speed, TemplarClass};

#[cfg(test)]
mod tests;
