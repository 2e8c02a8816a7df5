//! Outputs the core hands to the presentation layer.
//!
//! The core never draws, tweens, or plays audio. Instead every state
//! transition leaves behind outputs in the session's [`Outbox`]:
//!
//! - [`Event`]: something happened - a swipe was accepted, an enemy fell,
//!   the run ended. Consumers react (the board resolves the turn, the UI
//!   refreshes the inventory).
//! - [`Command`]: a presentation request - play a sound, start the music.
//!   Fire-and-forget; nothing in the core waits on completion.
//!
//! Outputs are queued synchronously while the state change commits and
//! drained by the embedding layer afterwards, which keeps the core
//! deterministic and testable without any rendering context.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::card::{Direction, ItemCard};
use crate::pool::EnemyHandle;
use crate::session::TemplarClass;

/// Sound effects the presentation layer knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// A swipe was accepted.
    Swipe,
    /// An item was equipped.
    Equip,
    /// The run ended.
    Negative,
}

/// A presentation request emitted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Play a one-shot sound effect.
    PlaySound {
        /// Which effect to play.
        cue: SoundCue,
    },
    /// Start looping the background music.
    StartMusic,
    /// Stop the background music.
    StopMusic,
}

/// A notification of something that happened in the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A swipe was accepted and a turn is now in flight.
    Swiped {
        /// The accepted direction, for the board layer to resolve.
        direction: Direction,
    },
    /// The player picked a class.
    ClassSelected {
        /// The chosen class.
        class: TemplarClass,
    },
    /// The equipped item list changed.
    ItemsUpdated {
        /// Items added this change.
        added: Vec<ItemCard>,
        /// Items removed this change.
        removed: Vec<ItemCard>,
    },
    /// An enemy was defeated and its record returned to the pool.
    EnemyDefeated {
        /// Handle of the retired record.
        handle: EnemyHandle,
    },
    /// The run ended.
    GameOver {
        /// Final move count, the session's score.
        moves: u32,
    },
}

/// Output category, for routing without matching the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// Presentation requests.
    Command,
    /// State notifications.
    Event,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "Command"),
            Self::Event => write!(f, "Event"),
        }
    }
}

/// A single queued output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// A presentation request.
    Command(Command),
    /// A state notification.
    Event(Event),
}

impl Output {
    /// Returns the category of this output.
    #[must_use]
    pub const fn kind(&self) -> OutputKind {
        match self {
            Self::Command(_) => OutputKind::Command,
            Self::Event(_) => OutputKind::Event,
        }
    }

    /// Returns the command if this is a command output.
    #[must_use]
    pub const fn as_command(&self) -> Option<&Command> {
        match self {
            Self::Command(command) => Some(command),
            Self::Event(_) => None,
        }
    }

    /// Returns the event if this is an event output.
    #[must_use]
    pub const fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(event) => Some(event),
            Self::Command(_) => None,
        }
    }
}

impl From<Command> for Output {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

impl From<Event> for Output {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Ordered queue of outputs awaiting the presentation layer.
///
/// Single-writer: only the session pushes. The embedding layer drains the
/// queue after each core call with [`Outbox::take`].
#[derive(Debug, Default)]
pub struct Outbox {
    queue: Vec<Output>,
}

impl Outbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an output.
    pub fn emit(&mut self, output: impl Into<Output>) {
        self.queue.push(output.into());
    }

    /// Drains and returns everything queued so far, in emission order.
    pub fn take(&mut self) -> Vec<Output> {
        std::mem::take(&mut self.queue)
    }

    /// Number of outputs currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
