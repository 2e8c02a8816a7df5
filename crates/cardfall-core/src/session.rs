//! The game session: canonical state and the turn state machine.
//!
//! [`GameSession`] owns everything a single run needs - the turn state, the
//! move counter, the player's class, the equipped item list, playback
//! settings, the card generator, and the enemy pool. It is constructed once
//! at process start and threaded explicitly through the layers that need it;
//! nothing reaches it through a global.
//!
//! All transitions run synchronously on one logical thread. The IDLE gate in
//! [`GameSession::swipe`] guarantees exactly one turn is in flight at a
//! time: further swipes are silently ignored until the board layer signals
//! [`GameSession::swipe_finished`]. Invalid-state input is normal racing
//! against animation timing, not an error, so it never surfaces as one.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::card::{Card, CardKind, Direction, ItemCard};
use crate::generator::{CardGenerator, SpawnContext};
use crate::output::{Command, Event, Outbox, Output, SoundCue};
use crate::pool::{EnemyHandle, EnemyPool, PoolError};

/// Defenders never keep an item longer than this many uses.
const DEFENDER_DURATION_CAP: i32 = 5;

/// Lifecycle state of a run.
///
/// `GameOver` is terminal and sticky; no transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Pre-start splash.
    Prologue,
    /// Session constructed, waiting for class selection to open.
    Init,
    /// Class selection and intro animation in progress.
    Intro,
    /// Awaiting directional input.
    Idle,
    /// A turn is in flight on the board.
    Swiping,
    /// The run has ended.
    GameOver,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prologue => write!(f, "prologue"),
            Self::Init => write!(f, "init"),
            Self::Intro => write!(f, "intro"),
            Self::Idle => write!(f, "idle"),
            Self::Swiping => write!(f, "swiping"),
            Self::GameOver => write!(f, "game over"),
        }
    }
}

/// The player's chosen class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplarClass {
    /// Frontline fighter.
    Knight,
    /// Caster whose spells scale with the session level.
    Wizard,
    /// Tank whose equipment durations are capped at five uses.
    Defender,
}

impl fmt::Display for TemplarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Knight => write!(f, "Knight"),
            Self::Wizard => write!(f, "Wizard"),
            Self::Defender => write!(f, "Defender"),
        }
    }
}

/// Playback speed multiplier, cycled by the speed toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speed {
    /// 1x.
    #[default]
    Normal,
    /// 1.5x.
    Faster,
    /// 2x.
    Fastest,
}

impl Speed {
    /// The multiplier the presentation layer applies to animations.
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Faster => 1.5,
            Self::Fastest => 2.0,
        }
    }

    /// The next speed in the toggle cycle.
    #[must_use]
    pub const fn cycled(self) -> Self {
        match self {
            Self::Normal => Self::Faster,
            Self::Faster => Self::Fastest,
            Self::Fastest => Self::Normal,
        }
    }
}

/// Playback settings read by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playback {
    /// Current animation speed.
    pub speed: Speed,
    /// Whether the background music is playing.
    pub music_on: bool,
}

/// External high-score collaborator.
///
/// The session hands over exactly one value per run: the final move count,
/// submitted once when the run ends.
pub trait ScoreSink {
    /// Records a finished run's move count.
    fn submit(&mut self, moves: u32);
}

/// Canonical state for one run.
pub struct GameSession {
    state: GameState,
    move_count: u32,
    class: Option<TemplarClass>,
    items: Vec<ItemCard>,
    playback: Playback,
    best_score: Option<u32>,
    generator: CardGenerator,
    pool: EnemyPool,
    outbox: Outbox,
    score_sink: Option<Box<dyn ScoreSink>>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("move_count", &self.move_count)
            .field("class", &self.class)
            .field("items", &self.items.len())
            .field("playback", &self.playback)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Creates a session in the prologue state.
    ///
    /// `seed` drives the generator's RNG; identical seeds replay identical
    /// card streams.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::Prologue,
            move_count: 0,
            class: None,
            items: Vec::new(),
            playback: Playback::default(),
            best_score: None,
            generator: CardGenerator::new(seed),
            pool: EnemyPool::new(),
            outbox: Outbox::new(),
            score_sink: None,
        }
    }

    /// Attaches the external high-score collaborator.
    #[must_use]
    pub fn with_score_sink(mut self, sink: Box<dyn ScoreSink>) -> Self {
        self.score_sink = Some(sink);
        self
    }

    // =========================================================================
    // State and derived values
    // =========================================================================

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Accepted swipes so far. Monotonic, never reset.
    #[must_use]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// The player's class, once selected.
    #[must_use]
    pub const fn class(&self) -> Option<TemplarClass> {
        self.class
    }

    /// Currently equipped items.
    #[must_use]
    pub fn items(&self) -> &[ItemCard] {
        &self.items
    }

    /// Current playback settings.
    #[must_use]
    pub const fn playback(&self) -> Playback {
        self.playback
    }

    /// Best-score candidate recorded at game over.
    #[must_use]
    pub const fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    /// Difficulty tier, recomputed from the move counter on every read.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.move_count / 5
    }

    /// Whether the current move spawns an elite enemy.
    ///
    /// Pure function of the move counter, never cached: every thirteenth
    /// move, plus every fifth move from 78 on.
    #[must_use]
    pub const fn is_elite(&self) -> bool {
        (self.move_count > 0 && self.move_count % 13 == 0)
            || (self.move_count >= 78 && self.move_count % 5 == 0)
    }

    // =========================================================================
    // Turn state machine
    // =========================================================================

    /// Leaves the prologue splash. No-op in any other state.
    pub fn start(&mut self) {
        if self.state == GameState::Prologue {
            self.state = GameState::Init;
            tracing::info!("session started");
        }
    }

    /// Selects the player's class and enters the intro.
    ///
    /// Only meaningful in `Init` or `Intro`; ignored elsewhere. The caller
    /// signals [`GameSession::intro_finished`] once the intro animation
    /// settles.
    pub fn select_class(&mut self, class: TemplarClass) {
        if !matches!(self.state, GameState::Init | GameState::Intro) {
            tracing::trace!(state = %self.state, "class selection ignored");
            return;
        }
        self.class = Some(class);
        self.state = GameState::Intro;
        self.outbox.emit(Event::ClassSelected { class });
        tracing::info!(%class, "class selected");
    }

    /// External signal that the intro animation finished.
    pub fn intro_finished(&mut self) {
        if self.state == GameState::Intro {
            self.state = GameState::Idle;
        }
    }

    /// Accepts a directional input, starting a turn.
    ///
    /// Only accepted while idle - this is the input-debounce gate that keeps
    /// exactly one swipe in flight. Returns whether the input was accepted;
    /// rejection is silent and leaves the move counter untouched.
    pub fn swipe(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Idle {
            tracing::trace!(state = %self.state, %direction, "swipe ignored");
            return false;
        }
        self.move_count += 1;
        self.state = GameState::Swiping;
        self.outbox.emit(Command::PlaySound {
            cue: SoundCue::Swipe,
        });
        self.outbox.emit(Event::Swiped { direction });
        tracing::debug!(move_count = self.move_count, %direction, "swipe accepted");
        true
    }

    /// External signal that the board finished resolving the turn.
    ///
    /// Returns the session to idle; ignored once the run is over.
    pub fn swipe_finished(&mut self) {
        if self.state == GameState::GameOver {
            return;
        }
        self.state = GameState::Idle;
    }

    /// Ends the run. Idempotent; the terminal state is sticky.
    ///
    /// Records the final move count as the best-score candidate, hands it to
    /// the score sink, and emits the terminal outputs.
    pub fn game_over(&mut self) {
        if self.state == GameState::GameOver {
            return;
        }
        self.state = GameState::GameOver;
        self.best_score = Some(self.move_count);
        if let Some(sink) = &mut self.score_sink {
            sink.submit(self.move_count);
        }
        if self.playback.music_on {
            self.playback.music_on = false;
            self.outbox.emit(Command::StopMusic);
        }
        self.outbox.emit(Command::PlaySound {
            cue: SoundCue::Negative,
        });
        self.outbox.emit(Event::GameOver {
            moves: self.move_count,
        });
        tracing::info!(moves = self.move_count, "game over");
    }

    // =========================================================================
    // Card generation
    // =========================================================================

    /// Decides which card kind the current move reveals.
    pub fn next_card_kind(&mut self) -> CardKind {
        self.generator.decide_next_kind(self.move_count)
    }

    /// Builds a card at `position`, scaled to the current level.
    ///
    /// Enemy spawns recycle the session's pool once enough retired records
    /// have accumulated.
    ///
    /// # Panics
    ///
    /// Panics on a card kind the generator has no recipe for.
    pub fn spawn_card(&mut self, kind: CardKind, position: IVec2) -> Card {
        let ctx = SpawnContext {
            level: self.level(),
            elite: self.is_elite(),
        };
        self.generator.build_card(kind, position, ctx, &mut self.pool)
    }

    /// Returns a defeated enemy's record to the pool and announces it.
    ///
    /// # Errors
    ///
    /// Propagates [`PoolError`] for stale or double-retired handles.
    pub fn enemy_defeated(&mut self, handle: EnemyHandle) -> Result<(), PoolError> {
        self.pool.retire(handle)?;
        self.outbox.emit(Event::EnemyDefeated { handle });
        Ok(())
    }

    /// The enemy pool, for resolving handles to stat records.
    #[must_use]
    pub const fn pool(&self) -> &EnemyPool {
        &self.pool
    }

    /// Mutable access to the enemy pool, for combat against pooled records.
    #[must_use]
    pub fn pool_mut(&mut self) -> &mut EnemyPool {
        &mut self.pool
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Equips items into the active list.
    ///
    /// Each item is equipped (guaranteeing at least two uses); a Defender's
    /// items are then capped at five. Emits one equip cue per item and a
    /// single items-updated event for the batch.
    pub fn add_items(&mut self, mut items: Vec<ItemCard>) {
        if items.is_empty() {
            return;
        }
        for item in &mut items {
            item.equip();
            if self.class == Some(TemplarClass::Defender) {
                item.clamp_duration(DEFENDER_DURATION_CAP);
            }
            self.outbox.emit(Command::PlaySound {
                cue: SoundCue::Equip,
            });
        }
        self.items.extend(items.iter().cloned());
        self.outbox.emit(Event::ItemsUpdated {
            added: items,
            removed: Vec::new(),
        });
    }

    /// Adds `delta` to every equipped item's duration, discarding the
    /// exhausted ones.
    ///
    /// Returns the discarded items; a non-empty batch is also announced via
    /// an items-updated event.
    pub fn update_item_durations(&mut self, delta: i32) -> Vec<ItemCard> {
        let mut removed = Vec::new();
        self.items.retain_mut(|item| {
            if item.update_duration(delta) {
                true
            } else {
                removed.push(item.clone());
                false
            }
        });
        if !removed.is_empty() {
            self.outbox.emit(Event::ItemsUpdated {
                added: Vec::new(),
                removed: removed.clone(),
            });
        }
        removed
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Cycles the animation speed: 1x, 1.5x, 2x, back to 1x.
    pub fn toggle_speed(&mut self) {
        self.playback.speed = self.playback.speed.cycled();
    }

    /// Toggles the background music, emitting the matching command.
    pub fn toggle_music(&mut self) {
        self.playback.music_on = !self.playback.music_on;
        if self.playback.music_on {
            self.outbox.emit(Command::StartMusic);
        } else {
            self.outbox.emit(Command::StopMusic);
        }
    }

    /// Drains the queued outputs for the presentation layer.
    pub fn take_outputs(&mut self) -> Vec<Output> {
        self.outbox.take()
    }
}
