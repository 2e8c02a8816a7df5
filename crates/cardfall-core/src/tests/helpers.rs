//! Shared helpers for the cross-module tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::card::Direction;
use crate::session::{GameSession, ScoreSink, TemplarClass};

/// Installs a tracing subscriber for test output. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Builds a session that has finished its intro and is ready for input.
pub fn idle_session(seed: u64, class: TemplarClass) -> GameSession {
    let mut session = GameSession::new(seed);
    session.start();
    session.select_class(class);
    session.intro_finished();
    let _ = session.take_outputs();
    session
}

/// Runs `count` complete turns (swipe plus completion signal).
pub fn run_turns(session: &mut GameSession, count: u32) {
    for _ in 0..count {
        assert!(session.swipe(Direction::Up), "session must be idle");
        session.swipe_finished();
    }
}

/// Score sink that records every submission for inspection.
#[derive(Default)]
pub struct RecordingSink {
    submissions: Rc<RefCell<Vec<u32>>>,
}

impl RecordingSink {
    /// Returns the sink and a shared view of its submissions.
    pub fn shared() -> (Self, Rc<RefCell<Vec<u32>>>) {
        let submissions = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                submissions: Rc::clone(&submissions),
            },
            submissions,
        )
    }
}

impl ScoreSink for RecordingSink {
    fn submit(&mut self, moves: u32) {
        self.submissions.borrow_mut().push(moves);
    }
}
