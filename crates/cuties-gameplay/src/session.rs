//! Owners of the current game state.
//!
//! A [`Session`] holds the one live [`GameState`] and swaps it wholesale on
//! every dispatch. [`SharedSession`] puts a session behind a lock for callers
//! that reach the same game from several threads.

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::action::Action;
use crate::catalog::Catalog;
use crate::journal::{now_millis, Timestamp};
use crate::reducer::Reducer;
use crate::state::GameState;

/// Single-owner game session.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    reducer: Reducer<'a>,
    state: GameState,
    dispatched: u64,
}

impl Session<'static> {
    /// Session over [`Catalog::standard`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Catalog::standard())
    }
}

impl<'a> Session<'a> {
    /// Starts a new run over `catalog`.
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        info!("New session started");
        Self {
            reducer: Reducer::new(catalog),
            state: GameState::new(),
            dispatched: 0,
        }
    }

    /// Resumes from an existing state.
    #[must_use]
    pub fn with_state(catalog: &'a Catalog, state: GameState) -> Self {
        Self {
            reducer: Reducer::new(catalog),
            state,
            dispatched: 0,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// The catalog actions resolve against.
    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.reducer.catalog()
    }

    /// Number of actions dispatched so far.
    #[must_use]
    pub const fn history_len(&self) -> u64 {
        self.dispatched
    }

    /// Applies `action` and replaces the current state with the result.
    pub fn dispatch(&mut self, action: &Action) -> &GameState {
        self.dispatch_at(action, now_millis())
    }

    /// [`Session::dispatch`] with an explicit journal timestamp.
    pub fn dispatch_at(&mut self, action: &Action, timestamp: Timestamp) -> &GameState {
        self.state = self.reducer.reduce_at(&self.state, action, timestamp);
        self.dispatched += 1;
        debug!(
            "Dispatched {} (#{}), coins now {}",
            action.kind(),
            self.dispatched,
            self.state.coins()
        );
        &self.state
    }
}

/// A session behind a mutex. Every dispatch is serialized through the lock.
#[derive(Debug)]
pub struct SharedSession {
    inner: Mutex<Session<'static>>,
}

impl Default for SharedSession {
    fn default() -> Self {
        Self::new(Session::standard())
    }
}

impl SharedSession {
    /// Wraps an existing session.
    #[must_use]
    pub fn new(session: Session<'static>) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// Applies `action` under the lock and returns the resulting snapshot.
    pub fn dispatch(&self, action: &Action) -> GameState {
        self.inner.lock().dispatch(action).clone()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.inner.lock().state().clone()
    }

    /// Number of actions dispatched so far.
    #[must_use]
    pub fn history_len(&self) -> u64 {
        self.inner.lock().history_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuties_common::{BossId, Location};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_dispatch_replaces_state() {
        let mut session = Session::standard();
        let before = session.state().clone();
        let after = session
            .dispatch_at(
                &Action::Navigate {
                    location: Location::SarahsLab,
                },
                5,
            )
            .clone();
        assert_eq!(before.location(), Location::Arena);
        assert_eq!(after.location(), Location::SarahsLab);
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_with_state_resumes() {
        let state = GameState::new_at(3);
        let session = Session::with_state(Catalog::standard(), state.clone());
        assert_eq!(session.state(), &state);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_shared_session_serializes_dispatches() {
        let shared = Arc::new(SharedSession::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    shared.dispatch(&Action::FightBoss {
                        boss: BossId::Wound,
                    });
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("worker thread");
        }

        let state = shared.snapshot();
        assert_eq!(shared.history_len(), 8);
        assert_eq!(state.kills(BossId::Wound), 8);
        assert_eq!(state.coins(), 250 + 8 * 180);
    }
}
