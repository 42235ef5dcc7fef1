//! Session lifecycle: creation on first touch, teardown on last release

use tracing::debug;

use super::touch_session::TouchSession;
use crate::input::{Millis, TouchSample};

/// Owns the single active session, if any
#[derive(Debug, Default)]
pub struct SessionTracker {
    session: Option<TouchSession>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits every finger not yet tracked
    ///
    /// A fresh session takes its target from the first admitted sample.
    /// Returns the number of admitted fingers.
    pub fn on_touch_start(&mut self, samples: &[TouchSample], now: Millis) -> usize {
        let Some(first) = samples.first() else {
            return 0;
        };

        let session = self.session.get_or_insert_with(|| {
            debug!(target_id = ?first.target, "session started");
            TouchSession::new(first.target)
        });

        let admitted = samples.iter().filter(|s| session.admit(s, now)).count();
        debug!(admitted, active = session.len(), "touch start");
        admitted
    }

    /// Moves tracked fingers, ignoring unknown identifiers
    ///
    /// Returns the session if the batch changed it.
    pub fn on_touch_move(&mut self, samples: &[TouchSample]) -> Option<&TouchSession> {
        let session = self.session.as_mut()?;
        session.apply_move(samples).then_some(&*session)
    }

    /// Ends the given fingers
    ///
    /// `classify` sees the final snapshot (end time set, nothing removed
    /// yet). The ended fingers are then released and the session is dropped
    /// once nobody is left touching. A batch naming no tracked finger is a
    /// no-op and `classify` is not called.
    pub fn on_touch_end<F>(&mut self, samples: &[TouchSample], now: Millis, classify: F) -> bool
    where
        F: FnOnce(&mut TouchSession),
    {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !samples.iter().any(|s| session.contains(s.id)) {
            return false;
        }

        session.set_end_time(now);
        classify(session);

        let released = session.release(samples.iter().map(|s| s.id));
        debug!(released, remaining = session.len(), "touch end");

        if session.is_empty() {
            self.session = None;
            debug!("session finished");
        }
        true
    }

    /// Drops the session without classifying it
    ///
    /// Returns true if a session was active.
    pub fn on_touch_cancel(&mut self) -> bool {
        let cancelled = self.session.take().is_some();
        if cancelled {
            debug!("session cancelled");
        }
        cancelled
    }

    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
