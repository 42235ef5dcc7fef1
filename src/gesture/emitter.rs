//! Boundary through which classified gestures leave the engine

use crate::input::TouchPhase;
use crate::session::TouchSession;

use super::events::GestureEvent;

/// Receives classified gestures; owned by the surrounding application
pub trait GestureEmitter {
    /// Called once per classified gesture, in classification order
    fn emit(&mut self, event: GestureEvent);

    /// Called with the session as each batch is applied
    ///
    /// For `End` and `Cancel` the session still holds the fingers being
    /// removed.
    fn observe(&mut self, _phase: TouchPhase, _session: &TouchSession) {
        // Default: no-op
    }
}

/// Collects events, mostly useful in tests and replays
impl GestureEmitter for Vec<GestureEvent> {
    fn emit(&mut self, event: GestureEvent) {
        self.push(event);
    }
}
