//! Gesture engine: ties session tracking, classification and repeat memory together
//!
//! Every call is a synchronous step "state + one batch → new state + events".
//! The engine has no timers, so a threshold crossed while nothing happens is
//! only noticed when the next batch arrives.

use tracing::debug;

use crate::config::{GestureConfig, OptionValue};
use crate::gesture::{GestureClassifier, GestureEmitter, GestureEvent, RepeatTracker};
use crate::input::{TouchBatch, TouchPhase};
use crate::session::{SessionTracker, TouchSession};

/// Classifies touch batches into gestures
#[derive(Debug, Default)]
pub struct GestureEngine {
    tracker: SessionTracker,
    classifier: GestureClassifier,
    repeats: RepeatTracker,
}

impl GestureEngine {
    /// Creates an idle engine with the given thresholds
    pub fn new(config: GestureConfig) -> Self {
        Self {
            tracker: SessionTracker::new(),
            classifier: GestureClassifier::new(config),
            repeats: RepeatTracker::new(),
        }
    }

    /// Builder method to start from prepared repeat memory
    pub fn with_repeat_tracker(mut self, repeats: RepeatTracker) -> Self {
        self.repeats = repeats;
        self
    }

    /// Applies one batch, sending any resulting gestures to `emitter`
    ///
    /// Returns the number of gestures emitted.
    pub fn handle_batch(&mut self, batch: &TouchBatch, emitter: &mut dyn GestureEmitter) -> usize {
        let events = match batch.phase {
            TouchPhase::Start => {
                self.tracker.on_touch_start(&batch.samples, batch.time);
                if let Some(session) = self.tracker.session() {
                    emitter.observe(TouchPhase::Start, session);
                }
                Vec::new()
            }
            TouchPhase::Move => match self.tracker.on_touch_move(&batch.samples) {
                Some(session) => {
                    emitter.observe(TouchPhase::Move, session);
                    self.classifier.classify_move(session, batch.time)
                }
                None => Vec::new(),
            },
            TouchPhase::End => {
                let classifier = &self.classifier;
                let repeats = &mut self.repeats;
                let mut events = Vec::new();
                self.tracker
                    .on_touch_end(&batch.samples, batch.time, |session| {
                        emitter.observe(TouchPhase::End, session);
                        events = classifier.classify_end(session, repeats);
                    });
                events
            }
            TouchPhase::Cancel => {
                if let Some(session) = self.tracker.session() {
                    emitter.observe(TouchPhase::Cancel, session);
                }
                self.tracker.on_touch_cancel();
                Vec::new()
            }
        };

        let emitted = events.len();
        for event in events {
            debug!(kind = %event.kind, target_id = ?event.target, detail = %event.summary(), "gesture");
            emitter.emit(event);
        }
        emitted
    }

    /// Runs a sequence of batches, collecting every gesture
    pub fn replay<'a, I>(&mut self, batches: I) -> Vec<GestureEvent>
    where
        I: IntoIterator<Item = &'a TouchBatch>,
    {
        let mut events = Vec::new();
        for batch in batches {
            self.handle_batch(batch, &mut events);
        }
        events
    }

    pub fn config(&self) -> &GestureConfig {
        self.classifier.config()
    }

    /// Replaces all thresholds; the active session is kept
    ///
    /// Non-positive thresholds fall back to their defaults.
    pub fn set_config(&mut self, config: GestureConfig) {
        let config = config.sanitized();
        debug!(?config, "gesture config replaced");
        *self.classifier.config_mut() = config;
    }

    /// Applies runtime option changes, ignoring invalid values
    pub fn apply_options<'a, I>(&mut self, options: I) -> Vec<&'static str>
    where
        I: IntoIterator<Item = (&'a str, &'a OptionValue)>,
    {
        self.classifier.config_mut().apply_options(options)
    }

    /// The gesture in progress, if any finger is down
    pub fn session(&self) -> Option<&TouchSession> {
        self.tracker.session()
    }

    pub fn repeat_tracker(&self) -> &RepeatTracker {
        &self.repeats
    }

    /// Returns true if no finger is down
    pub fn is_idle(&self) -> bool {
        !self.tracker.is_active()
    }
}
