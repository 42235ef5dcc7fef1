//! Gesture classification
//!
//! ```text
//! TouchSession ──► GestureClassifier ──► GestureEvent ──► GestureEmitter
//!                        │
//!                  RepeatTracker
//!                (double/multi taps)
//! ```

mod classifier;
mod emitter;
mod events;
mod repeat;

pub use classifier::{GestureClassifier, PINCH_SCALE, STRETCH_SCALE};
pub use emitter::GestureEmitter;
pub use events::{Direction, GestureDetail, GestureEvent, GestureKind};
pub use repeat::{RepeatTracker, TapFamily};
