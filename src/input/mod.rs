//! Touch input and gesture routing
//!
//! Provides the plumbing around the gesture engine:
//! - Collects raw touches from winit into phase batches
//! - Tags touches with the surface they landed on
//! - Routes classified gestures to handlers in priority order
//! - Supports per-kind callbacks for simple bindings
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → TouchCollector → TouchBatch
//!                                          ↓
//!                                    GestureEngine
//!                                  (classifies gestures)
//!                                          ↓
//!                                    GestureRouter
//!                              (handlers, then bindings)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut engine = GestureEngine::new(config.gestures);
//! let mut router = GestureRouter::new();
//! router.register_handler(Box::new(MyHandler::new()));
//! router.bind(GestureKind::DoubleTap, |event| zoom_in(event));
//!
//! // In window_event()
//! collector.handle_window_event(&event);
//!
//! // Each frame
//! for batch in collector.take_batches() {
//!     engine.handle_batch(&batch, &mut router);
//! }
//! ```

mod collector;
mod events;
mod handler;
mod router;

pub use collector::{DEFAULT_MERGE_WINDOW, Rect, TouchCollector};
pub use events::{Millis, TargetId, TouchBatch, TouchId, TouchPhase, TouchSample};
pub use handler::GestureHandler;
pub use router::{BindingId, GestureRouter};
