//! Gesture Engine
//!
//! Classifies raw multi-touch input into gestures: taps, presses, repeated
//! taps, swipes, flicks, pinches, spreads, rotations and continuous moves.

/// Classification thresholds and profile loading
pub mod config;

/// The batch-driven facade tying sessions and classification together
pub mod engine;

pub mod error;

/// Bounding-box area, scale ratios and rotation angles
pub mod geometry;

/// Classified gestures, repeat memory and the emitter boundary
pub mod gesture;

/// Health checks for configuration and classification
pub mod health;

/// Raw touch types, winit collection and gesture routing
pub mod input;

/// Scripted touch sequences and reference scenarios
pub mod script;

/// Live touch sessions
pub mod session;

/// Recorded JSON touch traces
pub mod trace;

pub use config::{EngineConfig, GestureConfig, OptionValue};
pub use engine::GestureEngine;
pub use error::GestureError;
pub use gesture::{GestureEmitter, GestureEvent, GestureKind};
pub use input::{TargetId, TouchBatch, TouchPhase, TouchSample};
