//! Gesture handler trait for application subsystems

use crate::gesture::GestureEvent;
use crate::session::TouchSession;

use super::events::TouchPhase;

/// Trait for subsystems that react to classified gestures
///
/// Handlers are called in priority order (highest first).
/// When a handler consumes a gesture (returns true), propagation stops.
pub trait GestureHandler {
    /// Name of this handler for debugging
    fn name(&self) -> &str;

    /// Priority for gesture routing (higher = earlier)
    ///
    /// Priority ranges:
    /// - 200+: Overlays that must see every gesture
    /// - 100-199: Widgets (buttons, sliders, scroll views)
    /// - 0-99: Scene-level and fallback handlers
    fn priority(&self) -> u32;

    /// Handle a classified gesture
    ///
    /// # Returns
    /// * `true` if the gesture was consumed (stops propagation and skips bindings)
    /// * `false` to let lower priority handlers see it
    fn handle_gesture(&mut self, event: &GestureEvent) -> bool;

    /// Called with the live session for every applied batch
    ///
    /// Useful for raw touch feedback such as drawing finger trails.
    fn on_touch(&mut self, _phase: TouchPhase, _session: &TouchSession) {
        // Default: no-op
    }

    /// Downcast to concrete type for accessing handler-specific state
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
