//! Cross-session memory used to detect double and multi taps

use tracing::trace;

use super::events::GestureKind;
use crate::config::GestureConfig;
use crate::input::{Millis, TargetId};

/// Tap families are tracked separately so a two-finger tap never
/// counts as the repeat of a single-finger one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapFamily {
    /// One finger
    Single,
    /// Two or more fingers
    Multi,
}

impl TapFamily {
    pub fn for_count(count: usize) -> Self {
        if count > 1 { Self::Multi } else { Self::Single }
    }

    /// Gesture reported when a tap of this family repeats
    pub fn repeat_kind(self) -> GestureKind {
        match self {
            Self::Single => GestureKind::DoubleTap,
            Self::Multi => GestureKind::MultiTap,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RepeatState {
    last_timestamp: Option<Millis>,
    repeat_count: u32,
    last_target: Option<TargetId>,
}

/// Last tap time, repeat count and target for each tap family
///
/// Lives longer than any session; the engine owns one and tests can inject
/// a prepared instance.
#[derive(Debug, Clone, Default)]
pub struct RepeatTracker {
    single: RepeatState,
    multi: RepeatState,
}

impl RepeatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum gap for a repeat; long taps get `tap_long_time` on top
    pub fn window(config: &GestureConfig, long: bool) -> Millis {
        if long {
            config.double_tap_time + config.tap_long_time
        } else {
            config.double_tap_time
        }
    }

    /// Records a tap ending at `timestamp` and returns its repeat count
    ///
    /// The count advances when the previous tap of the same family landed
    /// on the same target no more than `window` ago; otherwise it resets to 0.
    pub fn record_tap(
        &mut self,
        family: TapFamily,
        timestamp: Millis,
        target: Option<TargetId>,
        window: Millis,
    ) -> u32 {
        let state = self.state_mut(family);

        let repeats = state
            .last_timestamp
            .is_some_and(|last| timestamp.saturating_sub(last) <= window)
            && state.last_target == target;

        state.repeat_count = if repeats { state.repeat_count + 1 } else { 0 };
        state.last_timestamp = Some(timestamp);
        state.last_target = target;

        trace!(?family, timestamp, repeat = state.repeat_count, "tap recorded");
        state.repeat_count
    }

    pub fn repeat_count(&self, family: TapFamily) -> u32 {
        self.state(family).repeat_count
    }

    pub fn last_timestamp(&self, family: TapFamily) -> Option<Millis> {
        self.state(family).last_timestamp
    }

    pub fn last_target(&self, family: TapFamily) -> Option<TargetId> {
        self.state(family).last_target
    }

    /// Forgets all taps
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn state(&self, family: TapFamily) -> &RepeatState {
        match family {
            TapFamily::Single => &self.single,
            TapFamily::Multi => &self.multi,
        }
    }

    fn state_mut(&mut self, family: TapFamily) -> &mut RepeatState {
        match family {
            TapFamily::Single => &mut self.single,
            TapFamily::Multi => &mut self.multi,
        }
    }
}
