//! Classified gesture events

use std::fmt;

use serde::Serialize;

use crate::input::{Millis, TargetId, TouchSample};
use crate::session::Distance;

/// Every gesture the classifier can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    /// Short touch without movement
    Tap,
    /// Long touch without movement
    Press,
    /// Repeated single-finger tap
    DoubleTap,
    /// Repeated tap with two or more fingers
    MultiTap,
    /// Two-finger tap
    TwinTap,
    /// Two-finger long touch
    TwinTapLong,
    /// Slow, long movement
    Swipe,
    /// Fast movement
    Flick,
    /// Two fingers closing
    Pinch,
    /// Two fingers opening
    Stretch,
    /// Three or more fingers closing
    Grab,
    /// Three or more fingers opening
    Spread,
    /// Two-finger twist (continuous)
    Rotate,
    /// Fingers moving apart since the last sample (continuous)
    Widen,
    /// Fingers moving together since the last sample (continuous)
    Narrow,
    /// Any movement (continuous)
    Move,
}

impl GestureKind {
    pub const ALL: [GestureKind; 16] = [
        Self::Tap,
        Self::Press,
        Self::DoubleTap,
        Self::MultiTap,
        Self::TwinTap,
        Self::TwinTapLong,
        Self::Swipe,
        Self::Flick,
        Self::Pinch,
        Self::Stretch,
        Self::Grab,
        Self::Spread,
        Self::Rotate,
        Self::Widen,
        Self::Narrow,
        Self::Move,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Press => "press",
            Self::DoubleTap => "doubletap",
            Self::MultiTap => "multitap",
            Self::TwinTap => "twintap",
            Self::TwinTapLong => "twintaplong",
            Self::Swipe => "swipe",
            Self::Flick => "flick",
            Self::Pinch => "pinch",
            Self::Stretch => "stretch",
            Self::Grab => "grab",
            Self::Spread => "spread",
            Self::Rotate => "rotate",
            Self::Widen => "widen",
            Self::Narrow => "narrow",
            Self::Move => "move",
        }
    }

    /// Returns true for kinds reported while fingers move rather than on release
    pub fn is_continuous(self) -> bool {
        matches!(self, Self::Rotate | Self::Widen | Self::Narrow | Self::Move)
    }

    /// Looks a kind up by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dominant axis of a swipe or flick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Payload carried by a gesture, by family
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum GestureDetail {
    /// tap, press, doubletap, multitap, twintap, twintaplong
    Tap {
        duration: Millis,
        count: usize,
        /// Taps in a row before this one (0 for a first tap)
        repeat: u32,
    },
    /// swipe, flick
    Swipe {
        duration: Millis,
        count: usize,
        distance: Distance,
        direction: Direction,
    },
    /// pinch, stretch, grab, spread
    Scale {
        duration: Millis,
        count: usize,
        /// Area ratio over the whole gesture
        scale: f32,
    },
    /// rotate
    Rotate {
        count: usize,
        /// Signed radians since the previous sample, clockwise positive
        rotation: f32,
    },
    /// widen, narrow
    Resize {
        count: usize,
        /// Area ratio since the previous sample
        scale: f32,
    },
    /// move
    Move {
        count: usize,
        scale: f32,
        touches: Vec<TouchSample>,
    },
}

/// A classified gesture, addressed to the surface the session started on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub target: Option<TargetId>,
    /// Timestamp of the batch that produced the gesture
    pub time: Millis,
    pub detail: GestureDetail,
}

impl GestureEvent {
    pub fn new(
        kind: GestureKind,
        target: Option<TargetId>,
        time: Millis,
        detail: GestureDetail,
    ) -> Self {
        Self {
            kind,
            target,
            time,
            detail,
        }
    }

    /// Number of fingers involved
    pub fn count(&self) -> usize {
        match &self.detail {
            GestureDetail::Tap { count, .. }
            | GestureDetail::Swipe { count, .. }
            | GestureDetail::Scale { count, .. }
            | GestureDetail::Rotate { count, .. }
            | GestureDetail::Resize { count, .. }
            | GestureDetail::Move { count, .. } => *count,
        }
    }

    pub fn duration(&self) -> Option<Millis> {
        match &self.detail {
            GestureDetail::Tap { duration, .. }
            | GestureDetail::Swipe { duration, .. }
            | GestureDetail::Scale { duration, .. } => Some(*duration),
            _ => None,
        }
    }

    pub fn repeat(&self) -> Option<u32> {
        match &self.detail {
            GestureDetail::Tap { repeat, .. } => Some(*repeat),
            _ => None,
        }
    }

    pub fn scale(&self) -> Option<f32> {
        match &self.detail {
            GestureDetail::Scale { scale, .. }
            | GestureDetail::Resize { scale, .. }
            | GestureDetail::Move { scale, .. } => Some(*scale),
            _ => None,
        }
    }

    pub fn rotation(&self) -> Option<f32> {
        match &self.detail {
            GestureDetail::Rotate { rotation, .. } => Some(*rotation),
            _ => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match &self.detail {
            GestureDetail::Swipe { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    pub fn distance(&self) -> Option<Distance> {
        match &self.detail {
            GestureDetail::Swipe { distance, .. } => Some(*distance),
            _ => None,
        }
    }

    /// One-line summary used in logs and reports
    pub fn summary(&self) -> String {
        match &self.detail {
            GestureDetail::Tap {
                duration, repeat, ..
            } => format!("{}ms repeat={}", duration, repeat),
            GestureDetail::Swipe {
                duration,
                distance,
                direction,
                ..
            } => format!(
                "{}ms {:?} dx={:.1} dy={:.1}",
                duration, direction, distance.x, distance.y
            ),
            GestureDetail::Scale { duration, scale, .. } => {
                format!("{}ms scale={:.3}", duration, scale)
            }
            GestureDetail::Rotate { rotation, .. } => format!("rotation={:.4}rad", rotation),
            GestureDetail::Resize { scale, .. } => format!("scale={:.3}", scale),
            GestureDetail::Move { scale, touches, .. } => {
                format!("scale={:.3} touches={}", scale, touches.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in GestureKind::ALL {
            assert_eq!(GestureKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(GestureKind::from_name("fling"), None);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&GestureKind::TwinTapLong).unwrap();
        assert_eq!(json, "\"twintaplong\"");
    }

    #[test]
    fn test_continuous_kinds() {
        assert!(GestureKind::Rotate.is_continuous());
        assert!(GestureKind::Move.is_continuous());
        assert!(!GestureKind::Pinch.is_continuous());
    }

    #[test]
    fn test_event_accessors() {
        let event = GestureEvent::new(
            GestureKind::DoubleTap,
            Some(TargetId(2)),
            700,
            GestureDetail::Tap {
                duration: 40,
                count: 1,
                repeat: 1,
            },
        );
        assert_eq!(event.repeat(), Some(1));
        assert_eq!(event.count(), 1);
        assert_eq!(event.duration(), Some(40));
        assert_eq!(event.scale(), None);
        assert_eq!(event.summary(), "40ms repeat=1");
    }
}
