//! Raw touch input delivered by the host

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Identifier of a finger, unique among the points currently in contact
pub type TouchId = u64;

/// Milliseconds on the host's monotonic clock
pub type Millis = u64;

/// Surface (element) a touch landed on, used as the gesture target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Lifecycle phase of a touch batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// One or more fingers landed
    Start,
    /// One or more fingers moved
    Move,
    /// One or more fingers lifted
    End,
    /// The platform aborted the touch sequence
    Cancel,
}

impl TouchPhase {
    /// Lowercase name, matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::End => "end",
            Self::Cancel => "cancel",
        }
    }
}

/// One finger position inside a batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    pub id: TouchId,
    /// Screen X in logical pixels
    pub x: f32,
    /// Screen Y in logical pixels
    pub y: f32,
    /// Surface under the finger, if the host resolved one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetId>,
}

impl TouchSample {
    pub fn new(id: TouchId, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            target: None,
        }
    }

    /// Builder method to attach the surface under the finger
    pub fn with_target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn position(&self) -> Point {
        [self.x, self.y]
    }
}

/// Ordered group of samples sharing a phase and an arrival time
///
/// `End` batches only carry the fingers that lifted; fingers absent from
/// the batch stay active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchBatch {
    pub phase: TouchPhase,
    /// Arrival timestamp
    pub time: Millis,
    #[serde(default)]
    pub samples: Vec<TouchSample>,
}

impl TouchBatch {
    pub fn new(phase: TouchPhase, time: Millis, samples: Vec<TouchSample>) -> Self {
        Self {
            phase,
            time,
            samples,
        }
    }

    pub fn started(time: Millis, samples: Vec<TouchSample>) -> Self {
        Self::new(TouchPhase::Start, time, samples)
    }

    pub fn moved(time: Millis, samples: Vec<TouchSample>) -> Self {
        Self::new(TouchPhase::Move, time, samples)
    }

    pub fn ended(time: Millis, samples: Vec<TouchSample>) -> Self {
        Self::new(TouchPhase::End, time, samples)
    }

    pub fn cancelled(time: Millis, samples: Vec<TouchSample>) -> Self {
        Self::new(TouchPhase::Cancel, time, samples)
    }

    /// Returns true if the batch carries a sample for `id`
    pub fn contains(&self, id: TouchId) -> bool {
        self.samples.iter().any(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
