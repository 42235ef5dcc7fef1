//! Scripted touch sequences
//!
//! [`TouchScript`] builds batch sequences without a device, and
//! [`canonical_scenarios`] lists the reference gestures the health check
//! replays against a fresh engine.

use crate::config::GestureConfig;
use crate::engine::GestureEngine;
use crate::gesture::GestureKind;
use crate::input::{Millis, TargetId, TouchBatch, TouchId, TouchPhase, TouchSample};

/// Fluent builder for touch batch sequences
///
/// Fingers are given as `(id, x, y)`.
#[derive(Debug, Clone, Default)]
pub struct TouchScript {
    target: Option<TargetId>,
    batches: Vec<TouchBatch>,
}

impl TouchScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script whose samples all land on `target`
    pub fn on(target: TargetId) -> Self {
        Self {
            target: Some(target),
            batches: Vec::new(),
        }
    }

    pub fn start(self, time: Millis, fingers: &[(TouchId, f32, f32)]) -> Self {
        self.push(TouchPhase::Start, time, fingers)
    }

    pub fn moves(self, time: Millis, fingers: &[(TouchId, f32, f32)]) -> Self {
        self.push(TouchPhase::Move, time, fingers)
    }

    pub fn end(self, time: Millis, fingers: &[(TouchId, f32, f32)]) -> Self {
        self.push(TouchPhase::End, time, fingers)
    }

    pub fn cancel(self, time: Millis) -> Self {
        self.push(TouchPhase::Cancel, time, &[])
    }

    /// A one-finger tap of `duration` at `pos`
    pub fn tap(self, time: Millis, duration: Millis, pos: (f32, f32)) -> Self {
        let finger = [(1, pos.0, pos.1)];
        self.start(time, &finger).end(time + duration, &finger)
    }

    fn push(mut self, phase: TouchPhase, time: Millis, fingers: &[(TouchId, f32, f32)]) -> Self {
        let samples = fingers
            .iter()
            .map(|&(id, x, y)| {
                let sample = TouchSample::new(id, x, y);
                match self.target {
                    Some(target) => sample.with_target(target),
                    None => sample,
                }
            })
            .collect();
        self.batches.push(TouchBatch::new(phase, time, samples));
        self
    }

    pub fn batches(&self) -> &[TouchBatch] {
        &self.batches
    }

    pub fn build(self) -> Vec<TouchBatch> {
        self.batches
    }
}

/// A reference touch sequence and the gestures it must produce
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub batches: Vec<TouchBatch>,
    /// Expected gestures in order, generic `move` reports excluded
    pub expected: Vec<GestureKind>,
}

impl Scenario {
    fn new(name: &'static str, script: TouchScript, expected: &[GestureKind]) -> Self {
        Self {
            name,
            batches: script.build(),
            expected: expected.to_vec(),
        }
    }

    /// Replays the scenario through a fresh engine
    ///
    /// Returns the produced kinds, generic `move` reports excluded.
    pub fn run(&self, config: &GestureConfig) -> Vec<GestureKind> {
        GestureEngine::new(config.clone())
            .replay(&self.batches)
            .into_iter()
            .map(|event| event.kind)
            .filter(|kind| *kind != GestureKind::Move)
            .collect()
    }

    pub fn passes(&self, config: &GestureConfig) -> bool {
        self.run(config) == self.expected
    }
}

/// Reference scenarios valid under the default thresholds
/// (with `get_all_taps` off)
pub fn canonical_scenarios() -> Vec<Scenario> {
    use GestureKind::*;

    vec![
        Scenario::new("tap", TouchScript::new().tap(0, 50, (100.0, 100.0)), &[Tap]),
        Scenario::new(
            "press",
            TouchScript::new().tap(0, 1200, (100.0, 100.0)),
            &[Press],
        ),
        Scenario::new(
            "double tap",
            TouchScript::new()
                .tap(0, 40, (100.0, 100.0))
                .tap(150, 40, (102.0, 101.0)),
            &[Tap, DoubleTap],
        ),
        Scenario::new(
            "twin tap",
            TouchScript::new()
                .start(0, &[(1, 100.0, 100.0), (2, 160.0, 100.0)])
                .end(60, &[(1, 100.0, 100.0), (2, 160.0, 100.0)]),
            &[TwinTap],
        ),
        Scenario::new(
            "flick",
            TouchScript::new()
                .start(0, &[(1, 100.0, 100.0)])
                .moves(40, &[(1, 220.0, 100.0)])
                .end(80, &[(1, 220.0, 100.0)]),
            &[Flick],
        ),
        Scenario::new(
            "swipe",
            TouchScript::new()
                .start(0, &[(1, 100.0, 100.0)])
                .moves(150, &[(1, 220.0, 100.0)])
                .end(300, &[(1, 220.0, 100.0)]),
            &[Swipe],
        ),
        Scenario::new(
            "pinch",
            TouchScript::new()
                .start(0, &[(1, 0.0, 0.0), (2, 200.0, 200.0)])
                .moves(100, &[(1, 50.0, 50.0), (2, 150.0, 150.0)])
                .end(200, &[(1, 50.0, 50.0), (2, 150.0, 150.0)]),
            &[Narrow, Pinch],
        ),
        Scenario::new(
            "stretch",
            TouchScript::new()
                .start(0, &[(1, 50.0, 50.0), (2, 150.0, 150.0)])
                .moves(100, &[(1, 0.0, 0.0), (2, 200.0, 200.0)])
                .end(200, &[(1, 0.0, 0.0), (2, 200.0, 200.0)]),
            &[Widen, Stretch],
        ),
        Scenario::new(
            "grab",
            TouchScript::new()
                .start(0, &[(1, 0.0, 0.0), (2, 200.0, 0.0), (3, 100.0, 200.0)])
                .moves(100, &[(1, 50.0, 50.0), (2, 150.0, 50.0), (3, 100.0, 150.0)])
                .end(
                    200,
                    &[(1, 50.0, 50.0), (2, 150.0, 50.0), (3, 100.0, 150.0)],
                ),
            &[Narrow, Grab],
        ),
        Scenario::new(
            "rotate then cancel",
            TouchScript::new()
                .start(0, &[(1, 100.0, 100.0), (2, 200.0, 140.0)])
                .moves(100, &[(1, 105.0, 91.0), (2, 195.0, 149.0)])
                .cancel(150),
            &[Rotate],
        ),
    ]
}
