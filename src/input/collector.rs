//! Raw touch collection from winit events

use std::time::Instant;

use indexmap::IndexMap;
use tracing::trace;
use winit::event::{Touch, TouchPhase as WinitPhase, WindowEvent};

use crate::geometry::Point;

use super::events::{Millis, TargetId, TouchBatch, TouchId, TouchPhase, TouchSample};

/// Rectangular area for surface hit testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rectangle (edges included)
    pub fn contains(&self, pos: Point) -> bool {
        pos[0] >= self.x
            && pos[0] <= self.x + self.width
            && pos[1] >= self.y
            && pos[1] <= self.y + self.height
    }
}

#[derive(Debug, Clone)]
struct SurfaceInfo {
    rect: Rect,
    name: String,
}

/// Touches closer than this in time may share a batch (one 60 Hz frame)
pub const DEFAULT_MERGE_WINDOW: Millis = 16;

/// Collects winit touch events into phase batches for the gesture engine
///
/// Positions are converted to logical pixels and timestamps are
/// milliseconds since the collector was created. Hosts should drain once
/// per frame with `take_batches`.
pub struct TouchCollector {
    epoch: Instant,
    scale_factor: f32,
    merge_window: Millis,
    /// Registered surfaces, hit tested in registration order
    surfaces: IndexMap<TargetId, SurfaceInfo>,
    pending: Vec<TouchBatch>,
}

impl TouchCollector {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            scale_factor: 1.0,
            merge_window: DEFAULT_MERGE_WINDOW,
            surfaces: IndexMap::new(),
            pending: Vec::new(),
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Max gap between a batch's first touch and a touch merged into it
    pub fn set_merge_window(&mut self, window: Millis) {
        self.merge_window = window;
    }

    /// Handle a winit window event; returns true if it was touch related
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Touch(touch) => {
                self.handle_touch(touch);
                true
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor as f32);
                false
            }
            _ => false,
        }
    }

    /// Handle a single winit touch
    pub fn handle_touch(&mut self, touch: &Touch) {
        let phase = match touch.phase {
            WinitPhase::Started => TouchPhase::Start,
            WinitPhase::Moved => TouchPhase::Move,
            WinitPhase::Ended => TouchPhase::End,
            WinitPhase::Cancelled => TouchPhase::Cancel,
        };
        let pos = [
            touch.location.x as f32 / self.scale_factor,
            touch.location.y as f32 / self.scale_factor,
        ];
        self.push(phase, touch.id, pos);
    }

    /// Record a touch in logical pixels, stamped with the current time
    pub fn push(&mut self, phase: TouchPhase, id: TouchId, pos: Point) {
        let now = self.epoch.elapsed().as_millis() as Millis;
        self.push_at(phase, id, pos, now);
    }

    /// Record a touch with an explicit timestamp
    ///
    /// A touch joins the last pending batch when the phase matches, the
    /// batch has no sample for the same finger yet, and it started no more
    /// than the merge window earlier.
    pub fn push_at(&mut self, phase: TouchPhase, id: TouchId, pos: Point, time: Millis) {
        let mut sample = TouchSample::new(id, pos[0], pos[1]);
        if let Some(target) = self.find_surface_at(pos) {
            sample = sample.with_target(target);
        }
        trace!(phase = phase.as_str(), id, x = pos[0], y = pos[1], time, "touch");

        match self.pending.last_mut() {
            Some(batch)
                if batch.phase == phase
                    && !batch.contains(id)
                    && time.saturating_sub(batch.time) <= self.merge_window =>
            {
                batch.samples.push(sample);
            }
            _ => self.pending.push(TouchBatch::new(phase, time, vec![sample])),
        }
    }

    /// Drain the batches collected since the last call
    pub fn take_batches(&mut self) -> Vec<TouchBatch> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Register a surface for hit testing
    ///
    /// Touches landing inside `rect` are tagged with `id`. When surfaces
    /// overlap the one registered first wins.
    pub fn register_surface(&mut self, id: TargetId, rect: Rect, name: impl Into<String>) {
        self.surfaces.insert(
            id,
            SurfaceInfo {
                rect,
                name: name.into(),
            },
        );
    }

    pub fn clear_surfaces(&mut self) {
        self.surfaces.clear();
    }

    fn find_surface_at(&self, pos: Point) -> Option<TargetId> {
        self.surfaces
            .iter()
            .find(|(_, info)| info.rect.contains(pos))
            .map(|(id, _)| *id)
    }

    pub fn surface_rect(&self, id: TargetId) -> Option<Rect> {
        self.surfaces.get(&id).map(|info| info.rect)
    }

    /// Get debug information about all surfaces
    pub fn debug_surfaces(&self) -> Vec<(TargetId, Rect, String)> {
        self.surfaces
            .iter()
            .map(|(id, info)| (*id, info.rect, info.name.clone()))
            .collect()
    }
}

impl Default for TouchCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains([10.0, 10.0]));
        assert!(rect.contains([110.0, 60.0]));
        assert!(!rect.contains([9.0, 30.0]));
        assert!(!rect.contains([50.0, 61.0]));
    }

    #[test]
    fn test_same_phase_touches_merge() {
        let mut collector = TouchCollector::new();
        collector.push_at(TouchPhase::Start, 1, [10.0, 10.0], 0);
        collector.push_at(TouchPhase::Start, 2, [50.0, 50.0], 1);
        collector.push_at(TouchPhase::Move, 1, [12.0, 10.0], 16);
        collector.push_at(TouchPhase::Move, 2, [52.0, 50.0], 16);
        collector.push_at(TouchPhase::Move, 1, [14.0, 10.0], 32);

        let batches = collector.take_batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].samples.len(), 2);
        assert_eq!(batches[0].time, 0);
        assert_eq!(batches[1].samples.len(), 2);
        assert_eq!(batches[2].time, 32);
        assert_eq!(collector.pending_count(), 0);
    }

    #[test]
    fn test_undrained_touches_far_apart_stay_separate() {
        let mut collector = TouchCollector::new();
        collector.push_at(TouchPhase::Start, 1, [10.0, 10.0], 0);
        collector.push_at(TouchPhase::Start, 2, [50.0, 50.0], 500);

        let batches = collector.take_batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[1].time, 500);
        assert_eq!(batches[1].samples[0].id, 2);
    }

    #[test]
    fn test_merge_window_is_configurable() {
        let mut collector = TouchCollector::new();
        collector.set_merge_window(0);
        collector.push_at(TouchPhase::Move, 1, [10.0, 10.0], 16);
        collector.push_at(TouchPhase::Move, 2, [50.0, 50.0], 16);
        collector.push_at(TouchPhase::Move, 3, [90.0, 90.0], 17);

        let batches = collector.take_batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].samples.len(), 2);
    }

    #[test]
    fn test_surface_hit_testing() {
        let mut collector = TouchCollector::new();
        collector.register_surface(TargetId(1), Rect::new(0.0, 0.0, 100.0, 100.0), "canvas");
        collector.register_surface(TargetId(2), Rect::new(50.0, 50.0, 100.0, 100.0), "button");

        collector.push_at(TouchPhase::Start, 1, [75.0, 75.0], 0);
        collector.push_at(TouchPhase::End, 1, [125.0, 125.0], 40);
        collector.push_at(TouchPhase::Start, 2, [300.0, 300.0], 80);

        let batches = collector.take_batches();
        assert_eq!(batches[0].samples[0].target, Some(TargetId(1)));
        assert_eq!(batches[1].samples[0].target, Some(TargetId(2)));
        assert_eq!(batches[2].samples[0].target, None);

        assert_eq!(collector.debug_surfaces()[1].2, "button");
        collector.clear_surfaces();
        assert!(collector.surface_rect(TargetId(1)).is_none());
    }

    #[test]
    fn test_invalid_scale_factor_ignored() {
        let mut collector = TouchCollector::new();
        collector.set_scale_factor(2.0);
        collector.set_scale_factor(0.0);
        assert!((collector.scale_factor() - 2.0).abs() < 0.001);
    }
}
