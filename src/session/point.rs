//! A single tracked finger

use crate::geometry::{Point, sub};
use crate::input::{Millis, TouchId};

/// One finger in contact with the surface
#[derive(Debug, Clone, PartialEq)]
pub struct TouchPoint {
    pub identifier: TouchId,
    /// Position when the finger landed
    pub start: Point,
    /// Position at the previous sample
    pub prev: Point,
    /// Latest position
    pub current: Point,
    /// `current - prev`
    pub delta: Point,
    /// `current - start`
    pub total: Point,
    /// When this finger landed (not when the session began)
    pub start_time: Millis,
}

impl TouchPoint {
    /// Admits a finger at `pos`
    pub fn new(identifier: TouchId, pos: Point, now: Millis) -> Self {
        Self {
            identifier,
            start: pos,
            prev: pos,
            current: pos,
            delta: [0.0, 0.0],
            total: [0.0, 0.0],
            start_time: now,
        }
    }

    /// Moves the finger to `pos`
    pub fn update(&mut self, pos: Point) {
        self.prev = self.current;
        self.current = pos;
        self.delta = sub(self.current, self.prev);
        self.total = sub(self.current, self.start);
    }

    /// Records a sample in which this finger did not move
    pub fn hold(&mut self) {
        self.update(self.current);
    }

    /// Returns true if the total displacement stays within `distance` on both axes
    pub fn is_within(&self, distance: f32) -> bool {
        self.total[0].abs() <= distance && self.total[1].abs() <= distance
    }

    /// Largest absolute displacement on either axis
    pub fn reach(&self) -> f32 {
        self.total[0].abs().max(self.total[1].abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_point_is_at_rest() {
        let p = TouchPoint::new(4, [10.0, 20.0], 500);
        assert_eq!(p.start, [10.0, 20.0]);
        assert_eq!(p.prev, p.current);
        assert_eq!(p.delta, [0.0, 0.0]);
        assert_eq!(p.total, [0.0, 0.0]);
        assert_eq!(p.start_time, 500);
    }

    #[test]
    fn test_update_tracks_delta_and_total() {
        let mut p = TouchPoint::new(1, [0.0, 0.0], 0);
        p.update([5.0, -2.0]);
        p.update([8.0, 1.0]);
        assert_eq!(p.prev, [5.0, -2.0]);
        assert_eq!(p.delta, [3.0, 3.0]);
        assert_eq!(p.total, [8.0, 1.0]);
    }

    #[test]
    fn test_hold_zeroes_delta_only() {
        let mut p = TouchPoint::new(1, [0.0, 0.0], 0);
        p.update([6.0, 0.0]);
        p.hold();
        assert_eq!(p.delta, [0.0, 0.0]);
        assert_eq!(p.total, [6.0, 0.0]);
    }

    #[test]
    fn test_within_uses_absolute_displacement() {
        let mut p = TouchPoint::new(1, [50.0, 50.0], 0);
        p.update([41.0, 59.0]);
        assert!(p.is_within(10.0));
        p.update([38.0, 50.0]);
        assert!(!p.is_within(10.0));
        assert_eq!(p.reach(), 12.0);
    }
}
