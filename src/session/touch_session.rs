//! The gesture in progress

use indexmap::IndexMap;
use tracing::trace;

use super::point::TouchPoint;
use crate::geometry::{self, Point};
use crate::input::{Millis, TargetId, TouchId, TouchSample};

/// Largest absolute displacement per axis over all points
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Distance {
    pub x: f32,
    pub y: f32,
}

/// All fingers currently touching, plus the measures derived from them
#[derive(Debug, Clone)]
pub struct TouchSession {
    /// Points in arrival order
    points: IndexMap<TouchId, TouchPoint>,
    target: Option<TargetId>,
    start_area: f32,
    prev_area: f32,
    current_area: f32,
    total_scale: f32,
    delta_scale: f32,
    /// Signed twist of the latest move sample, if it was a rotation
    rotation: Option<f32>,
    /// Set once an end-time gesture has been dispatched
    consumed: bool,
    end_time: Option<Millis>,
}

impl TouchSession {
    pub(crate) fn new(target: Option<TargetId>) -> Self {
        Self {
            points: IndexMap::new(),
            target,
            start_area: 0.0,
            prev_area: 0.0,
            current_area: 0.0,
            total_scale: 1.0,
            delta_scale: 1.0,
            rotation: None,
            consumed: false,
            end_time: None,
        }
    }

    /// Admits a new finger
    ///
    /// Returns false if the identifier is already tracked; the existing point
    /// is kept unchanged.
    pub(crate) fn admit(&mut self, sample: &TouchSample, now: Millis) -> bool {
        if self.points.contains_key(&sample.id) {
            return false;
        }

        self.points
            .insert(sample.id, TouchPoint::new(sample.id, sample.position(), now));
        self.reset_reference_areas();
        true
    }

    /// Applies a move batch
    ///
    /// Known fingers missing from the batch are treated as stationary for
    /// this sample. Returns false (and changes nothing) if the batch names no
    /// tracked finger.
    pub(crate) fn apply_move(&mut self, samples: &[TouchSample]) -> bool {
        if !samples.iter().any(|s| self.points.contains_key(&s.id)) {
            return false;
        }

        for point in self.points.values_mut() {
            match samples.iter().find(|s| s.id == point.identifier) {
                Some(sample) => point.update(sample.position()),
                None => point.hold(),
            }
        }

        self.prev_area = self.current_area;
        self.current_area = geometry::area(self.currents());
        if let Some(scale) = geometry::scale_ratio(self.current_area, self.start_area) {
            self.total_scale = scale;
        }
        self.delta_scale = geometry::step_ratio(self.current_area, self.prev_area);

        // Cleared every sample so a rotation never outlives its trigger
        self.rotation = self.detect_rotation();

        trace!(
            points = self.points.len(),
            area = self.current_area,
            total_scale = self.total_scale,
            delta_scale = self.delta_scale,
            rotation = ?self.rotation,
            "session moved"
        );
        true
    }

    /// Removes the given fingers, returning how many were tracked
    pub(crate) fn release<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = TouchId>,
    {
        let removed = ids
            .into_iter()
            .filter(|id| self.points.shift_remove(id).is_some())
            .count();

        if removed > 0 && !self.points.is_empty() {
            self.reset_reference_areas();
        }
        removed
    }

    pub(crate) fn set_end_time(&mut self, now: Millis) {
        self.end_time = Some(now);
    }

    pub(crate) fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    /// Recomputes the reference areas from the surviving set
    fn reset_reference_areas(&mut self) {
        self.start_area = geometry::area(self.points.values().map(|p| p.start));
        self.current_area = geometry::area(self.currents());
        self.prev_area = self.current_area;
        self.total_scale =
            geometry::scale_ratio(self.current_area, self.start_area).unwrap_or(1.0);
        self.delta_scale = 1.0;
    }

    fn detect_rotation(&self) -> Option<f32> {
        if self.points.len() != 2 {
            return None;
        }

        let deltas: Vec<Point> = self.points.values().map(|p| p.delta).collect();
        if !geometry::deltas_diverge(deltas[0], deltas[1]) {
            return None;
        }

        let prev: Vec<Point> = self.points.values().map(|p| p.prev).collect();
        let curr: Vec<Point> = self.currents().collect();
        let angle = geometry::rotation_delta(&prev, &curr);

        // Fingers sliding apart along their own diagonal do not twist
        (angle != 0.0).then_some(angle)
    }

    fn currents(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.values().map(|p| p.current)
    }

    /// Points in arrival order
    pub fn points(&self) -> impl Iterator<Item = &TouchPoint> {
        self.points.values()
    }

    pub fn point(&self, id: TouchId) -> Option<&TouchPoint> {
        self.points.get(&id)
    }

    /// The first finger still down
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.points.values().next()
    }

    pub fn contains(&self, id: TouchId) -> bool {
        self.points.contains_key(&id)
    }

    /// Number of active fingers
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn start_area(&self) -> f32 {
        self.start_area
    }

    pub fn prev_area(&self) -> f32 {
        self.prev_area
    }

    pub fn current_area(&self) -> f32 {
        self.current_area
    }

    /// Area now versus at session start
    pub fn total_scale(&self) -> f32 {
        self.total_scale
    }

    /// Area now versus at the previous sample
    pub fn delta_scale(&self) -> f32 {
        self.delta_scale
    }

    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Landing time of the earliest finger still down
    pub fn start_time(&self) -> Option<Millis> {
        self.points.values().map(|p| p.start_time).min()
    }

    pub fn end_time(&self) -> Option<Millis> {
        self.end_time
    }

    /// Time from the earliest landing to the end sample
    pub fn duration(&self) -> Millis {
        match (self.start_time(), self.end_time) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }

    /// Largest absolute displacement per axis over all points
    pub fn max_distance(&self) -> Distance {
        self.points.values().fold(Distance::default(), |acc, p| Distance {
            x: acc.x.max(p.total[0].abs()),
            y: acc.y.max(p.total[1].abs()),
        })
    }

    /// Current positions as raw samples, in arrival order
    pub fn samples(&self) -> Vec<TouchSample> {
        self.points
            .values()
            .map(|p| TouchSample {
                id: p.identifier,
                x: p.current[0],
                y: p.current[1],
                target: self.target,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_finger_session() -> TouchSession {
        let mut session = TouchSession::new(Some(TargetId(1)));
        session.admit(&TouchSample::new(1, 100.0, 100.0), 0);
        session.admit(&TouchSample::new(2, 300.0, 300.0), 10);
        session
    }

    #[test]
    fn test_admit_computes_reference_areas() {
        let session = two_finger_session();
        assert_eq!(session.len(), 2);
        assert_eq!(session.start_area(), 40_000.0);
        assert_eq!(session.prev_area(), 40_000.0);
        assert_eq!(session.total_scale(), 1.0);
    }

    #[test]
    fn test_duplicate_admission_keeps_existing_point() {
        let mut session = two_finger_session();
        assert!(!session.admit(&TouchSample::new(1, 0.0, 0.0), 99));
        let point = session.point(1).unwrap();
        assert_eq!(point.start, [100.0, 100.0]);
        assert_eq!(point.start_time, 0);
    }

    #[test]
    fn test_move_updates_scales() {
        let mut session = two_finger_session();
        assert!(session.apply_move(&[
            TouchSample::new(1, 150.0, 150.0),
            TouchSample::new(2, 250.0, 250.0),
        ]));
        assert_eq!(session.current_area(), 10_000.0);
        assert!((session.total_scale() - 0.25).abs() < 0.001);
        assert!((session.delta_scale() - 0.25).abs() < 0.001);

        session.apply_move(&[
            TouchSample::new(1, 100.0, 100.0),
            TouchSample::new(2, 300.0, 300.0),
        ]);
        assert!((session.total_scale() - 1.0).abs() < 0.001);
        assert!((session.delta_scale() - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_spreading_out_of_a_line_widens() {
        let mut session = TouchSession::new(None);
        session.admit(&TouchSample::new(1, 100.0, 100.0), 0);
        session.admit(&TouchSample::new(2, 200.0, 200.0), 0);

        session.apply_move(&[
            TouchSample::new(1, 100.0, 150.0),
            TouchSample::new(2, 200.0, 150.0),
        ]);
        assert_eq!(session.current_area(), 0.0);
        assert_eq!(session.delta_scale(), 0.0);

        session.apply_move(&[
            TouchSample::new(1, 100.0, 151.0),
            TouchSample::new(2, 200.0, 170.0),
        ]);
        assert!((session.current_area() - 1900.0).abs() < 0.001);
        assert!(session.delta_scale() > 1.0);

        session.apply_move(&[
            TouchSample::new(1, 100.0, 151.0),
            TouchSample::new(2, 200.0, 170.0),
        ]);
        assert!((session.delta_scale() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_staying_collinear_keeps_unit_delta() {
        let mut session = TouchSession::new(None);
        session.admit(&TouchSample::new(1, 0.0, 50.0), 0);
        session.admit(&TouchSample::new(2, 100.0, 50.0), 0);

        session.apply_move(&[
            TouchSample::new(1, 10.0, 50.0),
            TouchSample::new(2, 90.0, 50.0),
        ]);
        assert_eq!(session.delta_scale(), 1.0);
    }

    #[test]
    fn test_move_with_unknown_ids_is_ignored() {
        let mut session = two_finger_session();
        assert!(!session.apply_move(&[TouchSample::new(9, 0.0, 0.0)]));
        assert_eq!(session.point(1).unwrap().current, [100.0, 100.0]);
    }

    #[test]
    fn test_missing_finger_is_held() {
        let mut session = two_finger_session();
        session.apply_move(&[
            TouchSample::new(1, 110.0, 100.0),
            TouchSample::new(2, 310.0, 300.0),
        ]);
        session.apply_move(&[TouchSample::new(1, 120.0, 100.0)]);
        let held = session.point(2).unwrap();
        assert_eq!(held.delta, [0.0, 0.0]);
        assert_eq!(held.total, [10.0, 0.0]);
    }

    #[test]
    fn test_twist_sets_rotation() {
        let mut session = TouchSession::new(None);
        session.admit(&TouchSample::new(1, 100.0, 100.0), 0);
        session.admit(&TouchSample::new(2, 200.0, 100.0), 0);
        // Second finger swings down around the first
        session.apply_move(&[
            TouchSample::new(1, 100.0, 100.0),
            TouchSample::new(2, 200.0, 130.0),
        ]);
        let rotation = session.rotation().unwrap();
        assert!(rotation > 0.0);

        // Both fingers move the same way: stale rotation is cleared
        session.apply_move(&[
            TouchSample::new(1, 105.0, 135.0),
            TouchSample::new(2, 205.0, 165.0),
        ]);
        assert_eq!(session.rotation(), None);
    }

    #[test]
    fn test_symmetric_spread_is_not_rotation() {
        let mut session = two_finger_session();
        session.apply_move(&[
            TouchSample::new(1, 90.0, 90.0),
            TouchSample::new(2, 310.0, 310.0),
        ]);
        assert_eq!(session.rotation(), None);
        assert!(session.delta_scale() > 1.0);
    }

    #[test]
    fn test_release_recomputes_from_survivors() {
        let mut session = two_finger_session();
        session.admit(&TouchSample::new(3, 500.0, 100.0), 20);
        assert_eq!(session.start_area(), 400.0 * 200.0);

        assert_eq!(session.release([3, 42]), 1);
        assert_eq!(session.len(), 2);
        assert_eq!(session.start_area(), 40_000.0);
        let ids: Vec<TouchId> = session.points().map(|p| p.identifier).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_duration_uses_earliest_finger() {
        let mut session = two_finger_session();
        session.set_end_time(250);
        assert_eq!(session.start_time(), Some(0));
        assert_eq!(session.duration(), 250);
    }

    #[test]
    fn test_max_distance() {
        let mut session = two_finger_session();
        session.apply_move(&[
            TouchSample::new(1, 70.0, 105.0),
            TouchSample::new(2, 310.0, 260.0),
        ]);
        assert_eq!(session.max_distance(), Distance { x: 30.0, y: 40.0 });
    }
}
