//! Decision procedure turning session measures into gestures
//!
//! On release the families are tried in a fixed order (tap, swipe/flick,
//! pinch/stretch/grab) and the first one that matches consumes the session,
//! so at most one family reports per session. While fingers move, rotate or
//! widen/narrow is reported, always followed by a generic move.
//!
//! A release that matches no family (moved too far for a tap, not far
//! enough for a swipe, scale inside the dead band) reports nothing.

use tracing::{debug, trace};

use super::events::{Direction, GestureDetail, GestureEvent, GestureKind};
use super::repeat::{RepeatTracker, TapFamily};
use crate::config::GestureConfig;
use crate::input::Millis;
use crate::session::TouchSession;

/// Total scale above which a release is a stretch/spread
pub const STRETCH_SCALE: f32 = 1.2;
/// Total scale below which a release is a pinch/grab
pub const PINCH_SCALE: f32 = 0.8;

/// Stateless classifier driven by a [`GestureConfig`]
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GestureConfig {
        &mut self.config
    }

    /// Classifies a release
    ///
    /// `session` must carry its end time and still hold the lifted fingers.
    /// A session that already reported is left alone.
    pub fn classify_end(
        &self,
        session: &mut TouchSession,
        repeats: &mut RepeatTracker,
    ) -> Vec<GestureEvent> {
        if session.is_consumed() || session.is_empty() {
            return Vec::new();
        }
        let Some(end_time) = session.end_time() else {
            return Vec::new();
        };

        let events = self
            .detect_tap(session, end_time, repeats)
            .or_else(|| self.detect_swipe_or_flick(session, end_time))
            .or_else(|| self.detect_pinch_or_stretch(session, end_time))
            .unwrap_or_default();

        if events.is_empty() {
            trace!(
                count = session.len(),
                duration = session.duration(),
                "release matched no gesture"
            );
        } else {
            session.mark_consumed();
        }
        events
    }

    /// Classifies a move sample
    pub fn classify_move(&self, session: &TouchSession, now: Millis) -> Vec<GestureEvent> {
        let count = session.len();
        let scale = session.delta_scale();
        let mut events = Vec::with_capacity(2);

        if let Some(rotation) = session.rotation() {
            events.push(self.event(
                session,
                GestureKind::Rotate,
                now,
                GestureDetail::Rotate { count, rotation },
            ));
        } else if scale != 1.0 {
            let kind = if scale > 1.0 {
                GestureKind::Widen
            } else {
                GestureKind::Narrow
            };
            events.push(self.event(session, kind, now, GestureDetail::Resize { count, scale }));
        }

        events.push(self.event(
            session,
            GestureKind::Move,
            now,
            GestureDetail::Move {
                count,
                scale,
                touches: session.samples(),
            },
        ));
        events
    }

    fn detect_tap(
        &self,
        session: &TouchSession,
        end_time: Millis,
        repeats: &mut RepeatTracker,
    ) -> Option<Vec<GestureEvent>> {
        if !session.points().all(|p| p.is_within(self.config.tap_distance)) {
            return None;
        }

        let count = session.len();
        let duration = session.duration();
        let long = duration >= self.config.tap_long_time;
        let family = TapFamily::for_count(count);

        let window = RepeatTracker::window(&self.config, long);
        let repeat = repeats.record_tap(family, end_time, session.target(), window);

        let base = match (count, long) {
            (2, false) => GestureKind::TwinTap,
            (2, true) => GestureKind::TwinTapLong,
            (_, false) => GestureKind::Tap,
            (_, true) => GestureKind::Press,
        };

        let kinds = if repeat > 0 && !long && !self.config.avoid_double_tap {
            if self.config.get_all_taps {
                vec![family.repeat_kind(), base]
            } else {
                vec![family.repeat_kind()]
            }
        } else {
            vec![base]
        };

        debug!(?kinds, count, duration, repeat, "tap detected");
        let detail = GestureDetail::Tap {
            duration,
            count,
            repeat,
        };
        Some(
            kinds
                .into_iter()
                .map(|kind| self.event(session, kind, end_time, detail.clone()))
                .collect(),
        )
    }

    fn detect_swipe_or_flick(
        &self,
        session: &TouchSession,
        end_time: Millis,
    ) -> Option<Vec<GestureEvent>> {
        let distance = session.max_distance();
        let reach = distance.x.max(distance.y);
        let duration = session.duration();

        let kind = if duration < self.config.flick_time {
            (!self.config.avoid_flick && reach >= self.config.flick_distance)
                .then_some(GestureKind::Flick)
        } else {
            (!self.config.avoid_swipe && reach >= self.config.swipe_distance)
                .then_some(GestureKind::Swipe)
        }?;

        let primary = session.primary()?;
        let direction = if primary.total[0].abs() > primary.total[1].abs() {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };

        debug!(%kind, duration, reach, ?direction, "swipe detected");
        Some(vec![self.event(
            session,
            kind,
            end_time,
            GestureDetail::Swipe {
                duration,
                count: session.len(),
                distance,
                direction,
            },
        )])
    }

    fn detect_pinch_or_stretch(
        &self,
        session: &TouchSession,
        end_time: Millis,
    ) -> Option<Vec<GestureEvent>> {
        let count = session.len();
        let scale = session.total_scale();

        let kind = if scale > STRETCH_SCALE {
            if count == 2 {
                GestureKind::Stretch
            } else {
                GestureKind::Spread
            }
        } else if scale < PINCH_SCALE {
            if count == 2 {
                GestureKind::Pinch
            } else {
                GestureKind::Grab
            }
        } else {
            return None;
        };

        debug!(%kind, count, scale, "pinch detected");
        Some(vec![self.event(
            session,
            kind,
            end_time,
            GestureDetail::Scale {
                duration: session.duration(),
                count,
                scale,
            },
        )])
    }

    fn event(
        &self,
        session: &TouchSession,
        kind: GestureKind,
        time: Millis,
        detail: GestureDetail,
    ) -> GestureEvent {
        GestureEvent::new(kind, session.target(), time, detail)
    }
}
