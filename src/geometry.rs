//! Geometric measures over sets of touch points
//!
//! Pure functions: the bounding-box area used as a proxy for finger spread,
//! scale ratios between two areas, and the two-finger twist heuristic.

/// Screen-space position in logical pixels (y grows downward)
pub type Point = [f32; 2];

/// Component-wise `a - b`
pub fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1]]
}

/// Bounding-box area of the given points
///
/// A single point yields `1.0` so it can divide safely; no points yield `0.0`.
/// Collinear sets have zero width or height and legitimately yield `0.0`.
pub fn area<I>(points: I) -> f32
where
    I: IntoIterator<Item = Point>,
{
    let mut count = 0usize;
    let mut min = [f32::MAX; 2];
    let mut max = [f32::MIN; 2];

    for p in points {
        count += 1;
        min[0] = min[0].min(p[0]);
        min[1] = min[1].min(p[1]);
        max[0] = max[0].max(p[0]);
        max[1] = max[1].max(p[1]);
    }

    match count {
        0 => 0.0,
        1 => 1.0,
        _ => (max[0] - min[0]).abs() * (max[1] - min[1]).abs(),
    }
}

/// Ratio `current / reference`, or `None` when the reference area is empty
pub fn scale_ratio(current: f32, reference: f32) -> Option<f32> {
    (reference > 0.0).then(|| current / reference)
}

/// Ratio between consecutive samples
///
/// Growing out of an empty area yields `f32::INFINITY` so it still reads as
/// widening; staying empty yields `1.0`.
pub fn step_ratio(current: f32, previous: f32) -> f32 {
    match scale_ratio(current, previous) {
        Some(ratio) => ratio,
        None if current > 0.0 => f32::INFINITY,
        None => 1.0,
    }
}

/// Returns true if two per-sample deltas disagree in sign on some axis
///
/// One finger advancing while the other retreats or stays put on the same
/// axis is the trigger for rotation detection.
pub fn deltas_diverge(a: Point, b: Point) -> bool {
    (0..2).any(|axis| (a[axis] > 0.0 && b[axis] <= 0.0) || (b[axis] > 0.0 && a[axis] <= 0.0))
}

/// Signed angle in radians between the pair's diagonal at two samples
///
/// The diagonal runs from the first point to the second. A screen-clockwise
/// twist is positive. Anything other than exactly two points on each side
/// yields `0.0`.
pub fn rotation_delta(prev: &[Point], curr: &[Point]) -> f32 {
    let ([p0, p1], [c0, c1]) = (prev, curr) else {
        return 0.0;
    };

    let before = sub(*p1, *p0);
    let after = sub(*c1, *c0);
    let cross = before[0] * after[1] - before[1] * after[0];
    let dot = before[0] * after[0] + before[1] * after[1];

    cross.atan2(dot)
}
