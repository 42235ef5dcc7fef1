//! Live touch data: the fingers currently down and their lifecycle

mod point;
mod touch_session;
mod tracker;

pub use point::TouchPoint;
pub use touch_session::{Distance, TouchSession};
pub use tracker::SessionTracker;
