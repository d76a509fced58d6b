//! Geometry for the circular progress indicator.
//!
//! Progress is drawn as a clockwise arc that starts at the top of the
//! circle (0%) and closes into a full circle at 100%. Points use screen
//! coordinates relative to the circle's centre: x grows to the right and
//! y grows downward, so the top of the circle is `(0, -radius)`.

use std::f64::consts::PI;

/// Angle of the arc's starting point, in degrees (top centre).
const START_ANGLE_DEG: f64 = -90.0;

/// Start/end points of a progress arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub start: (f64, f64),
    pub end: (f64, f64),
    /// The arc spans more than half the circle.
    pub large_arc: bool,
}

impl ArcGeometry {
    pub fn from_fraction(fraction: f64, radius: f64) -> Self {
        let fraction = clamp_fraction(fraction);
        Self {
            start: polar(radius, START_ANGLE_DEG),
            end: polar(radius, START_ANGLE_DEG + fraction * 360.0),
            large_arc: fraction > 0.5,
        }
    }
}

fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

fn polar(radius: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees * PI / 180.0;
    (radius * rad.cos(), radius * rad.sin())
}

/// Sample points along the clockwise arc covering `fraction` of the circle.
///
/// `steps` is the number of samples for a full circle; shorter arcs get
/// proportionally fewer (at least two, so the ends are always present).
pub fn arc_points(fraction: f64, radius: f64, steps: usize) -> Vec<(f64, f64)> {
    let fraction = clamp_fraction(fraction);
    if fraction == 0.0 || steps == 0 {
        return Vec::new();
    }

    let count = ((steps as f64 * fraction).ceil() as usize).max(2);
    let sweep = fraction * 360.0;
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            polar(radius, START_ANGLE_DEG + t * sweep)
        })
        .collect()
}
