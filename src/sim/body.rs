//! Torso placement from foot positions
//!
//! Each leg is a rigid segment of `leg_length`, so the torso sits on both
//! circles of radius `leg_length` centered at the feet. Of the two
//! intersections, the torso always takes the upper one (smaller screen y).

use glam::Vec2;

use crate::consts::{GROUND_TOLERANCE, MIN_FOOT_SEPARATION};
use crate::normalize_angle;
use crate::tuning::Tuning;

/// A solved torso placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Torso center in world coordinates
    pub pos: Vec2,
    /// Direction from the feet midpoint to the torso (radians, atan2 convention)
    pub angle: f32,
    /// Lean from vertical (radians, 0 = upright, positive = leaning forward)
    pub tilt: f32,
}

/// Why no torso placement exists for a pair of feet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFailure {
    /// Feet on top of each other
    Degenerate,
    /// Feet further apart than the legs can span
    Overreach,
    /// Torso leans too far or drops into the ground
    LostBalance,
}

/// Upper intersection of two circles of radius `radius` centered at `a` and `b`
///
/// Returns `None` for coincident centers, non-finite input, or centers more
/// than `2 * radius` apart. Tangent circles yield their single contact point.
pub fn upper_intersection(a: Vec2, b: Vec2, radius: f32) -> Option<Vec2> {
    let delta = b - a;
    let d = delta.length();
    if !d.is_finite() || d == 0.0 || d > 2.0 * radius {
        return None;
    }

    let half = d / 2.0;
    let dir = delta / d;
    let mid = a + dir * half;
    let h = (radius * radius - half * half).max(0.0).sqrt();
    let perp = dir.perp();

    let p1 = mid + perp * h;
    let p2 = mid - perp * h;
    Some(if p1.y < p2.y { p1 } else { p2 })
}

/// Solve the torso position for a pair of feet
pub fn solve(left: Vec2, right: Vec2, tuning: &Tuning) -> Result<Pose, BodyFailure> {
    let d = left.distance(right);
    if !d.is_finite() || d < MIN_FOOT_SEPARATION {
        return Err(BodyFailure::Degenerate);
    }
    if d > tuning.max_stride() {
        return Err(BodyFailure::Overreach);
    }

    let pos = upper_intersection(left, right, tuning.leg_length).ok_or(BodyFailure::Overreach)?;

    let mid = (left + right) * 0.5;
    let angle = (pos.y - mid.y).atan2(pos.x - mid.x);
    // Screen-up is -π/2
    let tilt = normalize_angle(angle + std::f32::consts::FRAC_PI_2);

    if tilt.abs() > tuning.max_tilt {
        return Err(BodyFailure::LostBalance);
    }
    if pos.y + tuning.torso_radius > tuning.ground_y + GROUND_TOLERANCE {
        return Err(BodyFailure::LostBalance);
    }

    Ok(Pose { pos, angle, tilt })
}
