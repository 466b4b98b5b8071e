//! Data-driven walker geometry
//!
//! Everything that scales with the viewport lives here so a run can be
//! replayed from `(Tuning, seed)` alone.

use serde::{Deserialize, Serialize};

use crate::consts::GRAB_RADIUS;

/// Geometry and balance constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ground line in world/screen y (screen y grows downward)
    pub ground_y: f32,
    /// Length of each leg; also the circle radius for the body solver
    pub leg_length: f32,
    /// Torso radius, used for the ground-contact check
    pub torso_radius: f32,
    /// Maximum torso lean from vertical (radians)
    pub max_tilt: f32,
    /// World pixels per reported meter of distance
    pub pixels_per_meter: f32,
    /// Screen column the torso is pinned to while the world scrolls
    pub lock_column: f32,
    /// Pointer hit radius around a foot (screen px)
    pub grab_radius: f32,
    /// World x where obstacle generation starts
    pub obstacle_seed_x: f32,
    /// Number of obstacles generated per run
    pub obstacle_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_viewport(1280.0, 720.0)
    }
}

impl Tuning {
    /// Derive tuning from the viewport size in pixels
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let leg_length = (height * 0.22).floor().clamp(120.0, 200.0);
        Self {
            ground_y: (height * 0.8).floor(),
            leg_length,
            torso_radius: (leg_length * 0.35).floor(),
            max_tilt: 0.65,
            pixels_per_meter: 60.0,
            lock_column: (width * 0.38).floor(),
            grab_radius: GRAB_RADIUS,
            obstacle_seed_x: -200.0,
            obstacle_count: 200,
        }
    }

    /// Overlay a (possibly partial) JSON document on the defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Like `from_json`, but logs and falls back to `fallback` on bad input
    pub fn from_json_or(json: &str, fallback: Tuning) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning override: {}", e);
                fallback
            }
        }
    }

    /// Widest foot separation the legs can span
    #[inline]
    pub fn max_stride(&self) -> f32 {
        2.0 * self.leg_length
    }

    /// Starting world x of the left and right feet
    pub fn stance(&self) -> (f32, f32) {
        (0.0, self.leg_length * 0.9)
    }
}
