//! Hooded Walker - drag the feet, keep the torso up, stay out of the lava
//!
//! Core modules:
//! - `sim`: Deterministic simulation (feet, body solver, obstacles, camera)
//! - `tuning`: Viewport-derived geometry and gameplay constants
//! - `settings`: Player preferences (camera follow, distance metric)
//! - `web`: WebAssembly entry points for the page script

pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{CameraMode, DistanceMode, Settings};
pub use tuning::Tuning;

/// Simulation constants that do not scale with the viewport
pub mod consts {
    /// Largest frame delta the tick accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Feet closer than this (px) have no usable intersection
    pub const MIN_FOOT_SEPARATION: f32 = 2.0;

    /// Slack (px) allowed between the torso's lower edge and the ground
    pub const GROUND_TOLERANCE: f32 = 2.0;

    /// Default camera smoothing rate (1/s)
    pub const CAMERA_SMOOTHING: f32 = 6.0;

    /// Pointer hit radius around a foot (screen px)
    pub const GRAB_RADIUS: f32 = 40.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return angle;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
