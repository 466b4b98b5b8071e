//! Horizontal follow camera
//!
//! The camera keeps the torso near a fixed screen column while the world
//! scrolls underneath it. Screen and world x are related through the lock
//! column: `world = screen + offset_x - lock_column`.

use serde::{Deserialize, Serialize};

use crate::settings::CameraMode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset_x: f32,
}

impl Camera {
    /// Move the offset toward `target_x`
    ///
    /// Smoothed mode closes `rate * dt` of the gap per call, capped at the
    /// whole gap so large steps never overshoot.
    pub fn advance(&mut self, target_x: f32, dt: f32, rate: f32, mode: CameraMode) {
        if !target_x.is_finite() {
            return;
        }
        match mode {
            CameraMode::Snap => self.offset_x = target_x,
            CameraMode::Smoothed => {
                let t = (rate * dt).clamp(0.0, 1.0);
                if t.is_finite() {
                    self.offset_x += (target_x - self.offset_x) * t;
                }
            }
        }
    }

    /// Follow target for a torso at world x `body_x`
    ///
    /// At this offset the torso draws at screen column `2 * lock_column`,
    /// whatever its world position.
    #[inline]
    pub fn target_for(body_x: f32, lock_column: f32) -> f32 {
        body_x - lock_column
    }

    #[inline]
    pub fn world_to_screen_x(&self, world_x: f32, lock_column: f32) -> f32 {
        world_x - self.offset_x + lock_column
    }

    #[inline]
    pub fn screen_to_world_x(&self, screen_x: f32, lock_column: f32) -> f32 {
        screen_x + self.offset_x - lock_column
    }
}
