//! Per-frame simulation tick
//!
//! Order within a tick: queued pointer intents, body solve, hazard check,
//! balance check, camera, distance. A foot on a lethal obstacle always
//! reports `Hazard`, even when the stance itself has also failed.

use super::body::{self, BodyFailure};
use super::camera::Camera;
use super::feet::{self, PointerIntent};
use super::state::{FallReason, Phase, WalkerState};
use crate::consts::MAX_FRAME_DT;
use crate::settings::DistanceMode;

/// Input queued between ticks
///
/// Event handlers only push here; `tick` drains the queue in order so a
/// tick never sees half-applied pointer state.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub intents: Vec<PointerIntent>,
}

impl TickInput {
    pub fn push(&mut self, intent: PointerIntent) {
        self.intents.push(intent);
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn clear(&mut self) {
        self.intents.clear();
    }
}

/// Clamp a frame delta into `[0, MAX_FRAME_DT]`; non-finite becomes 0
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Advance the walker by one frame
pub fn tick(state: &mut WalkerState, input: &TickInput, dt: f32) {
    for &intent in &input.intents {
        feet::apply(state, intent);
    }

    if !state.is_alive() {
        return;
    }

    let dt = clamp_dt(dt);
    state.time_ticks += 1;

    let solved = body::solve(state.left.pos, state.right.pos, &state.tuning);

    // A foot in lava outranks whatever the solver says about the stance
    if state.obstacles.hazard_under(&state.left).is_some()
        || state.obstacles.hazard_under(&state.right).is_some()
    {
        if let Ok(pose) = solved {
            state.body.pos = pose.pos;
            state.body.angle = pose.angle;
        }
        fall(state, FallReason::Hazard);
        return;
    }

    match solved {
        Ok(pose) => {
            state.body.pos = pose.pos;
            state.body.angle = pose.angle;
        }
        Err(BodyFailure::Degenerate | BodyFailure::Overreach) => {
            fall(state, FallReason::Overreach);
            return;
        }
        Err(BodyFailure::LostBalance) => {
            fall(state, FallReason::LostBalance);
            return;
        }
    }

    let target = Camera::target_for(state.body.pos.x, state.tuning.lock_column);
    state.camera.advance(
        target,
        dt,
        state.settings.camera_smoothing,
        state.settings.camera_mode,
    );

    state.body.max_x = state.body.max_x.max(state.body.pos.x);
    let x = match state.settings.distance_mode {
        DistanceMode::Live => state.body.pos.x,
        DistanceMode::HighWater => state.body.max_x,
    };
    state.body.distance = (x / state.tuning.pixels_per_meter).max(0.0);
}

fn fall(state: &mut WalkerState, reason: FallReason) {
    state.phase = Phase::Fallen(reason);
    log::info!(
        "Walker fell ({}) after {:.1}m",
        reason.as_str(),
        state.body.distance
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{CameraMode, Settings};
    use crate::sim::obstacles::{Obstacle, ObstacleField, ObstacleKind};
    use crate::sim::state::FootId;
    use crate::tuning::Tuning;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn state() -> WalkerState {
        let mut s = WalkerState::new(2024, Tuning::default(), Settings::default());
        // Keep the field away from the feet unless a test places one
        s.obstacles = ObstacleField::default();
        s
    }

    fn screen_x(state: &WalkerState, id: FootId) -> f32 {
        state
            .camera
            .world_to_screen_x(state.foot(id).pos.x, state.tuning.lock_column)
    }

    /// Press on a foot and drag it by `dx` screen pixels
    fn drag(state: &WalkerState, id: FootId, dx: f32) -> TickInput {
        let x = screen_x(state, id);
        let y = state.foot(id).pos.y;
        TickInput {
            intents: vec![
                PointerIntent::Down { x, y },
                PointerIntent::Move { x: x + dx },
                PointerIntent::Up,
            ],
        }
    }

    #[test]
    fn test_idle_tick_stays_alive() {
        let mut s = state();
        tick(&mut s, &TickInput::default(), DT);
        assert!(s.is_alive());
        assert!(s.body.pos.y < s.tuning.ground_y);
        assert_eq!(s.time_ticks, 1);
    }

    #[test]
    fn test_overreach_falls() {
        let mut s = state();
        let input = drag(&s, FootId::Right, 2.0 * s.tuning.leg_length + 10.0);
        tick(&mut s, &input, DT);
        assert_eq!(s.phase, Phase::Fallen(FallReason::Overreach));
        assert_eq!(s.status().text(), "fell: overreach");
    }

    #[test]
    fn test_coincident_feet_fall_as_overreach() {
        let mut s = state();
        s.right.pos.x = s.left.pos.x;
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, Phase::Fallen(FallReason::Overreach));
    }

    #[test]
    fn test_tilt_loses_balance() {
        let mut s = state();
        s.right.pos = Vec2::new(100.0, s.tuning.ground_y - 200.0);
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, Phase::Fallen(FallReason::LostBalance));
    }

    #[test]
    fn test_hazard_same_tick() {
        let mut s = state();
        s.obstacles = ObstacleField::from_sorted(vec![Obstacle {
            kind: ObstacleKind::LavaPit,
            start_x: 200.0,
            width: 60.0,
        }]);
        // Right foot starts at 142.2, drag it to 222.2
        let input = drag(&s, FootId::Right, 80.0);
        tick(&mut s, &input, DT);
        assert_eq!(s.phase, Phase::Fallen(FallReason::Hazard));
        assert_eq!(s.status().text(), "oof! hot lava");
    }

    fn lava_at(start_x: f32, width: f32) -> ObstacleField {
        ObstacleField::from_sorted(vec![Obstacle {
            kind: ObstacleKind::LavaPit,
            start_x,
            width,
        }])
    }

    #[test]
    fn test_hazard_outranks_lost_balance() {
        let mut s = state();
        let wide = s.tuning.max_stride() - 4.0;
        s.obstacles = lava_at(wide - 10.0, 20.0);
        let body_before = s.body;
        let input = drag(&s, FootId::Right, wide - s.right.pos.x);
        tick(&mut s, &input, DT);
        assert_eq!(s.phase, Phase::Fallen(FallReason::Hazard));
        // The failed stance never wrote a pose
        assert_eq!(s.body.pos, body_before.pos);
    }

    #[test]
    fn test_hazard_outranks_overreach() {
        let mut s = state();
        let far = s.tuning.max_stride() + 30.0;
        s.obstacles = lava_at(far - 10.0, 20.0);
        let input = drag(&s, FootId::Right, far - s.right.pos.x);
        tick(&mut s, &input, DT);
        assert_eq!(s.phase, Phase::Fallen(FallReason::Hazard));
        assert_eq!(s.status().text(), "oof! hot lava");
    }

    #[test]
    fn test_ramp_is_safe() {
        let mut s = state();
        s.obstacles = ObstacleField::from_sorted(vec![Obstacle {
            kind: ObstacleKind::Ramp,
            start_x: 200.0,
            width: 60.0,
        }]);
        let input = drag(&s, FootId::Right, 80.0);
        tick(&mut s, &input, DT);
        assert!(s.is_alive());
    }

    #[test]
    fn test_fallen_is_terminal_until_reset() {
        let mut s = state();
        s.phase = Phase::Fallen(FallReason::Hazard);
        let before = (s.left, s.body, s.camera, s.time_ticks);
        let input = drag(&s, FootId::Left, 50.0);
        tick(&mut s, &input, DT);
        assert_eq!((s.left, s.body, s.camera, s.time_ticks), before);

        s.reset();
        assert!(s.is_alive());
        tick(&mut s, &TickInput::default(), DT);
        assert!(s.is_alive());
    }

    #[test]
    fn test_walking_forward_scrolls_and_counts() {
        let mut s = state();
        // Leapfrog: move the trailing foot past the leading one a few times
        for step in 0..6 {
            let (back, front) = if step % 2 == 0 {
                (FootId::Left, FootId::Right)
            } else {
                (FootId::Right, FootId::Left)
            };
            let gap = s.foot(front).pos.x - s.foot(back).pos.x;
            let input = drag(&s, back, gap + 140.0);
            tick(&mut s, &input, DT);
            assert!(s.is_alive(), "fell on step {}: {:?}", step, s.phase);
            for _ in 0..30 {
                tick(&mut s, &TickInput::default(), DT);
            }
        }
        assert!(s.body.distance > 5.0);
        assert!(s.camera.offset_x > 0.0);
        assert_eq!(s.status().text(), "walking");
    }

    #[test]
    fn test_distance_live_vs_high_water() {
        for (mode, expect_drop) in [(DistanceMode::Live, true), (DistanceMode::HighWater, false)] {
            let mut s = state();
            s.settings.distance_mode = mode;
            let input = drag(&s, FootId::Left, 250.0);
            tick(&mut s, &input, DT);
            let forward = s.body.distance;
            assert!(forward > 0.0);

            let input = drag(&s, FootId::Left, -250.0);
            tick(&mut s, &input, DT);
            assert!(s.is_alive());
            assert_eq!(s.body.distance < forward, expect_drop);
        }
    }

    #[test]
    fn test_distance_never_negative() {
        let mut s = state();
        let input = drag(&s, FootId::Left, -120.0);
        tick(&mut s, &input, DT);
        let input = drag(&s, FootId::Right, -200.0);
        tick(&mut s, &input, DT);
        assert!(s.is_alive());
        assert!(s.body.pos.x < 0.0);
        assert_eq!(s.body.distance, 0.0);
    }

    #[test]
    fn test_snap_camera_pins_torso() {
        let mut s = state();
        s.settings.camera_mode = CameraMode::Snap;
        tick(&mut s, &TickInput::default(), DT);
        let screen = s
            .camera
            .world_to_screen_x(s.body.pos.x, s.tuning.lock_column);
        assert!((screen - 2.0 * s.tuning.lock_column).abs() < 1e-3);

        let input = drag(&s, FootId::Left, 200.0);
        tick(&mut s, &input, DT);
        let moved = s
            .camera
            .world_to_screen_x(s.body.pos.x, s.tuning.lock_column);
        assert!((moved - screen).abs() < 1e-3);
    }

    #[test]
    fn test_dt_clamped() {
        assert_eq!(clamp_dt(1.0), MAX_FRAME_DT);
        assert_eq!(clamp_dt(-0.5), 0.0);
        assert_eq!(clamp_dt(f32::NAN), 0.0);
        assert_eq!(clamp_dt(0.01), 0.01);

        // A long stall moves the camera no further than a 33ms frame would
        let mut a = state();
        let mut b = state();
        a.body.pos.x = 0.0;
        tick(&mut a, &TickInput::default(), 5.0);
        tick(&mut b, &TickInput::default(), MAX_FRAME_DT);
        assert_eq!(a.camera.offset_x, b.camera.offset_x);
    }

    #[test]
    fn test_determinism() {
        let mut s1 = WalkerState::new(777, Tuning::default(), Settings::default());
        let mut s2 = WalkerState::new(777, Tuning::default(), Settings::default());
        for dx in [60.0, -30.0, 90.0] {
            let i1 = drag(&s1, FootId::Right, dx);
            let i2 = drag(&s2, FootId::Right, dx);
            tick(&mut s1, &i1, DT);
            tick(&mut s2, &i2, DT);
        }
        assert_eq!(s1.phase, s2.phase);
        assert_eq!(s1.body, s2.body);
        assert_eq!(s1.camera, s2.camera);
    }
}
