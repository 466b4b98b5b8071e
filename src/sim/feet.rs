//! Pointer control of the feet
//!
//! Pointer events arrive in screen space. A press grabs the nearest foot
//! within `grab_radius`; moves slide that foot along the ground; a release
//! lets go. At most one foot is held at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{FootId, WalkerState};

/// A queued pointer event, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerIntent {
    Down { x: f32, y: f32 },
    Move { x: f32 },
    Up,
}

/// Hit-test both feet and grab the nearest one in reach
///
/// Does nothing if a foot is already held. When both feet are in reach the
/// closer one wins; an exact tie goes to the left foot.
pub fn try_grab(state: &mut WalkerState, pointer: Vec2) -> Option<FootId> {
    if state.grabbed().is_some() || !pointer.is_finite() {
        return None;
    }

    let lock = state.tuning.lock_column;
    let radius = state.tuning.grab_radius;
    let screen_dist = |id: FootId| {
        let foot = state.foot(id);
        let screen = Vec2::new(state.camera.world_to_screen_x(foot.pos.x, lock), foot.pos.y);
        screen.distance(pointer)
    };

    let candidates = [FootId::Left, FootId::Right]
        .into_iter()
        .map(|id| (id, screen_dist(id)))
        .filter(|&(_, d)| d < radius);

    let mut best: Option<(FootId, f32)> = None;
    for (id, d) in candidates {
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((id, d));
        }
    }

    let (id, d) = best?;
    state.foot_mut(id).grabbed = true;
    log::debug!("Grabbed {:?} foot ({:.1}px from pointer)", id, d);
    Some(id)
}

/// Slide the held foot to the world x under `screen_x`
///
/// The foot stays on the ground line. Non-finite input is ignored.
pub fn drag_to(state: &mut WalkerState, screen_x: f32) {
    if !screen_x.is_finite() {
        return;
    }
    let Some(id) = state.grabbed() else {
        return;
    };

    let world_x = state
        .camera
        .screen_to_world_x(screen_x, state.tuning.lock_column);
    let ground_y = state.tuning.ground_y;
    let foot = state.foot_mut(id);
    foot.pos = Vec2::new(world_x, ground_y);
    state.moved = true;
}

/// Let go of whichever foot is held
pub fn release(state: &mut WalkerState) {
    if let Some(id) = state.grabbed() {
        log::debug!("Released {:?} foot", id);
    }
    state.left.grabbed = false;
    state.right.grabbed = false;
}

/// Apply one queued intent
///
/// A fallen walker ignores presses and drags but still honors releases.
pub fn apply(state: &mut WalkerState, intent: PointerIntent) {
    match intent {
        PointerIntent::Down { x, y } if state.is_alive() => {
            try_grab(state, Vec2::new(x, y));
        }
        PointerIntent::Move { x } if state.is_alive() => drag_to(state, x),
        PointerIntent::Up => release(state),
        _ => {}
    }
}
