//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Pointer input only through the `TickInput` queue
//! - No rendering or platform dependencies

pub mod body;
pub mod camera;
pub mod feet;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use body::{BodyFailure, Pose, solve, upper_intersection};
pub use camera::Camera;
pub use feet::{PointerIntent, drag_to, release, try_grab};
pub use obstacles::{FootContact, Obstacle, ObstacleField, ObstacleKind};
pub use state::{
    Body, FallReason, Foot, FootId, Phase, RngState, Snapshot, Status, WalkerState,
};
pub use tick::{TickInput, clamp_dt, tick};
