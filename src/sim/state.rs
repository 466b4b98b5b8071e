//! Walker state and core simulation types
//!
//! Everything the tick mutates lives in `WalkerState`; nothing outside `tick`
//! writes to it while a run is in progress.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::obstacles::{Obstacle, ObstacleField};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Which foot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FootId {
    Left,
    Right,
}

/// A foot pinned to the ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Foot {
    /// World position; y stays on the ground line
    pub pos: Vec2,
    /// Currently held by the pointer
    pub grabbed: bool,
}

impl Foot {
    pub fn on_ground(x: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_y),
            grabbed: false,
        }
    }
}

/// The torso, derived from the feet every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Direction from the feet midpoint to the torso (radians)
    pub angle: f32,
    /// Distance readout in meters
    pub distance: f32,
    /// Furthest torso x reached this run
    pub max_x: f32,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallReason {
    /// Feet too far apart (or on top of each other) for the legs
    Overreach,
    /// Torso leaned over or hit the ground
    LostBalance,
    /// A foot landed on a lethal obstacle
    Hazard,
}

impl FallReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallReason::Overreach => "overreach",
            FallReason::LostBalance => "lost balance",
            FallReason::Hazard => "hazard",
        }
    }
}

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Alive,
    /// Terminal until reset
    Fallen(FallReason),
}

/// What the status surface shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Status {
    pub alive: bool,
    pub fail_reason: Option<FallReason>,
    pub distance: f32,
    /// No foot has moved yet this run
    pub fresh: bool,
}

impl Status {
    pub fn text(&self) -> &'static str {
        match self.fail_reason {
            None if self.fresh => "ready",
            None => "walking",
            Some(FallReason::Overreach) => "fell: overreach",
            Some(FallReason::LostBalance) => "fell: lost balance",
            Some(FallReason::Hazard) => "oof! hot lava",
        }
    }
}

/// Read-only view for a renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub left: Foot,
    pub right: Foot,
    pub body: Body,
    pub camera_offset_x: f32,
    pub lock_column: f32,
    pub ground_y: f32,
    pub obstacles: Vec<Obstacle>,
    pub status: Status,
    pub status_text: &'static str,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete walker state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerState {
    /// Run seed for reproducibility
    pub rng_state: RngState,
    pub tuning: Tuning,
    pub settings: Settings,
    pub left: Foot,
    pub right: Foot,
    pub body: Body,
    pub camera: Camera,
    pub obstacles: ObstacleField,
    pub phase: Phase,
    /// Set once any foot has been dragged
    pub moved: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl WalkerState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let (left_x, right_x) = tuning.stance();
        let left = Foot::on_ground(left_x, tuning.ground_y);
        let right = Foot::on_ground(right_x, tuning.ground_y);
        let obstacles = Self::generate_obstacles(seed, &tuning);

        Self {
            rng_state: RngState::new(seed),
            body: Self::initial_body(&left, &right, &tuning),
            tuning,
            settings,
            left,
            right,
            camera: Camera::default(),
            obstacles,
            phase: Phase::Alive,
            moved: false,
            time_ticks: 0,
        }
    }

    fn initial_body(left: &Foot, right: &Foot, tuning: &Tuning) -> Body {
        let x = (left.pos.x + right.pos.x) / 2.0;
        Body {
            pos: Vec2::new(x, tuning.ground_y - tuning.leg_length),
            angle: -std::f32::consts::FRAC_PI_2,
            distance: 0.0,
            max_x: x,
        }
    }

    fn generate_obstacles(seed: u64, tuning: &Tuning) -> ObstacleField {
        let (left_x, right_x) = tuning.stance();
        let clear = (left_x - tuning.grab_radius, right_x + tuning.grab_radius);
        let mut rng = RngState::new(seed).to_rng();
        ObstacleField::generate(
            &mut rng,
            tuning.obstacle_seed_x,
            tuning.obstacle_count,
            clear,
            tuning,
        )
    }

    /// Reinitialize the current run (same seed, same obstacle layout)
    pub fn reset(&mut self) {
        let seed = self.rng_state.seed;
        *self = Self::new(seed, self.tuning.clone(), self.settings.clone());
        log::info!("Run reset (seed {})", seed);
    }

    /// Start a new run with a different obstacle layout
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed, self.tuning.clone(), self.settings.clone());
        log::info!("Run restarted with seed {}", seed);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.phase == Phase::Alive
    }

    pub fn foot(&self, id: FootId) -> &Foot {
        match id {
            FootId::Left => &self.left,
            FootId::Right => &self.right,
        }
    }

    pub fn foot_mut(&mut self, id: FootId) -> &mut Foot {
        match id {
            FootId::Left => &mut self.left,
            FootId::Right => &mut self.right,
        }
    }

    /// Foot currently held by the pointer
    pub fn grabbed(&self) -> Option<FootId> {
        if self.left.grabbed {
            Some(FootId::Left)
        } else if self.right.grabbed {
            Some(FootId::Right)
        } else {
            None
        }
    }

    pub fn status(&self) -> Status {
        Status {
            alive: self.is_alive(),
            fail_reason: match self.phase {
                Phase::Alive => None,
                Phase::Fallen(reason) => Some(reason),
            },
            distance: self.body.distance,
            fresh: !self.moved,
        }
    }

    /// Renderer view of the world visible in a viewport `viewport_width` wide
    pub fn snapshot(&self, viewport_width: f32) -> Snapshot {
        let lock = self.tuning.lock_column;
        let min_x = self.camera.screen_to_world_x(0.0, lock);
        let max_x = self.camera.screen_to_world_x(viewport_width, lock);
        let status = self.status();
        Snapshot {
            left: self.left,
            right: self.right,
            body: self.body,
            camera_offset_x: self.camera.offset_x,
            lock_column: lock,
            ground_y: self.tuning.ground_y,
            obstacles: self.obstacles.visible(min_x, max_x).copied().collect(),
            status,
            status_text: status.text(),
        }
    }
}
