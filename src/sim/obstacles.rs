//! Procedural ground obstacles
//!
//! Obstacles are laid out once per run along the forward axis, in ascending
//! `start_x` order, and never change afterwards. Each kind decides what
//! happens to a foot standing on it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Foot;
use crate::tuning::Tuning;

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Variable-width lava pit
    LavaPit,
    /// Narrow spike strip
    Spike,
    /// Raised ramp; safe to stand on
    Ramp,
}

/// Effect of a foot overlapping an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootContact {
    /// Ends the run
    Lethal,
    /// Holds the foot up like ground does
    Support,
}

impl ObstacleKind {
    pub fn contact(&self) -> FootContact {
        match self {
            ObstacleKind::LavaPit | ObstacleKind::Spike => FootContact::Lethal,
            ObstacleKind::Ramp => FootContact::Support,
        }
    }

    #[inline]
    pub fn is_lethal(&self) -> bool {
        self.contact() == FootContact::Lethal
    }
}

/// A single obstacle on the ground line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub start_x: f32,
    pub width: f32,
}

impl Obstacle {
    #[inline]
    pub fn end_x(&self) -> f32 {
        self.start_x + self.width
    }

    /// Inclusive range containment on the ground axis
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start_x && x <= self.end_x()
    }

    pub fn collides_with_foot(&self, foot: &Foot) -> bool {
        self.contains(foot.pos.x)
    }
}

/// Chance an obstacle is a spike strip
const SPIKE_CHANCE: f64 = 0.20;
/// Chance an obstacle is a ramp
const RAMP_CHANCE: f64 = 0.15;

/// Ordered obstacle sequence for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Widest obstacle; bounds how far back a point query has to look
    max_width: f32,
}

impl ObstacleField {
    /// Build from an already sorted list
    pub fn from_sorted(obstacles: Vec<Obstacle>) -> Self {
        debug_assert!(obstacles.windows(2).all(|w| w[0].start_x <= w[1].start_x));
        let max_width = obstacles.iter().map(|o| o.width).fold(0.0, f32::max);
        Self {
            obstacles,
            max_width,
        }
    }

    /// Lay out `count` obstacles starting from `seed_x`
    ///
    /// `clear` is a world-x range (the starting stance) that no obstacle may
    /// overlap; an obstacle that would is pushed to start just past it.
    pub fn generate<R: Rng>(
        rng: &mut R,
        seed_x: f32,
        count: usize,
        clear: (f32, f32),
        tuning: &Tuning,
    ) -> Self {
        let leg = tuning.leg_length;
        let mut obstacles = Vec::with_capacity(count);
        let mut x = seed_x;

        for _ in 0..count {
            x += rng.random_range(0.0f32..1.2) * leg + leg;

            let roll: f64 = rng.random();
            let kind = if roll < SPIKE_CHANCE {
                ObstacleKind::Spike
            } else if roll < SPIKE_CHANCE + RAMP_CHANCE {
                ObstacleKind::Ramp
            } else {
                ObstacleKind::LavaPit
            };

            let width = match kind {
                ObstacleKind::LavaPit => {
                    if rng.random_bool(0.5) {
                        rng.random_range(0.0f32..0.6) * leg + 30.0
                    } else {
                        rng.random_range(0.0f32..1.0) * leg + 60.0
                    }
                }
                ObstacleKind::Spike => leg * 0.25,
                ObstacleKind::Ramp => leg * 0.8,
            };

            if x <= clear.1 && x + width >= clear.0 {
                x = clear.1 + 1.0;
            }

            obstacles.push(Obstacle {
                kind,
                start_x: x,
                width,
            });
            x += width + rng.random_range(0.0f32..0.8) * leg;
        }

        if let Some(last) = obstacles.last() {
            log::info!(
                "Generated {} obstacles spanning x {:.0}..{:.0}",
                obstacles.len(),
                seed_x,
                last.end_x()
            );
        }

        Self::from_sorted(obstacles)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Obstacles whose range contains `x`
    ///
    /// Binary search for the last start at or before `x`, then walk back only
    /// over starts within `max_width` of it.
    fn at(&self, x: f32) -> impl Iterator<Item = &Obstacle> {
        let end = self.obstacles.partition_point(|o| o.start_x <= x);
        let reach = x - self.max_width;
        self.obstacles[..end]
            .iter()
            .rev()
            .take_while(move |o| o.start_x >= reach)
            .filter(move |o| o.contains(x))
    }

    /// True iff `x` lies on a lethal obstacle
    pub fn is_hazard_at(&self, x: f32) -> bool {
        self.at(x).any(|o| o.kind.is_lethal())
    }

    /// The lethal obstacle under a foot, if any
    pub fn hazard_under(&self, foot: &Foot) -> Option<&Obstacle> {
        if !foot.pos.x.is_finite() {
            return None;
        }
        self.at(foot.pos.x).find(|o| o.kind.is_lethal())
    }

    /// Obstacles overlapping the world-x window `[min_x, max_x]`
    pub fn visible(&self, min_x: f32, max_x: f32) -> impl Iterator<Item = &Obstacle> {
        let end = self.obstacles.partition_point(|o| o.start_x <= max_x);
        self.obstacles[..end].iter().filter(move |o| o.end_x() >= min_x)
    }
}
