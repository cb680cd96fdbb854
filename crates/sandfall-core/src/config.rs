//! Simulation tuning shared by the pixel grid, explosions and collider synthesis

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::simulation::Explosion;

/// Simulation constants
///
/// Every field has a default, so partial configuration files only need to
/// name what they change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation interval in seconds
    pub time_step: f32,
    /// Global gravity (+y is down); velocity gains `gravity * time_step` per tick
    pub gravity: Vec2,
    /// Ramer-Douglas-Peucker tolerance for collider outlines, in pixels
    pub boundary_epsilon: f32,
    pub explosions: ExplosionPresets,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            gravity: Vec2::new(0.0, 9.81),
            boundary_epsilon: 1.5,
            explosions: ExplosionPresets::default(),
        }
    }
}

/// Explosion parameters for the built-in triggers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionPresets {
    /// Burning material rolling its explosion chance (gunpowder)
    pub burning: Explosion,
    /// Powered conductor with `explodes_on_power` (c4)
    pub powered: Explosion,
    /// Thrown grenade on contact
    pub grenade: Explosion,
}

impl Default for ExplosionPresets {
    fn default() -> Self {
        Self {
            burning: Explosion::new(5.0, 10.0, 5.0),
            powered: Explosion::new(25.0, 30.0, 10.0),
            grenade: Explosion::new(5.0, 10.0, 15.0),
        }
    }
}
