//! A playable level: the pixel grid, its physics world and the colliders tying them together

use glam::IVec2;
use rapier2d::prelude::RigidBodyHandle;
use sandfall_simulation::WorldRng;

use crate::SimConfig;
use crate::collision::ChunkColliders;
use crate::physics::RapierPhysics;
use crate::simulation::{Explosion, apply_explosion};
use crate::world::{PixelWorld, SimStats, TickCounters, WorldError, WorldSave};

pub struct Level {
    pixels: PixelWorld,
    physics: RapierPhysics,
    colliders: ChunkColliders<RigidBodyHandle>,
    spawn_point: IVec2,
    /// Activity since the host last took the counters
    counters: TickCounters,
    ticks: u64,
}

impl Level {
    pub fn new(width: u32, height: u32, config: SimConfig) -> Result<Self, WorldError> {
        let spawn_point = IVec2::new(width as i32 / 2, 0);
        let pixels = PixelWorld::with_config(width, height, config)?;
        Ok(Self::from_parts(pixels, spawn_point))
    }

    pub fn from_save(save: WorldSave, config: SimConfig) -> Result<Self, WorldError> {
        let spawn_point = save.spawn_point;
        let pixels = save.into_world(config)?;
        Ok(Self::from_parts(pixels, spawn_point))
    }

    fn from_parts(pixels: PixelWorld, spawn_point: IVec2) -> Self {
        let config = pixels.config();
        let physics = RapierPhysics::new(config.time_step, config.gravity);
        log::info!(
            "Level created: {}x{} pixels ({}x{} chunks)",
            pixels.width(),
            pixels.height(),
            pixels.width_in_chunks(),
            pixels.height_in_chunks()
        );

        Self {
            pixels,
            physics,
            colliders: ChunkColliders::new(),
            spawn_point,
            counters: TickCounters::default(),
            ticks: 0,
        }
    }

    pub fn to_save(&self) -> WorldSave {
        WorldSave::from_world(&self.pixels, self.spawn_point)
    }

    /// One fixed tick: pixel step, physics step, then colliders for the chunks that ran
    pub fn update<R: WorldRng + ?Sized>(&mut self, rng: &mut R) {
        self.pixels.step_with_stats(rng, &mut self.counters);
        self.physics.step();

        let epsilon = self.pixels.config().boundary_epsilon;
        let chains = self
            .colliders
            .regenerate(&self.pixels, &mut self.physics, epsilon);
        if chains > 0 {
            log::debug!(
                "Tick {}: {} active chunks, {} chains",
                self.ticks,
                self.pixels.active_chunk_count(),
                chains
            );
        }
        self.ticks += 1;
    }

    /// Blow up the area around `pos`
    pub fn explode<R: WorldRng + ?Sized>(&mut self, pos: IVec2, explosion: Explosion, rng: &mut R) {
        apply_explosion(&mut self.pixels, pos, explosion, rng);
        self.counters.record_explosion();
    }

    /// Detonate a grenade with the configured preset
    pub fn detonate_grenade<R: WorldRng + ?Sized>(&mut self, pos: IVec2, rng: &mut R) {
        let explosion = self.pixels.config().explosions.grenade;
        self.explode(pos, explosion, rng);
    }

    pub fn pixels(&self) -> &PixelWorld {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelWorld {
        &mut self.pixels
    }

    pub fn physics(&self) -> &RapierPhysics {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut RapierPhysics {
        &mut self.physics
    }

    pub fn colliders(&self) -> &ChunkColliders<RigidBodyHandle> {
        &self.colliders
    }

    pub fn spawn_point(&self) -> IVec2 {
        self.spawn_point
    }

    pub fn set_spawn_point(&mut self, spawn_point: IVec2) {
        self.spawn_point = spawn_point;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Return and reset the activity counters
    pub fn take_counters(&mut self) -> TickCounters {
        std::mem::take(&mut self.counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandfall_simulation::{Pixel, PixelType};

    struct TestRng;

    impl WorldRng for TestRng {
        fn gen_bool(&mut self) -> bool {
            false
        }

        fn gen_f32(&mut self) -> f32 {
            0.999
        }
    }

    fn titanium() -> Pixel {
        Pixel {
            kind: PixelType::TITANIUM,
            ..Pixel::air()
        }
    }

    #[test]
    fn test_new_rejects_misaligned_size() {
        assert!(Level::new(100, 64, SimConfig::default()).is_err());
    }

    #[test]
    fn test_update_builds_colliders_for_active_chunks() {
        let mut level = Level::new(128, 64, SimConfig::default()).unwrap();
        for x in 0..128 {
            for y in 48..64 {
                level.pixels_mut().set(IVec2::new(x, y), titanium());
            }
        }

        level.update(&mut TestRng);
        assert_eq!(level.ticks(), 1);
        assert_eq!(level.colliders().body_count(), 2);
        // One static body and one chain per chunk
        assert_eq!(level.physics().body_count(), 2);
        assert_eq!(level.physics().collider_count(), 2);
    }

    #[test]
    fn test_regeneration_does_not_leak_bodies() {
        let mut level = Level::new(64, 64, SimConfig::default()).unwrap();
        level.pixels_mut().set(IVec2::new(10, 60), titanium());
        level.pixels_mut().set(IVec2::new(11, 60), titanium());

        for _ in 0..5 {
            level.pixels_mut().wake_all();
            level.update(&mut TestRng);
        }
        assert_eq!(level.physics().body_count(), 1);
    }

    #[test]
    fn test_explode_counts_and_destroys() {
        let mut level = Level::new(64, 64, SimConfig::default()).unwrap();
        let pos = IVec2::new(32, 32);
        level.pixels_mut().set(
            pos,
            Pixel {
                kind: PixelType::ROCK,
                ..Pixel::air()
            },
        );

        level.detonate_grenade(pos, &mut TestRng);
        assert!(level.pixels().pixel(pos).is_empty());
        assert_eq!(level.take_counters().explosions, 1);
        assert_eq!(level.take_counters().explosions, 0);
    }

    #[test]
    fn test_save_keeps_spawn_point() {
        let mut level = Level::new(64, 64, SimConfig::default()).unwrap();
        level.set_spawn_point(IVec2::new(5, 6));

        let restored = Level::from_save(level.to_save(), SimConfig::default()).unwrap();
        assert_eq!(restored.spawn_point(), IVec2::new(5, 6));
        assert_eq!(restored.pixels().pixels(), level.pixels().pixels());
    }
}
