//! Self-driven state changes
//!
//! Rules a pixel applies to itself every tick, in order:
//! - Staying awake (always-awake types keep their chunk running)
//! - Fire (put out, burn out, spontaneous explosion)
//! - Electricity
//! - Spontaneous destruction

use glam::IVec2;
use sandfall_simulation::{Pixel, PixelFlags, WorldRng};

use super::electricity::ElectricalSystem;
use super::explosion::apply_explosion;
use crate::world::{NeighborQueries, PixelWorld, SimStats};

/// System for applying a pixel's own attribute rules
pub struct StateChangeSystem;

impl StateChangeSystem {
    pub fn update_attributes<R, S>(world: &mut PixelWorld, pos: IVec2, rng: &mut R, stats: &mut S)
    where
        R: WorldRng + ?Sized,
        S: SimStats + ?Sized,
    {
        let pixel = *world.pixel(pos);
        if pixel.is_empty() {
            return;
        }
        let props = pixel.properties();

        if props.always_awake {
            world.wake_chunk_with_pixel(pos);
        }

        if pixel.is_burning() && !Self::update_fire(world, pos, rng, stats) {
            return;
        }

        if !ElectricalSystem::update(world, pos, rng, stats) {
            return;
        }

        if world.pixel(pos).power > 0 {
            world.wake_chunk_with_pixel(pos);
        }

        if rng.check_probability(props.spontaneous_destroy) {
            world.set(pos, Pixel::air());
            stats.record_state_change();
        }
    }

    /// Returns false when the fire consumed the pixel
    fn update_fire<R, S>(world: &mut PixelWorld, pos: IVec2, rng: &mut R, stats: &mut S) -> bool
    where
        R: WorldRng + ?Sized,
        S: SimStats + ?Sized,
    {
        let props = world.pixel(pos).properties();

        let put_out = if NeighborQueries::is_surrounded(world, pos) {
            props.put_out_surrounded
        } else {
            props.put_out
        };
        if rng.check_probability(put_out) {
            world.visit(pos, |p| p.flags.remove(PixelFlags::BURNING));
            stats.record_state_change();
        }

        if rng.check_probability(props.burn_out_chance) {
            world.set(pos, Pixel::air());
            stats.record_state_change();
            return false;
        }

        if rng.check_probability(props.explosion_chance) {
            let explosion = world.config().explosions.burning;
            apply_explosion(world, pos, explosion, rng);
            stats.record_explosion();
            return false;
        }

        true
    }
}
