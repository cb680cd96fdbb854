//! Per-pixel update: movement, then neighbour and self rules at the final position

use glam::{IVec2, Vec2};
use sandfall_simulation::{PixelFlags, WorldRng};

use super::PixelWorld;
use super::stats::SimStats;
use crate::simulation::{ReactionSystem, StateChangeSystem};

/// Cellular automata update utilities - stateless methods over the pixel grid
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Update one pixel and return where it ended up
    ///
    /// The caller marks the returned position as updated.
    pub fn update_pixel<R, S>(world: &mut PixelWorld, pos: IVec2, rng: &mut R, stats: &mut S) -> IVec2
    where
        R: WorldRng + ?Sized,
        S: SimStats + ?Sized,
    {
        let end = Self::update_position(world, pos, rng);

        if end == pos {
            let direction = gravity_direction(world.pixel(pos).properties().gravity_factor);
            world.visit_no_wake(pos, |p| {
                p.flags.remove(PixelFlags::FALLING);
                if direction != 0 {
                    p.velocity = Vec2::new(0.0, direction as f32);
                }
            });
        } else {
            stats.record_pixel_moved();
        }

        ReactionSystem::apply_neighbour_reactions(world, end, rng, stats);
        StateChangeSystem::update_attributes(world, end, rng, stats);

        end
    }

    /// Apply gravity, inertia, diagonal relaxation and dispersion in that order
    fn update_position<R: WorldRng + ?Sized>(world: &mut PixelWorld, pos: IVec2, rng: &mut R) -> IVec2 {
        let props = world.pixel(pos).properties();

        if props.gravity_factor != 0.0 {
            let config = world.config();
            let acceleration = config.gravity * config.time_step * props.gravity_factor;
            world.visit_no_wake(pos, |p| p.velocity += acceleration);

            let offset = world.pixel(pos).velocity.round().as_ivec2();
            let end = Self::move_offset(world, pos, offset);
            if end != pos {
                return end;
            }
        }

        // Resting pixels with inertia need a disturbance before they slide
        if props.inertial_resistance > 0.0 && !world.pixel(pos).is_falling() {
            return pos;
        }

        if props.can_move_diagonally {
            let direction = gravity_direction(props.gravity_factor);
            let mut offsets = [IVec2::new(-1, direction), IVec2::new(1, direction)];
            if rng.gen_bool() {
                offsets.swap(0, 1);
            }
            for offset in offsets {
                let end = Self::move_offset(world, pos, offset);
                if end != pos {
                    return end;
                }
            }
        }

        if props.dispersion_rate > 0 {
            let rate = props.dispersion_rate;
            let mut offsets = [IVec2::new(-rate, 0), IVec2::new(rate, 0)];
            if rng.gen_bool() {
                offsets.swap(0, 1);
            }
            for offset in offsets {
                let end = Self::move_offset(world, pos, offset);
                if end != pos {
                    return end;
                }
            }
        }

        pos
    }

    /// Move along a straight line in unit sub-steps, stopping at the first blocked one
    ///
    /// Returns the final position (equal to `pos` when nothing moved).
    pub fn move_offset(world: &mut PixelWorld, pos: IVec2, offset: IVec2) -> IVec2 {
        let steps = offset.x.abs().max(offset.y.abs());
        let mut current = pos;

        for i in 1..=steps {
            let next = pos + offset * i / steps;
            if !Self::can_pixel_move_to(world, current, next) {
                break;
            }

            world.swap(current, next);
            current = next;
            Self::set_adjacent_free_falling(world, current);
        }

        if current != pos {
            world.visit(current, |p| p.flags.insert(PixelFlags::FALLING));
        }
        current
    }

    /// Displacement test: empty cells always accept; otherwise the source must be a heavier phase
    pub fn can_pixel_move_to(world: &PixelWorld, src: IVec2, dst: IVec2) -> bool {
        if !world.is_valid_pixel(src) || !world.is_valid_pixel(dst) {
            return false;
        }

        let target = world.pixel(dst);
        if target.is_empty() {
            return true;
        }

        world.pixel(src).properties().phase > target.properties().phase
    }

    /// Flag left/right neighbours with gravity as falling so they re-check support
    fn set_adjacent_free_falling(world: &mut PixelWorld, pos: IVec2) {
        for offset in [IVec2::NEG_X, IVec2::X] {
            let neighbour = pos + offset;
            if world.is_valid_pixel(neighbour)
                && world.pixel(neighbour).properties().gravity_factor != 0.0
            {
                world.visit(neighbour, |p| p.flags.insert(PixelFlags::FALLING));
            }
        }
    }
}

/// Sign of a gravity factor as a grid direction (0 when weightless)
fn gravity_direction(gravity_factor: f32) -> i32 {
    if gravity_factor > 0.0 {
        1
    } else if gravity_factor < 0.0 {
        -1
    } else {
        0
    }
}
