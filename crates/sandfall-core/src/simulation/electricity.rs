//! Electrical system
//!
//! Sources charge themselves; conductors carry power from neighbours and
//! decay by one every tick. A conductor only passes power on while its charge
//! lies strictly between half and full, which limits propagation to one cell
//! per tick.

use glam::IVec2;
use sandfall_simulation::{PixelType, PowerType, WorldRng, is_active_power_source};

use crate::world::{ADJACENT_OFFSETS, PixelWorld, SimStats};

use super::explosion::apply_explosion;

/// System updating power state of sources and conductors
pub struct ElectricalSystem;

impl ElectricalSystem {
    /// Run the power state machine for the pixel at `pos`
    ///
    /// Returns false when the pixel was destroyed (detonated).
    pub fn update<R, S>(world: &mut PixelWorld, pos: IVec2, rng: &mut R, stats: &mut S) -> bool
    where
        R: WorldRng + ?Sized,
        S: SimStats + ?Sized,
    {
        let props = world.pixel(pos).properties();

        match props.power_type {
            PowerType::Conductor => {
                if world.pixel(pos).power > 0 {
                    world.visit(pos, |p| p.power -= 1);
                }

                if world.pixel(pos).power <= 1 {
                    let powered = ADJACENT_OFFSETS.iter().any(|offset| {
                        world.is_valid_pixel(pos + *offset) && Self::should_get_powered(world, pos, *offset)
                    });
                    if powered {
                        let max = props.power_max;
                        world.visit(pos, |p| p.power = max);
                        stats.record_state_change();
                    }
                }

                if world.pixel(pos).power > 0 && props.explodes_on_power {
                    let explosion = world.config().explosions.powered;
                    apply_explosion(world, pos, explosion, rng);
                    stats.record_explosion();
                    return false;
                }
            }
            PowerType::Source => {
                if world.pixel(pos).power < props.power_max {
                    world.visit(pos, |p| p.power += 1);
                }

                // A powered diode output shorts the source
                let shorted = ADJACENT_OFFSETS.iter().any(|offset| {
                    world
                        .get(pos + *offset)
                        .is_some_and(|n| n.kind == PixelType::DIODE_OUT && n.power > 0)
                });
                if shorted {
                    world.visit(pos, |p| p.power = 0);
                }
            }
            PowerType::None => {}
        }

        true
    }

    /// Whether the pixel at `pos` draws power from its neighbour at `pos + offset`
    pub fn should_get_powered(world: &PixelWorld, pos: IVec2, offset: IVec2) -> bool {
        let target = world.pixel(pos);
        let source_pos = pos + offset;
        let source = world.pixel(source_pos);

        if target.kind == PixelType::DIODE_IN && source.kind == PixelType::DIODE_OUT {
            return false;
        }
        if target.kind == PixelType::DIODE_OUT
            && source.kind != PixelType::DIODE_IN
            && source.kind != PixelType::DIODE_OUT
        {
            return false;
        }

        // Relays are transparent: test the cell beyond instead
        if source.kind == PixelType::RELAY {
            let far = source_pos + offset;
            return world.is_valid_pixel(far) && Self::is_powering(world, far);
        }

        Self::is_powering(world, source_pos)
    }

    /// A full source, or any pixel charged above half but below its max
    fn is_powering(world: &PixelWorld, pos: IVec2) -> bool {
        let pixel = world.pixel(pos);
        let max = pixel.properties().power_max;
        is_active_power_source(pixel) || (max / 2 < pixel.power && pixel.power < max)
    }
}
