//! Neighbour reactions
//!
//! Rules a pixel applies to its 8 neighbours every tick:
//! - Boiling (water → steam next to a boiler)
//! - Corrosion (acid eats neighbours, occasionally itself)
//! - Ignition (burning pixels and burn sources light flammable neighbours)
//! - Embers (fire throws embers into empty neighbours)

use glam::IVec2;
use sandfall_simulation::{Pixel, PixelFlags, PixelType, WorldRng};

use crate::world::{NEIGHBOUR_OFFSETS, PixelWorld, SimStats};

/// Chance an acid pixel is consumed by each successful corrosion
const CORROSION_SELF_DESTROY_CHANCE: f32 = 0.1;

/// Chance per empty neighbour per tick that fire spawns an ember
const EMBER_SPAWN_CHANCE: f32 = 0.01;

/// System applying a pixel's effects on its neighbours
pub struct ReactionSystem;

impl ReactionSystem {
    pub fn apply_neighbour_reactions<R, S>(world: &mut PixelWorld, pos: IVec2, rng: &mut R, stats: &mut S)
    where
        R: WorldRng + ?Sized,
        S: SimStats + ?Sized,
    {
        let source = *world.pixel(pos);
        if source.is_empty() {
            return;
        }
        let props = source.properties();

        for offset in NEIGHBOUR_OFFSETS {
            let neighbour = pos + offset;
            if !world.is_valid_pixel(neighbour) {
                continue;
            }

            if props.can_boil_water && world.pixel(neighbour).kind == PixelType::WATER {
                world.set(neighbour, Pixel::steam(rng));
                stats.record_reaction();
            }

            if props.is_corrosion_source {
                let resist = world.pixel(neighbour).properties().corrosion_resist;
                if rng.check_probability(1.0 - resist) {
                    world.set(neighbour, Pixel::air());
                    stats.record_reaction();

                    if rng.check_probability(CORROSION_SELF_DESTROY_CHANCE) {
                        world.set(pos, Pixel::air());
                        return;
                    }
                }
            }

            let burning = world.pixel(pos).is_burning();

            if props.is_burn_source || burning {
                let flammability = world.pixel(neighbour).properties().flammability;
                if rng.check_probability(flammability) {
                    world.visit(neighbour, |p| p.flags.insert(PixelFlags::BURNING));
                    stats.record_reaction();
                }
            }

            if (props.is_ember_source || burning)
                && world.pixel(neighbour).is_empty()
                && rng.check_probability(EMBER_SPAWN_CHANCE)
            {
                world.set(neighbour, Pixel::ember(rng));
                stats.record_reaction();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{NoopStats, TickCounters};

    /// Test RNG with a fixed roll: 0.0 passes every non-zero probability, 0.999 none below 1
    struct TestRng {
        roll: f32,
    }

    impl WorldRng for TestRng {
        fn gen_bool(&mut self) -> bool {
            false
        }

        fn gen_f32(&mut self) -> f32 {
            self.roll
        }
    }

    fn pixel_of(kind: PixelType) -> Pixel {
        Pixel {
            kind,
            ..Pixel::air()
        }
    }

    fn world() -> PixelWorld {
        PixelWorld::new(64, 64).unwrap()
    }

    #[test]
    fn test_lava_boils_adjacent_water() {
        let mut world = world();
        let lava = IVec2::new(10, 10);
        world.set(lava, pixel_of(PixelType::LAVA));
        world.set(IVec2::new(11, 10), pixel_of(PixelType::WATER));
        world.set(IVec2::new(9, 9), pixel_of(PixelType::WATER));
        world.set(IVec2::new(12, 10), pixel_of(PixelType::WATER));

        let mut rng = TestRng { roll: 0.999 };
        ReactionSystem::apply_neighbour_reactions(&mut world, lava, &mut rng, &mut NoopStats);

        assert_eq!(world.pixel(IVec2::new(11, 10)).kind, PixelType::STEAM);
        assert_eq!(world.pixel(IVec2::new(9, 9)).kind, PixelType::STEAM);
        // Not a neighbour
        assert_eq!(world.pixel(IVec2::new(12, 10)).kind, PixelType::WATER);
    }

    #[test]
    fn test_acid_corrodes_weak_neighbour() {
        let mut world = world();
        let acid = IVec2::new(10, 10);
        world.set(acid, pixel_of(PixelType::ACID));
        world.set(IVec2::new(10, 11), pixel_of(PixelType::SAND));
        world.set(IVec2::new(9, 10), pixel_of(PixelType::TITANIUM));

        // 0.5 < 1 - 0.3 destroys sand, not titanium; 0.5 > 0.1 keeps the acid
        let mut rng = TestRng { roll: 0.5 };
        let mut stats = TickCounters::default();
        ReactionSystem::apply_neighbour_reactions(&mut world, acid, &mut rng, &mut stats);

        assert!(world.pixel(IVec2::new(10, 11)).is_empty());
        assert_eq!(world.pixel(IVec2::new(9, 10)).kind, PixelType::TITANIUM);
        assert_eq!(world.pixel(acid).kind, PixelType::ACID);
        assert_eq!(stats.reactions, 1);
    }

    #[test]
    fn test_acid_can_consume_itself() {
        let mut world = world();
        let acid = IVec2::new(10, 10);
        world.set(acid, pixel_of(PixelType::ACID));
        world.set(IVec2::new(11, 10), pixel_of(PixelType::SAND));
        world.set(IVec2::new(10, 11), pixel_of(PixelType::SAND));

        let mut rng = TestRng { roll: 0.0 };
        ReactionSystem::apply_neighbour_reactions(&mut world, acid, &mut rng, &mut NoopStats);

        assert!(world.pixel(acid).is_empty());
        assert!(world.pixel(IVec2::new(11, 10)).is_empty());
        // The acid was gone before reaching the second neighbour
        assert_eq!(world.pixel(IVec2::new(10, 11)).kind, PixelType::SAND);
    }

    #[test]
    fn test_burning_pixel_ignites_flammable_neighbours() {
        let mut world = world();
        let fire = IVec2::new(10, 10);
        let mut coal = pixel_of(PixelType::COAL);
        coal.flags.insert(PixelFlags::BURNING);
        world.set(fire, coal);
        world.set(IVec2::new(11, 10), pixel_of(PixelType::FUSE));
        world.set(IVec2::new(9, 10), pixel_of(PixelType::ROCK));

        // 0.2 < fuse flammability 0.25, rock has none; 0.2 > ember chance
        let mut rng = TestRng { roll: 0.2 };
        ReactionSystem::apply_neighbour_reactions(&mut world, fire, &mut rng, &mut NoopStats);

        assert!(world.pixel(IVec2::new(11, 10)).is_burning());
        assert!(!world.pixel(IVec2::new(9, 10)).is_burning());
        assert!(world.pixel(IVec2::new(10, 9)).is_empty());
    }

    #[test]
    fn test_lava_throws_embers_into_empty_cells() {
        let mut world = world();
        let lava = IVec2::new(10, 10);
        world.set(lava, pixel_of(PixelType::LAVA));

        let mut rng = TestRng { roll: 0.005 };
        ReactionSystem::apply_neighbour_reactions(&mut world, lava, &mut rng, &mut NoopStats);

        for offset in NEIGHBOUR_OFFSETS {
            let ember = world.pixel(lava + offset);
            assert_eq!(ember.kind, PixelType::EMBER);
            assert!(ember.is_burning());
        }
    }

    #[test]
    fn test_inert_pixel_does_nothing() {
        let mut world = world();
        let rock = IVec2::new(10, 10);
        world.set(rock, pixel_of(PixelType::ROCK));
        world.set(IVec2::new(11, 10), pixel_of(PixelType::WATER));
        let before = world.pixels().to_vec();

        let mut rng = TestRng { roll: 0.0 };
        ReactionSystem::apply_neighbour_reactions(&mut world, rock, &mut rng, &mut NoopStats);

        assert_eq!(world.pixels(), &before[..]);
    }
}
