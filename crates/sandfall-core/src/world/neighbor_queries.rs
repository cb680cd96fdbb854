//! Neighbour offsets and occupancy queries

use glam::IVec2;

use super::PixelWorld;

/// All 8 neighbours: the 4 orthogonal ones first, then the diagonals
pub const NEIGHBOUR_OFFSETS: [IVec2; 8] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
    IVec2::new(1, 1),
    IVec2::new(-1, -1),
    IVec2::new(-1, 1),
    IVec2::new(1, -1),
];

/// Orthogonal neighbours (right, left, down, up)
pub const ADJACENT_OFFSETS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// Neighbour queries - stateless methods over the pixel grid
pub struct NeighborQueries;

impl NeighborQueries {
    /// In-bounds positions around `center` for the given offsets, in offset order
    pub fn valid_neighbours<'a>(
        world: &'a PixelWorld,
        center: IVec2,
        offsets: &'a [IVec2],
    ) -> impl Iterator<Item = IVec2> + 'a {
        offsets
            .iter()
            .map(move |offset| center + *offset)
            .filter(move |pos| world.is_valid_pixel(*pos))
    }

    /// True when every in-bounds 8-neighbour is occupied
    ///
    /// The world edge counts as occupied.
    pub fn is_surrounded(world: &PixelWorld, center: IVec2) -> bool {
        Self::valid_neighbours(world, center, &NEIGHBOUR_OFFSETS)
            .all(|pos| !world.pixel(pos).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandfall_simulation::{Pixel, PixelType};

    fn rock() -> Pixel {
        Pixel {
            kind: PixelType::ROCK,
            ..Pixel::air()
        }
    }

    #[test]
    fn test_adjacent_offsets_are_the_orthogonal_prefix() {
        assert_eq!(&NEIGHBOUR_OFFSETS[..4], &ADJACENT_OFFSETS[..]);
        for offset in ADJACENT_OFFSETS {
            assert_eq!(offset.x.abs() + offset.y.abs(), 1);
        }
    }

    #[test]
    fn test_valid_neighbours_clipped_at_corner() {
        let world = PixelWorld::new(64, 64).unwrap();
        let corner: Vec<IVec2> =
            NeighborQueries::valid_neighbours(&world, IVec2::ZERO, &NEIGHBOUR_OFFSETS).collect();

        assert_eq!(
            corner,
            vec![IVec2::new(1, 0), IVec2::new(0, 1), IVec2::new(1, 1)]
        );
    }

    #[test]
    fn test_is_surrounded() {
        let mut world = PixelWorld::new(64, 64).unwrap();
        let center = IVec2::new(10, 10);
        assert!(!NeighborQueries::is_surrounded(&world, center));

        for offset in NEIGHBOUR_OFFSETS {
            world.set(center + offset, rock());
        }
        assert!(NeighborQueries::is_surrounded(&world, center));

        world.set(IVec2::new(11, 11), Pixel::air());
        assert!(!NeighborQueries::is_surrounded(&world, center));
    }

    #[test]
    fn test_world_edge_counts_as_occupied() {
        let mut world = PixelWorld::new(64, 64).unwrap();
        for pos in [IVec2::new(1, 0), IVec2::new(0, 1), IVec2::new(1, 1)] {
            world.set(pos, rock());
        }
        assert!(NeighborQueries::is_surrounded(&world, IVec2::ZERO));
    }
}
