//! Pixel grid - chunk activity, mutation primitives and the per-tick pass

mod ca_update;
mod chunk;
mod neighbor_queries;
pub mod persistence;
pub mod stats;
#[allow(clippy::module_inception)]
mod world;

pub use ca_update::CellularAutomataUpdater;
pub use chunk::Chunk;
pub use neighbor_queries::{ADJACENT_OFFSETS, NEIGHBOUR_OFFSETS, NeighborQueries};
pub use persistence::WorldSave;
pub use stats::{NoopStats, SimStats, TickCounters};
pub use world::{PixelWorld, WorldError};
