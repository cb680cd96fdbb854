//! Simulation rules - neighbour reactions, fire, electricity, explosions

pub mod electricity;
pub mod explosion;
pub mod reactions;
pub mod state_changes;

pub use electricity::ElectricalSystem;
pub use explosion::{Explosion, apply_explosion};
pub use reactions::ReactionSystem;
pub use state_changes::StateChangeSystem;
