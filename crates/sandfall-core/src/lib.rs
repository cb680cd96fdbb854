pub mod collision;
pub mod config;
pub mod level;
pub mod physics;
pub mod simulation;
pub mod world;

pub use config::SimConfig;
pub use level::Level;
pub use sandfall_simulation::{
    CHUNK_SIZE, Phase, Pixel, PixelFlags, PixelProperties, PixelType, PowerType, WorldRng,
    properties,
};
