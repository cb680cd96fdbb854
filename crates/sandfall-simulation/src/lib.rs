//! Pixel data and static physical properties for Sandfall
//!
//! This crate provides the foundational data types for the pixel simulation:
//! - Pixel values and their flag set (Pixel, PixelFlags, CHUNK_SIZE)
//! - Pixel type ids and the constant property table (PixelType, PixelProperties)
//! - The injectable random source used by every probabilistic rule (WorldRng)

mod pixel;
mod properties;
mod rng;

pub use pixel::{CHUNK_AREA, CHUNK_SIZE, Pixel, PixelFlags};
pub use properties::{Phase, PixelProperties, PixelType, PowerType, is_active_power_source, properties};
pub use rng::WorldRng;
