//! Pixel value type and constants
//!
//! Foundational types for the pixel-based simulation.

use bitflags::bitflags;
use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::{PixelProperties, PixelType, WorldRng};

/// Size of a chunk in pixels (64x64)
pub const CHUNK_SIZE: usize = 64;

/// Total pixels in a chunk
pub const CHUNK_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;

/// Brightness jitter applied to freshly spawned pixels
const LIGHT_NOISE: f32 = 0.04;

bitflags! {
    /// Per-pixel state flags
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PixelFlags: u8 {
        /// Already processed this tick (reset every tick)
        const UPDATED = 1 << 0;
        /// In free-fall; resting pixels with inertia ignore movement
        const FALLING = 1 << 1;
        /// Currently on fire
        const BURNING = 1 << 2;
    }
}

/// A single pixel in the world
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pixel {
    pub kind: PixelType,
    /// RGBA in [0, 1]; scorch darkening writes here
    pub colour: Vec4,
    /// Pixels per tick
    pub velocity: Vec2,
    pub flags: PixelFlags,
    pub power: u8,
}

impl Default for Pixel {
    fn default() -> Self {
        Self::air()
    }
}

impl Pixel {
    pub const AIR: Pixel = Pixel {
        kind: PixelType::NONE,
        colour: Vec4::ZERO,
        velocity: Vec2::ZERO,
        flags: PixelFlags::empty(),
        power: 0,
    };

    pub fn air() -> Self {
        Self::AIR
    }

    /// A freshly spawned pixel of `kind`, with its spawn colour and state
    pub fn new<R: WorldRng + ?Sized>(kind: PixelType, rng: &mut R) -> Self {
        if kind == PixelType::NONE {
            return Self::air();
        }

        let (hex, noisy) = spawn_colour(kind);
        let base = from_hex(hex);
        let colour = if noisy { light_noise(base, rng) } else { base };

        let mut flags = PixelFlags::empty();
        if matches!(
            kind,
            PixelType::SAND | PixelType::COAL | PixelType::DIRT | PixelType::GUNPOWDER | PixelType::SOLDER
        ) {
            flags |= PixelFlags::FALLING;
        }
        if kind == PixelType::EMBER {
            flags |= PixelFlags::BURNING;
        }

        let power = if kind == PixelType::SPARK {
            kind.properties().power_max
        } else {
            0
        };

        Self {
            kind,
            colour,
            velocity: Vec2::ZERO,
            flags,
            power,
        }
    }

    pub fn steam<R: WorldRng + ?Sized>(rng: &mut R) -> Self {
        Self::new(PixelType::STEAM, rng)
    }

    pub fn ember<R: WorldRng + ?Sized>(rng: &mut R) -> Self {
        Self::new(PixelType::EMBER, rng)
    }

    pub fn is_empty(&self) -> bool {
        self.kind == PixelType::NONE
    }

    pub fn is_updated(&self) -> bool {
        self.flags.contains(PixelFlags::UPDATED)
    }

    pub fn is_falling(&self) -> bool {
        self.flags.contains(PixelFlags::FALLING)
    }

    pub fn is_burning(&self) -> bool {
        self.flags.contains(PixelFlags::BURNING)
    }

    pub fn properties(&self) -> &'static PixelProperties {
        self.kind.properties()
    }

    /// Colour as display bytes
    pub fn rgba8(&self) -> [u8; 4] {
        let c = self.colour.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
        [
            c.x.round() as u8,
            c.y.round() as u8,
            c.z.round() as u8,
            c.w.round() as u8,
        ]
    }
}

/// Base colour of each type and whether it gets light noise
fn spawn_colour(kind: PixelType) -> (u32, bool) {
    match kind {
        PixelType::SAND => (0xF8EFBA, true),
        PixelType::COAL => (0x1E272E, true),
        PixelType::DIRT => (0x5C1D06, true),
        PixelType::ROCK => (0xC8C8C8, true),
        PixelType::WATER => (0x1B9CFC, true),
        PixelType::LAVA => (0xF97F51, true),
        PixelType::ACID => (0x2ED573, true),
        PixelType::STEAM => (0x9AECDB, true),
        PixelType::TITANIUM => (0xDFE4EA, false),
        PixelType::FUSE => (0x45AAF2, true),
        PixelType::EMBER => (0xFFFFFF, false),
        PixelType::OIL => (0x650C30, true),
        PixelType::GUNPOWDER => (0x485460, true),
        PixelType::METHANE => (0xCED6E0, true),
        PixelType::BATTERY => (0xF0932B, true),
        PixelType::SOLDER => (0xB2BEC3, true),
        PixelType::DIODE_IN => (0x22A6B3, true),
        PixelType::DIODE_OUT => (0xBE2EDD, true),
        PixelType::SPARK => (0xE1B12C, true),
        PixelType::C4 => (0xB8E994, true),
        PixelType::RELAY => (0x192A56, true),
        // Air and unknown ids
        _ => (0xFF00FF, false),
    }
}

fn from_hex(hex: u32) -> Vec4 {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    Vec4::new(channel(16), channel(8), channel(0), 1.0)
}

fn light_noise<R: WorldRng + ?Sized>(colour: Vec4, rng: &mut R) -> Vec4 {
    let offset = rng.gen_range_f32(-LIGHT_NOISE, LIGHT_NOISE);
    let rgb = (colour.truncate() + Vec3::splat(offset)).clamp(Vec3::ZERO, Vec3::ONE);
    rgb.extend(colour.w)
}
