//! Explosions
//!
//! Rays are cast from the centre to every cell on the edge of a square of
//! half-size `max_radius + 3 * scorch`. Each ray destroys up to its own random
//! blast limit, may ignite the pixel where the blast stops, then darkens solid
//! pixels for a further random scorch distance. Titanium stops a ray outright.

use bresenham::Bresenham;
use glam::IVec2;
use sandfall_simulation::{Phase, Pixel, PixelFlags, PixelType, WorldRng};
use serde::{Deserialize, Serialize};

use crate::world::PixelWorld;

/// Chance a destroyed pixel becomes an ember instead of air
const EMBER_CHANCE: f32 = 0.05;

/// Colour multiplier applied by each scorching pass
const SCORCH_FACTOR: f32 = 0.8;

/// Explosion parameters, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    /// Every ray destroys at least this far
    pub min_radius: f32,
    /// No ray destroys beyond this
    pub max_radius: f32,
    /// Standard deviation of the scorch band past the blast
    pub scorch: f32,
}

impl Explosion {
    pub const fn new(min_radius: f32, max_radius: f32, scorch: f32) -> Self {
        Self {
            min_radius,
            max_radius,
            scorch,
        }
    }

    /// Half-size of the square whose edge cells the rays aim at
    fn reach(&self) -> i32 {
        (self.max_radius + 3.0 * self.scorch).round().max(0.0) as i32
    }
}

/// Blow up the area around `pos`
pub fn apply_explosion<R: WorldRng + ?Sized>(
    world: &mut PixelWorld,
    pos: IVec2,
    explosion: Explosion,
    rng: &mut R,
) {
    let reach = explosion.reach();
    log::debug!(
        "Explosion at {} (radius {}..{}, scorch {})",
        pos,
        explosion.min_radius,
        explosion.max_radius,
        explosion.scorch
    );

    for b in -reach..=reach {
        for edge in [
            IVec2::new(b, reach),
            IVec2::new(b, -reach),
            IVec2::new(reach, b),
            IVec2::new(-reach, b),
        ] {
            // Aim past the square so the scorch band can overshoot it
            cast_ray(world, pos, pos + edge * 2, explosion, rng);
        }
    }
}

fn cast_ray<R: WorldRng + ?Sized>(
    world: &mut PixelWorld,
    start: IVec2,
    target: IVec2,
    explosion: Explosion,
    rng: &mut R,
) {
    let blast_limit = rng.gen_range_f32(explosion.min_radius, explosion.max_radius);
    let mut ray = Bresenham::new(
        (start.x as isize, start.y as isize),
        (target.x as isize, target.y as isize),
    )
    .map(|(x, y)| IVec2::new(x as i32, y as i32));

    let distance = |pos: IVec2| (pos - start).as_vec2().length();

    // Destructive phase
    let boundary = loop {
        let Some(pos) = ray.next() else {
            return;
        };
        if !world.is_valid_pixel(pos) {
            return;
        }
        if distance(pos) >= blast_limit {
            break pos;
        }
        if world.pixel(pos).kind == PixelType::TITANIUM {
            return;
        }

        let debris = if rng.check_probability(EMBER_CHANCE) {
            Pixel::ember(rng)
        } else {
            Pixel::air()
        };
        world.set(pos, debris);
    };

    if world.pixel(boundary).kind == PixelType::TITANIUM {
        return;
    }

    let flammability = world.pixel(boundary).properties().flammability;
    if rng.check_probability(flammability) {
        world.visit(boundary, |p| p.flags.insert(PixelFlags::BURNING));
    }

    // Scorch phase
    let scorch_limit = distance(boundary) + rng.gen_normal(0.0, explosion.scorch).abs();
    let mut pos = boundary;
    while distance(pos) < scorch_limit {
        let pixel = world.pixel(pos);
        if pixel.kind == PixelType::TITANIUM {
            return;
        }
        if pixel.properties().phase == Phase::Solid && !pixel.is_empty() {
            world.visit(pos, |p| {
                let rgb = p.colour.truncate() * SCORCH_FACTOR;
                p.colour = rgb.extend(p.colour.w);
            });
        }

        match ray.next() {
            Some(next) if world.is_valid_pixel(next) => pos = next,
            _ => return,
        }
    }
}
