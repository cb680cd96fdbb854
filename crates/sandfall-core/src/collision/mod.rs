//! Static collider synthesis from the pixel grid
//!
//! Each active chunk's static pixels are split into 4-connected regions. Every
//! region's outline is traced, simplified and handed to the physics backend
//! as a closed chain on the chunk's static body. Bodies are rebuilt wholesale
//! whenever their chunk steps.

mod boundary;
mod simplify;

use std::collections::HashMap;

use glam::IVec2;
use sandfall_simulation::CHUNK_SIZE;

use crate::physics::{PhysicsBackend, pixel_to_physics};
use crate::world::PixelWorld;

pub use boundary::{BoundaryTracer, StaticMask, is_static_pixel};
pub use simplify::simplify_boundary;

/// Outlines with this many vertices or fewer are not worth colliding
const MIN_CHAIN_VERTICES: usize = 3;

/// Simplified outlines of every static region in one chunk, in pixel coordinates
pub fn chunk_outlines(world: &PixelWorld, chunk_pos: IVec2, epsilon: f32) -> Vec<Vec<IVec2>> {
    let top_left = chunk_pos * CHUNK_SIZE as i32;
    let tracer = BoundaryTracer::new(world, top_left);
    let mut mask = StaticMask::from_chunk(world, top_left);

    let mut outlines = Vec::new();
    while let Some(seed) = mask.first_set() {
        let ring = tracer.trace(top_left + seed);
        let outline = simplify_boundary(&ring, epsilon);
        if outline.len() > MIN_CHAIN_VERTICES {
            outlines.push(outline);
        }
        mask.flood_clear(seed);
    }
    outlines
}

/// Owns the static body generated for each chunk
pub struct ChunkColliders<B> {
    bodies: HashMap<IVec2, B>,
}

impl<B: Copy> ChunkColliders<B> {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
        }
    }

    /// Rebuild the body of every chunk that stepped this tick
    ///
    /// Returns the number of chains created.
    pub fn regenerate<P>(&mut self, world: &PixelWorld, physics: &mut P, epsilon: f32) -> usize
    where
        P: PhysicsBackend<Body = B>,
    {
        let mut chains = 0;
        for cy in 0..world.height_in_chunks() {
            for cx in 0..world.width_in_chunks() {
                let chunk_pos = IVec2::new(cx, cy);
                if world.chunk(chunk_pos).should_step {
                    chains += self.rebuild_chunk(world, physics, chunk_pos, epsilon);
                }
            }
        }
        chains
    }

    /// Rebuild every chunk regardless of activity
    pub fn regenerate_all<P>(&mut self, world: &PixelWorld, physics: &mut P, epsilon: f32) -> usize
    where
        P: PhysicsBackend<Body = B>,
    {
        let mut chains = 0;
        for cy in 0..world.height_in_chunks() {
            for cx in 0..world.width_in_chunks() {
                chains += self.rebuild_chunk(world, physics, IVec2::new(cx, cy), epsilon);
            }
        }
        chains
    }

    fn rebuild_chunk<P>(
        &mut self,
        world: &PixelWorld,
        physics: &mut P,
        chunk_pos: IVec2,
        epsilon: f32,
    ) -> usize
    where
        P: PhysicsBackend<Body = B>,
    {
        if let Some(old) = self.bodies.remove(&chunk_pos) {
            physics.destroy_body(old);
        }

        let body = physics.create_static_body();
        self.bodies.insert(chunk_pos, body);

        let outlines = chunk_outlines(world, chunk_pos, epsilon);
        for outline in &outlines {
            let points: Vec<_> = outline.iter().map(|p| pixel_to_physics(p.as_vec2())).collect();
            physics.create_closed_chain(body, &points);
        }

        log::debug!("Chunk {} rebuilt with {} chains", chunk_pos, outlines.len());
        outlines.len()
    }

    /// Body currently owned for a chunk
    pub fn body(&self, chunk_pos: IVec2) -> Option<B> {
        self.bodies.get(&chunk_pos).copied()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Destroy every body this owns
    pub fn clear<P>(&mut self, physics: &mut P)
    where
        P: PhysicsBackend<Body = B>,
    {
        for (_, body) in self.bodies.drain() {
            physics.destroy_body(body);
        }
    }
}

impl<B: Copy> Default for ChunkColliders<B> {
    fn default() -> Self {
        Self::new()
    }
}
