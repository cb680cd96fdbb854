//! Boundary tracing of static pixel regions within one chunk.
//!
//! Vertices are pixel corners: vertex (x, y) is the top-left corner of pixel
//! (x, y). A walk moves one vertex at a time along edges that separate a
//! static pixel from a non-static one, going clockwise around the region.

use glam::IVec2;
use sandfall_simulation::{CHUNK_AREA, CHUNK_SIZE, Phase};

use crate::world::PixelWorld;

const CHUNK: i32 = CHUNK_SIZE as i32;

const UP: IVec2 = IVec2::new(0, -1);
const RIGHT: IVec2 = IVec2::new(1, 0);
const DOWN: IVec2 = IVec2::new(0, 1);
const LEFT: IVec2 = IVec2::new(-1, 0);

/// Step candidates, tried in this order
const STEP_OFFSETS: [IVec2; 4] = [UP, RIGHT, DOWN, LEFT];

/// Upper bound on walk length; a ring around a chunk never gets close
const MAX_WALK_STEPS: usize = 4 * CHUNK_AREA + 4;

/// Whether the pixel at `pos` is part of the chunk's static terrain
///
/// Pixels outside the chunk starting at `top_left` never are, so each chunk
/// is traced independently of its neighbours.
pub fn is_static_pixel(world: &PixelWorld, top_left: IVec2, pos: IVec2) -> bool {
    let local = pos - top_left;
    if local.x < 0 || local.x >= CHUNK || local.y < 0 || local.y >= CHUNK {
        return false;
    }
    if !world.is_valid_pixel(pos) {
        return false;
    }

    let pixel = world.pixel(pos);
    !pixel.is_empty() && pixel.properties().phase == Phase::Solid && !pixel.is_falling()
}

/// One chunk's static pixels as a bitset, row-major
pub struct StaticMask {
    bits: Vec<bool>,
}

impl StaticMask {
    pub fn from_chunk(world: &PixelWorld, top_left: IVec2) -> Self {
        let mut bits = vec![false; CHUNK_AREA];
        for y in 0..CHUNK {
            for x in 0..CHUNK {
                let local = IVec2::new(x, y);
                bits[Self::index(local)] = is_static_pixel(world, top_left, top_left + local);
            }
        }
        Self { bits }
    }

    fn index(local: IVec2) -> usize {
        (local.y * CHUNK + local.x) as usize
    }

    fn in_bounds(local: IVec2) -> bool {
        local.x >= 0 && local.x < CHUNK && local.y >= 0 && local.y < CHUNK
    }

    pub fn is_set(&self, local: IVec2) -> bool {
        Self::in_bounds(local) && self.bits[Self::index(local)]
    }

    pub fn any(&self) -> bool {
        self.bits.iter().any(|bit| *bit)
    }

    /// First set bit in row-major order, in chunk-local coordinates
    pub fn first_set(&self) -> Option<IVec2> {
        self.bits
            .iter()
            .position(|bit| *bit)
            .map(|index| IVec2::new(index as i32 % CHUNK, index as i32 / CHUNK))
    }

    /// Clear the 4-connected region containing `seed`
    pub fn flood_clear(&mut self, seed: IVec2) {
        let mut to_visit = vec![seed];
        while let Some(curr) = to_visit.pop() {
            if !self.is_set(curr) {
                continue;
            }
            self.bits[Self::index(curr)] = false;
            for offset in STEP_OFFSETS {
                let neighbour = curr + offset;
                if self.is_set(neighbour) {
                    to_visit.push(neighbour);
                }
            }
        }
    }
}

/// Traces the outline of one static region
pub struct BoundaryTracer<'a> {
    world: &'a PixelWorld,
    top_left: IVec2,
}

impl<'a> BoundaryTracer<'a> {
    pub fn new(world: &'a PixelWorld, top_left: IVec2) -> Self {
        Self { world, top_left }
    }

    fn is_static(&self, pos: IVec2) -> bool {
        is_static_pixel(self.world, self.top_left, pos)
    }

    /// Whether the edge between the pixels at `a` and `a + offset` separates static from non-static
    fn is_static_boundary(&self, a: IVec2, offset: IVec2) -> bool {
        self.is_static(a) != self.is_static(a + offset)
    }

    /// Whether the unit edge from vertex `curr` to vertex `next` lies on a boundary
    fn is_along_boundary(&self, curr: IVec2, next: IVec2) -> bool {
        let offset = next - curr;
        if offset == UP {
            self.is_static_boundary(next, LEFT)
        } else if offset == DOWN {
            self.is_static_boundary(curr, LEFT)
        } else if offset == LEFT {
            self.is_static_boundary(next, UP)
        } else if offset == RIGHT {
            self.is_static_boundary(curr, UP)
        } else {
            false
        }
    }

    /// The four pixels around vertex `curr` form a checkerboard
    fn is_boundary_cross(&self, curr: IVec2) -> bool {
        let tl = self.is_static(curr + LEFT + UP);
        let tr = self.is_static(curr + UP);
        let bl = self.is_static(curr + LEFT);
        let br = self.is_static(curr);
        tl == br && bl == tr && tl != tr
    }

    fn is_valid_step(&self, prev: IVec2, curr: IVec2, next: IVec2) -> bool {
        if prev == next || !self.is_along_boundary(curr, next) {
            return false;
        }
        if !self.is_boundary_cross(curr) {
            return true;
        }

        // Straight through a crossing would cut between the diagonal pixels
        let straight = (prev.x == curr.x && curr.x == next.x) || (prev.y == curr.y && curr.y == next.y);
        if straight {
            return false;
        }

        // Turning at a crossing must wrap the static pixel inside the turn
        let corner = prev.min(curr).min(next);
        self.is_static(corner)
    }

    /// Trace the ring around the region containing the static pixel `seed`
    ///
    /// The ring starts at the top-left corner of the topmost pixel above the
    /// seed and, when complete, ends by repeating it. A walk that runs out of
    /// valid steps returns what was traced so far.
    pub fn trace(&self, seed: IVec2) -> Vec<IVec2> {
        let mut start = seed;
        while self.is_static(start + UP) {
            start += UP;
        }

        // The top edge of the start pixel is always a boundary
        let mut ring = vec![start, start + RIGHT];
        let mut curr = start + RIGHT;

        while curr != start {
            if ring.len() > MAX_WALK_STEPS {
                log::warn!(
                    "Boundary walk from {} exceeded {} steps, keeping partial ring",
                    start,
                    MAX_WALK_STEPS
                );
                break;
            }

            let prev = ring[ring.len() - 2];
            let step = STEP_OFFSETS
                .iter()
                .map(|offset| curr + *offset)
                .find(|next| self.is_valid_step(prev, curr, *next));

            match step {
                Some(next) => {
                    curr = next;
                    ring.push(next);
                }
                None => {
                    log::warn!("Boundary walk from {} stopped at {} with no valid step", start, curr);
                    break;
                }
            }
        }

        ring
    }
}
