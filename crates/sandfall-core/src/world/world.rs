//! Dense pixel grid with chunk sleep/wake bookkeeping

use glam::IVec2;
use sandfall_simulation::{CHUNK_SIZE, Pixel, PixelFlags, WorldRng};
use thiserror::Error;

use super::ca_update::CellularAutomataUpdater;
use super::neighbor_queries::ADJACENT_OFFSETS;
use super::stats::{NoopStats, SimStats};
use super::Chunk;
use crate::SimConfig;

const CHUNK: i32 = CHUNK_SIZE as i32;

/// Rejected world construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// Width or height is zero or not a multiple of the chunk size
    #[error("world dimensions {width}x{height} are not positive multiples of the 64 pixel chunk size")]
    MisalignedDimensions { width: u32, height: u32 },

    /// Pixel array length does not match the dimensions
    #[error("pixel array holds {actual} pixels, expected {expected} for a {width}x{height} world")]
    PixelCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// The pixel grid of one level
///
/// Pixels and chunks are both stored row-major. The pixel at (x, y) belongs
/// to chunk (x / 64, y / 64); +y points down.
pub struct PixelWorld {
    width: i32,
    height: i32,
    pixels: Vec<Pixel>,
    chunks: Vec<Chunk>,
    config: SimConfig,
}

impl PixelWorld {
    /// All-air world
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        Self::with_config(width, height, SimConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: SimConfig) -> Result<Self, WorldError> {
        Self::validate_dimensions(width, height)?;
        let pixels = vec![Pixel::air(); width as usize * height as usize];
        Self::from_pixels_with_config(width, height, pixels, config)
    }

    /// World over a previously saved pixel array
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, WorldError> {
        Self::from_pixels_with_config(width, height, pixels, SimConfig::default())
    }

    pub fn from_pixels_with_config(
        width: u32,
        height: u32,
        pixels: Vec<Pixel>,
        config: SimConfig,
    ) -> Result<Self, WorldError> {
        Self::validate_dimensions(width, height)?;

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(WorldError::PixelCountMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        let chunk_count = (width as usize / CHUNK_SIZE) * (height as usize / CHUNK_SIZE);
        log::debug!(
            "Created {}x{} pixel world with {} chunks",
            width,
            height,
            chunk_count
        );

        Ok(Self {
            width: width as i32,
            height: height as i32,
            pixels,
            chunks: vec![Chunk::default(); chunk_count],
            config,
        })
    }

    fn validate_dimensions(width: u32, height: u32) -> Result<(), WorldError> {
        let aligned = |value: u32| value > 0 && value as usize % CHUNK_SIZE == 0 && value <= i32::MAX as u32;
        if aligned(width) && aligned(height) {
            Ok(())
        } else {
            Err(WorldError::MisalignedDimensions { width, height })
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width_in_chunks(&self) -> i32 {
        self.width / CHUNK
    }

    pub fn height_in_chunks(&self) -> i32 {
        self.height / CHUNK
    }

    /// Chunk coordinates owning a pixel position
    pub fn chunk_pos_of(pos: IVec2) -> IVec2 {
        IVec2::new(pos.x.div_euclid(CHUNK), pos.y.div_euclid(CHUNK))
    }

    pub fn is_valid_pixel(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn is_valid_chunk(&self, chunk_pos: IVec2) -> bool {
        chunk_pos.x >= 0
            && chunk_pos.y >= 0
            && chunk_pos.x < self.width_in_chunks()
            && chunk_pos.y < self.height_in_chunks()
    }

    fn pixel_index(&self, pos: IVec2) -> usize {
        assert!(
            self.is_valid_pixel(pos),
            "pixel {} outside {}x{} world",
            pos,
            self.width,
            self.height
        );
        (pos.y * self.width + pos.x) as usize
    }

    fn chunk_index(&self, chunk_pos: IVec2) -> usize {
        assert!(
            self.is_valid_chunk(chunk_pos),
            "chunk {} outside {}x{} chunk grid",
            chunk_pos,
            self.width_in_chunks(),
            self.height_in_chunks()
        );
        (chunk_pos.y * self.width_in_chunks() + chunk_pos.x) as usize
    }

    /// Pixel at a valid position
    pub fn pixel(&self, pos: IVec2) -> &Pixel {
        &self.pixels[self.pixel_index(pos)]
    }

    /// Pixel at any position, `None` outside the world
    pub fn get(&self, pos: IVec2) -> Option<&Pixel> {
        if self.is_valid_pixel(pos) {
            Some(self.pixel(pos))
        } else {
            None
        }
    }

    pub fn chunk(&self, chunk_pos: IVec2) -> &Chunk {
        &self.chunks[self.chunk_index(chunk_pos)]
    }

    /// Row-major pixel array, for rendering and saving
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Row-major chunk array
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunks processed during the current tick
    pub fn active_chunk_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.should_step).count()
    }

    /// Overwrite a pixel and wake its surroundings
    pub fn set(&mut self, pos: IVec2, pixel: Pixel) {
        let index = self.pixel_index(pos);
        self.pixels[index] = pixel;
        self.wake_chunk_with_pixel(pos);
    }

    /// Exchange two pixels and wake around both
    pub fn swap(&mut self, a: IVec2, b: IVec2) {
        let ia = self.pixel_index(a);
        let ib = self.pixel_index(b);
        self.pixels.swap(ia, ib);
        self.wake_chunk_with_pixel(a);
        self.wake_chunk_with_pixel(b);
    }

    /// Mutate a pixel in place and wake its surroundings
    pub fn visit<F: FnOnce(&mut Pixel)>(&mut self, pos: IVec2, mutator: F) {
        self.visit_no_wake(pos, mutator);
        self.wake_chunk_with_pixel(pos);
    }

    /// Mutate a pixel in place without touching chunk activity
    pub fn visit_no_wake<F: FnOnce(&mut Pixel)>(&mut self, pos: IVec2, mutator: F) {
        let index = self.pixel_index(pos);
        mutator(&mut self.pixels[index]);
    }

    /// Request the owning chunk and its orthogonal neighbours for next tick
    pub fn wake_chunk_with_pixel(&mut self, pos: IVec2) {
        let chunk_pos = Self::chunk_pos_of(pos);
        self.wake_chunk(chunk_pos);
        for offset in ADJACENT_OFFSETS {
            self.wake_chunk(chunk_pos + offset);
        }
    }

    /// Request a chunk for next tick; positions outside the grid are ignored
    pub fn wake_chunk(&mut self, chunk_pos: IVec2) {
        if self.is_valid_chunk(chunk_pos) {
            let index = self.chunk_index(chunk_pos);
            self.chunks[index].wake();
        }
    }

    pub fn wake_all(&mut self) {
        for chunk in &mut self.chunks {
            chunk.wake();
        }
    }

    /// Advance the grid by one fixed tick
    pub fn step<R: WorldRng + ?Sized>(&mut self, rng: &mut R) {
        self.step_with_stats(rng, &mut NoopStats);
    }

    pub fn step_with_stats<R, S>(&mut self, rng: &mut R, stats: &mut S)
    where
        R: WorldRng + ?Sized,
        S: SimStats + ?Sized,
    {
        for pixel in &mut self.pixels {
            pixel.flags.remove(PixelFlags::UPDATED);
        }
        for chunk in &mut self.chunks {
            chunk.roll_activity();
        }

        let chunks_wide = self.width_in_chunks();

        // Bottom row first: settled pixels below are resolved before the ones above
        for y in (0..self.height).rev() {
            let chunk_y = y / CHUNK;
            let left_to_right = rng.gen_bool();

            for i in 0..chunks_wide {
                let chunk_x = if left_to_right { i } else { chunks_wide - 1 - i };
                if !self.chunk(IVec2::new(chunk_x, chunk_y)).should_step {
                    continue;
                }

                for j in 0..CHUNK {
                    let dx = if left_to_right { j } else { CHUNK - 1 - j };
                    let pos = IVec2::new(chunk_x * CHUNK + dx, y);

                    let pixel = self.pixel(pos);
                    if pixel.is_empty() || pixel.is_updated() {
                        continue;
                    }

                    let end = CellularAutomataUpdater::update_pixel(self, pos, rng, stats);
                    self.visit_no_wake(end, |p| p.flags.insert(PixelFlags::UPDATED));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandfall_simulation::PixelType;

    fn pixel_of(kind: PixelType) -> Pixel {
        Pixel {
            kind,
            ..Pixel::air()
        }
    }

    /// Test RNG that returns deterministic values
    struct TestRng {
        bool_value: bool,
    }

    impl WorldRng for TestRng {
        fn gen_bool(&mut self) -> bool {
            self.bool_value
        }

        fn gen_f32(&mut self) -> f32 {
            0.999
        }
    }

    fn settle_chunks(world: &mut PixelWorld) {
        for chunk in &mut world.chunks {
            chunk.should_step = false;
            chunk.should_step_next = false;
        }
    }

    #[test]
    fn test_rejects_misaligned_dimensions() {
        assert_eq!(
            PixelWorld::new(100, 64).err(),
            Some(WorldError::MisalignedDimensions {
                width: 100,
                height: 64
            })
        );
        assert!(PixelWorld::new(0, 64).is_err());
        assert!(PixelWorld::new(64, 0).is_err());
        assert!(PixelWorld::new(128, 192).is_ok());
    }

    #[test]
    fn test_rejects_pixel_count_mismatch() {
        let result = PixelWorld::from_pixels(64, 64, vec![Pixel::air(); 100]);
        assert_eq!(
            result.err(),
            Some(WorldError::PixelCountMismatch {
                width: 64,
                height: 64,
                expected: 4096,
                actual: 100
            })
        );
    }

    #[test]
    fn test_chunk_layout() {
        let world = PixelWorld::new(192, 128).unwrap();
        assert_eq!(world.width_in_chunks(), 3);
        assert_eq!(world.height_in_chunks(), 2);
        assert_eq!(world.chunks().len(), 6);

        assert_eq!(PixelWorld::chunk_pos_of(IVec2::new(0, 0)), IVec2::new(0, 0));
        assert_eq!(PixelWorld::chunk_pos_of(IVec2::new(63, 64)), IVec2::new(0, 1));
        assert_eq!(PixelWorld::chunk_pos_of(IVec2::new(191, 127)), IVec2::new(2, 1));
        assert_eq!(PixelWorld::chunk_pos_of(IVec2::new(-1, 0)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_bounds_checks() {
        let world = PixelWorld::new(64, 128).unwrap();
        assert!(world.is_valid_pixel(IVec2::new(63, 127)));
        assert!(!world.is_valid_pixel(IVec2::new(64, 0)));
        assert!(!world.is_valid_pixel(IVec2::new(0, -1)));
        assert!(world.is_valid_chunk(IVec2::new(0, 1)));
        assert!(!world.is_valid_chunk(IVec2::new(1, 0)));
        assert!(world.get(IVec2::new(-1, 5)).is_none());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_set_out_of_bounds_panics() {
        let mut world = PixelWorld::new(64, 64).unwrap();
        world.set(IVec2::new(64, 0), Pixel::air());
    }

    #[test]
    fn test_wake_marks_owner_and_orthogonal_chunks_only() {
        let mut world = PixelWorld::new(192, 192).unwrap();

        for pos in [
            IVec2::new(100, 100),
            IVec2::new(0, 0),
            IVec2::new(191, 64),
            IVec2::new(64, 191),
        ] {
            settle_chunks(&mut world);
            world.wake_chunk_with_pixel(pos);

            let owner = PixelWorld::chunk_pos_of(pos);
            for cy in 0..3 {
                for cx in 0..3 {
                    let chunk_pos = IVec2::new(cx, cy);
                    let delta = (chunk_pos - owner).abs();
                    let expected = delta.x + delta.y <= 1;
                    let chunk = world.chunk(chunk_pos);
                    assert_eq!(chunk.should_step_next, expected, "pixel {pos} chunk {chunk_pos}");
                    assert!(!chunk.should_step);
                }
            }
        }
    }

    #[test]
    fn test_swap_is_a_true_exchange() {
        let mut world = PixelWorld::new(64, 64).unwrap();
        let a = IVec2::new(3, 4);
        let b = IVec2::new(40, 50);

        let mut sand = pixel_of(PixelType::SAND);
        sand.power = 7;
        let water = pixel_of(PixelType::WATER);

        world.set(a, sand);
        world.set(b, water);
        world.swap(a, b);

        assert_eq!(*world.pixel(a), water);
        assert_eq!(*world.pixel(b), sand);

        world.swap(a, a);
        assert_eq!(*world.pixel(a), water);
    }

    #[test]
    fn test_visit_no_wake_leaves_chunks_alone() {
        let mut world = PixelWorld::new(64, 64).unwrap();
        settle_chunks(&mut world);

        world.visit_no_wake(IVec2::new(5, 5), |p| p.power = 3);
        assert_eq!(world.pixel(IVec2::new(5, 5)).power, 3);
        assert!(!world.chunk(IVec2::ZERO).should_step_next);

        world.visit(IVec2::new(5, 5), |p| p.power = 4);
        assert!(world.chunk(IVec2::ZERO).should_step_next);
    }

    #[test]
    fn test_wake_all() {
        let mut world = PixelWorld::new(128, 128).unwrap();
        settle_chunks(&mut world);
        world.wake_all();
        assert!(world.chunks().iter().all(|c| c.should_step_next));
    }

    #[test]
    fn test_empty_world_step_is_identity_and_falls_asleep() {
        let mut world = PixelWorld::new(128, 128).unwrap();
        let before = world.pixels().to_vec();
        let mut rng = TestRng { bool_value: true };

        world.step(&mut rng);
        assert_eq!(world.pixels(), &before[..]);
        assert_eq!(world.active_chunk_count(), 4);

        world.step(&mut rng);
        assert_eq!(world.pixels(), &before[..]);
        assert_eq!(world.active_chunk_count(), 0);
    }

    #[test]
    fn test_step_marks_processed_pixels_updated() {
        let mut world = PixelWorld::new(64, 64).unwrap();
        let rock = IVec2::new(10, 10);
        world.set(rock, pixel_of(PixelType::ROCK));

        world.step(&mut TestRng { bool_value: false });
        assert!(world.pixel(rock).is_updated());
        assert!(!world.pixel(IVec2::new(11, 10)).is_updated());
    }

    #[test]
    fn test_sleeping_chunks_are_skipped() {
        let mut world = PixelWorld::new(128, 64).unwrap();
        let sand_pos = IVec2::new(100, 10);
        world.set(sand_pos, pixel_of(PixelType::SAND));
        world.visit_no_wake(sand_pos, |p| p.flags.insert(PixelFlags::FALLING));

        // Only the left chunk runs this tick
        for chunk in &mut world.chunks {
            chunk.should_step_next = false;
        }
        world.chunks[0].should_step_next = true;

        world.step(&mut TestRng { bool_value: true });
        assert_eq!(world.pixel(sand_pos).kind, PixelType::SAND);
        assert!(!world.pixel(sand_pos).is_updated());
    }
}
