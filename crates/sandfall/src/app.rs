//! Host loop: fixed-timestep pacing around `Level::update`

use std::time::Duration;

use rand_xoshiro::Xoshiro256StarStar;
use sandfall_core::Level;
use web_time::Instant;

/// Accumulates wall-clock time and hands out fixed simulation steps
pub struct FixedTimestep {
    step: f32,
    max_steps_per_frame: u32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32, max_steps_per_frame: u32) -> Self {
        Self {
            step,
            max_steps_per_frame,
            accumulator: 0.0,
        }
    }

    /// Add `dt` seconds and return how many fixed steps to run now
    ///
    /// At most `max_steps_per_frame` steps are handed out per call. If the host
    /// falls further behind, the backlog is dropped so the simulation slows
    /// down instead of spiralling.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Clamp accumulator to prevent runaway
        if self.accumulator > self.step * 2.0 {
            self.accumulator = self.step;
        }
        steps
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

/// Drives one level with one seeded random source
pub struct App {
    level: Level,
    rng: Xoshiro256StarStar,
    report_interval: u64,
}

impl App {
    pub fn new(level: Level, rng: Xoshiro256StarStar, report_interval: u64) -> Self {
        Self {
            level,
            rng,
            report_interval,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn into_level(self) -> Level {
        self.level
    }

    fn tick(&mut self) {
        self.level.update(&mut self.rng);

        let ticks = self.level.ticks();
        if self.report_interval > 0 && ticks % self.report_interval == 0 {
            let counters = self.level.take_counters();
            log::info!(
                "Tick {}: {} active chunks, {} moved, {} state changes, {} reactions, {} explosions, {} colliders",
                ticks,
                self.level.pixels().active_chunk_count(),
                counters.pixels_moved,
                counters.state_changes,
                counters.reactions,
                counters.explosions,
                self.level.physics().collider_count()
            );
        }
    }

    /// Run `ticks` steps back to back, without wall-clock pacing
    pub fn run_ticks(&mut self, ticks: u64) {
        let started = Instant::now();
        for _ in 0..ticks {
            self.tick();
        }
        log::info!("Simulated {} ticks in {:.2?}", ticks, started.elapsed());
    }

    /// Run until `ticks` steps have elapsed, paced by the wall clock
    pub fn run_realtime(&mut self, ticks: u64, mut timestep: FixedTimestep) {
        let frame = Duration::from_secs_f32(timestep.step() / 2.0);
        let target = self.level.ticks() + ticks;
        let mut last = Instant::now();

        while self.level.ticks() < target {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            for _ in 0..timestep.advance(dt) {
                if self.level.ticks() >= target {
                    break;
                }
                self.tick();
            }
            std::thread::sleep(frame);
        }
    }
}
