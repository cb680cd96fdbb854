//! Chunk activity state

use serde::{Deserialize, Serialize};

/// Sleep/wake state of one 64x64 block of the grid
///
/// Double-buffered: wakes during a tick only touch `should_step_next`, which
/// becomes `should_step` when the next tick starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Pixels in this chunk are processed during the current tick
    pub should_step: bool,
    /// Wake requests accumulated for the following tick
    pub should_step_next: bool,
}

impl Default for Chunk {
    /// New chunks run on the first tick
    fn default() -> Self {
        Self {
            should_step: true,
            should_step_next: true,
        }
    }
}

impl Chunk {
    /// Start a new tick: promote pending wakes and clear the request buffer
    pub fn roll_activity(&mut self) {
        self.should_step = self.should_step_next;
        self.should_step_next = false;
    }

    pub fn wake(&mut self) {
        self.should_step_next = true;
    }
}
