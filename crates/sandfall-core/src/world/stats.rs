//! Activity counters fed by the update rules

/// Sink for per-tick activity
///
/// Lets the host count activity without the grid knowing how it is reported.
pub trait SimStats {
    /// Record that a pixel changed position during a tick
    fn record_pixel_moved(&mut self);

    /// Record a self-driven change (burning out, igniting, power latch)
    fn record_state_change(&mut self);

    /// Record a neighbour interaction (boiling, corrosion, ignition, ember)
    fn record_reaction(&mut self);

    /// Record an explosion being applied
    fn record_explosion(&mut self) {}
}

/// Discards everything
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_pixel_moved(&mut self) {}
    fn record_state_change(&mut self) {}
    fn record_reaction(&mut self) {}
}

/// Running totals, reset by the host whenever it reports them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCounters {
    pub pixels_moved: u64,
    pub state_changes: u64,
    pub reactions: u64,
    pub explosions: u64,
}

impl SimStats for TickCounters {
    fn record_pixel_moved(&mut self) {
        self.pixels_moved += 1;
    }

    fn record_state_change(&mut self) {
        self.state_changes += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }

    fn record_explosion(&mut self) {
        self.explosions += 1;
    }
}
