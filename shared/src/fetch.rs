//! Staleness guard for fire-and-forget fetches.
//!
//! History and stats are re-fetched after every upload and may race a
//! user-initiated refresh. Each resource keeps a sequencer: a fetch takes an
//! epoch when it starts, and its response is applied only if no newer fetch
//! began in the meantime.

#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, invalidating all earlier ones.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Whether a response carrying `epoch` is still the newest in flight.
    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.latest
    }
}
