//! Request generations
//!
//! Each fetch cycle is stamped with a `Generation` minted by the owning
//! scope's `RequestSequence`. A result may only be applied while its
//! generation is current: no newer generation was minted and the scope
//! has not been retired.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Stamp of one fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw sequence number (starts at 1)
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Monotonic generation counter with a teardown flag
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
    retired: AtomicBool,
}

impl RequestSequence {
    /// Create a sequence with no generations yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next generation, superseding every earlier one
    pub fn advance(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Most recently minted generation
    pub fn latest(&self) -> Option<Generation> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(Generation(n)),
        }
    }

    /// Whether results stamped with `generation` may still be applied
    pub fn is_current(&self, generation: Generation) -> bool {
        !self.is_retired() && self.latest.load(Ordering::SeqCst) == generation.0
    }

    /// Tear down: no generation is current afterwards
    pub fn retire(&self) {
        self.retired.store(true, Ordering::SeqCst);
    }

    /// Whether the owning scope was torn down
    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::SeqCst)
    }
}
