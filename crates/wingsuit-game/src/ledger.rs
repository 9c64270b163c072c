use std::collections::VecDeque;

use wingsuit_collision::ObstacleKind;
use wingsuit_core::Vec3;

use crate::game::GameState;

/// Notable session events, in the order they happened.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LedgerEvent {
    RingPassed { index: usize, elapsed: f32 },
    FinishRing { elapsed: f32 },
    DepthReached { z: f32 },
    GroundHit { clearance: f32 },
    ObstacleHit { kind: ObstacleKind, at: Vec3 },
    StateChanged { from: GameState, to: GameState },
    Reset { generation: u64 },
}

/// Ring buffer of the most recent `cap` events.
#[derive(Clone, Debug)]
pub struct Ledger {
    events: VecDeque<LedgerEvent>,
    cap: usize,
    dropped: u64,
}

impl Ledger {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self { events: VecDeque::with_capacity(cap.min(1024)), cap, dropped: 0 }
    }

    pub fn push(&mut self, e: LedgerEvent) {
        if self.events.len() == self.cap {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(e);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEvent> { self.events.iter() }
    pub fn last(&self) -> Option<&LedgerEvent> { self.events.back() }
    pub fn len(&self) -> usize { self.events.len() }
    pub fn is_empty(&self) -> bool { self.events.is_empty() }
    /// Events evicted because the buffer was full.
    pub fn dropped(&self) -> u64 { self.dropped }
}
