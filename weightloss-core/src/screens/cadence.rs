//! Redraw cadences

/// When a screen asks to be redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cadence {
    /// Every `n`-th poll
    EveryNth(u32),
    /// The very first poll, then never again
    FirstPollOnly,
}

/// Poll counter deciding when a screen is due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedrawCounter {
    cadence: Cadence,
    polls: u32,
}

impl RedrawCounter {
    pub const fn new(cadence: Cadence) -> Self {
        Self { cadence, polls: 0 }
    }

    /// Count one poll and report whether a redraw is due
    pub fn poll(&mut self) -> bool {
        match self.cadence {
            Cadence::EveryNth(n) => {
                self.polls = self.polls.wrapping_add(1);
                self.polls % n.max(1) == 0
            }
            Cadence::FirstPollOnly => {
                self.polls = self.polls.saturating_add(1);
                self.polls <= 1
            }
        }
    }

    /// Number of polls so far
    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }
}
