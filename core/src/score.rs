use serde::{Deserialize, Serialize};

use crate::*;

/// Points still on offer after `revealed_count` tiles have disappeared.
/// Decays linearly from `STARTING_POINTS` with a floor at `MIN_ROUND_POINTS`.
pub const fn potential_points(revealed_count: TileCount) -> Points {
    let decay = POINTS_PER_TILE_REVEALED.saturating_mul(revealed_count as Points);
    let remaining = STARTING_POINTS.saturating_sub(decay);
    if remaining < MIN_ROUND_POINTS {
        MIN_ROUND_POINTS
    } else {
        remaining
    }
}

/// Session-wide score accumulator. Only guesses move it: a correct guess
/// awards the round's current potential, a wrong one costs a flat penalty.
/// Reveals never touch it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    total: Points,
}

impl Scoreboard {
    pub const fn total(self) -> Points {
        self.total
    }

    pub fn award(&mut self, points: Points) {
        self.total = self.total.saturating_add(points);
    }

    /// Subtracts the wrong-guess penalty; the score never goes negative.
    pub fn penalize(&mut self) {
        self.total = self.total.saturating_sub(WRONG_GUESS_PENALTY);
    }
}
