use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Plans the order tiles disappear in: a fresh uniform permutation per round.
pub fn plan_order<R: Rng + ?Sized>(tile_count: TileCount, rng: &mut R) -> Vec<TileIndex> {
    let mut order: Vec<TileIndex> = (0..tile_count).collect();
    order.shuffle(rng);
    order
}

/// The planned reveal permutation plus the cursor of how far it has run.
/// Every tile is revealed exactly once per round, in order, no repeats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealOrder {
    order: Vec<TileIndex>,
    revealed_count: TileCount,
}

impl RevealOrder {
    pub fn new<R: Rng + ?Sized>(tile_count: TileCount, rng: &mut R) -> Self {
        Self {
            order: plan_order(tile_count, rng),
            revealed_count: 0,
        }
    }

    pub fn revealed_count(&self) -> TileCount {
        self.revealed_count
    }

    pub fn tile_count(&self) -> TileCount {
        self.order.len() as TileCount
    }

    pub fn is_complete(&self) -> bool {
        usize::from(self.revealed_count) >= self.order.len()
    }

    /// Reveals the next planned tile, if any remain.
    pub fn reveal_next(&mut self) -> Option<TileIndex> {
        let tile = *self.order.get(usize::from(self.revealed_count))?;
        self.revealed_count += 1;
        Some(tile)
    }

    /// A tile is revealed when it sits in the first `revealed_count` entries
    /// of the planned order.
    pub fn is_revealed(&self, tile: TileIndex) -> bool {
        self.order[..usize::from(self.revealed_count)].contains(&tile)
    }

    pub fn order(&self) -> &[TileIndex] {
        &self.order
    }
}
