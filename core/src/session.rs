use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Round lifecycle: `Setup -> Active -> Resolved -> (next) Setup`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    Setup,
    Active,
    Resolved,
}

impl RoundPhase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Setup
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    /// Covers both a wrong guess and the full-reveal timeout.
    Lost,
}

impl RoundOutcome {
    pub const fn won(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Outcome of one reveal tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Paused, resolved, or no round: the tick is dropped, never banked.
    Skipped,
    Revealed(TileIndex),
    /// The last tile disappeared and the round resolved as lost.
    FullyRevealed,
}

impl TickOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use TickOutcome::*;
        match self {
            Skipped => false,
            Revealed(_) => true,
            FullyRevealed => true,
        }
    }
}

/// Outcome of submitting a guess.
#[derive(Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    /// Round already resolved or no image on display.
    Ignored,
    Correct { awarded: Points },
    Incorrect { correct: Label },
}

impl GuessOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// HUD payload pushed to the presentation layer after every state change.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HudStats {
    pub score: Points,
    pub round_index: u32,
    pub revealed_count: TileCount,
    pub potential_points: Points,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Round {
    reveal: RevealOrder,
    potential: Points,
    phase: RoundPhase,
    outcome: Option<RoundOutcome>,
}

/// Owns all round and score state for one play session; no ambient globals.
/// Ticks and guesses arrive from a single-threaded event loop, so the only
/// race to guard is re-entrant resolution within one synchronous turn.
#[derive(Clone, Debug)]
pub struct GameSession {
    catalog: Catalog,
    score: Scoreboard,
    round_index: u32,
    round: Option<Round>,
    paused: bool,
    rng: SmallRng,
}

impl GameSession {
    /// Builds a session over `catalog`, shuffling it once with `seed`.
    pub fn new(mut catalog: Catalog, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        catalog.shuffle(&mut rng);
        Self {
            catalog,
            score: Scoreboard::default(),
            round_index: 0,
            round: None,
            paused: false,
            rng,
        }
    }

    /// Sets up and activates the round at the current index: picks the image,
    /// resets the reveal cursor and potential, plans a fresh reveal order.
    /// An empty catalog aborts quietly; the caller just gets no round.
    pub fn start_round(&mut self) -> Result<()> {
        if self.catalog.is_empty() {
            log::warn!("catalog is empty, skipping round setup");
            self.round = None;
            return Err(GameError::EmptyCatalog);
        }

        self.round = Some(Round {
            reveal: RevealOrder::new(TILES, &mut self.rng),
            potential: potential_points(0),
            phase: RoundPhase::Active,
            outcome: None,
        });
        log::debug!("round {} started", self.round_index);
        Ok(())
    }

    /// Advances one reveal tick. Gated, not queued: a tick that lands while
    /// paused or after resolution is lost, there is no catch-up later.
    pub fn tick(&mut self) -> TickOutcome {
        use TickOutcome::*;

        if self.paused || self.check_unresolved().is_err() {
            return Skipped;
        }
        let Some(round) = self.round.as_mut() else {
            return Skipped;
        };

        match round.reveal.reveal_next() {
            Some(tile) => {
                round.potential = potential_points(round.reveal.revealed_count());
                if round.reveal.is_complete() {
                    self.resolve(RoundOutcome::Lost);
                    FullyRevealed
                } else {
                    Revealed(tile)
                }
            }
            None => {
                self.resolve(RoundOutcome::Lost);
                FullyRevealed
            }
        }
    }

    /// Resolves the round against the current image. A guess never needs the
    /// tiles to run out: right or wrong, it ends the round immediately.
    pub fn submit_guess(&mut self, guess: &Label) -> GuessOutcome {
        use GuessOutcome::*;

        if self.check_unresolved().is_err() {
            return Ignored;
        }
        let Some(round) = self.round.as_ref() else {
            return Ignored;
        };
        let potential = round.potential;
        let Some(image) = self.catalog.get(self.round_index) else {
            return Ignored;
        };
        let correct = image.member.clone();

        if *guess == correct {
            self.score.award(potential);
            self.resolve(RoundOutcome::Won);
            Correct { awarded: potential }
        } else {
            self.score.penalize();
            self.resolve(RoundOutcome::Lost);
            Incorrect { correct }
        }
    }

    /// Moves on to the next round. The caller schedules this once, after the
    /// round-end delay; it is harmless when the catalog has gone empty.
    pub fn advance_round(&mut self) -> Result<()> {
        self.round_index += 1;
        self.start_round()
    }

    /// Gates reveal ticks without touching the external timer.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::debug!("pause gate: {}", self.paused);
        self.paused
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.as_ref().map_or(RoundPhase::Setup, |r| r.phase)
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.round.as_ref().and_then(|r| r.outcome)
    }

    pub fn score(&self) -> Points {
        self.score.total()
    }

    pub const fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn revealed_count(&self) -> TileCount {
        self.round.as_ref().map_or(0, |r| r.reveal.revealed_count())
    }

    pub fn potential(&self) -> Points {
        self.round.as_ref().map_or(potential_points(0), |r| r.potential)
    }

    /// The image under the grid; referenced from the catalog, never copied.
    pub fn current_image(&self) -> Option<&ImageRecord> {
        self.round.as_ref()?;
        self.catalog.get(self.round_index)
    }

    /// Once the round resolves, every tile reads as revealed so the full
    /// image shows during the end-of-round delay.
    pub fn is_tile_revealed(&self, tile: TileIndex) -> bool {
        match self.round.as_ref() {
            Some(round) => round.phase.is_resolved() || round.reveal.is_revealed(tile),
            None => false,
        }
    }

    pub fn roster(&self) -> &[Label] {
        self.catalog.roster()
    }

    pub fn hud(&self) -> HudStats {
        HudStats {
            score: self.score.total(),
            round_index: self.round_index,
            revealed_count: self.revealed_count(),
            potential_points: self.potential(),
        }
    }

    /// Re-entrancy guard in one place: `NoRound` before setup, `RoundOver`
    /// once resolved. Ticks and guesses turn either into a quiet no-op.
    fn check_unresolved(&self) -> Result<()> {
        match self.round.as_ref() {
            None => Err(GameError::NoRound),
            Some(round) if round.phase.is_resolved() => Err(GameError::RoundOver),
            Some(_) => Ok(()),
        }
    }

    /// First resolution wins; later calls in the same round are no-ops, which
    /// guards the guess/full-reveal race within one synchronous turn.
    fn resolve(&mut self, outcome: RoundOutcome) -> bool {
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if round.phase.is_resolved() {
            return false;
        }

        round.phase = RoundPhase::Resolved;
        round.outcome = Some(outcome);
        log::debug!("round {} resolved: {:?}", self.round_index, outcome);
        true
    }
}
