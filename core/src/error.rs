use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Catalog has no images")]
    EmptyCatalog,
    #[error("Round already ended, no new guesses or reveals are accepted")]
    RoundOver,
    #[error("No round in progress")]
    NoRound,
}

pub type Result<T> = core::result::Result<T, GameError>;
