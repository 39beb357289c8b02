use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouletteError {
    #[error("participant `{0}` was already added")]
    DuplicateParticipant(String),

    #[error("participant `{0}` was already drawn into a group, reset before removing")]
    AlreadyDrawn(String),

    #[error("the wheel is still spinning")]
    AlreadySpinning,

    #[error("at least 2 remaining participants are needed to spin, have {0}")]
    InsufficientParticipants(usize),
}
