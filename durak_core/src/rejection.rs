use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Reason code for a syntactically valid but currently-illegal operation.
/// Every engine entry point is total: it either applies or returns one of
/// these with the state untouched. There are no fatal errors.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize, Display)]
pub enum Rejection {
    GameFull,
    GameNotInProgress,
    PlayerNotFound,
    NotYourTurn,
    WrongRole,
    InvalidCardIndex,
    InvalidTargetIndex,
    RankMismatch,
    CannotBeat,
    AlreadyDefended,
    TableFull,
}
