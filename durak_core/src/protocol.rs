use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::rejection::Rejection;
use crate::state_view::StateView;

/// Intents a participant may send over the wire. The session layer maps
/// these onto engine operations; the engine itself never sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateLobby { name: String },
    JoinLobby { code: String, name: String },
    Attack { card_index: usize },
    Defend { card_index: usize, target_slot_index: usize },
    PickUp,
    Leave,
}

/// Everything the server pushes back. A `State` goes to both participants
/// after every successful operation; a `Rejected` only to the initiator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    LobbyCreated { code: String },
    LobbyJoined { code: String },
    LobbyError { message: String },
    State(StateView),
    Rejected { reason: Rejection },
    Finished { winner: Option<PlayerId> },
    PlayerLeft,
}
