use std::collections::HashMap;

use durak_core::game_state::GameState;
use durak_core::player::PlayerId;
use durak_core::protocol::{ClientMessage, ServerMessage};
use log::{debug, info, warn};
use rand::Rng;
use renet::ClientId;
use tokio::sync::mpsc::{channel, Receiver, Sender};

pub const LOBBY_CODE_LEN: usize = 6;
/// Code alphabet without the look-alikes 0/O and 1/I.
pub const LOBBY_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

const LOBBY_CAPACITY: usize = 2;
const CHANNEL_DEPTH: usize = 64;

/// A message on its way out to one connected client.
pub struct Outbound {
    pub client: ClientId,
    pub message: ServerMessage,
}

enum LobbyCommand {
    Join { client: ClientId, name: String },
    Act { client: ClientId, message: ClientMessage },
    Leave { client: ClientId },
}

struct LobbyHandle {
    commands: Sender<LobbyCommand>,
    members: Vec<ClientId>,
}

/// Owns every active lobby: allocates codes, routes intents to the task
/// holding that lobby's engine, and tears lobbies down once the last member
/// is gone. Lives on the transport loop; nothing else holds game state.
pub struct LobbyManager {
    lobbies: HashMap<String, LobbyHandle>,
    memberships: HashMap<ClientId, String>,
    outbound: Sender<Outbound>,
}

impl LobbyManager {
    pub fn new(outbound: Sender<Outbound>) -> Self {
        LobbyManager {
            lobbies: HashMap::new(),
            memberships: HashMap::new(),
            outbound,
        }
    }

    pub async fn handle(&mut self, client: ClientId, message: ClientMessage) {
        match message {
            ClientMessage::CreateLobby { name } => self.create_lobby(client, name).await,
            ClientMessage::JoinLobby { code, name } => self.join_lobby(client, code, name).await,
            ClientMessage::Leave => self.remove_client(client).await,
            act => self.forward(client, act).await,
        }
    }

    pub async fn disconnected(&mut self, client: ClientId) {
        self.remove_client(client).await;
    }

    async fn create_lobby(&mut self, client: ClientId, name: String) {
        let name = name.trim().to_string();
        if name.is_empty() {
            self.lobby_error(client, "a name is required").await;
            return;
        }
        if self.memberships.contains_key(&client) {
            self.lobby_error(client, "already in a lobby").await;
            return;
        }

        let code = self.free_code();
        let (commands, receiver) = channel(CHANNEL_DEPTH);
        tokio::spawn(run_lobby(code.clone(), receiver, self.outbound.clone()));

        self.send(client, ServerMessage::LobbyCreated { code: code.clone() })
            .await;
        let _ = commands.send(LobbyCommand::Join { client, name }).await;
        self.lobbies.insert(
            code.clone(),
            LobbyHandle {
                commands,
                members: vec![client],
            },
        );
        self.memberships.insert(client, code.clone());
        info!("lobby {code} created by client {client}");
    }

    async fn join_lobby(&mut self, client: ClientId, code: String, name: String) {
        let name = name.trim().to_string();
        let code = code.trim().to_uppercase();
        if name.is_empty() {
            self.lobby_error(client, "a name is required").await;
            return;
        }
        if self.memberships.contains_key(&client) {
            self.lobby_error(client, "already in a lobby").await;
            return;
        }
        let full = match self.lobbies.get(&code) {
            None => {
                self.lobby_error(client, "no lobby with that code").await;
                return;
            }
            Some(handle) => handle.members.len() >= LOBBY_CAPACITY,
        };
        if full {
            self.lobby_error(client, "that lobby is already full").await;
            return;
        }

        self.send(client, ServerMessage::LobbyJoined { code: code.clone() })
            .await;
        if let Some(handle) = self.lobbies.get_mut(&code) {
            handle.members.push(client);
            let _ = handle
                .commands
                .send(LobbyCommand::Join { client, name })
                .await;
        }
        self.memberships.insert(client, code.clone());
        info!("client {client} joined lobby {code}");
    }

    async fn forward(&mut self, client: ClientId, message: ClientMessage) {
        let Some(code) = self.memberships.get(&client) else {
            self.lobby_error(client, "not in a game").await;
            return;
        };
        if let Some(handle) = self.lobbies.get(code) {
            let _ = handle
                .commands
                .send(LobbyCommand::Act { client, message })
                .await;
        }
    }

    async fn remove_client(&mut self, client: ClientId) {
        let Some(code) = self.memberships.remove(&client) else {
            return;
        };
        let mut empty = false;
        if let Some(handle) = self.lobbies.get_mut(&code) {
            handle.members.retain(|c| *c != client);
            let _ = handle.commands.send(LobbyCommand::Leave { client }).await;
            empty = handle.members.is_empty();
        }
        if empty {
            self.lobbies.remove(&code);
            info!("lobby {code} closed");
        }
    }

    fn free_code(&self) -> String {
        loop {
            let code = generate_lobby_code();
            if !self.lobbies.contains_key(&code) {
                return code;
            }
        }
    }

    async fn send(&self, client: ClientId, message: ServerMessage) {
        let _ = self.outbound.send(Outbound { client, message }).await;
    }

    async fn lobby_error(&self, client: ClientId, message: &str) {
        warn!("client {client}: {message}");
        self.send(
            client,
            ServerMessage::LobbyError {
                message: message.to_string(),
            },
        )
        .await;
    }
}

pub fn generate_lobby_code() -> String {
    let mut rng = rand::thread_rng();
    (0..LOBBY_CODE_LEN)
        .map(|_| LOBBY_CODE_ALPHABET[rng.gen_range(0..LOBBY_CODE_ALPHABET.len())] as char)
        .collect()
}

/// One task per lobby: the single owner of that game's engine. Operations
/// arrive over the queue and are applied strictly in order, so no engine
/// ever sees concurrent moves; separate lobbies run in parallel.
async fn run_lobby(code: String, mut commands: Receiver<LobbyCommand>, outbound: Sender<Outbound>) {
    let mut game = GameState::new();
    let mut members: Vec<ClientId> = vec![];

    while let Some(command) = commands.recv().await {
        match command {
            LobbyCommand::Join { client, name } => match game.join(player_id(client), &name) {
                Ok(()) => {
                    members.push(client);
                    broadcast_state(&game, &members, &outbound).await;
                }
                Err(reason) => {
                    debug!("lobby {code}: join rejected for {client}: {reason}");
                    send(&outbound, client, ServerMessage::Rejected { reason }).await;
                }
            },
            LobbyCommand::Act { client, message } => {
                let id = player_id(client);
                let result = match message {
                    ClientMessage::Attack { card_index } => game.attack(id, card_index),
                    ClientMessage::Defend {
                        card_index,
                        target_slot_index,
                    } => game.defend(id, card_index, target_slot_index),
                    ClientMessage::PickUp => game.pick_up(id),
                    // lobby management never reaches the game task
                    _ => continue,
                };
                match result {
                    Ok(()) => {
                        broadcast_state(&game, &members, &outbound).await;
                        if game.is_finished() {
                            let winner = game.winner();
                            for member in &members {
                                send(&outbound, *member, ServerMessage::Finished { winner }).await;
                            }
                        }
                    }
                    Err(reason) => {
                        debug!("lobby {code}: move rejected for {client}: {reason}");
                        send(&outbound, client, ServerMessage::Rejected { reason }).await;
                    }
                }
            }
            LobbyCommand::Leave { client } => {
                let _ = game.leave(player_id(client));
                members.retain(|c| *c != client);
                if members.is_empty() {
                    break;
                }
                broadcast_state(&game, &members, &outbound).await;
                for member in &members {
                    send(&outbound, *member, ServerMessage::PlayerLeft).await;
                }
            }
        }
    }
    debug!("lobby {code} task done");
}

fn player_id(client: ClientId) -> PlayerId {
    client.raw()
}

async fn broadcast_state(game: &GameState, members: &[ClientId], outbound: &Sender<Outbound>) {
    for member in members {
        let view = game.project(player_id(*member));
        send(outbound, *member, ServerMessage::State(view)).await;
    }
}

async fn send(outbound: &Sender<Outbound>, client: ClientId, message: ServerMessage) {
    let _ = outbound.send(Outbound { client, message }).await;
}

#[cfg(test)]
mod tests {
    use durak_core::protocol::{ClientMessage, ServerMessage};
    use durak_core::rejection::Rejection;
    use renet::ClientId;
    use tokio::sync::mpsc::channel;

    use crate::lobby::{
        generate_lobby_code, run_lobby, LobbyCommand, LOBBY_CODE_ALPHABET, LOBBY_CODE_LEN,
    };

    #[test]
    fn codes_use_the_readable_alphabet() {
        for _ in 0..100 {
            let code = generate_lobby_code();
            assert_eq!(code.len(), LOBBY_CODE_LEN);
            assert!(code.bytes().all(|b| LOBBY_CODE_ALPHABET.contains(&b)));
        }
    }

    #[tokio::test]
    async fn lobby_task_drives_the_engine_and_broadcasts() {
        let (outbound_tx, mut outbound_rx) = channel(64);
        let (commands_tx, commands_rx) = channel(64);
        tokio::spawn(run_lobby("TEST42".to_string(), commands_rx, outbound_tx));

        let alice = ClientId::from_raw(1);
        let bob = ClientId::from_raw(2);

        commands_tx
            .send(LobbyCommand::Join {
                client: alice,
                name: "Alice".to_string(),
            })
            .await
            .unwrap();
        let first = outbound_rx.recv().await.unwrap();
        assert_eq!(first.client, alice);
        assert!(matches!(first.message, ServerMessage::State(_)));

        commands_tx
            .send(LobbyCommand::Join {
                client: bob,
                name: "Bob".to_string(),
            })
            .await
            .unwrap();
        for expected in [alice, bob] {
            let out = outbound_rx.recv().await.unwrap();
            assert_eq!(out.client, expected);
            match out.message {
                ServerMessage::State(view) => assert_eq!(view.current_turn, Some(1)),
                other => panic!("unexpected message {other:?}"),
            }
        }

        // the opening lead is always legal, then leading again is not
        commands_tx
            .send(LobbyCommand::Act {
                client: alice,
                message: ClientMessage::Attack { card_index: 0 },
            })
            .await
            .unwrap();
        for expected in [alice, bob] {
            let out = outbound_rx.recv().await.unwrap();
            assert_eq!(out.client, expected);
            match out.message {
                ServerMessage::State(view) => {
                    assert_eq!(view.table.len(), 1);
                    assert_eq!(view.current_turn, Some(2));
                }
                other => panic!("unexpected message {other:?}"),
            }
        }

        commands_tx
            .send(LobbyCommand::Act {
                client: alice,
                message: ClientMessage::Attack { card_index: 0 },
            })
            .await
            .unwrap();
        let rejected = outbound_rx.recv().await.unwrap();
        assert_eq!(rejected.client, alice);
        assert!(matches!(
            rejected.message,
            ServerMessage::Rejected {
                reason: Rejection::NotYourTurn
            }
        ));
    }
}
