//! WebSocket session for one player.
//!
//! Gets a player id from the arena server on start, forwards client actions
//! straight into the arena's input buffer and relays server messages back.

use std::borrow::Cow;
use std::sync::Arc;

use actix::prelude::*;
use actix_web::{Error, HttpRequest, HttpResponse, web};
use actix_web_actors::ws;
use log::{error, warn};

use super::arena_server::{ArenaServer, Connect, Kick, Leave};
use super::messages::{ClientWsMessage, ServerWsMessage, join_action};
use super::ws_error::ws_error_message;
use crate::game::arena::Arena;
use crate::game::types::PlayerId;

pub struct ArenaSession {
    /// Set once the arena server accepted the connection.
    pub player_id: Option<PlayerId>,
    /// Name and team to join with as soon as the session is registered.
    pub auto_join: Option<(String, String)>,
    pub arena: Arc<Arena>,
    pub arena_server: Addr<ArenaServer>,
}

impl Actor for ArenaSession {
    type Context = ws::WebsocketContext<Self>;

    /// Register with the arena server; the session is useless without an id.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.arena_server
            .send(Connect {
                addr: ctx.address(),
            })
            .into_actor(self)
            .then(|res, act, ctx| {
                match res {
                    Ok(player_id) => {
                        act.player_id = Some(player_id);
                        act.send_json(
                            ctx,
                            &ServerWsMessage::Welcome {
                                player_id,
                                arena_id: act.arena.id,
                            },
                        );
                        if let Some((name, team)) = act.auto_join.take() {
                            act.arena.store_input(player_id, join_action(&name, &team));
                        }
                    }
                    Err(e) => {
                        error!("[ArenaSession] Arena server unreachable: {}", e);
                        ctx.stop();
                    }
                }
                fut::ready(())
            })
            .wait(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(player_id) = self.player_id {
            self.arena_server.do_send(Leave { player_id });
        }
    }
}

impl ArenaSession {
    fn send_json(&self, ctx: &mut ws::WebsocketContext<Self>, msg: &ServerWsMessage) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                error!("[ArenaSession] Failed to serialize ServerWsMessage: {}", e);
                ctx.text(ws_error_message("INTERNAL", "Internal server error", None));
            }
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ArenaSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                let Some(player_id) = self.player_id else {
                    ctx.text(ws_error_message("NOT_READY", "Session is not registered yet", None));
                    return;
                };
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(msg) => {
                        if let Some(action) = msg.into_action() {
                            self.arena.store_input(player_id, action);
                        }
                    }
                    Err(e) => {
                        warn!("[ArenaSession] Invalid message from player {}: {}", player_id, e);
                        ctx.text(ws_error_message(
                            "INVALID_MESSAGE",
                            "Invalid client message",
                            Some(&player_id.to_string()),
                        ));
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                warn!("[ArenaSession] Protocol error: {}", e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for ArenaSession {
    type Result = ();

    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        self.send_json(ctx, &msg);
    }
}

impl Handler<Kick> for ArenaSession {
    type Result = ();

    fn handle(&mut self, msg: Kick, ctx: &mut Self::Context) {
        self.send_json(ctx, &ServerWsMessage::Disconnected { reason: msg.reason });
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Normal,
            description: Some(format!("{:?}", msg.reason)),
        }));
        ctx.stop();
    }
}

/// WebSocket endpoint for the arena.
///
/// Optional query parameters: `name` and `team`. When `name` is given the
/// player joins on connect; otherwise the client sends a `Join` message itself.
pub async fn ws_arena(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    let mut name = String::new();
    let mut team = String::new();

    for kv in req.query_string().split('&') {
        let mut split = kv.splitn(2, '=');
        match (split.next(), split.next()) {
            (Some("name"), Some(value)) => name = decode(value),
            (Some("team"), Some(value)) => team = decode(value),
            _ => {}
        }
    }

    let auto_join = (!name.trim().is_empty()).then_some((name, team));

    ws::start(
        ArenaSession {
            player_id: None,
            auto_join,
            arena: data.arena.clone(),
            arena_server: data.arena_server.clone(),
        },
        &req,
        stream,
    )
}

fn decode(value: &str) -> String {
    urlencoding::decode(value)
        .unwrap_or_else(|_| Cow::Borrowed(""))
        .into_owned()
}
