//! WebSocket session for layout subscribers.
//!
//! Each management UI opens one of these to receive the grid layout on connect
//! and again after every change. The channel is push-only: mutations go
//! through the REST endpoints.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::debug;
use uuid::Uuid;

use super::messages::{LayoutUpdate, Subscribe, Unsubscribe};
use super::server::GridAllocator;
use crate::server::http_error::ws_error_message;
use crate::server::state::AppState;

pub struct LayoutSession {
    pub session_id: Uuid,
    pub allocator_addr: Addr<GridAllocator>,
}

impl Actor for LayoutSession {
    type Context = ws::WebsocketContext<Self>;

    /// Registers the session with the allocator, which replies with the current layout.
    fn started(&mut self, ctx: &mut Self::Context) {
        debug!("[LayoutSession] Session {} connected", self.session_id);
        self.allocator_addr.do_send(Subscribe {
            session_id: self.session_id,
            addr: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        debug!("[LayoutSession] Session {} disconnected", self.session_id);
        self.allocator_addr.do_send(Unsubscribe {
            session_id: self.session_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for LayoutSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(_)) => {
                let context = self.session_id.to_string();
                ctx.text(ws_error_message(
                    "INVALID_ACTION",
                    "This channel is read-only. Use the REST endpoints to change the layout.",
                    Some(&context),
                ));
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(_) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<LayoutUpdate> for LayoutSession {
    type Result = ();

    fn handle(&mut self, msg: LayoutUpdate, ctx: &mut Self::Context) -> Self::Result {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(_) => ctx.text(ws_error_message("SERIALIZATION_FAILED", "Failed to serialize layout", None)),
        }
    }
}

pub async fn ws_layout(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        LayoutSession {
            session_id: Uuid::new_v4(),
            allocator_addr: data.allocator_addr.clone(),
        },
        &req,
        stream,
    )
}
