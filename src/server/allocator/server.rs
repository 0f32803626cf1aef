//! Grid allocator actor.
//!
//! Owns the grid layout and handles every placement, relocation, growth and
//! query as a message. The actor processes one message at a time, so each
//! check-then-write (including bounds growth) is atomic and every read sees a
//! consistent layout. Subscribed WebSocket sessions receive the new layout
//! after each successful mutation.

use actix::prelude::*;
use actix::MessageResult;
use std::collections::HashMap;
use uuid::Uuid;
use log::{debug, warn};

use crate::grid::{GridBounds, GridError, GridLayout, GridSpace};
use super::messages::{
    EnsureCapacity, GetFrontier, GetLayout, GetSpace, LayoutUpdate, PlaceSpace, RelocateSpace,
    RemoveSpace, Subscribe, Unsubscribe, UpdateSpaceDetails,
};

pub struct GridAllocator {
    layout: GridLayout,
    /// Sessions that receive a LayoutUpdate after every change.
    subscribers: HashMap<Uuid, Recipient<LayoutUpdate>>,
}

impl Actor for GridAllocator {
    type Context = Context<Self>;
}

impl GridAllocator {
    pub fn new() -> Self {
        Self::with_layout(GridLayout::new())
    }

    pub fn with_layout(layout: GridLayout) -> Self {
        Self {
            layout,
            subscribers: HashMap::new(),
        }
    }

    /// Push the current layout to every subscriber.
    fn broadcast(&self) {
        debug!(
            "[GridAllocator] Broadcast layout: spaces={} bounds={:?} subscribers={}",
            self.layout.len(),
            self.layout.bounds(),
            self.subscribers.len()
        );
        let update = LayoutUpdate::LayoutUpdate(self.layout.snapshot());
        for addr in self.subscribers.values() {
            addr.do_send(update.clone());
        }
    }

    /// Broadcast on success, log on failure, and hand the result back.
    fn settle<T>(&self, op: &str, result: Result<T, GridError>) -> Result<T, GridError> {
        match &result {
            Ok(_) => self.broadcast(),
            Err(e) => warn!("[GridAllocator] {} rejected: {}", op, e),
        }
        result
    }
}

impl Default for GridAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler<PlaceSpace> for GridAllocator {
    type Result = Result<GridSpace, GridError>;

    fn handle(&mut self, msg: PlaceSpace, _: &mut Context<Self>) -> Self::Result {
        let result = self.layout.place(msg.position, msg.payload);
        self.settle("Place", result)
    }
}

impl Handler<RelocateSpace> for GridAllocator {
    type Result = Result<GridSpace, GridError>;

    fn handle(&mut self, msg: RelocateSpace, _: &mut Context<Self>) -> Self::Result {
        let before = self.layout.get(&msg.id).map(|s| s.position).ok();
        let result = self.layout.relocate(&msg.id, msg.position);
        match result {
            // Self-move: nothing changed, nobody to notify.
            Ok(space) if before == Some(space.position) => Ok(space),
            other => self.settle("Relocate", other),
        }
    }
}

impl Handler<EnsureCapacity> for GridAllocator {
    type Result = Result<GridBounds, GridError>;

    fn handle(&mut self, msg: EnsureCapacity, _: &mut Context<Self>) -> Self::Result {
        let before = self.layout.bounds();
        match self.layout.ensure_capacity(msg.position) {
            Ok(bounds) if bounds == before => Ok(bounds),
            other => self.settle("EnsureCapacity", other),
        }
    }
}

impl Handler<UpdateSpaceDetails> for GridAllocator {
    type Result = Result<GridSpace, GridError>;

    fn handle(&mut self, msg: UpdateSpaceDetails, _: &mut Context<Self>) -> Self::Result {
        let result = self.layout.update_details(&msg.id, msg.payload);
        self.settle("UpdateDetails", result)
    }
}

impl Handler<RemoveSpace> for GridAllocator {
    type Result = Result<GridSpace, GridError>;

    fn handle(&mut self, msg: RemoveSpace, _: &mut Context<Self>) -> Self::Result {
        let result = self.layout.remove(&msg.id);
        self.settle("Remove", result)
    }
}

impl Handler<GetSpace> for GridAllocator {
    type Result = Result<GridSpace, GridError>;

    fn handle(&mut self, msg: GetSpace, _: &mut Context<Self>) -> Self::Result {
        self.layout.get(&msg.id).cloned()
    }
}

impl Handler<GetLayout> for GridAllocator {
    type Result = MessageResult<GetLayout>;

    fn handle(&mut self, _: GetLayout, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.layout.snapshot())
    }
}

impl Handler<GetFrontier> for GridAllocator {
    type Result = MessageResult<GetFrontier>;

    fn handle(&mut self, _: GetFrontier, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.layout.frontier())
    }
}

impl Handler<Subscribe> for GridAllocator {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _: &mut Context<Self>) -> Self::Result {
        debug!("[GridAllocator] Session {} subscribed", msg.session_id);
        msg.addr.do_send(LayoutUpdate::LayoutUpdate(self.layout.snapshot()));
        self.subscribers.insert(msg.session_id, msg.addr);
    }
}

impl Handler<Unsubscribe> for GridAllocator {
    type Result = ();

    fn handle(&mut self, msg: Unsubscribe, _: &mut Context<Self>) -> Self::Result {
        if self.subscribers.remove(&msg.session_id).is_some() {
            debug!("[GridAllocator] Session {} unsubscribed", msg.session_id);
        }
    }
}
