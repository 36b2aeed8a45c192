//! Per-marker command worker
//!
//! Every registered marker gets one task that first awaits the native
//! creation future and then drains the marker's command channel in order.
//! Commands sent while creation is still pending simply wait in the channel,
//! which is what gives one marker's native calls their call-order guarantee.
//!
//! A worker only stops once its native marker is off the map. When detaching
//! fails, the worker puts its channel back into the registry. If the slot
//! was taken by a newer registration of the same marker in the meantime, the
//! newer worker adopts it and detaches it before itself on the next delete.

use crate::maps::api::{ApiResult, MarkerEvent, MarkerEventKind, MarkerProperty, NativeMarker};
use crate::markers::error::{MarkerError, MarkerResult};
use crate::markers::marker::MarkerId;
use futures::future::BoxFuture;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;

/// Registered markers and the command channels of their workers
pub(crate) type Registry = Arc<Mutex<HashMap<MarkerId, UnboundedSender<Command>>>>;

pub(crate) enum Command {
    /// Push one property to its native setter
    Apply {
        property: MarkerProperty,
        reply: oneshot::Sender<MarkerResult<()>>,
    },
    /// Hand out the live native handle
    Resolve {
        reply: oneshot::Sender<MarkerResult<Arc<dyn NativeMarker>>>,
    },
    /// Register an event listener on the native marker
    Listen {
        kind: MarkerEventKind,
        sink: UnboundedSender<MarkerEvent>,
        reply: oneshot::Sender<MarkerResult<()>>,
    },
    /// Remove the native marker from display
    ///
    /// `handle` is the channel the registry held for this worker; it goes
    /// back into the registry if the detach fails.
    Detach {
        reply: oneshot::Sender<MarkerResult<()>>,
        handle: UnboundedSender<Command>,
    },
    /// Take charge of an earlier registration whose detach failed
    Adopt {
        predecessor: UnboundedSender<Command>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Apply { property, .. } => property.setter(),
            Command::Resolve { .. } => "resolve",
            Command::Listen { .. } => "add_listener",
            Command::Detach { .. } => "set_map",
            Command::Adopt { .. } => "adopt",
        }
    }

    // A dropped reply receiver means the caller stopped waiting; nothing to do
    fn fail(self, error: MarkerError) {
        match self {
            Command::Apply { reply, .. }
            | Command::Listen { reply, .. }
            | Command::Detach { reply, .. } => {
                let _ = reply.send(Err(error));
            }
            Command::Resolve { reply } => {
                let _ = reply.send(Err(error));
            }
            Command::Adopt { .. } => {}
        }
    }
}

/// Drive one marker from creation to detachment
pub(crate) async fn run(
    id: MarkerId,
    creation: BoxFuture<'static, ApiResult<Arc<dyn NativeMarker>>>,
    mut commands: UnboundedReceiver<Command>,
    registry: Registry,
) {
    let mut predecessors = Vec::new();

    let native = match creation.await {
        Ok(native) => native,
        Err(source) => {
            log::warn!("{}: native marker creation failed: {}", id, source);
            let error = MarkerError::CreationFailed { id, source };
            while let Some(command) = commands.recv().await {
                match command {
                    Command::Adopt { predecessor } => predecessors.push(predecessor),
                    Command::Detach { reply, .. } => {
                        // Nothing of ours is displayed, only adopted markers are
                        let result = detach_predecessors(id, &mut predecessors)
                            .await
                            .and(Err(error.clone()));
                        let _ = reply.send(result);
                        break;
                    }
                    command => {
                        log::debug!("{}: rejecting {} after failed creation", id, command.name());
                        command.fail(error.clone());
                    }
                }
            }
            return;
        }
    };
    log::debug!("{}: native marker live", id);

    while let Some(command) = commands.recv().await {
        let call = command.name();
        match command {
            Command::Apply { property, reply } => {
                log::trace!("{}: {}({:?})", id, call, property);
                let result = native
                    .apply(property)
                    .await
                    .map_err(|source| native_failure(id, call, source));
                let _ = reply.send(result);
            }
            Command::Resolve { reply } => {
                let _ = reply.send(Ok(Arc::clone(&native)));
            }
            Command::Listen { kind, sink, reply } => {
                log::trace!("{}: listening for {}", id, kind);
                let result = native
                    .add_listener(kind, sink)
                    .map_err(|source| native_failure(id, call, source));
                let _ = reply.send(result);
            }
            Command::Adopt { predecessor } => {
                log::debug!("{}: adopted an earlier registration still on the map", id);
                predecessors.push(predecessor);
            }
            Command::Detach { reply, handle } => {
                let earlier = detach_predecessors(id, &mut predecessors).await;
                match native.set_map(None).await {
                    Ok(()) => {
                        log::debug!("{}: detached from map", id);
                        let _ = reply.send(earlier);
                        break;
                    }
                    Err(source) => {
                        let error = native_failure(id, call, source);
                        restore(id, handle, &registry);
                        let _ = reply.send(Err(error));
                    }
                }
            }
        }
    }
    log::trace!("{}: worker finished", id);
}

// Detach adopted registrations oldest first; each restores itself on failure
async fn detach_predecessors(
    id: MarkerId,
    predecessors: &mut Vec<UnboundedSender<Command>>,
) -> MarkerResult<()> {
    let mut first_error = None;
    for predecessor in predecessors.drain(..) {
        let (reply, response) = oneshot::channel();
        let handle = predecessor.clone();
        let result = match predecessor.send(Command::Detach { reply, handle }) {
            Ok(()) => response
                .await
                .unwrap_or(Err(MarkerError::WorkerStopped { id })),
            Err(_) => Err(MarkerError::WorkerStopped { id }),
        };
        if let Err(e) = result {
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

// Keep a marker that is still on the map reachable through the registry
fn restore(id: MarkerId, handle: UnboundedSender<Command>, registry: &Registry) {
    let mut registry = match registry.lock() {
        Ok(registry) => registry,
        Err(_) => {
            log::warn!("{}: registry poisoned, native marker left on the map", id);
            return;
        }
    };
    match registry.entry(id) {
        Entry::Vacant(slot) => {
            log::debug!("{}: detach failed, marker stays registered", id);
            slot.insert(handle);
        }
        Entry::Occupied(slot) => {
            log::warn!("{}: detach failed after the marker was re-added", id);
            if slot.get().send(Command::Adopt { predecessor: handle }).is_err() {
                log::warn!("{}: newer registration stopped, native marker left on the map", id);
            }
        }
    }
}

fn native_failure(
    id: MarkerId,
    call: &'static str,
    source: crate::maps::api::ApiError,
) -> MarkerError {
    log::warn!("{}: {} failed: {}", id, call, source);
    MarkerError::NativeCallFailed { id, call, source }
}
