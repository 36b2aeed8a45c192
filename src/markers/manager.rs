//! MarkerManager - keeps native markers in step with declarative ones
//!
//! The manager owns a registry from marker identity to the command channel
//! of that marker's worker. Every operation resolves its registry entry at
//! call time and enqueues a single command, so per-marker ordering follows
//! call order even while the native marker is still being created.

use crate::maps::api::{MapsApiWrapper, MarkerEvent, MarkerEventKind, MarkerProperty, NativeMarker};
use crate::markers::config::{DuplicatePolicy, ManagerConfig};
use crate::markers::error::{MarkerError, MarkerResult};
use crate::markers::marker::{Marker, MarkerId};
use crate::markers::worker::{self, Command, Registry};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;

/// Lifecycle manager for native map markers
///
/// Markers move through `unregistered -> pending -> live -> removed`.
/// Updates issued while a marker is pending queue up and run, in call order,
/// once the native marker exists. Operations on different markers are
/// independent of each other.
///
/// All operations must be called from within a tokio runtime; each
/// registered marker is driven by a spawned task.
///
/// # Example
///
/// ```rust,no_run
/// use marker_manager::maps::api::InMemoryMapsApi;
/// use marker_manager::markers::api::{Marker, MarkerManager};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = Arc::new(InMemoryMapsApi::new("main"));
/// let manager = MarkerManager::new(api.clone());
///
/// let mut marker = Marker::new(34.4, 22.3).with_label("A");
/// manager.add_marker(&marker)?;
///
/// marker.opacity = 0.4;
/// manager.update_opacity(&marker).await?;
///
/// manager.delete_marker(&marker).await?;
/// # Ok(())
/// # }
/// ```
pub struct MarkerManager {
    api: Arc<dyn MapsApiWrapper>,
    config: ManagerConfig,
    registry: Registry,
}

impl MarkerManager {
    pub fn new(api: Arc<dyn MapsApiWrapper>) -> Self {
        Self::with_config(api, ManagerConfig::default())
    }

    pub fn with_config(api: Arc<dyn MapsApiWrapper>, config: ManagerConfig) -> Self {
        Self {
            api,
            config,
            registry: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Register a marker and issue exactly one native creation call
    ///
    /// The option bag is taken from the marker as it is now; no defaults are
    /// applied here. A marker that is already registered is rejected or
    /// replaced according to `ManagerConfig::duplicate_policy`.
    pub fn add_marker(&self, marker: &Marker) -> MarkerResult<()> {
        let id = marker.id();
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| MarkerError::NoRuntime { id })?;

        let (sender, commands) = unbounded_channel();
        {
            let mut registry = self.registry()?;
            if registry.contains_key(&id) {
                match self.config.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        log::debug!("{}: rejecting duplicate add", id);
                        return Err(MarkerError::AlreadyRegistered { id });
                    }
                    DuplicatePolicy::Replace => {
                        log::warn!("{}: replacing existing native marker", id);
                        if let Some(previous) = registry.remove(&id) {
                            // A failed detach hands the previous marker to the new worker
                            let (reply, _) = oneshot::channel();
                            let handle = previous.clone();
                            if previous.send(Command::Detach { reply, handle }).is_err() {
                                log::warn!(
                                    "{}: previous worker already stopped, nothing detached",
                                    id
                                );
                            }
                        }
                    }
                }
            }
            registry.insert(id, sender);
        }

        // The provider is called outside the registry lock
        let creation = self.api.create_marker(marker.options());
        runtime.spawn(worker::run(
            id,
            creation,
            commands,
            Arc::clone(&self.registry),
        ));
        log::debug!("{}: creation issued", id);
        Ok(())
    }

    /// Remove a marker's native counterpart from display and forget it
    ///
    /// The registry entry is removed immediately, so operations issued while
    /// the delete is in flight fail with `UnknownMarker`. Updates enqueued
    /// before this call still run before the native marker is detached.
    ///
    /// If `set_map(None)` fails the marker is registered again before the
    /// error is returned, so the delete can be retried.
    pub fn delete_marker(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        let id = marker.id();
        let (reply, response) = oneshot::channel();
        let sent = self.registry().and_then(|mut registry| {
            let sender = registry
                .remove(&id)
                .ok_or(MarkerError::UnknownMarker { id })?;
            log::debug!("{}: delete enqueued", id);
            sender
                .send(Command::Detach {
                    reply,
                    handle: sender.clone(),
                })
                .map_err(|_| MarkerError::WorkerStopped { id })
        });
        await_reply(id, sent, response)
    }

    pub fn update_position(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.position_property())
    }

    pub fn update_label(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.label_property())
    }

    /// Push the marker's icon, plain reference or descriptor, unchanged
    pub fn update_icon(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.icon_property())
    }

    /// Push the marker's opacity; the value is not range-checked
    pub fn update_opacity(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.opacity_property())
    }

    pub fn update_visible(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.visible_property())
    }

    pub fn update_z_index(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.z_index_property())
    }

    pub fn update_title(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.title_property())
    }

    pub fn update_draggable(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.draggable_property())
    }

    pub fn update_clickable(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.clickable_property())
    }

    pub fn update_animation(&self, marker: &Marker) -> BoxFuture<'static, MarkerResult<()>> {
        self.update(marker.id(), marker.animation_property())
    }

    /// Native handle of a marker, once its creation has completed
    pub fn native_marker(
        &self,
        marker: &Marker,
    ) -> BoxFuture<'static, MarkerResult<Arc<dyn NativeMarker>>> {
        self.submit(marker.id(), |reply| Command::Resolve { reply })
    }

    /// Subscribe to one kind of user event on a marker's native counterpart
    pub fn create_event_stream(
        &self,
        marker: &Marker,
        kind: MarkerEventKind,
    ) -> BoxFuture<'static, MarkerResult<UnboundedReceiver<MarkerEvent>>> {
        let (sink, events) = unbounded_channel();
        let listening = self.submit(marker.id(), |reply| Command::Listen { kind, sink, reply });
        async move {
            listening.await?;
            Ok(events)
        }
        .boxed()
    }

    pub fn contains(&self, marker: &Marker) -> bool {
        self.registry()
            .map(|registry| registry.contains_key(&marker.id()))
            .unwrap_or(false)
    }

    pub fn marker_count(&self) -> usize {
        self.registry().map(|registry| registry.len()).unwrap_or(0)
    }

    /// Delete every registered marker
    ///
    /// Returns how many markers were detached, or the first failure once all
    /// detachments have settled. Markers that could not be detached stay
    /// registered.
    pub async fn clear(&self) -> MarkerResult<usize> {
        let drained: Vec<(MarkerId, UnboundedSender<Command>)> = {
            let mut registry = self.registry()?;
            registry.drain().collect()
        };
        log::debug!("Clearing {} markers", drained.len());

        let pending: Vec<_> = drained
            .into_iter()
            .map(|(id, sender)| {
                let (reply, response) = oneshot::channel();
                let sent = sender
                    .send(Command::Detach {
                        reply,
                        handle: sender.clone(),
                    })
                    .map_err(|_| MarkerError::WorkerStopped { id });
                await_reply(id, sent, response)
            })
            .collect();

        let mut detached = 0;
        let mut first_error = None;
        for result in join_all(pending).await {
            match result {
                Ok(()) => detached += 1,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(detached),
        }
    }

    fn update(&self, id: MarkerId, property: MarkerProperty) -> BoxFuture<'static, MarkerResult<()>> {
        log::debug!("{}: {} enqueued", id, property.setter());
        self.submit(id, |reply| Command::Apply { property, reply })
    }

    fn submit<T: Send + 'static>(
        &self,
        id: MarkerId,
        build: impl FnOnce(oneshot::Sender<MarkerResult<T>>) -> Command,
    ) -> BoxFuture<'static, MarkerResult<T>> {
        let (reply, response) = oneshot::channel();
        let sent = self.registry().and_then(|registry| {
            let sender = registry
                .get(&id)
                .ok_or(MarkerError::UnknownMarker { id })?;
            sender
                .send(build(reply))
                .map_err(|_| MarkerError::WorkerStopped { id })
        });
        await_reply(id, sent, response)
    }

    fn registry(&self) -> MarkerResult<MutexGuard<'_, HashMap<MarkerId, UnboundedSender<Command>>>> {
        self.registry.lock().map_err(|poison_err| MarkerError::Internal {
            message: format!(
                "Marker registry poisoned. This indicates a panic occurred while holding the lock. PoisonError: {:?}",
                poison_err
            ),
        })
    }
}

fn await_reply<T: Send + 'static>(
    id: MarkerId,
    sent: MarkerResult<()>,
    response: oneshot::Receiver<MarkerResult<T>>,
) -> BoxFuture<'static, MarkerResult<T>> {
    async move {
        sent?;
        match response.await {
            Ok(result) => result,
            Err(_) => Err(MarkerError::WorkerStopped { id }),
        }
    }
    .boxed()
}
