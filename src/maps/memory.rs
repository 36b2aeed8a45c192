//! In-memory mapping provider
//!
//! Records every call it receives in a single ordered journal and keeps the
//! resulting native marker state, so callers can observe exactly what a real
//! provider would have been asked to do. Creation can be held pending, and
//! creations or individual setters can be made to fail.

use crate::maps::error::{ApiError, ApiResult};
use crate::maps::traits::{MapsApiWrapper, NativeMarker};
use crate::maps::types::{
    Animation, LatLng, MapHandle, MarkerEvent, MarkerEventKind, MarkerIcon, MarkerOptions,
    MarkerProperty,
};
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;

/// One call received by the in-memory provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RecordedCall {
    CreateMarker {
        handle: u64,
        options: MarkerOptions,
    },
    SetProperty {
        handle: u64,
        property: MarkerProperty,
    },
    SetMap {
        handle: u64,
        map: Option<MapHandle>,
    },
    AddListener {
        handle: u64,
        kind: MarkerEventKind,
    },
}

impl RecordedCall {
    /// Native handle the call was made for
    pub fn handle(&self) -> u64 {
        match self {
            RecordedCall::CreateMarker { handle, .. }
            | RecordedCall::SetProperty { handle, .. }
            | RecordedCall::SetMap { handle, .. }
            | RecordedCall::AddListener { handle, .. } => *handle,
        }
    }

    /// Provider method name, e.g. `create_marker` or `set_opacity`
    pub fn method(&self) -> &'static str {
        match self {
            RecordedCall::CreateMarker { .. } => "create_marker",
            RecordedCall::SetProperty { property, .. } => property.setter(),
            RecordedCall::SetMap { .. } => "set_map",
            RecordedCall::AddListener { .. } => "add_listener",
        }
    }
}

/// Current state of an in-memory native marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeState {
    pub options: MarkerOptions,
    pub map: Option<MapHandle>,
}

struct Shared {
    journal: Mutex<Vec<RecordedCall>>,
    markers: Mutex<Vec<Arc<InMemoryMarker>>>,
    failing_calls: Mutex<HashSet<String>>,
    creation_failure: Mutex<Option<String>>,
    gate: watch::Sender<bool>,
    next_handle: AtomicU64,
}

impl Shared {
    fn record(&self, call: RecordedCall) {
        log::trace!("InMemoryMapsApi: {} on handle {}", call.method(), call.handle());
        guard(&self.journal).push(call);
    }

    fn check_failure(&self, method: &str) -> ApiResult<()> {
        if guard(&self.failing_calls).contains(method) {
            return Err(ApiError::CallFailed {
                call: method.to_string(),
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

// A panic while recording never leaves the journal half-written
fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Recording mapping provider backed by process memory
pub struct InMemoryMapsApi {
    map: MapHandle,
    shared: Arc<Shared>,
}

impl InMemoryMapsApi {
    /// Create a provider whose markers attach to the map named `map_id`
    pub fn new(map_id: impl Into<String>) -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            map: MapHandle::new(map_id),
            shared: Arc::new(Shared {
                journal: Mutex::new(Vec::new()),
                markers: Mutex::new(Vec::new()),
                failing_calls: Mutex::new(HashSet::new()),
                creation_failure: Mutex::new(None),
                gate,
                next_handle: AtomicU64::new(1),
            }),
        }
    }

    pub fn map(&self) -> &MapHandle {
        &self.map
    }

    /// Every call received so far, in arrival order
    pub fn calls(&self) -> Vec<RecordedCall> {
        guard(&self.shared.journal).clone()
    }

    /// Calls received for one native handle, in arrival order
    pub fn calls_for(&self, handle: u64) -> Vec<RecordedCall> {
        guard(&self.shared.journal)
            .iter()
            .filter(|call| call.handle() == handle)
            .cloned()
            .collect()
    }

    /// Option bags of every creation call, in arrival order
    pub fn created_options(&self) -> Vec<MarkerOptions> {
        guard(&self.shared.journal)
            .iter()
            .filter_map(|call| match call {
                RecordedCall::CreateMarker { options, .. } => Some(options.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn creation_count(&self) -> usize {
        self.created_options().len()
    }

    pub fn clear_journal(&self) {
        guard(&self.shared.journal).clear();
    }

    /// Native markers created so far, including ones still pending
    pub fn markers(&self) -> Vec<Arc<InMemoryMarker>> {
        guard(&self.shared.markers).clone()
    }

    pub fn marker(&self, handle: u64) -> Option<Arc<InMemoryMarker>> {
        guard(&self.shared.markers)
            .iter()
            .find(|marker| marker.handle == handle)
            .cloned()
    }

    /// Keep every creation issued from now on pending until released
    pub fn hold_creations(&self) {
        self.shared.gate.send_replace(false);
    }

    /// Let held and future creations resolve
    pub fn release_creations(&self) {
        self.shared.gate.send_replace(true);
    }

    /// Make every creation issued from now on reject with `message`
    pub fn fail_creations(&self, message: impl Into<String>) {
        *guard(&self.shared.creation_failure) = Some(message.into());
    }

    /// Make calls to the named native method fail, e.g. `set_icon`
    pub fn fail_calls(&self, method: impl Into<String>) {
        guard(&self.shared.failing_calls).insert(method.into());
    }

    /// Remove every injected creation and call failure
    pub fn clear_failures(&self) {
        *guard(&self.shared.creation_failure) = None;
        guard(&self.shared.failing_calls).clear();
    }
}

impl MapsApiWrapper for InMemoryMapsApi {
    fn create_marker(
        &self,
        options: MarkerOptions,
    ) -> BoxFuture<'static, ApiResult<Arc<dyn NativeMarker>>> {
        let handle = self.shared.next_handle.fetch_add(1, Ordering::SeqCst);
        self.shared.record(RecordedCall::CreateMarker {
            handle,
            options: options.clone(),
        });

        let failure = guard(&self.shared.creation_failure).clone();
        let marker = Arc::new(InMemoryMarker {
            handle,
            state: Mutex::new(NativeState {
                options,
                map: Some(self.map.clone()),
            }),
            listeners: Mutex::new(Vec::new()),
            shared: Arc::clone(&self.shared),
        });
        if failure.is_none() {
            guard(&self.shared.markers).push(Arc::clone(&marker));
        }

        let mut gate = self.shared.gate.subscribe();
        async move {
            if gate.wait_for(|open| *open).await.is_err() {
                return Err(ApiError::Unavailable {
                    message: "provider dropped while creation was pending".to_string(),
                });
            }
            match failure {
                Some(message) => Err(ApiError::CreationFailed { message }),
                None => Ok(marker as Arc<dyn NativeMarker>),
            }
        }
        .boxed()
    }
}

/// Native marker living in an `InMemoryMapsApi`
pub struct InMemoryMarker {
    handle: u64,
    state: Mutex<NativeState>,
    listeners: Mutex<Vec<(MarkerEventKind, UnboundedSender<MarkerEvent>)>>,
    shared: Arc<Shared>,
}

impl InMemoryMarker {
    pub fn handle(&self) -> u64 {
        self.handle
    }

    pub fn state(&self) -> NativeState {
        guard(&self.state).clone()
    }

    /// Whether the marker is currently attached to a map
    pub fn is_displayed(&self) -> bool {
        guard(&self.state).map.is_some()
    }

    /// Deliver a synthetic user event to matching listeners
    ///
    /// Returns how many listeners received it. Listeners whose receiver was
    /// dropped are forgotten.
    pub fn emit(&self, event: MarkerEvent) -> usize {
        let mut listeners = guard(&self.listeners);
        listeners.retain(|(_, sink)| !sink.is_closed());
        listeners
            .iter()
            .filter(|(kind, _)| *kind == event.kind)
            .filter(|(_, sink)| sink.send(event.clone()).is_ok())
            .count()
    }

    fn set(&self, property: MarkerProperty) -> ApiResult<()> {
        let method = property.setter();
        self.shared.record(RecordedCall::SetProperty {
            handle: self.handle,
            property: property.clone(),
        });
        self.shared.check_failure(method)?;

        let mut state = guard(&self.state);
        let options = &mut state.options;
        match property {
            MarkerProperty::Position(position) => options.position = position,
            MarkerProperty::Label(label) => options.label = label,
            MarkerProperty::Icon(icon) => options.icon = icon,
            MarkerProperty::Opacity(opacity) => options.opacity = opacity,
            MarkerProperty::Visible(visible) => options.visible = visible,
            MarkerProperty::ZIndex(z_index) => options.z_index = z_index,
            MarkerProperty::Title(title) => options.title = title,
            MarkerProperty::Draggable(draggable) => options.draggable = draggable,
            MarkerProperty::Clickable(clickable) => options.clickable = clickable,
            MarkerProperty::Animation(animation) => options.animation = animation,
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl NativeMarker for InMemoryMarker {
    async fn set_position(&self, position: LatLng) -> ApiResult<()> {
        self.set(MarkerProperty::Position(position))
    }

    async fn set_label(&self, label: Option<String>) -> ApiResult<()> {
        self.set(MarkerProperty::Label(label))
    }

    async fn set_icon(&self, icon: Option<MarkerIcon>) -> ApiResult<()> {
        self.set(MarkerProperty::Icon(icon))
    }

    async fn set_opacity(&self, opacity: f64) -> ApiResult<()> {
        self.set(MarkerProperty::Opacity(opacity))
    }

    async fn set_visible(&self, visible: bool) -> ApiResult<()> {
        self.set(MarkerProperty::Visible(visible))
    }

    async fn set_z_index(&self, z_index: i32) -> ApiResult<()> {
        self.set(MarkerProperty::ZIndex(z_index))
    }

    async fn set_title(&self, title: Option<String>) -> ApiResult<()> {
        self.set(MarkerProperty::Title(title))
    }

    async fn set_draggable(&self, draggable: bool) -> ApiResult<()> {
        self.set(MarkerProperty::Draggable(draggable))
    }

    async fn set_clickable(&self, clickable: bool) -> ApiResult<()> {
        self.set(MarkerProperty::Clickable(clickable))
    }

    async fn set_animation(&self, animation: Option<Animation>) -> ApiResult<()> {
        self.set(MarkerProperty::Animation(animation))
    }

    async fn set_map(&self, map: Option<MapHandle>) -> ApiResult<()> {
        self.shared.record(RecordedCall::SetMap {
            handle: self.handle,
            map: map.clone(),
        });
        self.shared.check_failure("set_map")?;
        guard(&self.state).map = map;
        Ok(())
    }

    fn add_listener(
        &self,
        kind: MarkerEventKind,
        sink: UnboundedSender<MarkerEvent>,
    ) -> ApiResult<()> {
        self.shared.record(RecordedCall::AddListener {
            handle: self.handle,
            kind,
        });
        self.shared.check_failure("add_listener")?;
        guard(&self.listeners).push((kind, sink));
        Ok(())
    }
}
