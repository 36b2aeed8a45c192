//! Test modules for marker lifecycle management
//!
//! Tests are organised by lifecycle stage. Shared fixtures live here.

mod deletion;

use crate::maps::api::{
    ApiResult, InMemoryMapsApi, MapsApiWrapper, MarkerOptions, NativeMarker, RecordedCall,
};
use crate::markers::api::{Marker, MarkerManager};
use futures::future::{BoxFuture, FutureExt};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Manager backed by a fresh in-memory provider
pub(super) fn setup() -> (Arc<InMemoryMapsApi>, MarkerManager) {
    let api = Arc::new(InMemoryMapsApi::new("test-map"));
    let manager = MarkerManager::new(api.clone());
    (api, manager)
}

/// Marker at (34.4, 22.3) labelled "A" with every other field defaulted
pub(super) fn marker_a() -> Marker {
    Marker::new(34.4, 22.3).with_label("A")
}

/// Provider method names recorded for one native handle
pub(super) fn methods_for(api: &InMemoryMapsApi, handle: u64) -> Vec<&'static str> {
    api.calls_for(handle).iter().map(RecordedCall::method).collect()
}

/// Provider whose creations each wait for an individual release
pub(super) struct ManualApi {
    pub inner: InMemoryMapsApi,
    releases: Mutex<Vec<Option<oneshot::Sender<()>>>>,
}

impl ManualApi {
    pub fn new() -> Self {
        Self {
            inner: InMemoryMapsApi::new("manual-map"),
            releases: Mutex::new(Vec::new()),
        }
    }

    /// Let the `index`-th creation (0-based) resolve
    pub fn release(&self, index: usize) {
        let sender = self.releases.lock().unwrap()[index].take();
        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }
}

impl MapsApiWrapper for ManualApi {
    fn create_marker(
        &self,
        options: MarkerOptions,
    ) -> BoxFuture<'static, ApiResult<Arc<dyn NativeMarker>>> {
        let creation = self.inner.create_marker(options);
        let (release, released) = oneshot::channel();
        self.releases.lock().unwrap().push(Some(release));
        async move {
            // A dropped sender keeps the creation pending forever
            if released.await.is_err() {
                futures::future::pending::<()>().await;
            }
            creation.await
        }
        .boxed()
    }
}

/// Give spawned workers a chance to run work nobody awaits
pub(super) async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
