//! Mapping provider boundary
//!
//! The marker manager talks to the mapping service only through these two
//! traits. Implementations wrap whatever native API is in use; the crate ships
//! an in-memory recording backend in `maps::memory`.

use crate::maps::error::ApiResult;
use crate::maps::types::{
    Animation, LatLng, MapHandle, MarkerEvent, MarkerEventKind, MarkerIcon, MarkerOptions,
    MarkerProperty,
};
use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Factory for native markers
pub trait MapsApiWrapper: Send + Sync {
    /// Issue a native marker creation call
    ///
    /// The call itself happens synchronously; the returned future resolves to
    /// the native handle once the provider has built the marker. Each
    /// invocation must create a distinct native marker.
    fn create_marker(
        &self,
        options: MarkerOptions,
    ) -> BoxFuture<'static, ApiResult<Arc<dyn NativeMarker>>>;
}

/// Handle to one native marker owned by the mapping provider
#[async_trait::async_trait]
pub trait NativeMarker: Send + Sync {
    async fn set_position(&self, position: LatLng) -> ApiResult<()>;

    async fn set_label(&self, label: Option<String>) -> ApiResult<()>;

    /// Icon values are forwarded untouched, whichever variant they are
    async fn set_icon(&self, icon: Option<MarkerIcon>) -> ApiResult<()>;

    async fn set_opacity(&self, opacity: f64) -> ApiResult<()>;

    async fn set_visible(&self, visible: bool) -> ApiResult<()>;

    async fn set_z_index(&self, z_index: i32) -> ApiResult<()>;

    async fn set_title(&self, title: Option<String>) -> ApiResult<()>;

    async fn set_draggable(&self, draggable: bool) -> ApiResult<()>;

    async fn set_clickable(&self, clickable: bool) -> ApiResult<()>;

    async fn set_animation(&self, animation: Option<Animation>) -> ApiResult<()>;

    /// Attach to a map, or detach from display with `None`
    async fn set_map(&self, map: Option<MapHandle>) -> ApiResult<()>;

    /// Forward every event of `kind` to `sink` until the receiver is dropped
    fn add_listener(
        &self,
        kind: MarkerEventKind,
        sink: UnboundedSender<MarkerEvent>,
    ) -> ApiResult<()>;
}

impl dyn NativeMarker {
    /// Dispatch a single property change to its dedicated setter
    pub async fn apply(&self, property: MarkerProperty) -> ApiResult<()> {
        match property {
            MarkerProperty::Position(position) => self.set_position(position).await,
            MarkerProperty::Label(label) => self.set_label(label).await,
            MarkerProperty::Icon(icon) => self.set_icon(icon).await,
            MarkerProperty::Opacity(opacity) => self.set_opacity(opacity).await,
            MarkerProperty::Visible(visible) => self.set_visible(visible).await,
            MarkerProperty::ZIndex(z_index) => self.set_z_index(z_index).await,
            MarkerProperty::Title(title) => self.set_title(title).await,
            MarkerProperty::Draggable(draggable) => self.set_draggable(draggable).await,
            MarkerProperty::Clickable(clickable) => self.set_clickable(clickable).await,
            MarkerProperty::Animation(animation) => self.set_animation(animation).await,
        }
    }
}
