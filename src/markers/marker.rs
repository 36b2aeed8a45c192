//! Declarative marker value
//!
//! A `Marker` is owned by the declarative layer. Its fields are mutated
//! freely; the manager only reads them when asked to push one property to
//! the native marker. Identity lives in `MarkerId`, which survives clones.

use crate::maps::api::{Animation, LatLng, MarkerIcon, MarkerOptions, MarkerProperty};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MARKER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique marker identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    fn next() -> Self {
        Self(NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

pub const DEFAULT_OPACITY: f64 = 1.0;
pub const DEFAULT_Z_INDEX: i32 = 1;

/// Declarative map marker
///
/// `Marker::new` applies the documented defaults: fully opaque, visible,
/// clickable, not draggable, z-index 1 and no icon, label or title.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
    pub icon: Option<MarkerIcon>,
    pub opacity: f64,
    pub visible: bool,
    pub draggable: bool,
    pub z_index: i32,
    pub title: Option<String>,
    pub clickable: bool,
    pub animation: Option<Animation>,
}

impl Marker {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            id: MarkerId::next(),
            latitude,
            longitude,
            label: None,
            icon: None,
            opacity: DEFAULT_OPACITY,
            visible: true,
            draggable: false,
            z_index: DEFAULT_Z_INDEX,
            title: None,
            clickable: true,
            animation: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Full option bag for the native creation call
    pub fn options(&self) -> MarkerOptions {
        MarkerOptions {
            position: self.position(),
            label: self.label.clone(),
            draggable: self.draggable,
            icon: self.icon.clone(),
            opacity: self.opacity,
            visible: self.visible,
            z_index: self.z_index,
            title: self.title.clone(),
            clickable: self.clickable,
            animation: self.animation,
        }
    }

    pub(crate) fn position_property(&self) -> MarkerProperty {
        MarkerProperty::Position(self.position())
    }

    pub(crate) fn label_property(&self) -> MarkerProperty {
        MarkerProperty::Label(self.label.clone())
    }

    pub(crate) fn icon_property(&self) -> MarkerProperty {
        MarkerProperty::Icon(self.icon.clone())
    }

    pub(crate) fn opacity_property(&self) -> MarkerProperty {
        MarkerProperty::Opacity(self.opacity)
    }

    pub(crate) fn visible_property(&self) -> MarkerProperty {
        MarkerProperty::Visible(self.visible)
    }

    pub(crate) fn z_index_property(&self) -> MarkerProperty {
        MarkerProperty::ZIndex(self.z_index)
    }

    pub(crate) fn title_property(&self) -> MarkerProperty {
        MarkerProperty::Title(self.title.clone())
    }

    pub(crate) fn draggable_property(&self) -> MarkerProperty {
        MarkerProperty::Draggable(self.draggable)
    }

    pub(crate) fn clickable_property(&self) -> MarkerProperty {
        MarkerProperty::Clickable(self.clickable)
    }

    pub(crate) fn animation_property(&self) -> MarkerProperty {
        MarkerProperty::Animation(self.animation)
    }
}
