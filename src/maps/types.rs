//! Value types exchanged with the mapping provider
//!
//! These mirror the provider's marker option bag. They are plain data: the
//! manager forwards them to the native layer without interpreting them.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Pixel offset used by icon anchors and origins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Pixel dimensions of an icon or sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Structured icon description
///
/// Only `url` is required; every other field is forwarded as-is when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDescriptor {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_origin: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaled_size: Option<Size>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl IconDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anchor: None,
            label_origin: None,
            origin: None,
            scaled_size: None,
            size: None,
        }
    }
}

/// Marker icon: either a plain image reference or a structured descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerIcon {
    Url(String),
    Descriptor(IconDescriptor),
}

impl From<&str> for MarkerIcon {
    fn from(url: &str) -> Self {
        MarkerIcon::Url(url.to_string())
    }
}

impl From<String> for MarkerIcon {
    fn from(url: String) -> Self {
        MarkerIcon::Url(url)
    }
}

impl From<IconDescriptor> for MarkerIcon {
    fn from(descriptor: IconDescriptor) -> Self {
        MarkerIcon::Descriptor(descriptor)
    }
}

/// Built-in marker animations offered by the provider
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Animation {
    Bounce,
    Drop,
}

/// Property bag for a single native marker creation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOptions {
    pub position: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub draggable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<MarkerIcon>,
    pub opacity: f64,
    pub visible: bool,
    pub z_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub clickable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

/// One mutable marker property together with its new value
///
/// After creation the manager only ever sends one of these at a time, never
/// a full option bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerProperty {
    Position(LatLng),
    Label(Option<String>),
    Icon(Option<MarkerIcon>),
    Opacity(f64),
    Visible(bool),
    ZIndex(i32),
    Title(Option<String>),
    Draggable(bool),
    Clickable(bool),
    Animation(Option<Animation>),
}

impl MarkerProperty {
    /// Name of the property, e.g. `z_index`
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Name of the native setter that receives this property, e.g. `set_z_index`
    pub fn setter(&self) -> &'static str {
        match self {
            MarkerProperty::Position(_) => "set_position",
            MarkerProperty::Label(_) => "set_label",
            MarkerProperty::Icon(_) => "set_icon",
            MarkerProperty::Opacity(_) => "set_opacity",
            MarkerProperty::Visible(_) => "set_visible",
            MarkerProperty::ZIndex(_) => "set_z_index",
            MarkerProperty::Title(_) => "set_title",
            MarkerProperty::Draggable(_) => "set_draggable",
            MarkerProperty::Clickable(_) => "set_clickable",
            MarkerProperty::Animation(_) => "set_animation",
        }
    }
}

/// Opaque reference to a map instance a native marker can be attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapHandle(String);

impl MapHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// User interaction events a native marker can report
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarkerEventKind {
    Click,
    DblClick,
    RightClick,
    DragStart,
    Drag,
    DragEnd,
    MouseOver,
    MouseOut,
}

/// Event delivered by a native marker listener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEvent {
    pub kind: MarkerEventKind,
    /// Pointer position for events that carry one
    pub position: Option<LatLng>,
}
