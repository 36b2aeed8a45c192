//! Public API for the mapping provider boundary
//!
//! External modules should import from here rather than directly from internal modules.

// Option bag and value types
pub use crate::maps::types::{
    Animation, IconDescriptor, LatLng, MapHandle, MarkerEvent, MarkerEventKind, MarkerIcon,
    MarkerOptions, MarkerProperty, Point, Size,
};

// Provider traits
pub use crate::maps::traits::{MapsApiWrapper, NativeMarker};

// In-memory recording provider
pub use crate::maps::memory::{InMemoryMapsApi, InMemoryMarker, NativeState, RecordedCall};

// Error handling
pub use crate::maps::error::{ApiError, ApiResult};
