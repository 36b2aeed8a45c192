//! Public API for marker lifecycle management
//!
//! External modules should import from here rather than directly from internal modules.

// Manager and configuration
pub use crate::markers::config::{DuplicatePolicy, ManagerConfig};
pub use crate::markers::manager::MarkerManager;

// Declarative marker value
pub use crate::markers::marker::{Marker, MarkerId, DEFAULT_OPACITY, DEFAULT_Z_INDEX};

// Error handling
pub use crate::markers::error::{MarkerError, MarkerResult};
