//! Marker lifecycle management
//!
//! Keeps native map markers in step with declarative `Marker` values owned
//! by a higher layer.
//!
//! # Overview
//!
//! - **Lazy creation**: adding a marker issues one native creation call and
//!   parks a worker on the resulting future
//! - **Narrow updates**: each update sends one property to one native setter
//! - **Ordering**: per-marker operations apply in call order, also while the
//!   native marker is still being created
//! - **Independence**: different markers never wait on each other
//!
//! # Architecture
//!
//! ```text
//!  declarative layer
//!        │ add / update_* / delete
//!        ▼
//! ┌───────────────────────────────────────────────┐
//! │                 MarkerManager                 │
//! │   registry: MarkerId ──► command channel      │
//! └───────┬───────────────────────┬───────────────┘
//!         │ create_marker         │ Command (FIFO)
//!         ▼                       ▼
//! ┌───────────────┐     ┌─────────────────────────┐
//! │MapsApiWrapper │────►│ worker: await creation, │
//! └───────────────┘     │ then apply commands     │
//!                       └───────────┬─────────────┘
//!                                   ▼
//!                             NativeMarker setters
//! ```
//!
//! There is no timeout on pending creation: if the provider never resolves
//! a creation, every operation queued for that marker stays pending.

pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod manager;
pub(crate) mod marker;
pub(crate) mod worker;

// Public API module - the only public interface for marker management
pub mod api;

#[cfg(test)]
mod tests;
