//! Marker manager configuration

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// What `add_marker` does when the marker is already registered
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with `MarkerError::AlreadyRegistered` and leave the existing entry alone
    #[default]
    Reject,
    /// Detach the existing native marker, then create a fresh one
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl ManagerConfig {
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
