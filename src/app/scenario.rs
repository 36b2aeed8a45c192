//! Scenario files and their replay
//!
//! A scenario is a list of steps, each naming a marker by a free-form key:
//!
//! ```toml
//! [[step]]
//! action = "add"
//! marker = "a"
//! latitude = 34.4
//! longitude = 22.3
//! label = "A"
//!
//! [[step]]
//! action = "set"
//! marker = "a"
//! icon = "http://example.com/icon.png"
//! opacity = 0.4
//!
//! [[step]]
//! action = "delete"
//! marker = "a"
//! ```
//!
//! `set` changes the listed fields and issues one update per field; all of a
//! step's updates are enqueued before any of them is awaited.

use crate::app::error::{AppError, AppResult};
use crate::core::error_handling::{describe_error, log_error_with_context};
use crate::maps::api::{Animation, MarkerIcon};
use crate::markers::api::{Marker, MarkerError, MarkerManager, MarkerResult};
use futures::future::{join_all, BoxFuture};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Add,
    Set,
    Delete,
    Clear,
}

/// One scenario step; field values are only read where the action uses them
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub action: Action,
    #[serde(default)]
    pub marker: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<MarkerIcon>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub draggable: Option<bool>,
    #[serde(default)]
    pub z_index: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub clickable: Option<bool>,
    #[serde(default)]
    pub animation: Option<Animation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn parse(contents: &str) -> AppResult<Self> {
        let scenario: Scenario = toml::from_str(contents).map_err(|e| AppError::Scenario {
            message: e.message().to_string(),
        })?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub async fn load(path: &Path) -> AppResult<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| AppError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&contents)
    }

    fn validate(&self) -> AppResult<()> {
        for (index, step) in self.steps.iter().enumerate() {
            let number = index + 1;
            if step.action != Action::Clear && step.marker.is_none() {
                return Err(AppError::Scenario {
                    message: format!("step {} ({}) needs a marker key", number, step.action),
                });
            }
            if step.action == Action::Add && (step.latitude.is_none() || step.longitude.is_none())
            {
                return Err(AppError::Scenario {
                    message: format!("step {} (add) needs latitude and longitude", number),
                });
            }
        }
        Ok(())
    }
}

/// A step that did not complete
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    /// 1-based step number
    pub step: usize,
    pub action: Action,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayOutcome {
    pub steps_run: usize,
    pub failures: Vec<StepFailure>,
}

impl ReplayOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Replay every step through `manager`, continuing past failed steps
pub async fn replay(scenario: &Scenario, manager: &MarkerManager) -> ReplayOutcome {
    let mut markers: HashMap<String, Marker> = HashMap::new();
    let mut outcome = ReplayOutcome::default();

    for (index, step) in scenario.steps.iter().enumerate() {
        let number = index + 1;
        log::info!("Step {}: {} {}", number, step.action, step.marker.as_deref().unwrap_or("*"));

        if let Err(error) = run_step(step, manager, &mut markers).await {
            let context = format!("Step {} ({})", number, step.action);
            log_error_with_context(&error, &context);
            outcome.failures.push(StepFailure {
                step: number,
                action: step.action,
                message: describe_error(&error, &context),
            });
        }
        outcome.steps_run += 1;
    }
    outcome
}

async fn run_step(
    step: &Step,
    manager: &MarkerManager,
    markers: &mut HashMap<String, Marker>,
) -> AppResult<()> {
    if step.action == Action::Clear {
        let detached = manager.clear().await?;
        log::info!("Cleared {} markers", detached);
        return Ok(());
    }

    let key = step.marker.clone().unwrap_or_default();
    match step.action {
        Action::Add => {
            // Re-adding a known key reuses its identity, so the duplicate policy applies
            let marker = markers.entry(key).or_insert_with(|| {
                Marker::new(step.latitude.unwrap_or_default(), step.longitude.unwrap_or_default())
            });
            apply_fields(step, marker);
            manager.add_marker(marker)?;
            Ok(())
        }
        Action::Set => {
            let marker = markers.get_mut(&key).ok_or_else(|| AppError::Scenario {
                message: format!("marker '{}' was never added in this scenario", key),
            })?;
            let updates = set_fields(step, marker, manager);
            if updates.is_empty() {
                log::warn!("Set step for '{}' changes nothing", key);
            }
            first_error(join_all(updates).await)?;
            Ok(())
        }
        Action::Delete => {
            let marker = markers.get(&key).ok_or_else(|| AppError::Scenario {
                message: format!("marker '{}' was never added in this scenario", key),
            })?;
            manager.delete_marker(marker).await?;
            Ok(())
        }
        Action::Clear => Ok(()),
    }
}

fn apply_fields(step: &Step, marker: &mut Marker) {
    if let Some(latitude) = step.latitude {
        marker.latitude = latitude;
    }
    if let Some(longitude) = step.longitude {
        marker.longitude = longitude;
    }
    if step.label.is_some() {
        marker.label = step.label.clone();
    }
    if step.icon.is_some() {
        marker.icon = step.icon.clone();
    }
    if let Some(opacity) = step.opacity {
        marker.opacity = opacity;
    }
    if let Some(visible) = step.visible {
        marker.visible = visible;
    }
    if let Some(draggable) = step.draggable {
        marker.draggable = draggable;
    }
    if let Some(z_index) = step.z_index {
        marker.z_index = z_index;
    }
    if step.title.is_some() {
        marker.title = step.title.clone();
    }
    if let Some(clickable) = step.clickable {
        marker.clickable = clickable;
    }
    if step.animation.is_some() {
        marker.animation = step.animation;
    }
}

// One update per field present in the step, in a fixed field order
fn set_fields(
    step: &Step,
    marker: &mut Marker,
    manager: &MarkerManager,
) -> Vec<BoxFuture<'static, MarkerResult<()>>> {
    apply_fields(step, marker);

    let mut updates = Vec::new();
    if step.latitude.is_some() || step.longitude.is_some() {
        updates.push(manager.update_position(marker));
    }
    if step.label.is_some() {
        updates.push(manager.update_label(marker));
    }
    if step.icon.is_some() {
        updates.push(manager.update_icon(marker));
    }
    if step.opacity.is_some() {
        updates.push(manager.update_opacity(marker));
    }
    if step.visible.is_some() {
        updates.push(manager.update_visible(marker));
    }
    if step.draggable.is_some() {
        updates.push(manager.update_draggable(marker));
    }
    if step.z_index.is_some() {
        updates.push(manager.update_z_index(marker));
    }
    if step.title.is_some() {
        updates.push(manager.update_title(marker));
    }
    if step.clickable.is_some() {
        updates.push(manager.update_clickable(marker));
    }
    if step.animation.is_some() {
        updates.push(manager.update_animation(marker));
    }
    updates
}

fn first_error(results: Vec<MarkerResult<()>>) -> Result<(), MarkerError> {
    results.into_iter().collect()
}
