//! Progress markers for wizard steps.

use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};

/// Completion marker attached to each wizard step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    /// The step has never been submitted
    #[default]
    NotStarted,

    /// The step was submitted with a valid form
    Completed,

    /// The step was visited but left unfinished
    Uncompleted,
}

impl FromStr for ProgressState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" | "notstarted" => Ok(ProgressState::NotStarted),
            "completed" => Ok(ProgressState::Completed),
            "uncompleted" => Ok(ProgressState::Uncompleted),
            _ => Err(format!("Invalid progress state: {s}")),
        }
    }
}

impl ProgressState {
    /// Wire representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressState::NotStarted => "not_started",
            ProgressState::Completed => "completed",
            ProgressState::Uncompleted => "uncompleted",
        }
    }

    /// Get the state with its navigation icon.
    ///
    /// ```rust
    /// use designer_core::models::ProgressState;
    ///
    /// assert_eq!(ProgressState::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(ProgressState::NotStarted.with_icon(), "○ Not started");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ProgressState::Completed => "✓ Completed",
            ProgressState::Uncompleted => "◐ Uncompleted",
            ProgressState::NotStarted => "○ Not started",
        }
    }
}

/// Map from step id to its progress marker.
///
/// Absent entries read as [`ProgressState::NotStarted`]. Entries are only
/// ever added or overwritten, never removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Progress(BTreeMap<String, ProgressState>);

impl Progress {
    /// State of a step, defaulting to not started.
    pub fn get(&self, step_id: &str) -> ProgressState {
        self.0.get(step_id).copied().unwrap_or_default()
    }

    /// Whether the map holds an explicit entry for the step.
    pub fn contains(&self, step_id: &str) -> bool {
        self.0.contains_key(step_id)
    }

    /// Adds a `not_started` entry unless one already exists.
    pub fn ensure(&mut self, step_id: &str) {
        self.0.entry(step_id.to_string()).or_default();
    }

    /// Sets the state of a step.
    pub fn set(&mut self, step_id: &str, state: ProgressState) {
        self.0.insert(step_id.to_string(), state);
    }

    /// Marks a step as completed.
    pub fn mark_completed(&mut self, step_id: &str) {
        self.set(step_id, ProgressState::Completed);
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no step has an entry yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the explicit entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ProgressState)> {
        self.0.iter().map(|(id, state)| (id.as_str(), *state))
    }
}

impl FromIterator<(String, ProgressState)> for Progress {
    fn from_iter<I: IntoIterator<Item = (String, ProgressState)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
