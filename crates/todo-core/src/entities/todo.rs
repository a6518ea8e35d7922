//! Todo entity - a task owned by exactly one user

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    #[default]
    Draft,
    Todo,
    Doing,
    Done,
    Trash,
}

impl TodoState {
    /// All states, in lifecycle order
    pub const ALL: [TodoState; 5] = [
        Self::Draft,
        Self::Todo,
        Self::Doing,
        Self::Done,
        Self::Trash,
    ];

    /// Wire and storage representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
            Self::Trash => "trash",
        }
    }
}

impl fmt::Display for TodoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known todo state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid todo state: {0}")]
pub struct TodoStateParseError(pub String);

impl FromStr for TodoState {
    type Err = TodoStateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| TodoStateParseError(s.to_string()))
    }
}

/// Todo entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub user_id: i64,
}

impl Todo {
    /// Apply a partial update; fields left as `None` are kept
    pub fn apply(&mut self, changes: TodoChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(state) = changes.state {
            self.state = state;
        }
    }
}

/// Values for a todo that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub user_id: i64,
}

/// Partial update of a todo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

impl TodoChanges {
    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.state.is_none()
    }
}
