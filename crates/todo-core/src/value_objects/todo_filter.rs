//! Filter for listing todos

use crate::entities::{Todo, TodoState};

/// Combinable filters: case-sensitive substring on title and description,
/// exact match on state. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

impl TodoFilter {
    /// Check a todo against every set field
    pub fn matches(&self, todo: &Todo) -> bool {
        self.title
            .as_deref()
            .map_or(true, |needle| todo.title.contains(needle))
            && self
                .description
                .as_deref()
                .map_or(true, |needle| todo.description.contains(needle))
            && self.state.map_or(true, |state| todo.state == state)
    }
}
