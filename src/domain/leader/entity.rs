//! Leader entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::todo::TodoItem;

/// A registered participant with a personal copy of the active part's checklist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    id: String,
    name: String,
    needs_help: bool,
    completed: bool,
    todo_list: Vec<TodoItem>,
    created_at: DateTime<Utc>,
}

impl Leader {
    /// Register a new leader, taking ownership of a checklist copy
    ///
    /// The caller provides the todo list copied by value from the active
    /// part at registration time; an empty list when no part is active.
    pub fn register(name: impl Into<String>, todo_list: Vec<TodoItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            needs_help: false,
            completed: false,
            todo_list,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn needs_help(&self) -> bool {
        self.needs_help
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn todo_list(&self) -> &[TodoItem] {
        &self.todo_list
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Mark the leader done; completing always clears the help flag
    pub fn complete(&mut self) {
        self.completed = true;
        self.needs_help = false;
    }

    /// Set the help flag; raising it re-opens a completed leader
    pub fn set_needs_help(&mut self, needs_help: bool) {
        self.needs_help = needs_help;
        if needs_help {
            self.completed = false;
        }
    }

    /// Flip the completion flag of the todo with the given id
    ///
    /// Returns the todo's new completion state, or `None` when no todo
    /// with that id exists in this leader's checklist.
    pub fn toggle_todo(&mut self, todo_id: &str) -> Option<bool> {
        self.todo_list
            .iter_mut()
            .find(|t| t.id() == todo_id)
            .map(|t| t.toggle())
    }

    /// Reset to the freshly-registered state, keeping the checklist items
    pub fn reset(&mut self) {
        self.completed = false;
        self.needs_help = false;
        for todo in &mut self.todo_list {
            todo.reset();
        }
    }
}
