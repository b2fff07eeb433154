//! Part entity - a named todo template

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::todo::TodoItem;

/// Partial update for a single todo within a part template
///
/// A patch carrying an id updates the matching existing todo in place;
/// a patch without an id (or with an unknown id) becomes a new todo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// A named template of todo items; at most one part is active at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    id: String,
    name: String,
    description: String,
    active: bool,
    todo_list: Vec<TodoItem>,
    created_at: DateTime<Utc>,
}

impl Part {
    /// Create a new, inactive part with a generated id
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        todo_list: Vec<TodoItem>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            active: false,
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

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn todo_list(&self) -> &[TodoItem] {
        &self.todo_list
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Apply an update: replace name and description, merge the todo list
    ///
    /// The resulting todo list follows the order of the patches. Patches
    /// matching an existing todo id keep that todo (and its id) and apply
    /// the provided fields; everything else becomes a fresh todo. Todos
    /// absent from the patch list are dropped.
    pub fn apply_update(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        todos: Vec<TodoPatch>,
    ) {
        self.name = name.into();
        self.description = description.into();

        let merged = todos
            .into_iter()
            .map(|patch| {
                let existing = patch
                    .id
                    .as_deref()
                    .and_then(|id| self.todo_list.iter().find(|t| t.id() == id));

                match existing {
                    Some(todo) => {
                        let mut todo = todo.clone();
                        if let Some(title) = patch.title {
                            todo.set_title(title);
                        }
                        if let Some(description) = patch.description {
                            todo.set_description(description);
                        }
                        if let Some(completed) = patch.completed {
                            todo.set_completed(completed);
                        }
                        todo
                    }
                    None => {
                        let mut todo = TodoItem::new(
                            patch.title.unwrap_or_default(),
                            patch.description.unwrap_or_default(),
                        );
                        todo.set_completed(patch.completed.unwrap_or(false));
                        todo
                    }
                }
            })
            .collect();

        self.todo_list = merged;
    }

    /// Flip the completion flag of the todo with the given id
    ///
    /// Returns the todo's new completion state, or `None` when no todo
    /// with that id exists in this template.
    pub fn toggle_todo(&mut self, todo_id: &str) -> Option<bool> {
        self.todo_list
            .iter_mut()
            .find(|t| t.id() == todo_id)
            .map(|t| t.toggle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_part() -> Part {
        Part::new(
            "P1",
            "First shift",
            vec![TodoItem::new("A", ""), TodoItem::new("B", "")],
        )
    }

    #[test]
    fn test_new_part_is_inactive() {
        let part = sample_part();

        assert_eq!(part.name(), "P1");
        assert!(!part.active());
        assert_eq!(part.todo_list().len(), 2);
        assert!(!part.id().is_empty());
    }

    #[test]
    fn test_activate_and_deactivate() {
        let mut part = sample_part();

        part.activate();
        assert!(part.active());

        part.deactivate();
        assert!(!part.active());
    }

    #[test]
    fn test_apply_update_replaces_name_and_description() {
        let mut part = sample_part();

        part.apply_update("P2", "Second shift", vec![]);

        assert_eq!(part.name(), "P2");
        assert_eq!(part.description(), "Second shift");
        assert!(part.todo_list().is_empty());
    }

    #[test]
    fn test_apply_update_keeps_existing_todo_ids() {
        let mut part = sample_part();
        let first_id = part.todo_list()[0].id().to_string();

        part.apply_update(
            "P1",
            "",
            vec![TodoPatch {
                id: Some(first_id.clone()),
                title: Some("A renamed".to_string()),
                ..Default::default()
            }],
        );

        assert_eq!(part.todo_list().len(), 1);
        assert_eq!(part.todo_list()[0].id(), first_id);
        assert_eq!(part.todo_list()[0].title(), "A renamed");
    }

    #[test]
    fn test_apply_update_creates_todos_for_unknown_ids() {
        let mut part = sample_part();

        part.apply_update(
            "P1",
            "",
            vec![TodoPatch {
                id: Some("unknown".to_string()),
                title: Some("C".to_string()),
                ..Default::default()
            }],
        );

        assert_eq!(part.todo_list().len(), 1);
        assert_ne!(part.todo_list()[0].id(), "unknown");
        assert_eq!(part.todo_list()[0].title(), "C");
    }

    #[test]
    fn test_apply_update_preserves_completion_unless_patched() {
        let mut part = sample_part();
        let first_id = part.todo_list()[0].id().to_string();
        part.toggle_todo(&first_id);

        part.apply_update(
            "P1",
            "",
            vec![TodoPatch {
                id: Some(first_id.clone()),
                ..Default::default()
            }],
        );

        assert!(part.todo_list()[0].completed());
    }

    #[test]
    fn test_toggle_todo() {
        let mut part = sample_part();
        let todo_id = part.todo_list()[1].id().to_string();

        assert_eq!(part.toggle_todo(&todo_id), Some(true));
        assert_eq!(part.toggle_todo(&todo_id), Some(false));
        assert_eq!(part.toggle_todo("missing"), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let part = sample_part();
        let json = serde_json::to_string(&part).unwrap();

        assert!(json.contains("\"active\":false"));
        assert!(json.contains("\"todoList\":"));
        assert!(json.contains("\"createdAt\":"));
    }
}
