//! Wire and storage types for the todo service.
//!
//! The stored record and its JSON form are the same type: handlers hand out
//! clones of `Todo` and never references into the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh, not yet completed record with a random id. Both
    /// timestamps are set to `now`.
    pub fn new(input: CreateTodo, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every field the patch carries, then touches `updated_at`
    /// whether or not anything changed.
    pub fn apply(&mut self, patch: UpdateTodo, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        match patch.description {
            Patch::Absent => {}
            Patch::Null => self.description = None,
            Patch::Value(description) => self.description = Some(description),
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update payload. `title` and `completed` treat `null` the same as
/// an omitted key; `description` distinguishes the two so a client can clear it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_absent() && self.completed.is_none()
    }
}

/// Presence-aware optional field: omitted, explicitly `null`, or a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

// Only reached when the key is present; `#[serde(default)]` covers omission.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

/// Body of the delete acknowledgment and the root banner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Todo {
        Todo::new(
            CreateTodo {
                title: "A".to_string(),
                description: Some("B".to_string()),
            },
            Utc::now(),
        )
    }

    #[test]
    fn todo_serializes_to_json() {
        let mut todo = sample();
        todo.id = Uuid::nil();
        todo.description = None;
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "A");
        assert!(json["description"].is_null());
        assert_eq!(json["completed"], false);
        assert!(json["created_at"].is_string());
        assert_eq!(json["created_at"], json["updated_at"]);
    }

    #[test]
    fn new_todo_is_open_with_equal_timestamps() {
        let todo = sample();
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
        assert_ne!(todo.id, Uuid::nil());
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"description":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn create_todo_description_is_optional() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(input.title, "Buy milk");
        assert!(input.description.is_none());
    }

    #[test]
    fn update_todo_distinguishes_null_from_absent() {
        let input: UpdateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.is_empty());

        let input: UpdateTodo = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(input.description, Patch::Null);
        assert!(!input.is_empty());

        let input: UpdateTodo = serde_json::from_str(r#"{"description":"new"}"#).unwrap();
        assert_eq!(input.description, Patch::Value("new".to_string()));
    }

    #[test]
    fn update_todo_null_title_is_ignored() {
        let input: UpdateTodo = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.is_empty());
    }

    #[test]
    fn update_todo_rejects_wrong_types() {
        let result: Result<UpdateTodo, _> = serde_json::from_str(r#"{"completed":"yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut todo = sample();
        let later = todo.updated_at + Duration::seconds(5);
        todo.apply(
            UpdateTodo {
                completed: Some(true),
                ..UpdateTodo::default()
            },
            later,
        );
        assert_eq!(todo.title, "A");
        assert_eq!(todo.description.as_deref(), Some("B"));
        assert!(todo.completed);
        assert_eq!(todo.updated_at, later);
        assert!(todo.created_at < todo.updated_at);
    }

    #[test]
    fn apply_null_description_clears_it() {
        let mut todo = sample();
        todo.apply(
            UpdateTodo {
                description: Patch::Null,
                ..UpdateTodo::default()
            },
            Utc::now(),
        );
        assert!(todo.description.is_none());
    }

    #[test]
    fn apply_empty_patch_still_touches_updated_at() {
        let mut todo = sample();
        let before = todo.clone();
        let later = todo.updated_at + Duration::milliseconds(1);
        todo.apply(UpdateTodo::default(), later);
        assert_eq!(todo.title, before.title);
        assert_eq!(todo.description, before.description);
        assert_eq!(todo.completed, before.completed);
        assert_eq!(todo.created_at, before.created_at);
        assert_eq!(todo.updated_at, later);
    }
}
