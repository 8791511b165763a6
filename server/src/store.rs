//! In-memory todo collection.
//!
//! `TodoStore` is a cheap-to-clone handle around one lock-guarded map. Every
//! method takes the lock exactly once, so each operation is atomic with
//! respect to the collection. Insertion order is kept for listing.

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{CreateTodo, Todo, UpdateTodo};

#[derive(Clone, Debug, Default)]
pub struct TodoStore {
    todos: Arc<RwLock<IndexMap<Uuid, Todo>>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.values().cloned().collect()
    }

    pub async fn create(&self, input: CreateTodo) -> Todo {
        let todo = Todo::new(input, Utc::now());
        self.todos.write().await.insert(todo.id, todo.clone());
        todo
    }

    pub async fn get(&self, id: Uuid) -> Result<Todo, StoreError> {
        self.todos
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn update(&self, id: Uuid, patch: UpdateTodo) -> Result<Todo, StoreError> {
        let mut todos = self.todos.write().await;
        let todo = todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        todo.apply(patch, Utc::now());
        Ok(todo.clone())
    }

    /// Removes the record and returns it. Remaining records keep their order.
    pub async fn delete(&self, id: Uuid) -> Result<Todo, StoreError> {
        self.todos
            .write()
            .await
            .shift_remove(&id)
            .ok_or(StoreError::NotFound(id))
    }
}
