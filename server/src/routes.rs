use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::{CreateTodo, Message, Todo, UpdateTodo};
use crate::store::TodoStore;

pub(crate) async fn root() -> Json<Message> {
    Json(Message::new("Todo API"))
}

pub(crate) async fn list_todos(State(store): State<TodoStore>) -> Json<Vec<Todo>> {
    Json(store.list().await)
}

pub(crate) async fn create_todo(
    State(store): State<TodoStore>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(input) = payload?;
    let todo = store.create(input).await;
    info!(id = %todo.id, "todo created");
    Ok(Json(todo))
}

pub(crate) async fn get_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(store.get(id).await?))
}

pub(crate) async fn update_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(patch) = payload?;
    let id = parse_id(&id)?;
    if patch.is_empty() {
        debug!(%id, "empty update payload");
    }
    let todo = store.update(id, patch).await.inspect_err(|err| debug!(%err))?;
    info!(id = %todo.id, completed = todo.completed, "todo updated");
    Ok(Json(todo))
}

pub(crate) async fn delete_todo(
    State(store): State<TodoStore>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = parse_id(&id)?;
    store.delete(id).await.inspect_err(|err| debug!(%err))?;
    info!(%id, "todo deleted");
    Ok(Json(Message::new("Todo deleted")))
}

/// Ids are compared as the exact strings handed out at creation, so anything
/// that is not a canonical hyphenated lowercase UUID cannot match a record.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    match Uuid::try_parse(raw) {
        Ok(id) if id.hyphenated().to_string() == raw => Ok(id),
        _ => {
            debug!(id = raw, "path id does not name any todo");
            Err(ApiError::NotFound)
        }
    }
}
