//! Stateless request builder and response parser for the todo API.
//!
//! Each operation is a `build_*` method producing an `HttpRequest` and a
//! `parse_*` method consuming the matching `HttpResponse`. The caller runs
//! the round-trip in between.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Message, Todo, UpdateTodo};

/// Every successful operation answers 200.
const STATUS_OK: u16 = 200;
const STATUS_NOT_FOUND: u16 = 404;

/// Base URL of a server started with default settings.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: Uuid) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_root(&self) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Get, format!("{}/", self.base_url))
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Get, self.todos_url())
    }

    pub fn build_get_todo(&self, id: Uuid) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Get, self.todo_url(id))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(input).map_err(ClientError::Serialization)?;
        Ok(HttpRequest::json(HttpMethod::Post, self.todos_url(), body))
    }

    pub fn build_update_todo(
        &self,
        id: Uuid,
        input: &UpdateTodo,
    ) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(input).map_err(ClientError::Serialization)?;
        Ok(HttpRequest::json(HttpMethod::Put, self.todo_url(id), body))
    }

    pub fn build_delete_todo(&self, id: Uuid) -> HttpRequest {
        HttpRequest::bodiless(HttpMethod::Delete, self.todo_url(id))
    }

    pub fn parse_root(&self, response: HttpResponse) -> Result<Message, ClientError> {
        parse_ok(response)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ClientError> {
        parse_ok(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ClientError> {
        parse_ok(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ClientError> {
        parse_ok(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ClientError> {
        parse_ok(response)
    }

    /// The acknowledgment text is informational; only the status matters.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ClientError> {
        parse_ok::<Message>(response).map(|_| ())
    }
}

fn parse_ok<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ClientError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(ClientError::Deserialization)
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Map non-200 statuses to the matching `ClientError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ClientError> {
    match response.status {
        STATUS_OK => Ok(()),
        STATUS_NOT_FOUND => Err(ClientError::NotFound),
        status => {
            let detail = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .map(|b| match b.detail {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                });
            Err(ClientError::Http {
                status,
                body: response.body.clone(),
                detail,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODO_JSON: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","title":"Test","description":null,"completed":false,"created_at":"2024-01-15T10:00:00Z","updated_at":"2024-01-15T10:00:00Z"}"#;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:8000")
    }

    #[test]
    fn build_root_targets_banner() {
        let req = client().build_root();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/");
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:8000/todos/00000000-0000-0000-0000-000000000000"
        );
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_todo_sends_json() {
        let input = CreateTodo::new("Buy milk").with_description("2 litres");
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:8000/todos");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "title": "Buy milk", "description": "2 litres" })
        );
    }

    #[test]
    fn build_update_todo_sends_only_set_fields() {
        let input = UpdateTodo {
            title: Some("Updated".to_string()),
            ..UpdateTodo::default()
        };
        let req = client().build_update_todo(Uuid::nil(), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "title": "Updated" }));
    }

    #[test]
    fn build_delete_todo_has_no_body() {
        let req = client().build_delete_todo(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_get_todo_success() {
        let todo = client()
            .parse_get_todo(HttpResponse::new(200, TODO_JSON))
            .unwrap();
        assert_eq!(todo.title, "Test");
        assert!(todo.description.is_none());
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn parse_get_todo_not_found() {
        let response = HttpResponse::new(404, r#"{"detail":"Todo not found"}"#);
        let err = client().parse_get_todo(response).unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }

    #[test]
    fn parse_create_todo_rejects_other_success_codes() {
        let err = client()
            .parse_create_todo(HttpResponse::new(201, TODO_JSON))
            .unwrap_err();
        assert!(matches!(err, ClientError::Http { status: 201, .. }));
    }

    #[test]
    fn parse_create_todo_lifts_validation_detail() {
        let response = HttpResponse::new(422, r#"{"detail":"missing field `title`"}"#);
        match client().parse_create_todo(response).unwrap_err() {
            ClientError::Http { status, detail, .. } => {
                assert_eq!(status, 422);
                assert_eq!(detail.as_deref(), Some("missing field `title`"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_server_error_without_json_body() {
        let response = HttpResponse::new(500, "internal error");
        match client().parse_update_todo(response).unwrap_err() {
            ClientError::Http { status, body, detail } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
                assert!(detail.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_delete_todo_success() {
        let response = HttpResponse::new(200, r#"{"message":"Todo deleted"}"#);
        assert!(client().parse_delete_todo(response).is_ok());
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client()
            .parse_list_todos(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ClientError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:8000/");
        assert_eq!(client.build_list_todos().url, "http://localhost:8000/todos");
    }

    #[test]
    fn default_client_targets_local_server() {
        assert_eq!(TodoClient::default().base_url(), DEFAULT_BASE_URL);
    }
}
