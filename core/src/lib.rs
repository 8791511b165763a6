//! Synchronous client core for the todo API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller executes the HTTP round-trip.
//!
//! # Design
//! - `TodoClient` holds only the base URL.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the crate has no async runtime dependency.
//! - DTOs are defined separately from the server crate.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{TodoClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Message, Todo, UpdateTodo};
