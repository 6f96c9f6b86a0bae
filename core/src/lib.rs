//! Synchronous client for the Todoist REST API.
//!
//! # Overview
//! Every operation on projects, tasks, sections, and labels goes through
//! one dispatcher (`TodoistClient::call`). It looks up a named endpoint,
//! fills in the path template, attaches a bearer token, places the payload,
//! and maps 400/401/403/404 responses to `ApiError::Api`.
//!
//! # Design
//! - Request shaping and response classification are pure functions over
//!   `HttpRequest` / `HttpResponse`; only the `Transport` does I/O.
//! - `UreqTransport` is the default transport. Tests swap in scripted ones.
//! - A process-wide default token, seeded from `TODOIST_AUTH_TOKEN`, covers
//!   single-user programs; `with_token` covers everything else.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod color;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod labels;
pub mod priority;
pub mod projects;
pub mod sections;
pub mod tasks;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{classify_response, decode_json, expect_no_content, expect_success, Payload, TodoistClient};
pub use color::Color;
pub use config::{default_token, set_default_token, Config};
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use priority::Priority;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Label, LabelParams, Project, ProjectParams, Section, SectionParams, Task, TaskDue, TaskFilter, TaskParams,
};
