//! Static registry of the Todoist REST endpoints this client speaks.
//!
//! Each endpoint is a named `(path template, method)` pair. Templates use
//! `:name` placeholders that `Endpoint::resolve_path` fills in at call time.

use crate::error::ApiError;
use crate::http::HttpMethod;

pub const GET_PROJECTS: &str = "GetProjects";
pub const CREATE_PROJECT: &str = "CreateProject";
pub const GET_PROJECT: &str = "GetProject";
pub const UPDATE_PROJECT: &str = "UpdateProject";
pub const DELETE_PROJECT: &str = "DeleteProject";

pub const GET_TASKS: &str = "GetTasks";
pub const CREATE_TASK: &str = "CreateTask";
pub const GET_TASK: &str = "GetTask";
pub const UPDATE_TASK: &str = "UpdateTask";
pub const DELETE_TASK: &str = "DeleteTask";
pub const CLOSE_TASK: &str = "CloseTask";
pub const REOPEN_TASK: &str = "ReopenTask";

pub const GET_ALL_SECTIONS: &str = "GetAllSections";
pub const GET_SECTION: &str = "GetSection";
pub const CREATE_SECTION: &str = "CreateSection";
pub const UPDATE_SECTION: &str = "UpdateSection";
pub const DELETE_SECTION: &str = "DeleteSection";

pub const GET_ALL_LABELS: &str = "GetAllLabels";
pub const GET_LABEL: &str = "GetLabel";
pub const CREATE_LABEL: &str = "CreateLabel";
pub const UPDATE_LABEL: &str = "UpdateLabel";
pub const DELETE_LABEL: &str = "DeleteLabel";

/// A single call of the Todoist API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub path: &'static str,
    pub method: HttpMethod,
    pub path_params: &'static [&'static str],
}

const ID: &[&str] = &["id"];
const NONE: &[&str] = &[];

const fn ep(
    name: &'static str,
    path: &'static str,
    method: HttpMethod,
    path_params: &'static [&'static str],
) -> Endpoint {
    Endpoint {
        name,
        path,
        method,
        path_params,
    }
}

/// Every endpoint the client knows about. Updates are POSTs in REST v1.
pub static ENDPOINTS: &[Endpoint] = &[
    ep(GET_PROJECTS, "/projects", HttpMethod::Get, NONE),
    ep(CREATE_PROJECT, "/projects", HttpMethod::Post, NONE),
    ep(GET_PROJECT, "/projects/:id", HttpMethod::Get, ID),
    ep(UPDATE_PROJECT, "/projects/:id", HttpMethod::Post, ID),
    ep(DELETE_PROJECT, "/projects/:id", HttpMethod::Delete, ID),
    ep(GET_TASKS, "/tasks", HttpMethod::Get, NONE),
    ep(CREATE_TASK, "/tasks", HttpMethod::Post, NONE),
    ep(GET_TASK, "/tasks/:id", HttpMethod::Get, ID),
    ep(UPDATE_TASK, "/tasks/:id", HttpMethod::Post, ID),
    ep(DELETE_TASK, "/tasks/:id", HttpMethod::Delete, ID),
    ep(CLOSE_TASK, "/tasks/:id/close", HttpMethod::Post, ID),
    ep(REOPEN_TASK, "/tasks/:id/reopen", HttpMethod::Post, ID),
    ep(GET_ALL_SECTIONS, "/sections", HttpMethod::Get, NONE),
    ep(CREATE_SECTION, "/sections", HttpMethod::Post, NONE),
    ep(GET_SECTION, "/sections/:id", HttpMethod::Get, ID),
    ep(UPDATE_SECTION, "/sections/:id", HttpMethod::Post, ID),
    ep(DELETE_SECTION, "/sections/:id", HttpMethod::Delete, ID),
    ep(GET_ALL_LABELS, "/labels", HttpMethod::Get, NONE),
    ep(CREATE_LABEL, "/labels", HttpMethod::Post, NONE),
    ep(GET_LABEL, "/labels/:id", HttpMethod::Get, ID),
    ep(UPDATE_LABEL, "/labels/:id", HttpMethod::Post, ID),
    ep(DELETE_LABEL, "/labels/:id", HttpMethod::Delete, ID),
];

/// Find an endpoint by name.
pub fn lookup(name: &str) -> Result<&'static Endpoint, ApiError> {
    ENDPOINTS
        .iter()
        .find(|ep| ep.name == name)
        .ok_or_else(|| ApiError::EndpointNotFound(name.to_string()))
}

impl Endpoint {
    /// Substitute every declared `:param` in the template.
    ///
    /// Parameters not declared by the endpoint are ignored.
    pub fn resolve_path(&self, params: &[(&str, String)]) -> Result<String, ApiError> {
        let mut path = self.path.to_string();
        for &name in self.path_params {
            let value = params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| {
                    ApiError::InvalidInput(format!("missing path parameter `{name}` for {}", self.name))
                })?;
            path = path.replace(&format!(":{name}"), value);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_registered_endpoint() {
        let ep = lookup(CLOSE_TASK).unwrap();
        assert_eq!(ep.path, "/tasks/:id/close");
        assert_eq!(ep.method, HttpMethod::Post);
        assert_eq!(ep.path_params, &["id"]);
    }

    #[test]
    fn lookup_unknown_name_fails() {
        let err = lookup("EndpointNameDoesNotExist").unwrap_err();
        assert!(matches!(err, ApiError::EndpointNotFound(name) if name == "EndpointNameDoesNotExist"));
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in ENDPOINTS.iter().enumerate() {
            for b in &ENDPOINTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn declared_params_appear_in_templates() {
        for ep in ENDPOINTS {
            for param in ep.path_params {
                assert!(ep.path.contains(&format!(":{param}")), "{}", ep.name);
            }
        }
    }

    #[test]
    fn resolve_path_substitutes_id() {
        let ep = lookup(REOPEN_TASK).unwrap();
        let path = ep.resolve_path(&[("id", "42".to_string())]).unwrap();
        assert_eq!(path, "/tasks/42/reopen");
    }

    #[test]
    fn resolve_path_ignores_extra_params() {
        let ep = lookup(GET_PROJECTS).unwrap();
        let path = ep.resolve_path(&[("id", "7".to_string())]).unwrap();
        assert_eq!(path, "/projects");
    }

    #[test]
    fn resolve_path_requires_declared_params() {
        let ep = lookup(GET_LABEL).unwrap();
        let err = ep.resolve_path(&[]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }
}
