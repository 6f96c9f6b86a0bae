//! Project CRUD.

use crate::client::{decode_json, expect_no_content, expect_success, id_param, Payload, TodoistClient};
use crate::endpoint;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Project, ProjectParams};

impl<T: Transport> TodoistClient<T> {
    pub fn get_all_projects(&self) -> Result<Vec<Project>, ApiError> {
        let resp = self.call(self.token(), endpoint::GET_PROJECTS, &[], Payload::None)?;
        decode_json(resp)
    }

    /// Create a project. Only `name` is required.
    pub fn create_project(&self, input: &ProjectParams) -> Result<Project, ApiError> {
        if input.name.is_empty() {
            return Err(ApiError::InvalidInput("name is required".to_string()));
        }
        let resp = self.call(self.token(), endpoint::CREATE_PROJECT, &[], Payload::json(input)?)?;
        decode_json(resp)
    }

    pub fn get_project(&self, project_id: i64) -> Result<Project, ApiError> {
        let resp = self.call(self.token(), endpoint::GET_PROJECT, &id_param(project_id), Payload::None)?;
        decode_json(resp)
    }

    /// Update name, color, or favorite, then fetch the result.
    pub fn update_project(&self, project_id: i64, input: &ProjectParams) -> Result<Project, ApiError> {
        // Todoist answers "invalid id" unless the id is repeated in the body.
        let mut body = Payload::json(input)?;
        if let Payload::Json(serde_json::Value::Object(fields)) = &mut body {
            fields.insert("id".to_string(), project_id.into());
        }
        let resp = self.call(self.token(), endpoint::UPDATE_PROJECT, &id_param(project_id), body)?;
        expect_success(resp)?;
        self.get_project(project_id)
    }

    pub fn delete_project(&self, project_id: i64) -> Result<(), ApiError> {
        let resp = self.call(self.token(), endpoint::DELETE_PROJECT, &id_param(project_id), Payload::None)?;
        expect_no_content(resp)
    }
}
