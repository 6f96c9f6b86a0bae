//! Section CRUD.

use crate::client::{decode_json, expect_no_content, expect_success, id_param, Payload, TodoistClient};
use crate::endpoint;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Section, SectionParams};

impl<T: Transport> TodoistClient<T> {
    /// All sections, or only those of `project_id` when it is non-zero.
    pub fn get_all_sections(&self, project_id: i64) -> Result<Vec<Section>, ApiError> {
        let payload = if project_id != 0 {
            Payload::Query(vec![("project_id".to_string(), project_id.to_string())])
        } else {
            Payload::None
        };
        let resp = self.call(self.token(), endpoint::GET_ALL_SECTIONS, &[], payload)?;
        decode_json(resp)
    }

    /// Create a section. Both `name` and `project_id` are required.
    pub fn create_section(&self, input: &SectionParams) -> Result<Section, ApiError> {
        if input.name.is_empty() || input.project_id.unwrap_or(0) == 0 {
            return Err(ApiError::InvalidInput("name and project_id are required".to_string()));
        }
        let resp = self.call(self.token(), endpoint::CREATE_SECTION, &[], Payload::json(input)?)?;
        decode_json(resp)
    }

    pub fn get_section(&self, section_id: i64) -> Result<Section, ApiError> {
        let resp = self.call(self.token(), endpoint::GET_SECTION, &id_param(section_id), Payload::None)?;
        decode_json(resp)
    }

    /// Rename a section. Todoist only allows the name to change.
    pub fn update_section(&self, section_id: i64, input: &SectionParams) -> Result<Section, ApiError> {
        if input.name.is_empty() {
            return Err(ApiError::InvalidInput("name is required".to_string()));
        }
        let resp = self.call(self.token(), endpoint::UPDATE_SECTION, &id_param(section_id), Payload::json(input)?)?;
        expect_success(resp)?;
        self.get_section(section_id)
    }

    pub fn delete_section(&self, section_id: i64) -> Result<(), ApiError> {
        let resp = self.call(self.token(), endpoint::DELETE_SECTION, &id_param(section_id), Payload::None)?;
        expect_no_content(resp)
    }
}
