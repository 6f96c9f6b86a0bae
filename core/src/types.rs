//! Resource records and write payloads for the Todoist REST API.
//!
//! # Design
//! Records are what the server returns. Every field defaults, so a response
//! that omits optional data still decodes. Write payloads are separate
//! types whose unset fields are left out of the JSON, letting updates touch
//! only what the caller set.

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::Color;
use crate::priority::Priority;

/// Todoist sends `null` for an unset section or an empty count; read it as 0.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A project holds tasks and sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub comment_count: i64,
    pub order: i64,
    pub color: i64,
    pub shared: bool,
    pub sync_id: i64,
    pub favorite: bool,
    pub inbox_project: bool,
    pub team_inbox: bool,
    pub url: String,
    pub parent_id: Option<i64>,
}

impl Project {
    /// The palette entry for `color`, if the server sent a known one.
    pub fn palette_color(&self) -> Option<Color> {
        Color::try_from(self.color).ok()
    }
}

/// A single todo item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: i64,
    /// 0 when the task sits outside any section.
    #[serde(deserialize_with = "null_as_default")]
    pub section_id: i64,
    pub content: String,
    pub description: String,
    pub completed: bool,
    pub label_ids: Vec<i64>,
    pub parent_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub order: i64,
    pub priority: Priority,
    pub due: Option<TaskDue>,
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comment_count: i64,
    pub assignee: Option<i64>,
    pub assigner: Option<i64>,
}

/// Due date information attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDue {
    pub date: String,
    pub datetime: Option<String>,
    pub recurring: bool,
    pub string: String,
    pub timezone: Option<String>,
}

/// Divides a project into named groups of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: i64,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub id: i64,
    pub name: String,
    pub color: i64,
    pub order: i64,
    pub favorite: bool,
}

impl Label {
    pub fn palette_color(&self) -> Option<Color> {
        Color::try_from(self.color).ok()
    }
}

/// Payload for creating or updating a project. `name` is required on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectParams {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl ProjectParams {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Payload for creating or updating a task. `content` is required on create.
///
/// The due fields are alternatives; Todoist honors only one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
}

impl TaskParams {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

/// Payload for creating or updating a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Payload for creating or updating a label. `name` is required on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelParams {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

/// Query filters for listing active tasks. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: Option<i64>,
    pub section_id: Option<i64>,
    pub label_id: Option<i64>,
    /// A Todoist filter expression such as `today | overdue`.
    pub filter: Option<String>,
    pub lang: Option<String>,
    pub ids: Vec<i64>,
}

impl TaskFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                query.push((key.to_string(), value));
            }
        };
        push("project_id", self.project_id.map(|id| id.to_string()));
        push("section_id", self.section_id.map(|id| id.to_string()));
        push("label_id", self.label_id.map(|id| id.to_string()));
        push("filter", self.filter.clone());
        push("lang", self.lang.clone());
        if !self.ids.is_empty() {
            let ids: Vec<String> = self.ids.iter().map(i64::to_string).collect();
            push("ids", Some(ids.join(",")));
        }
        query
    }
}
