//! Task CRUD plus closing and reopening.

use crate::client::{decode_json, expect_no_content, expect_success, id_param, Payload, TodoistClient};
use crate::endpoint;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Task, TaskFilter, TaskParams};

impl<T: Transport> TodoistClient<T> {
    /// Active (not closed) tasks, narrowed by `filter`.
    pub fn get_active_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        let query = filter.to_query();
        let payload = if query.is_empty() { Payload::None } else { Payload::Query(query) };
        let resp = self.call(self.token(), endpoint::GET_TASKS, &[], payload)?;
        decode_json(resp)
    }

    /// Create a task. Only `content` is required.
    pub fn create_task(&self, input: &TaskParams) -> Result<Task, ApiError> {
        if input.content.as_deref().unwrap_or_default().is_empty() {
            return Err(ApiError::InvalidInput("content is required".to_string()));
        }
        let resp = self.call(self.token(), endpoint::CREATE_TASK, &[], Payload::json(input)?)?;
        decode_json(resp)
    }

    /// Fetch an active task. Closed tasks answer 404.
    pub fn get_active_task(&self, task_id: i64) -> Result<Task, ApiError> {
        let resp = self.call(self.token(), endpoint::GET_TASK, &id_param(task_id), Payload::None)?;
        decode_json(resp)
    }

    pub fn update_task(&self, task_id: i64, input: &TaskParams) -> Result<Task, ApiError> {
        let resp = self.call(self.token(), endpoint::UPDATE_TASK, &id_param(task_id), Payload::json(input)?)?;
        expect_success(resp)?;
        self.get_active_task(task_id)
    }

    pub fn delete_task(&self, task_id: i64) -> Result<(), ApiError> {
        let resp = self.call(self.token(), endpoint::DELETE_TASK, &id_param(task_id), Payload::None)?;
        expect_no_content(resp)
    }

    /// Complete a task. Root tasks move to history; subtasks are checked off.
    pub fn close_task(&self, task_id: i64) -> Result<(), ApiError> {
        let resp = self.call(self.token(), endpoint::CLOSE_TASK, &id_param(task_id), Payload::None)?;
        expect_no_content(resp)
    }

    pub fn reopen_task(&self, task_id: i64) -> Result<(), ApiError> {
        let resp = self.call(self.token(), endpoint::REOPEN_TASK, &id_param(task_id), Payload::None)?;
        expect_no_content(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::priority::Priority;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    fn client(transport: &ScriptedTransport) -> TodoistClient<&ScriptedTransport> {
        TodoistClient::new()
            .with_base_url("http://localhost:3000")
            .with_token("secret")
            .with_transport(transport)
    }

    #[test]
    fn create_task_requires_content() {
        let transport = ScriptedTransport::new(vec![]);
        let c = client(&transport);
        for params in [TaskParams::default(), TaskParams::with_content("")] {
            let err = c.create_task(&params).unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput(msg) if msg == "content is required"));
        }
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn create_task_posts_params() {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(
            200,
            r#"{"id":11,"project_id":3,"content":"Call mom","priority":4}"#,
        )]);
        let params = TaskParams {
            project_id: Some(3),
            priority: Some(Priority::Urgent),
            due_string: Some("tomorrow at 12".to_string()),
            ..TaskParams::with_content("Call mom")
        };
        let task = client(&transport).create_task(&params).unwrap();
        assert_eq!(task.id, 11);
        assert_eq!(task.priority, Priority::Urgent);

        let sent = &transport.requests()[0];
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"content": "Call mom", "project_id": 3, "priority": 4, "due_string": "tomorrow at 12"})
        );
    }

    #[test]
    fn get_active_tasks_sends_filter_as_query() {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(200, "[]")]);
        let filter = TaskFilter {
            project_id: Some(3),
            label_id: Some(8),
            ..TaskFilter::default()
        };
        let tasks = client(&transport).get_active_tasks(&filter).unwrap();
        assert!(tasks.is_empty());

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.path, "http://localhost:3000/tasks");
        assert_eq!(
            sent.query,
            vec![
                ("project_id".to_string(), "3".to_string()),
                ("label_id".to_string(), "8".to_string()),
            ]
        );
    }

    #[test]
    fn update_task_refetches() {
        let transport = ScriptedTransport::new(vec![
            HttpResponse::new(204, ""),
            HttpResponse::new(200, r#"{"id":11,"content":"Updated"}"#),
        ]);
        let task = client(&transport)
            .update_task(11, &TaskParams::with_content("Updated"))
            .unwrap();
        assert_eq!(task.content, "Updated");

        let sent = transport.requests();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].path, "http://localhost:3000/tasks/11");
        assert_eq!(sent[1].method, HttpMethod::Get);
        assert_eq!(sent[1].path, "http://localhost:3000/tasks/11");
    }

    #[test]
    fn update_task_surfaces_server_error() {
        let transport = ScriptedTransport::new(vec![
            HttpResponse::new(500, "Service Unavailable"),
            HttpResponse::new(200, r#"{"id":11,"content":"Old"}"#),
        ]);
        let err = client(&transport)
            .update_task(11, &TaskParams::with_content("New"))
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 500, .. }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn close_and_reopen_hit_their_endpoints() {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(204, ""), HttpResponse::new(204, "")]);
        let c = client(&transport);
        c.close_task(11).unwrap();
        c.reopen_task(11).unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].path, "http://localhost:3000/tasks/11/close");
        assert_eq!(sent[1].path, "http://localhost:3000/tasks/11/reopen");
        assert!(sent.iter().all(|r| r.method == HttpMethod::Post && r.body.is_none()));
    }

    #[test]
    fn close_unknown_task_is_api_error() {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(404, "Task not found")]);
        let err = client(&transport).close_task(-1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn delete_task_rejects_other_success_codes() {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(200, "")]);
        let err = client(&transport).delete_task(11).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 200, .. }));
    }

    #[test]
    fn forbidden_is_reported_with_body() {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(403, "Forbidden")]);
        let err = client(&transport).get_active_task(11).unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 403, ref message } if message == "Forbidden"));
    }
}
