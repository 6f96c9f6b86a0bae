//! Label CRUD.

use crate::client::{decode_json, expect_no_content, expect_success, id_param, Payload, TodoistClient};
use crate::endpoint;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Label, LabelParams};

impl<T: Transport> TodoistClient<T> {
    pub fn get_all_labels(&self) -> Result<Vec<Label>, ApiError> {
        let resp = self.call(self.token(), endpoint::GET_ALL_LABELS, &[], Payload::None)?;
        decode_json(resp)
    }

    pub fn create_label(&self, input: &LabelParams) -> Result<Label, ApiError> {
        if input.name.is_empty() {
            return Err(ApiError::InvalidInput("name is required".to_string()));
        }
        let resp = self.call(self.token(), endpoint::CREATE_LABEL, &[], Payload::json(input)?)?;
        decode_json(resp)
    }

    pub fn get_label(&self, label_id: i64) -> Result<Label, ApiError> {
        let resp = self.call(self.token(), endpoint::GET_LABEL, &id_param(label_id), Payload::None)?;
        decode_json(resp)
    }

    pub fn update_label(&self, label_id: i64, input: &LabelParams) -> Result<Label, ApiError> {
        let resp = self.call(self.token(), endpoint::UPDATE_LABEL, &id_param(label_id), Payload::json(input)?)?;
        expect_success(resp)?;
        self.get_label(label_id)
    }

    pub fn delete_label(&self, label_id: i64) -> Result<(), ApiError> {
        let resp = self.call(self.token(), endpoint::DELETE_LABEL, &id_param(label_id), Payload::None)?;
        expect_no_content(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::http::HttpResponse;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    fn client(transport: &ScriptedTransport) -> TodoistClient<&ScriptedTransport> {
        TodoistClient::new()
            .with_base_url("http://localhost:3000")
            .with_token("secret")
            .with_transport(transport)
    }

    #[test]
    fn create_label_requires_name() {
        let transport = ScriptedTransport::new(vec![]);
        let err = client(&transport).create_label(&LabelParams::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn create_label_round_trip() {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(
            200,
            r#"{"id":2156154810,"name":"Food","color":32,"order":1,"favorite":false}"#,
        )]);
        let params = LabelParams {
            name: "Food".to_string(),
            color: Some(Color::Orange),
            ..LabelParams::default()
        };
        let label = client(&transport).create_label(&params).unwrap();
        assert_eq!(label.palette_color(), Some(Color::Orange));

        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "Food", "color": 32}));
    }

    #[test]
    fn update_label_allows_partial_changes() {
        let transport = ScriptedTransport::new(vec![
            HttpResponse::new(204, ""),
            HttpResponse::new(200, r#"{"id":5,"name":"Food","favorite":true}"#),
        ]);
        let params = LabelParams {
            favorite: Some(true),
            ..LabelParams::default()
        };
        let label = client(&transport).update_label(5, &params).unwrap();
        assert!(label.favorite);

        let body: serde_json::Value =
            serde_json::from_str(transport.requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"favorite": true}));
    }

    #[test]
    fn update_label_surfaces_server_error() {
        let transport = ScriptedTransport::new(vec![
            HttpResponse::new(500, "Service Unavailable"),
            HttpResponse::new(200, r#"{"id":5,"name":"Food"}"#),
        ]);
        let params = LabelParams {
            favorite: Some(true),
            ..LabelParams::default()
        };
        let err = client(&transport).update_label(5, &params).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 500, .. }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn get_all_labels_unauthorized() {
        let transport = ScriptedTransport::new(vec![HttpResponse::new(401, "Empty token\n")]);
        let err = client(&transport).get_all_labels().unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Empty token");
    }
}
