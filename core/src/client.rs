//! The generic call dispatcher every resource operation goes through.
//!
//! # Design
//! `TodoistClient` holds a base URL, an optional token, and a `Transport`.
//! A call is split the way the rest of the crate is: `build_call` turns an
//! endpoint name plus parameters into a plain `HttpRequest`, the transport
//! executes it, and `classify_response` maps the status code onto
//! `ApiError`. Only the middle step does I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{self, Config};
use crate::endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Request payload, placed according to the endpoint's method.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    None,
    /// Query parameters; valid for GET and DELETE.
    Query(Vec<(String, String)>),
    /// JSON body; valid for POST.
    Json(serde_json::Value),
}

impl Payload {
    pub fn json<S: Serialize>(value: &S) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

/// Synchronous client for the Todoist REST API.
#[derive(Debug, Clone)]
pub struct TodoistClient<T = UreqTransport> {
    base_url: String,
    token: Option<String>,
    transport: T,
}

impl TodoistClient<UreqTransport> {
    /// Client against the public API, authenticating with the process-wide
    /// default token.
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.auth_token.filter(|t| !t.is_empty()),
            transport: UreqTransport::new(),
        }
    }
}

impl Default for TodoistClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TodoistClient<T> {
    /// Authenticate every call with `token` instead of the default.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into()).filter(|t| !t.is_empty());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_transport<U>(self, transport: U) -> TodoistClient<U> {
        TodoistClient {
            base_url: self.base_url,
            token: self.token,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Resolve a named endpoint into a ready-to-send request.
    ///
    /// `token` wins when non-empty; otherwise the process-wide default is
    /// used. With neither, the call fails before any I/O.
    pub fn build_call(
        &self,
        token: Option<&str>,
        endpoint_name: &str,
        path_params: &[(&str, String)],
        payload: Payload,
    ) -> Result<HttpRequest, ApiError> {
        let ep = endpoint::lookup(endpoint_name)?;
        let path = format!("{}{}", self.base_url, ep.resolve_path(path_params)?);

        let token = match token.filter(|t| !t.is_empty()) {
            Some(t) => t.to_string(),
            None => config::default_token().ok_or(ApiError::MissingToken)?,
        };
        let mut headers = vec![("authorization".to_string(), format!("Bearer {token}"))];

        let mut query = Vec::new();
        let mut body = None;
        match payload {
            Payload::None => {}
            Payload::Query(params) if ep.method.takes_query() => query = params,
            Payload::Json(value) if !ep.method.takes_query() => {
                headers.push(("content-type".to_string(), "application/json".to_string()));
                body = Some(value.to_string());
            }
            Payload::Query(_) => {
                return Err(ApiError::InvalidInput(format!(
                    "{} is a {} endpoint and takes a JSON body, not query parameters",
                    ep.name, ep.method
                )));
            }
            Payload::Json(_) => {
                return Err(ApiError::InvalidInput(format!(
                    "{} is a {} endpoint and takes query parameters, not a JSON body",
                    ep.name, ep.method
                )));
            }
        }

        Ok(HttpRequest {
            method: ep.method,
            path,
            query,
            headers,
            body,
        })
    }
}

impl<T: Transport> TodoistClient<T> {
    /// Build, execute, and classify a single call.
    pub fn call(
        &self,
        token: Option<&str>,
        endpoint_name: &str,
        path_params: &[(&str, String)],
        payload: Payload,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_call(token, endpoint_name, path_params, payload)?;
        log::debug!("{endpoint_name}: {} {}", request.method, request.path);
        let response = self.transport.execute(request)?;
        classify_response(response).inspect_err(|e| {
            log::warn!("{endpoint_name} failed: {e}");
        })
    }
}

/// Map 400/401/403/404 to `ApiError::Api`; pass everything else through.
pub fn classify_response(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    match response.status {
        400 | 401 | 403 | 404 => Err(ApiError::Api {
            status: response.status,
            message: response.body.trim_end_matches(['\n', '\r']).to_string(),
        }),
        _ => Ok(response),
    }
}

/// Decode a 2xx JSON body.
pub fn decode_json<D: DeserializeOwned>(response: HttpResponse) -> Result<D, ApiError> {
    if !response.is_success() {
        return Err(ApiError::UnexpectedStatus {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Succeeds on any 2xx; the answer to updates, whose body is ignored.
pub fn expect_success(response: HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::UnexpectedStatus {
        status: response.status,
        body: response.body,
    })
}

/// Succeeds only on 204, the answer to deletes and state changes.
pub fn expect_no_content(response: HttpResponse) -> Result<(), ApiError> {
    if response.status == 204 {
        return Ok(());
    }
    Err(ApiError::UnexpectedStatus {
        status: response.status,
        body: response.body,
    })
}

pub(crate) fn id_param(id: i64) -> [(&'static str, String); 1] {
    [("id", id.to_string())]
}
