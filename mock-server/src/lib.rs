use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const INBOX_ID: i64 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub color: i64,
    pub order: i64,
    pub favorite: bool,
    pub inbox_project: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub comment_count: i64,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub section_id: i64,
    pub content: String,
    pub description: String,
    pub completed: bool,
    pub label_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub order: i64,
    pub priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<Due>,
    pub url: String,
    pub comment_count: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Due {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    pub recurring: bool,
    pub string: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub order: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
    pub color: i64,
    pub order: i64,
    pub favorite: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectInput {
    pub name: Option<String>,
    pub color: Option<i64>,
    pub favorite: Option<bool>,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskInput {
    pub content: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub section_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub order: Option<i64>,
    pub label_ids: Option<Vec<i64>>,
    pub priority: Option<u8>,
    pub due_string: Option<String>,
    pub due_date: Option<String>,
    pub due_datetime: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SectionInput {
    pub name: Option<String>,
    pub project_id: Option<i64>,
    pub order: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LabelInput {
    pub name: Option<String>,
    pub color: Option<i64>,
    pub order: Option<i64>,
    pub favorite: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub project_id: Option<i64>,
    pub section_id: Option<i64>,
    pub label_id: Option<i64>,
    pub ids: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SectionQuery {
    pub project_id: Option<i64>,
}

/// In-memory account. Starts with an inbox project.
#[derive(Debug)]
pub struct Store {
    next_id: i64,
    pub projects: BTreeMap<i64, Project>,
    pub tasks: BTreeMap<i64, Task>,
    pub sections: BTreeMap<i64, Section>,
    pub labels: BTreeMap<i64, Label>,
}

impl Default for Store {
    fn default() -> Self {
        let inbox = Project {
            id: INBOX_ID,
            name: "Inbox".to_string(),
            color: 48,
            order: 0,
            favorite: false,
            inbox_project: true,
            parent_id: None,
            comment_count: 0,
            url: format!("https://todoist.com/showProject?id={INBOX_ID}"),
        };
        Self {
            next_id: 1000,
            projects: BTreeMap::from([(INBOX_ID, inbox)]),
            tasks: BTreeMap::new(),
            sections: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    store: Arc<RwLock<Store>>,
}

type Reply<T> = Result<T, (StatusCode, String)>;

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

fn bad_request(message: &str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, message.to_string())
}

/// Router that accepts only `Bearer <token>`.
pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        store: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).post(update_project).delete(delete_project),
        )
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).post(update_task).delete(delete_task))
        .route("/tasks/{id}/close", post(close_task))
        .route("/tasks/{id}/reopen", post(reopen_task))
        .route("/sections", get(list_sections).post(create_section))
        .route(
            "/sections/{id}",
            get(get_section).post(update_section).delete(delete_section),
        )
        .route("/labels", get(list_labels).post(create_label))
        .route("/labels/{id}", get(get_label).post(update_label).delete(delete_label))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let supplied = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or_default();
    if supplied.is_empty() {
        return (StatusCode::UNAUTHORIZED, "Empty token").into_response();
    }
    if supplied != &*state.token {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }
    next.run(request).await
}

// --- projects ---

async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    let store = state.store.read().await;
    Json(store.projects.values().cloned().collect())
}

async fn create_project(State(state): State<AppState>, Json(input): Json<ProjectInput>) -> Reply<Json<Project>> {
    let name = input
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| bad_request("Name must be provided for the project creation"))?;
    let mut store = state.store.write().await;
    if let Some(parent) = input.parent_id {
        if !store.projects.contains_key(&parent) {
            return Err(bad_request("Parent project not found"));
        }
    }
    let id = store.allocate_id();
    let project = Project {
        id,
        name,
        color: input.color.unwrap_or(47),
        order: store.projects.len() as i64,
        favorite: input.favorite.unwrap_or(false),
        inbox_project: false,
        parent_id: input.parent_id,
        comment_count: 0,
        url: format!("https://todoist.com/showProject?id={id}"),
    };
    store.projects.insert(id, project.clone());
    Ok(Json(project))
}

async fn get_project(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<Json<Project>> {
    let store = state.store.read().await;
    store.projects.get(&id).cloned().map(Json).ok_or_else(|| not_found("Project"))
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ProjectInput>,
) -> Reply<StatusCode> {
    let mut store = state.store.write().await;
    let project = store.projects.get_mut(&id).ok_or_else(|| not_found("Project"))?;
    if let Some(name) = input.name.filter(|n| !n.is_empty()) {
        project.name = name;
    }
    if let Some(color) = input.color {
        project.color = color;
    }
    if let Some(favorite) = input.favorite {
        project.favorite = favorite;
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_project(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<StatusCode> {
    if id == INBOX_ID {
        return Err(bad_request("Inbox project cannot be deleted"));
    }
    let mut store = state.store.write().await;
    store.projects.remove(&id).ok_or_else(|| not_found("Project"))?;
    store.sections.retain(|_, s| s.project_id != id);
    store.tasks.retain(|_, t| t.project_id != id);
    Ok(StatusCode::NO_CONTENT)
}

// --- tasks ---

fn due_from(input: &TaskInput) -> Option<Due> {
    if let Some(datetime) = &input.due_datetime {
        let date = datetime.split('T').next().unwrap_or_default().to_string();
        return Some(Due {
            string: date.clone(),
            date,
            datetime: Some(datetime.clone()),
            recurring: false,
        });
    }
    if let Some(date) = &input.due_date {
        return Some(Due {
            date: date.clone(),
            datetime: None,
            recurring: false,
            string: date.clone(),
        });
    }
    input.due_string.as_ref().map(|s| Due {
        date: String::new(),
        datetime: None,
        recurring: s.starts_with("every"),
        string: s.clone(),
    })
}

async fn list_tasks(State(state): State<AppState>, Query(query): Query<TaskQuery>) -> Reply<Json<Vec<Task>>> {
    let ids: Option<Vec<i64>> = query
        .ids
        .as_deref()
        .map(|ids| ids.split(',').map(|id| id.trim().parse::<i64>()).collect::<Result<Vec<_>, _>>())
        .transpose()
        .map_err(|_| bad_request("ids must be a comma separated list of integers"))?;
    let store = state.store.read().await;
    let tasks = store
        .tasks
        .values()
        .filter(|t| !t.completed)
        .filter(|t| query.project_id.is_none_or(|p| t.project_id == p))
        .filter(|t| query.section_id.is_none_or(|s| t.section_id == s))
        .filter(|t| query.label_id.is_none_or(|l| t.label_ids.contains(&l)))
        .filter(|t| ids.as_ref().is_none_or(|ids| ids.contains(&t.id)))
        .cloned()
        .collect();
    Ok(Json(tasks))
}

async fn create_task(State(state): State<AppState>, Json(input): Json<TaskInput>) -> Reply<Json<Task>> {
    let content = input
        .content
        .clone()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| bad_request("Content must be provided"))?;
    let priority = input.priority.unwrap_or(1);
    if !(1..=4).contains(&priority) {
        return Err(bad_request("Invalid argument value: priority"));
    }
    let mut store = state.store.write().await;
    let project_id = input.project_id.unwrap_or(INBOX_ID);
    if !store.projects.contains_key(&project_id) {
        return Err(bad_request("Project not found"));
    }
    let section_id = input.section_id.unwrap_or(0);
    if section_id != 0 && !store.sections.contains_key(&section_id) {
        return Err(bad_request("Section not found"));
    }
    let id = store.allocate_id();
    let task = Task {
        id,
        project_id,
        section_id,
        content,
        description: input.description.clone().unwrap_or_default(),
        completed: false,
        label_ids: input.label_ids.clone().unwrap_or_default(),
        parent_id: input.parent_id,
        order: input.order.unwrap_or(store.tasks.len() as i64 + 1),
        priority,
        due: due_from(&input),
        url: format!("https://todoist.com/showTask?id={id}"),
        comment_count: 0,
    };
    store.tasks.insert(id, task.clone());
    Ok(Json(task))
}

async fn get_task(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<Json<Task>> {
    let store = state.store.read().await;
    store
        .tasks
        .get(&id)
        .filter(|t| !t.completed)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Task"))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<TaskInput>,
) -> Reply<StatusCode> {
    if input.priority.is_some_and(|p| !(1..=4).contains(&p)) {
        return Err(bad_request("Invalid argument value: priority"));
    }
    let mut store = state.store.write().await;
    let task = store
        .tasks
        .get_mut(&id)
        .filter(|t| !t.completed)
        .ok_or_else(|| not_found("Task"))?;
    if let Some(content) = input.content.clone().filter(|c| !c.is_empty()) {
        task.content = content;
    }
    if let Some(description) = input.description.clone() {
        task.description = description;
    }
    if let Some(label_ids) = input.label_ids.clone() {
        task.label_ids = label_ids;
    }
    if let Some(priority) = input.priority {
        task.priority = priority;
    }
    if let Some(due) = due_from(&input) {
        task.due = Some(due);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_task(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<StatusCode> {
    let mut store = state.store.write().await;
    store.tasks.remove(&id).ok_or_else(|| not_found("Task"))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_completed(state: &AppState, id: i64, completed: bool) -> Reply<StatusCode> {
    let mut store = state.store.write().await;
    let task = store.tasks.get_mut(&id).ok_or_else(|| not_found("Task"))?;
    task.completed = completed;
    Ok(StatusCode::NO_CONTENT)
}

async fn close_task(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<StatusCode> {
    set_completed(&state, id, true).await
}

async fn reopen_task(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<StatusCode> {
    set_completed(&state, id, false).await
}

// --- sections ---

async fn list_sections(State(state): State<AppState>, Query(query): Query<SectionQuery>) -> Json<Vec<Section>> {
    let store = state.store.read().await;
    Json(
        store
            .sections
            .values()
            .filter(|s| query.project_id.is_none_or(|p| s.project_id == p))
            .cloned()
            .collect(),
    )
}

async fn create_section(State(state): State<AppState>, Json(input): Json<SectionInput>) -> Reply<Json<Section>> {
    let name = input
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| bad_request("Name must be provided for the section creation"))?;
    let project_id = input
        .project_id
        .ok_or_else(|| bad_request("project_id must be provided for the section creation"))?;
    let mut store = state.store.write().await;
    if !store.projects.contains_key(&project_id) {
        return Err(bad_request("Project not found"));
    }
    let id = store.allocate_id();
    let section = Section {
        id,
        project_id,
        name,
        order: input.order.unwrap_or(store.sections.len() as i64 + 1),
    };
    store.sections.insert(id, section.clone());
    Ok(Json(section))
}

async fn get_section(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<Json<Section>> {
    let store = state.store.read().await;
    store.sections.get(&id).cloned().map(Json).ok_or_else(|| not_found("Section"))
}

async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<SectionInput>,
) -> Reply<StatusCode> {
    let name = input
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| bad_request("Name must be provided"))?;
    let mut store = state.store.write().await;
    let section = store.sections.get_mut(&id).ok_or_else(|| not_found("Section"))?;
    section.name = name;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_section(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<StatusCode> {
    let mut store = state.store.write().await;
    store.sections.remove(&id).ok_or_else(|| not_found("Section"))?;
    store.tasks.retain(|_, t| t.section_id != id);
    Ok(StatusCode::NO_CONTENT)
}

// --- labels ---

async fn list_labels(State(state): State<AppState>) -> Json<Vec<Label>> {
    let store = state.store.read().await;
    Json(store.labels.values().cloned().collect())
}

async fn create_label(State(state): State<AppState>, Json(input): Json<LabelInput>) -> Reply<Json<Label>> {
    let name = input
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| bad_request("Name must be provided for the label creation"))?;
    let mut store = state.store.write().await;
    if store.labels.values().any(|l| l.name == name) {
        return Err(bad_request("Label already exists"));
    }
    let id = store.allocate_id();
    let label = Label {
        id,
        name,
        color: input.color.unwrap_or(47),
        order: input.order.unwrap_or(store.labels.len() as i64 + 1),
        favorite: input.favorite.unwrap_or(false),
    };
    store.labels.insert(id, label.clone());
    Ok(Json(label))
}

async fn get_label(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<Json<Label>> {
    let store = state.store.read().await;
    store.labels.get(&id).cloned().map(Json).ok_or_else(|| not_found("Label"))
}

async fn update_label(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<LabelInput>,
) -> Reply<StatusCode> {
    let mut store = state.store.write().await;
    let label = store.labels.get_mut(&id).ok_or_else(|| not_found("Label"))?;
    if let Some(name) = input.name.filter(|n| !n.is_empty()) {
        label.name = name;
    }
    if let Some(color) = input.color {
        label.color = color;
    }
    if let Some(order) = input.order {
        label.order = order;
    }
    if let Some(favorite) = input.favorite {
        label.favorite = favorite;
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_label(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<StatusCode> {
    let mut store = state.store.write().await;
    store.labels.remove(&id).ok_or_else(|| not_found("Label"))?;
    for task in store.tasks.values_mut() {
        task.label_ids.retain(|l| *l != id);
    }
    Ok(StatusCode::NO_CONTENT)
}
