use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Token `/variables` accepts by default.
pub const ADMIN_TOKEN: &str = "secret-token";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Variable {
    pub id: Uuid,
    pub key: String,
    pub name: Option<String>,
    pub value: Option<String>,
    pub notes: Option<String>,
}

/// What `/echo` saw: everything the client put on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

#[derive(Default)]
struct Store {
    todos: Vec<Todo>,
    next_id: u64,
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
    variables: Arc<Vec<Variable>>,
    admin_token: Arc<str>,
}

pub fn app() -> Router {
    app_with_token(ADMIN_TOKEN)
}

pub fn app_with_token(admin_token: &str) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store {
            todos: Vec::new(),
            next_id: 1,
        })),
        variables: Arc::new(seed_variables()),
        admin_token: Arc::from(admin_token),
    };
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo))
        .route("/variables", get(list_variables))
        .route("/malformed", get(malformed))
        .route("/echo", any(echo))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn seed_variables() -> Vec<Variable> {
    vec![
        Variable {
            id: Uuid::new_v4(),
            key: "site.title".to_string(),
            name: Some("Site title".to_string()),
            value: Some("Feather".to_string()),
            notes: None,
        },
        Variable {
            id: Uuid::new_v4(),
            key: "site.excerpt".to_string(),
            name: None,
            value: None,
            notes: Some("shown under the title".to_string()),
        },
    ]
}

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    Json(state.store.read().await.todos.clone())
}

async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = state.store.write().await;
    let todo = Todo {
        id: store.next_id,
        user_id: input.user_id.unwrap_or(1),
        title: input.title,
        completed: input.completed,
    };
    store.next_id += 1;
    store.todos.push(todo.clone());
    tracing::debug!(id = todo.id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

/// Unknown ids answer 404 with an empty body.
async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, StatusCode> {
    let store = state.store.read().await;
    store
        .todos
        .iter()
        .find(|todo| todo.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_variables(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Variable>>, StatusCode> {
    let expected = format!("Bearer {}", state.admin_token);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(state.variables.as_ref().clone()))
}

async fn malformed() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    ([(header::CONTENT_TYPE, "application/json")], "{not json")
}

async fn echo(
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let mut seen: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in &headers {
        if let Ok(value) = value.to_str() {
            seen.entry(name.as_str().to_string())
                .or_default()
                .push(value.to_string());
        }
    }
    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        headers: seen,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_camel_case() {
        let todo = Todo {
            id: 1,
            user_id: 2,
            title: "Test".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["userId"], 2);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn create_todo_defaults_completed_to_false() {
        let input: CreateTodo = serde_json::from_str(r#"{"title":"No completed field"}"#).unwrap();
        assert_eq!(input.title, "No completed field");
        assert!(input.user_id.is_none());
        assert!(!input.completed);
    }

    #[test]
    fn create_todo_rejects_missing_title() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn seeded_variables_have_unique_ids() {
        let variables = seed_variables();
        assert_eq!(variables.len(), 2);
        assert_ne!(variables[0].id, variables[1].id);
    }
}
