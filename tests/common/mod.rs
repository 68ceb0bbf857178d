#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use url::Url;

use vuello::models::{Board, Container, Task};
use vuello::{FileStorage, HttpClient, Persistence, Storage, Store};

pub struct MockUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// In-memory stand-in for the board API's database
#[derive(Default)]
pub struct MockDb {
    next_id: i64,
    pub users: Vec<MockUser>,
    pub boards: Vec<Board>,
    pub containers: Vec<Container>,
    pub tasks: Vec<Task>,
    pub background: String,
    pub layouts: Vec<Value>,
    /// Authorization header of every request, in order
    pub auth_headers: Vec<Option<String>>,
    pub fail_logout: bool,
}

impl MockDb {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_user(&mut self, username: &str, email: &str, password: &str) -> i64 {
        let id = self.next_id();
        self.users.push(MockUser {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        id
    }

    pub fn add_board(&mut self, user_id: i64, title: &str) -> i64 {
        let id = self.next_id();
        self.boards.push(Board {
            id,
            user_id: Some(user_id),
            title: title.to_string(),
            background: Some("img-3.jpg".to_string()),
            container_ids: None,
        });
        id
    }

    pub fn add_container(&mut self, board_id: i64, title: &str) -> i64 {
        let id = self.next_id();
        self.containers.push(Container {
            id,
            board_id,
            title: title.to_string(),
            task_ids: None,
        });
        id
    }

    pub fn add_task(&mut self, container_id: i64, title: &str) -> i64 {
        let id = self.next_id();
        self.tasks.push(Task {
            id,
            container_id,
            title: title.to_string(),
            description: String::new(),
            completed: false,
        });
        id
    }

    fn auth_response(user: &MockUser) -> Value {
        json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
            "token": format!("token-{}", user.id),
        })
    }
}

type Shared = Arc<Mutex<MockDb>>;
type Rejection = (StatusCode, String);

pub struct MockBackend {
    pub base_url: String,
    db: Shared,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;

        let db: Shared = Arc::new(Mutex::new(MockDb::default()));
        let app = router(db.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            db,
        })
    }

    pub fn db(&self) -> MutexGuard<'_, MockDb> {
        self.db.lock().unwrap()
    }

    /// Store persisting into `dir`, talking to this backend
    pub fn store(&self, dir: &Path) -> Result<Store<HttpClient>> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(dir)?);
        let client = HttpClient::new(Url::parse(&self.base_url)?, Arc::clone(&storage));
        Ok(Store::open(client, Persistence::new(storage, "vuello")))
    }
}

fn router(db: Shared) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/logout", post(logout))
        .route("/user-data", get(user_data))
        .route("/update-user-data", post(update_user_data))
        .route("/boards", post(create_board))
        .route("/boards/:id", put(update_board).delete(delete_board))
        .route("/boards/:id/containers", get(list_containers).post(create_container))
        .route("/containers/:id", put(update_container).delete(delete_container))
        .route("/containers/:id/tasks", post(create_task))
        .route("/tasks/:id", put(update_task).delete(delete_task))
        .with_state(db)
}

fn authorize(db: &mut MockDb, headers: &HeaderMap) -> Result<i64, Rejection> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    db.auth_headers.push(header.clone());

    let header = header.ok_or((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or((StatusCode::BAD_REQUEST, "Invalid authorization header".to_string()))?;
    let user_id = token
        .strip_prefix("token-")
        .and_then(|id| id.parse::<i64>().ok())
        .filter(|id| db.users.iter().any(|u| u.id == *id))
        .ok_or((StatusCode::UNAUTHORIZED, "Invalid token".to_string()))?;
    Ok(user_id)
}

fn owns_board(db: &MockDb, user_id: i64, board_id: i64) -> Result<(), Rejection> {
    match db.boards.iter().find(|b| b.id == board_id) {
        Some(b) if b.user_id == Some(user_id) => Ok(()),
        Some(_) => Err((StatusCode::FORBIDDEN, "board belongs to another user".to_string())),
        None => Err((StatusCode::FORBIDDEN, "board not found".to_string())),
    }
}

async fn login(State(db): State<Shared>, Json(body): Json<Value>) -> Result<Json<Value>, Rejection> {
    let db = db.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    db.users
        .iter()
        .find(|u| u.username == username && u.password == password)
        .map(|u| Json(MockDb::auth_response(u)))
        .ok_or((StatusCode::UNAUTHORIZED, "invalid username or password".to_string()))
}

async fn signup(State(db): State<Shared>, Json(body): Json<Value>) -> Result<Json<Value>, Rejection> {
    let mut db = db.lock().unwrap();
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    if username.is_empty() || db.users.iter().any(|u| u.username == username) {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Could not create user".to_string()));
    }

    let id = db.add_user(&username, &email, &password);
    db.add_board(id, &format!("{}'s Board", username));
    db.background = "img-3.jpg".to_string();

    let user = db.users.iter().find(|u| u.id == id).map(MockDb::auth_response);
    Ok(Json(user.unwrap_or(Value::Null)))
}

async fn logout(State(db): State<Shared>) -> Response {
    if db.lock().unwrap().fail_logout {
        return (StatusCode::INTERNAL_SERVER_ERROR, "logout unavailable").into_response();
    }
    StatusCode::OK.into_response()
}

async fn user_data(State(db): State<Shared>, headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    let mut db = db.lock().unwrap();
    let user_id = authorize(&mut db, &headers)?;

    let boards: Vec<&Board> = db.boards.iter().filter(|b| b.user_id == Some(user_id)).collect();
    let containers: Vec<&Container> = db
        .containers
        .iter()
        .filter(|c| boards.iter().any(|b| b.id == c.board_id))
        .collect();
    let tasks: Vec<&Task> = db
        .tasks
        .iter()
        .filter(|t| containers.iter().any(|c| c.id == t.container_id))
        .collect();

    // The real API sends null for empty collections
    let as_json = |len: usize, value: Value| if len == 0 { Value::Null } else { value };
    Ok(Json(json!({
        "boards": as_json(boards.len(), json!(boards)),
        "containers": as_json(containers.len(), json!(containers)),
        "tasks": as_json(tasks.len(), json!(tasks)),
        "background": db.background,
    })))
}

async fn update_user_data(State(db): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Result<StatusCode, Rejection> {
    let mut db = db.lock().unwrap();
    authorize(&mut db, &headers)?;
    if body["boardId"].as_i64().is_none() {
        return Err((StatusCode::BAD_REQUEST, "invalid board ID".to_string()));
    }
    db.layouts.push(body);
    Ok(StatusCode::OK)
}

async fn create_board(State(db): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Result<Json<Board>, Rejection> {
    let mut db = db.lock().unwrap();
    let user_id = authorize(&mut db, &headers)?;
    let title = body["title"].as_str().unwrap_or_default();

    let id = db.add_board(user_id, title);
    let board = db.boards.iter().find(|b| b.id == id).cloned();
    board.map(Json).ok_or((StatusCode::INTERNAL_SERVER_ERROR, "lost board".to_string()))
}

async fn update_board(
    State(db): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Board>, Rejection> {
    let mut db = db.lock().unwrap();
    let user_id = authorize(&mut db, &headers)?;
    owns_board(&db, user_id, id)?;

    let board = db
        .boards
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or((StatusCode::NOT_FOUND, "board not found".to_string()))?;
    board.title = body["title"].as_str().unwrap_or_default().to_string();
    board.background = body["background"].as_str().map(str::to_string);
    Ok(Json(board.clone()))
}

async fn delete_board(State(db): State<Shared>, headers: HeaderMap, UrlPath(id): UrlPath<i64>) -> Result<StatusCode, Rejection> {
    let mut db = db.lock().unwrap();
    let user_id = authorize(&mut db, &headers)?;
    owns_board(&db, user_id, id)?;

    let container_ids: Vec<i64> = db.containers.iter().filter(|c| c.board_id == id).map(|c| c.id).collect();
    db.tasks.retain(|t| !container_ids.contains(&t.container_id));
    db.containers.retain(|c| c.board_id != id);
    db.boards.retain(|b| b.id != id);
    Ok(StatusCode::OK)
}

async fn list_containers(State(db): State<Shared>, headers: HeaderMap, UrlPath(id): UrlPath<i64>) -> Result<Json<Value>, Rejection> {
    let mut db = db.lock().unwrap();
    authorize(&mut db, &headers)?;
    let containers: Vec<&Container> = db.containers.iter().filter(|c| c.board_id == id).collect();
    Ok(Json(json!(containers)))
}

async fn create_container(
    State(db): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Container>, Rejection> {
    let mut db = db.lock().unwrap();
    authorize(&mut db, &headers)?;
    let container_id = db.add_container(id, body["title"].as_str().unwrap_or_default());
    let container = db.containers.iter().find(|c| c.id == container_id).cloned();
    container.map(Json).ok_or((StatusCode::INTERNAL_SERVER_ERROR, "lost container".to_string()))
}

async fn update_container(
    State(db): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Result<StatusCode, Rejection> {
    let mut db = db.lock().unwrap();
    authorize(&mut db, &headers)?;
    if let Some(container) = db.containers.iter_mut().find(|c| c.id == id) {
        container.title = body["title"].as_str().unwrap_or_default().to_string();
    }
    Ok(StatusCode::OK)
}

async fn delete_container(State(db): State<Shared>, headers: HeaderMap, UrlPath(id): UrlPath<i64>) -> Result<StatusCode, Rejection> {
    let mut db = db.lock().unwrap();
    authorize(&mut db, &headers)?;
    db.tasks.retain(|t| t.container_id != id);
    db.containers.retain(|c| c.id != id);
    Ok(StatusCode::OK)
}

async fn create_task(
    State(db): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Task>, Rejection> {
    let mut db = db.lock().unwrap();
    authorize(&mut db, &headers)?;
    let task_id = db.add_task(id, body["title"].as_str().unwrap_or_default());
    let task = db.tasks.iter_mut().find(|t| t.id == task_id).map(|t| {
        t.description = body["description"].as_str().unwrap_or_default().to_string();
        t.clone()
    });
    task.map(Json).ok_or((StatusCode::INTERNAL_SERVER_ERROR, "lost task".to_string()))
}

async fn update_task(
    State(db): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Task>,
) -> Result<Json<Task>, Rejection> {
    let mut db = db.lock().unwrap();
    authorize(&mut db, &headers)?;
    let task = db
        .tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or((StatusCode::NOT_FOUND, "task not found".to_string()))?;
    *task = Task { id, ..body };
    Ok(Json(task.clone()))
}

async fn delete_task(State(db): State<Shared>, headers: HeaderMap, UrlPath(id): UrlPath<i64>) -> Result<StatusCode, Rejection> {
    let mut db = db.lock().unwrap();
    authorize(&mut db, &headers)?;
    db.tasks.retain(|t| t.id != id);
    Ok(StatusCode::OK)
}
