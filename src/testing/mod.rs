use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::client::Transport;
use crate::error::{ClientError, PersistError};
use crate::models::{Board, BoardId, Container, ContainerId, Task, TaskId};
use crate::persist::{MemoryStorage, Persistence, Storage};
use crate::store::Store;

/// A request the store sent through the transport
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Transport that answers from a script keyed by method and path.
/// Unscripted requests fail with a 404.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Result<Value, ClientError>>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, path: &str, body: Value) {
        self.push(method, path, Ok(body));
    }

    pub fn fail(&self, method: Method, path: &str, status: u16) {
        self.push(
            method,
            path,
            Err(ClientError::HttpStatus {
                status,
                message: format!("scripted failure {}", status),
            }),
        );
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, method: Method, path: &str, reply: Result<Value, ClientError>) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push(Call {
            method: method.clone(),
            path: path.to_string(),
            body,
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&(method.clone(), path.to_string()))
            .and_then(VecDeque::pop_front);

        reply.unwrap_or_else(|| {
            Err(ClientError::HttpStatus {
                status: 404,
                message: format!("no scripted reply for {} {}", method, path),
            })
        })
    }
}

/// In-memory storage whose writes to chosen keys fail
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    failing: Mutex<Vec<String>>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, key: &str) {
        self.failing.lock().unwrap().push(key.to_string());
    }

    fn check(&self, key: &str) -> Result<(), PersistError> {
        if self.failing.lock().unwrap().iter().any(|k| k == key) {
            return Err(PersistError::Io {
                path: key.into(),
                source: std::io::Error::other("disk full"),
            });
        }
        Ok(())
    }
}

impl Storage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

/// Fresh store over an empty in-memory storage
pub fn scripted_store() -> Store<ScriptedTransport> {
    store_over(Arc::new(MemoryStorage::new()))
}

pub fn store_over(storage: Arc<dyn Storage>) -> Store<ScriptedTransport> {
    Store::open(ScriptedTransport::new(), Persistence::new(storage, "vuello"))
}

pub fn board(id: BoardId, title: &str) -> Board {
    Board {
        id,
        user_id: Some(1),
        title: title.to_string(),
        background: None,
        container_ids: None,
    }
}

pub fn container(id: ContainerId, board_id: BoardId, title: &str) -> Container {
    Container {
        id,
        board_id,
        title: title.to_string(),
        task_ids: None,
    }
}

pub fn task(id: TaskId, container_id: ContainerId, title: &str) -> Task {
    Task {
        id,
        container_id,
        title: title.to_string(),
        description: String::new(),
        completed: false,
    }
}
