//! Client-side store.
//!
//! [`Store`] owns the [`AppState`], the transport used to reach the API and
//! the persistence bridge. Actions call the API first and commit to the
//! in-memory state only on success. A commit is saved first and lands in
//! memory only once the save succeeded.
//! Actions take `&mut self`, so at most one runs against a store at a time.

mod boards;
mod lists;
mod session;
mod state;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::client::Transport;
use crate::error::{ClientError, PersistError, StoreError};
use crate::models::{Board, BoardId, Container, ContainerId, Task, User};
use crate::persist::Persistence;

pub use state::{AppState, Session};

pub struct Store<T: Transport> {
    state: AppState,
    transport: T,
    persistence: Persistence,
}

impl<T: Transport> Store<T> {
    /// Build a store with the last persisted state already loaded
    pub fn open(transport: T, persistence: Persistence) -> Self {
        let state = persistence.load();
        Self {
            state,
            transport,
            persistence,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.session.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.state.session.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.session.token.as_deref()
    }

    pub fn boards(&self) -> &[Board] {
        &self.state.boards
    }

    pub fn selected_board(&self) -> Option<&Board> {
        self.state.selected_board()
    }

    pub fn containers_for_board(&self, board_id: BoardId) -> Vec<&Container> {
        self.state.containers_for_board(board_id).collect()
    }

    pub fn tasks_for_container(&self, container_id: ContainerId) -> Vec<&Task> {
        self.state.tasks_for_container(container_id).collect()
    }

    pub fn background(&self) -> Option<&str> {
        self.state.background.as_deref()
    }

    pub fn theme(&self) -> Option<&str> {
        self.state.theme.as_deref()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        Ok(self.persistence.save(&self.state)?)
    }

    /// Point the selection at an existing board
    pub fn select_board(&mut self, id: BoardId) -> Result<(), StoreError> {
        if self.state.board(id).is_none() {
            return Err(StoreError::BoardNotFound(id));
        }
        self.commit(|s| s.selected_board = Some(id))
    }

    pub fn set_background(&mut self, background: Option<String>) -> Result<(), StoreError> {
        self.commit(|s| s.background = background)
    }

    pub fn set_theme(&mut self, theme: Option<String>) -> Result<(), StoreError> {
        self.commit(|s| s.theme = theme)
    }

    /// Apply `mutate` to a copy and keep it only once it is saved
    fn commit(&mut self, mutate: impl FnOnce(&mut AppState)) -> Result<(), StoreError> {
        let mut next = self.state.clone();
        mutate(&mut next);
        self.persistence.save(&next)?;
        self.state = next;
        Ok(())
    }

    /// Put `previous` back in memory and on disk after a later write failed
    fn restore(&mut self, previous: AppState, err: PersistError) -> StoreError {
        if let Err(e) = self.persistence.save(&previous) {
            warn!(error = %e, "could not restore persisted state");
        }
        self.state = previous;
        err.into()
    }

    async fn fetch<R: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<R, ClientError> {
        let value = self.transport.request(method, path, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn send<B: Serialize, R: DeserializeOwned>(&self, method: Method, path: &str, body: &B) -> Result<R, ClientError> {
        let body = serde_json::to_value(body)?;
        self.fetch(method, path, Some(body)).await
    }
}

/// Log a failed action with its cause, then wrap it in the coarse variant
fn failed(action: &'static str, wrap: fn(ClientError) -> StoreError) -> impl FnOnce(ClientError) -> StoreError {
    move |err| {
        error!(action, error = %err, "action failed");
        wrap(err)
    }
}
