// Client, store and persistence error types
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the HTTP adapter
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpStatus { status, .. } => Some(*status),
            ClientError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failures writing or reading the persisted store
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Action-level errors surfaced to the UI layer.
///
/// The display text is the coarse message shown to users; the transport
/// failure that caused it stays reachable through `source()`/`cause()`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid credentials")]
    InvalidCredentials(#[source] ClientError),

    #[error("signup failed")]
    SignupFailed(#[source] ClientError),

    #[error("logout failed")]
    LogoutFailed(#[source] ClientError),

    #[error("failed to load user data")]
    LoadUserDataFailed(#[source] ClientError),

    #[error("board creation failed")]
    BoardCreateFailed(#[source] ClientError),

    #[error("board update failed")]
    BoardUpdateFailed(#[source] ClientError),

    #[error("board deletion failed")]
    BoardDeleteFailed(#[source] ClientError),

    #[error("failed to load containers")]
    ContainersLoadFailed(#[source] ClientError),

    #[error("container creation failed")]
    ContainerCreateFailed(#[source] ClientError),

    #[error("container update failed")]
    ContainerUpdateFailed(#[source] ClientError),

    #[error("container deletion failed")]
    ContainerDeleteFailed(#[source] ClientError),

    #[error("task creation failed")]
    TaskCreateFailed(#[source] ClientError),

    #[error("task update failed")]
    TaskUpdateFailed(#[source] ClientError),

    #[error("task deletion failed")]
    TaskDeleteFailed(#[source] ClientError),

    #[error("failed to save board layout")]
    BoardLayoutSaveFailed(#[source] ClientError),

    #[error("board {0} not found")]
    BoardNotFound(i64),

    #[error("failed to persist state: {0}")]
    Persist(#[from] PersistError),
}

impl StoreError {
    /// The transport failure behind this error, if any
    pub fn cause(&self) -> Option<&ClientError> {
        match self {
            StoreError::InvalidCredentials(e)
            | StoreError::SignupFailed(e)
            | StoreError::LogoutFailed(e)
            | StoreError::LoadUserDataFailed(e)
            | StoreError::BoardCreateFailed(e)
            | StoreError::BoardUpdateFailed(e)
            | StoreError::BoardDeleteFailed(e)
            | StoreError::ContainersLoadFailed(e)
            | StoreError::ContainerCreateFailed(e)
            | StoreError::ContainerUpdateFailed(e)
            | StoreError::ContainerDeleteFailed(e)
            | StoreError::TaskCreateFailed(e)
            | StoreError::TaskUpdateFailed(e)
            | StoreError::TaskDeleteFailed(e)
            | StoreError::BoardLayoutSaveFailed(e) => Some(e),
            StoreError::BoardNotFound(_) | StoreError::Persist(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.cause().and_then(ClientError::status)
    }

    /// True when the server rejected the stored credential.
    /// The session is not demoted automatically; callers decide.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Stable error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            StoreError::SignupFailed(_) => "SIGNUP_FAILED",
            StoreError::LogoutFailed(_) => "LOGOUT_FAILED",
            StoreError::LoadUserDataFailed(_) => "LOAD_USER_DATA_FAILED",
            StoreError::BoardCreateFailed(_) => "BOARD_CREATE_FAILED",
            StoreError::BoardUpdateFailed(_) => "BOARD_UPDATE_FAILED",
            StoreError::BoardDeleteFailed(_) => "BOARD_DELETE_FAILED",
            StoreError::ContainersLoadFailed(_) => "CONTAINERS_LOAD_FAILED",
            StoreError::ContainerCreateFailed(_) => "CONTAINER_CREATE_FAILED",
            StoreError::ContainerUpdateFailed(_) => "CONTAINER_UPDATE_FAILED",
            StoreError::ContainerDeleteFailed(_) => "CONTAINER_DELETE_FAILED",
            StoreError::TaskCreateFailed(_) => "TASK_CREATE_FAILED",
            StoreError::TaskUpdateFailed(_) => "TASK_UPDATE_FAILED",
            StoreError::TaskDeleteFailed(_) => "TASK_DELETE_FAILED",
            StoreError::BoardLayoutSaveFailed(_) => "BOARD_LAYOUT_SAVE_FAILED",
            StoreError::BoardNotFound(_) => "BOARD_NOT_FOUND",
            StoreError::Persist(_) => "PERSIST_FAILED",
        }
    }
}
