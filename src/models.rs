//! Records exchanged with the board API and kept in the local store

use serde::{Deserialize, Deserializer, Serialize};

pub type UserId = i64;
pub type BoardId = i64;
pub type ContainerId = i64;
pub type TaskId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Body returned by `/login` and `/signup`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub token: String,
}

impl AuthResponse {
    pub fn into_parts(self) -> (User, String) {
        let user = User {
            id: self.id,
            username: self.username,
            email: self.email,
        };
        (user, self.token)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_ids: Option<Vec<ContainerId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub board_id: BoardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<Vec<TaskId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub container_id: ContainerId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Aggregate payload of `GET /user-data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub boards: Vec<Board>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub containers: Vec<Container>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub background: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// `{ "title": ... }`, the create body for boards and containers
#[derive(Debug, Serialize)]
pub struct Titled<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct BoardChanges<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct ContainerChanges<'a> {
    pub id: ContainerId,
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    pub container_id: ContainerId,
    pub title: &'a str,
    pub description: &'a str,
    pub completed: bool,
}

/// Body of `POST /update-user-data`
#[derive(Debug, Serialize)]
pub struct BoardLayout<'a> {
    #[serde(rename = "boardId")]
    pub board_id: BoardId,
    pub containers: Vec<&'a Container>,
    pub tasks: Vec<&'a Task>,
}

/// The API encodes empty collections as `null`
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
