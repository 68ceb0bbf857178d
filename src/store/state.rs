use serde::{Deserialize, Serialize};

use crate::models::{Board, BoardId, Container, ContainerId, Task, TaskId, User, UserData};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub token: Option<String>,
}

/// Everything the client holds between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub session: Session,
    pub boards: Vec<Board>,
    /// Id into `boards`, resolved on read
    pub selected_board: Option<BoardId>,
    pub containers: Vec<Container>,
    pub tasks: Vec<Task>,
    pub background: Option<String>,
    pub theme: Option<String>,
}

impl AppState {
    // ----- queries -----

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn selected_board(&self) -> Option<&Board> {
        self.selected_board.and_then(|id| self.board(id))
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn containers_for_board(&self, board_id: BoardId) -> impl Iterator<Item = &Container> {
        self.containers.iter().filter(move |c| c.board_id == board_id)
    }

    pub fn tasks_for_container(&self, container_id: ContainerId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.container_id == container_id)
    }

    // ----- mutations -----

    pub fn set_session(&mut self, user: User, token: String) {
        self.session = Session {
            is_authenticated: true,
            user: Some(user),
            token: Some(token),
        };
    }

    /// Back to the anonymous, empty state
    pub fn reset(&mut self) {
        *self = AppState::default();
    }

    /// Replace all collections and select the first board, if any
    pub fn set_user_data(&mut self, data: UserData) {
        self.selected_board = data.boards.first().map(|b| b.id);
        self.boards = data.boards;
        self.containers = data.containers;
        self.tasks = data.tasks;
        self.background = data.background;
    }

    pub fn push_board(&mut self, board: Board) {
        self.boards.push(board);
    }

    pub fn rename_board(&mut self, id: BoardId, title: &str) {
        self.boards = self
            .boards
            .iter()
            .map(|b| {
                if b.id == id {
                    Board { title: title.to_string(), ..b.clone() }
                } else {
                    b.clone()
                }
            })
            .collect();
    }

    /// Drops the board and clears the selection, whichever board was selected.
    /// Containers and tasks of the board are left in place.
    pub fn remove_board(&mut self, id: BoardId) {
        self.boards.retain(|b| b.id != id);
        self.selected_board = None;
    }

    /// Swap in a fresh container list for one board, leaving the others
    pub fn replace_board_containers(&mut self, board_id: BoardId, containers: Vec<Container>) {
        self.containers.retain(|c| c.board_id != board_id);
        self.containers.extend(containers);
    }

    pub fn push_container(&mut self, container: Container) {
        self.containers.push(container);
    }

    pub fn rename_container(&mut self, id: ContainerId, title: &str) {
        if let Some(container) = self.containers.iter_mut().find(|c| c.id == id) {
            container.title = title.to_string();
        }
    }

    /// Drops the container together with its tasks
    pub fn remove_container(&mut self, id: ContainerId) {
        self.containers.retain(|c| c.id != id);
        self.tasks.retain(|t| t.container_id != id);
    }

    pub fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn replace_task(&mut self, task: Task) {
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        }
    }

    pub fn remove_task(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
    }
}
