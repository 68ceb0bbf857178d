use reqwest::Method;
use serde::de::IgnoredAny;
use tracing::info;

use super::{failed, Store};
use crate::client::Transport;
use crate::error::StoreError;
use crate::models::{Board, BoardChanges, BoardId, Titled, UserData};

impl<T: Transport> Store<T> {
    /// Fetch boards, containers, tasks and background in one call and
    /// replace the local collections with them
    pub async fn load_user_data(&mut self) -> Result<(), StoreError> {
        let data: UserData = self
            .fetch(Method::GET, "/user-data", None)
            .await
            .map_err(failed("load_user_data", StoreError::LoadUserDataFailed))?;

        let (boards, containers, tasks) = (data.boards.len(), data.containers.len(), data.tasks.len());
        self.commit(|s| s.set_user_data(data))?;

        info!(boards, containers, tasks, selected = ?self.state.selected_board, "user data loaded");
        Ok(())
    }

    pub async fn create_board(&mut self, title: &str) -> Result<Board, StoreError> {
        let board: Board = self
            .send(Method::POST, "/boards", &Titled { title })
            .await
            .map_err(failed("create_board", StoreError::BoardCreateFailed))?;

        self.commit(|s| s.push_board(board.clone()))?;
        info!(board_id = board.id, "board created");
        Ok(board)
    }

    /// Rename a board; the rest of the collection keeps its order
    pub async fn update_board(&mut self, id: BoardId, title: &str) -> Result<(), StoreError> {
        // The API overwrites background too, so send the one we know
        let background = self.state.board(id).and_then(|b| b.background.clone());
        let changes = BoardChanges {
            title,
            background: background.as_deref(),
        };

        let _: IgnoredAny = self
            .send(Method::PUT, &format!("/boards/{}", id), &changes)
            .await
            .map_err(failed("update_board", StoreError::BoardUpdateFailed))?;

        self.commit(|s| s.rename_board(id, title))?;
        info!(board_id = id, "board updated");
        Ok(())
    }

    /// Delete a board. The selection is cleared even when another board was selected.
    pub async fn delete_board(&mut self, id: BoardId) -> Result<(), StoreError> {
        let _: IgnoredAny = self
            .fetch(Method::DELETE, &format!("/boards/{}", id), None)
            .await
            .map_err(failed("delete_board", StoreError::BoardDeleteFailed))?;

        self.commit(|s| s.remove_board(id))?;
        info!(board_id = id, "board deleted");
        Ok(())
    }
}
