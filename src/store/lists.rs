use reqwest::Method;
use serde::de::IgnoredAny;
use tracing::info;

use super::{failed, Store};
use crate::client::Transport;
use crate::error::StoreError;
use crate::models::{BoardId, BoardLayout, Container, ContainerChanges, ContainerId, NewTask, Task, TaskId, Titled};

impl<T: Transport> Store<T> {
    /// Refresh the containers of one board from the server
    pub async fn load_containers(&mut self, board_id: BoardId) -> Result<usize, StoreError> {
        // An empty list comes back as `null`
        let containers: Vec<Container> = self
            .fetch::<Option<Vec<Container>>>(Method::GET, &format!("/boards/{}/containers", board_id), None)
            .await
            .map_err(failed("load_containers", StoreError::ContainersLoadFailed))?
            .unwrap_or_default();

        let count = containers.len();
        self.commit(|s| s.replace_board_containers(board_id, containers))?;
        info!(board_id, count, "containers loaded");
        Ok(count)
    }

    pub async fn create_container(&mut self, board_id: BoardId, title: &str) -> Result<Container, StoreError> {
        let container: Container = self
            .send(Method::POST, &format!("/boards/{}/containers", board_id), &Titled { title })
            .await
            .map_err(failed("create_container", StoreError::ContainerCreateFailed))?;

        self.commit(|s| s.push_container(container.clone()))?;
        info!(board_id, container_id = container.id, "container created");
        Ok(container)
    }

    pub async fn rename_container(&mut self, id: ContainerId, title: &str) -> Result<(), StoreError> {
        let _: IgnoredAny = self
            .send(Method::PUT, &format!("/containers/{}", id), &ContainerChanges { id, title })
            .await
            .map_err(failed("rename_container", StoreError::ContainerUpdateFailed))?;

        self.commit(|s| s.rename_container(id, title))?;
        info!(container_id = id, "container renamed");
        Ok(())
    }

    /// Delete a container; its tasks go with it
    pub async fn delete_container(&mut self, id: ContainerId) -> Result<(), StoreError> {
        let _: IgnoredAny = self
            .fetch(Method::DELETE, &format!("/containers/{}", id), None)
            .await
            .map_err(failed("delete_container", StoreError::ContainerDeleteFailed))?;

        self.commit(|s| s.remove_container(id))?;
        info!(container_id = id, "container deleted");
        Ok(())
    }

    pub async fn create_task(&mut self, container_id: ContainerId, title: &str, description: &str) -> Result<Task, StoreError> {
        let body = NewTask {
            container_id,
            title,
            description,
            completed: false,
        };
        let task: Task = self
            .send(Method::POST, &format!("/containers/{}/tasks", container_id), &body)
            .await
            .map_err(failed("create_task", StoreError::TaskCreateFailed))?;

        self.commit(|s| s.push_task(task.clone()))?;
        info!(container_id, task_id = task.id, "task created");
        Ok(task)
    }

    /// Send the full task and keep what the server echoes back
    pub async fn update_task(&mut self, task: &Task) -> Result<Task, StoreError> {
        let updated: Task = self
            .send(Method::PUT, &format!("/tasks/{}", task.id), task)
            .await
            .map_err(failed("update_task", StoreError::TaskUpdateFailed))?;

        self.commit(|s| s.replace_task(updated.clone()))?;
        info!(task_id = updated.id, "task updated");
        Ok(updated)
    }

    pub async fn delete_task(&mut self, id: TaskId) -> Result<(), StoreError> {
        let _: IgnoredAny = self
            .fetch(Method::DELETE, &format!("/tasks/{}", id), None)
            .await
            .map_err(failed("delete_task", StoreError::TaskDeleteFailed))?;

        self.commit(|s| s.remove_task(id))?;
        info!(task_id = id, "task deleted");
        Ok(())
    }

    /// Upload a board's containers and tasks as the server-side layout.
    /// Local state is not changed.
    pub async fn push_board_layout(&self, board_id: BoardId) -> Result<(), StoreError> {
        let containers: Vec<&Container> = self.state.containers_for_board(board_id).collect();
        let tasks: Vec<&Task> = self
            .state
            .tasks
            .iter()
            .filter(|t| containers.iter().any(|c| c.id == t.container_id))
            .collect();
        let (container_count, task_count) = (containers.len(), tasks.len());

        let layout = BoardLayout {
            board_id,
            containers,
            tasks,
        };
        let _: IgnoredAny = self
            .send(Method::POST, "/update-user-data", &layout)
            .await
            .map_err(failed("push_board_layout", StoreError::BoardLayoutSaveFailed))?;

        info!(board_id, containers = container_count, tasks = task_count, "board layout saved");
        Ok(())
    }
}
