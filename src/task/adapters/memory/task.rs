//! In-memory repository for tasks.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    project_index: HashMap<ProjectId, Vec<TaskId>>,
    next_sequence: u64,
}

#[derive(Debug, Clone)]
struct StoredTask {
    task: Task,
    sequence: u64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: &impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn index_project(state: &mut InMemoryTaskState, task: &Task) {
    if let Some(project_id) = task.project_id() {
        state
            .project_index
            .entry(project_id)
            .or_default()
            .push(task.id());
    }
}

/// Removes a task ID from the project index, cleaning up the entry if empty.
fn unindex_project(state: &mut InMemoryTaskState, task: &Task) {
    let Some(project_id) = task.project_id() else {
        return;
    };
    if let Some(ids) = state.project_index.get_mut(&project_id) {
        ids.retain(|id| *id != task.id());
        if ids.is_empty() {
            state.project_index.remove(&project_id);
        }
    }
}

fn sorted_newest_first(mut rows: Vec<&StoredTask>) -> Vec<Task> {
    rows.sort_by_key(|stored| Reverse((stored.task.created_at(), stored.sequence)));
    rows.into_iter().map(|stored| stored.task.clone()).collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        index_project(&mut state, task);
        state.tasks.insert(
            task.id(),
            StoredTask {
                task: task.clone(),
                sequence,
            },
        );
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let old_task = state
            .tasks
            .get(&task.id())
            .filter(|stored| stored.task.owner() == task.owner())
            .map(|stored| stored.task.clone())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        unindex_project(&mut state, &old_task);
        index_project(&mut state, task);
        if let Some(stored) = state.tasks.get_mut(&task.id()) {
            stored.task = task.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|stored| stored.task.owner() == owner)
            .map(|stored| stored.task.clone()))
    }

    async fn list(
        &self,
        owner: UserId,
        project_id: Option<ProjectId>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        let rows: Vec<&StoredTask> = match project_id {
            Some(project) => state
                .project_index
                .get(&project)
                .map(|ids| ids.iter().filter_map(|id| state.tasks.get(id)).collect())
                .unwrap_or_default(),
            None => state.tasks.values().collect(),
        };
        let owned = rows
            .into_iter()
            .filter(|stored| stored.task.owner() == owner)
            .collect();
        Ok(sorted_newest_first(owned))
    }

    async fn delete(&self, owner: UserId, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let removed = state
            .tasks
            .get(&id)
            .filter(|stored| stored.task.owner() == owner)
            .map(|stored| stored.task.clone())
            .ok_or(TaskRepositoryError::NotFound(id))?;

        unindex_project(&mut state, &removed);
        state.tasks.remove(&id);
        Ok(())
    }
}
