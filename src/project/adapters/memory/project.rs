//! In-memory repository for projects.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::project::{
    domain::{Project, ProjectId, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, StoredProject>,
    next_sequence: u64,
}

/// Stored project plus its insertion sequence, used to order rows that share
/// a creation timestamp.
#[derive(Debug, Clone)]
struct StoredProject {
    project: Project,
    sequence: u64,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: &impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.projects.insert(
            project.id(),
            StoredProject {
                project: project.clone(),
                sequence,
            },
        );
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let stored = state
            .projects
            .get_mut(&project.id())
            .filter(|stored| stored.project.owner() == project.owner())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        stored.project = project.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state
            .projects
            .get(&id)
            .filter(|stored| stored.project.owner() == owner)
            .map(|stored| stored.project.clone()))
    }

    async fn list(
        &self,
        owner: UserId,
        status: Option<ProjectStatus>,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        let mut matching: Vec<&StoredProject> = state
            .projects
            .values()
            .filter(|stored| stored.project.owner() == owner)
            .filter(|stored| status.is_none_or(|wanted| stored.project.status() == wanted))
            .collect();
        matching.sort_by_key(|stored| Reverse((stored.project.created_at(), stored.sequence)));
        Ok(matching
            .into_iter()
            .map(|stored| stored.project.clone())
            .collect())
    }

    async fn delete(&self, owner: UserId, id: ProjectId) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let is_owned = state
            .projects
            .get(&id)
            .is_some_and(|stored| stored.project.owner() == owner);
        if !is_owned {
            return Err(ProjectRepositoryError::NotFound(id));
        }
        state.projects.remove(&id);
        Ok(())
    }
}
