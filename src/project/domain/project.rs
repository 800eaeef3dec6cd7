//! Project aggregate root.

use super::{ProjectDomainError, ProjectId, ProjectName, ProjectStatus};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    owner: UserId,
    name: ProjectName,
    description: Option<String>,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProjectData {
    /// Owning user, stamped from the acting session.
    pub owner: UserId,
    /// Validated name.
    pub name: ProjectName,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Initial status.
    pub status: ProjectStatus,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: ProjectStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a project. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// Replacement name.
    pub name: Option<ProjectName>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Requested status, subject to transition validation.
    pub status: Option<ProjectStatus>,
}

impl ProjectUpdate {
    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

impl Project {
    /// Creates a new project.
    #[must_use]
    pub fn new(data: NewProjectData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            owner: data.owner,
            name: data.name,
            description: normalize_description(data.description),
            status: data.status,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            name: data.name,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update.
    ///
    /// The status change is validated before any field is written, so a
    /// rejected update leaves the project untouched. An empty update is a
    /// no-op and does not move `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidStatusTransition`] when the
    /// requested status is not reachable from the current one.
    pub fn apply(
        &mut self,
        update: ProjectUpdate,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if update.is_empty() {
            return Ok(());
        }
        if let Some(target) = update.status {
            self.ensure_can_transition(target)?;
        }

        let ProjectUpdate {
            name,
            description,
            status,
        } = update;
        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = normalize_description(new_description);
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        self.touch(clock);
        Ok(())
    }

    /// Transitions the project to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidStatusTransition`] when the
    /// transition is not permitted.
    pub fn transition_to(
        &mut self,
        target: ProjectStatus,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.apply(
            ProjectUpdate {
                status: Some(target),
                ..ProjectUpdate::default()
            },
            clock,
        )
    }

    const fn ensure_can_transition(
        &self,
        target: ProjectStatus,
    ) -> Result<(), ProjectDomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(ProjectDomainError::InvalidStatusTransition {
                project_id: self.id,
                from: self.status,
                to: target,
            })
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims a description, treating blank text as absent.
fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
