//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
};
use crate::db::PgPool;
use crate::identity::UserId;
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId, ProjectName, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_new_row(project);

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let owner = project.owner();
        let changeset = to_changeset(project);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                projects::table
                    .filter(projects::id.eq(project_id.into_inner()))
                    .filter(projects::user_id.eq(owner.into_inner())),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(ProjectRepositoryError::persistence)?;

            if affected == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .filter(projects::user_id.eq(owner.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list(
        &self,
        owner: UserId,
        status: Option<ProjectStatus>,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let mut query = projects::table
                .filter(projects::user_id.eq(owner.into_inner()))
                .select(ProjectRow::as_select())
                .order((projects::created_at.desc(), projects::created_seq.desc()))
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(projects::status.eq(wanted.as_str()));
            }

            let rows = query
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn delete(&self, owner: UserId, id: ProjectId) -> ProjectRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                projects::table
                    .filter(projects::id.eq(id.into_inner()))
                    .filter(projects::user_id.eq(owner.into_inner())),
            )
            .execute(connection)
            .map_err(ProjectRepositoryError::persistence)?;

            if affected == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        user_id: project.owner().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().map(str::to_owned),
        status: project.status().as_str().to_owned(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn to_changeset(project: &Project) -> ProjectChangeset {
    ProjectChangeset {
        name: project.name().as_str().to_owned(),
        description: project.description().map(str::to_owned),
        status: project.status().as_str().to_owned(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        user_id,
        name: persisted_name,
        description,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let name = ProjectName::new(persisted_name).map_err(ProjectRepositoryError::persistence)?;
    let status = ProjectStatus::try_from(persisted_status.as_str())
        .map_err(ProjectRepositoryError::persistence)?;

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(id),
        owner: UserId::from_uuid(user_id),
        name,
        description,
        status,
        created_at,
        updated_at,
    }))
}
