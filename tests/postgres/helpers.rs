//! Shared fixtures and entity builders for `PostgreSQL` repository tests.

use super::cluster::{BoxError, PostgresCluster, TemporaryDatabase, postgres_cluster};
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use eyre::WrapErr;
use rstest::fixture;
use std::time::Duration;
use taskboard::{
    config::StoreConfig,
    db::build_pool,
    identity::UserId,
    project::{
        adapters::postgres::PostgresProjectRepository,
        domain::{PersistedProjectData, Project, ProjectId, ProjectName, ProjectStatus},
    },
    task::{
        adapters::postgres::PostgresTaskRepository,
        domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TaskTitle},
    },
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Schema applied to the template database.
pub const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_projects_and_tasks/up.sql");

/// Template database every test database is copied from.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Repositories bound to a private database copied from the template.
pub struct PgContext {
    pub projects: PostgresProjectRepository,
    pub tasks: PostgresTaskRepository,
    pub runtime: Runtime,
    _database: TemporaryDatabase,
}

fn apply_schema(url: &str) -> Result<(), BoxError> {
    let mut connection = PgConnection::establish(url)?;
    connection.batch_execute(SCHEMA_SQL)?;
    Ok(())
}

/// Provides repositories over a fresh database, or `None` when no cluster
/// is available.
#[fixture]
pub fn pg_context(
    postgres_cluster: Option<PostgresCluster>,
) -> Result<Option<PgContext>, eyre::Report> {
    let Some(cluster) = postgres_cluster else {
        return Ok(None);
    };
    cluster
        .ensure_template_exists(TEMPLATE_DB, apply_schema)
        .map_err(|err| eyre::eyre!(err))
        .wrap_err("prepare template database")?;

    let name = format!("taskboard_test_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database_from_template(&name, TEMPLATE_DB)
        .map_err(|err| eyre::eyre!(err))
        .wrap_err("copy template database")?;

    let config = StoreConfig {
        pool_max_size: 2,
        pool_timeout: Duration::from_secs(10),
        ..StoreConfig::new(database.url())
    };
    let pool = build_pool(&config).wrap_err("build connection pool")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .wrap_err("build test runtime")?;

    Ok(Some(PgContext {
        projects: PostgresProjectRepository::new(pool.clone()),
        tasks: PostgresTaskRepository::new(pool),
        runtime,
        _database: database,
    }))
}

/// Current time at the microsecond precision `TIMESTAMPTZ` stores.
#[must_use]
pub fn db_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Builds a project as if it had been created at `created_at`.
///
/// # Errors
///
/// Returns an error when `name` is blank.
pub fn project_at(
    owner: UserId,
    name: &str,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
) -> Result<Project, eyre::Report> {
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(),
        owner,
        name: ProjectName::new(name).wrap_err("project name")?,
        description: Some(format!("{name} notes")),
        status,
        created_at,
        updated_at: created_at,
    }))
}

/// Builds a standalone or project-bound task created at `created_at`.
///
/// # Errors
///
/// Returns an error when `title` is blank.
pub fn task_at(
    owner: UserId,
    title: &str,
    project_id: Option<ProjectId>,
    created_at: DateTime<Utc>,
) -> Result<Task, eyre::Report> {
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        owner,
        title: TaskTitle::new(title).wrap_err("task title")?,
        description: Some(format!("{title} details")),
        status: TaskStatus::Todo,
        priority: TaskPriority::High,
        due_date: NaiveDate::from_ymd_opt(2026, 11, 30),
        project_id,
        created_at,
        updated_at: created_at,
    }))
}
