//! Per-test databases and board wiring for the `PostgreSQL` suite.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};

use chrono::{DateTime, Duration, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskboard::activity::adapters::postgres::PostgresActivityRepository;
use taskboard::task::{
    adapters::postgres::{PostgresTaskRepository, SCHEMA_SQL, TaskPgPool},
    domain::{PersistedTaskData, Position, Task, TaskId, TaskStatus, TaskTitle},
    services::TaskBoardService,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Migrated database cloned by every test.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Board service wired to the `PostgreSQL` adapters.
pub type PgService =
    TaskBoardService<PostgresTaskRepository, PostgresActivityRepository, DefaultClock>;

/// One test's private database plus everything wired against it.
///
/// Fields drop in declaration order, so every pooled connection is closed
/// before the database itself is dropped.
pub struct PgBoard {
    pub service: PgService,
    pub tasks: Arc<PostgresTaskRepository>,
    pub activity: Arc<PostgresActivityRepository>,
    pub pool: TaskPgPool,
    pub rt: Runtime,
    database: TemporaryDatabase,
}

impl PgBoard {
    /// Runs raw SQL against this test's database.
    pub fn execute_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut connection = self.pool.get()?;
        connection.batch_execute(sql)?;
        Ok(())
    }
}

struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

fn apply_schema_sql(url: &str) -> Result<(), BoxError> {
    let mut connection = PgConnection::establish(url)?;
    connection.batch_execute(SCHEMA_SQL)?;
    Ok(())
}

/// Creates a migrated database for one test and wires a board against it.
pub fn open_board(cluster: PostgresCluster) -> Result<PgBoard, BoxError> {
    cluster.ensure_template(TEMPLATE_DB, apply_schema_sql)?;

    let name = format!("taskboard_test_{}", Uuid::new_v4().simple());
    cluster.create_database_from_template(&name, TEMPLATE_DB)?;
    let database = TemporaryDatabase { cluster, name };

    let manager = ConnectionManager::<PgConnection>::new(cluster.database_url(&database.name));
    let pool = Pool::builder().max_size(4).build(manager)?;
    let tasks = Arc::new(PostgresTaskRepository::new(pool.clone()));
    let activity = Arc::new(PostgresActivityRepository::new(pool.clone()));
    let service = TaskBoardService::new(
        Arc::clone(&tasks),
        Arc::clone(&activity),
        Arc::new(DefaultClock),
    );
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    Ok(PgBoard {
        service,
        tasks,
        activity,
        pool,
        rt,
        database,
    })
}

/// Provides a fresh board, or `None` when the cluster is unavailable.
#[fixture]
pub fn pg_board(postgres_cluster: Option<PostgresCluster>) -> Option<PgBoard> {
    let cluster = postgres_cluster?;
    Some(open_board(cluster).expect("test database should be created"))
}

/// Fixed timestamp `offset_secs` after a shared base instant.
pub fn at(offset_secs: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
        .single()
        .expect("base timestamp is unambiguous");
    base + Duration::seconds(offset_secs)
}

/// Builds a task with explicit placement and creation time.
pub fn placed_task(
    title: &str,
    status: TaskStatus,
    position: i64,
    created_at: DateTime<Utc>,
) -> Result<Task, BoxError> {
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new(title)?,
        description: None,
        status,
        position: Position::new(position)?,
        created_at,
        updated_at: created_at,
    }))
}

/// Returns `(title, position)` pairs of a column in stored order.
pub async fn column_layout(
    tasks: &PostgresTaskRepository,
    status: TaskStatus,
) -> Result<Vec<(String, u32)>, BoxError> {
    use taskboard::task::ports::TaskRepository;

    Ok(tasks
        .find_by_status(status)
        .await?
        .iter()
        .map(|task| (task.title().as_str().to_owned(), task.position().value()))
        .collect())
}
