//! Shared fixtures for in-memory task board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::activity::adapters::memory::InMemoryActivityRepository;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskStatus,
    services::{CreateTaskRequest, TaskBoardService},
};

/// Service type wired to the in-memory adapters.
pub type TestService =
    TaskBoardService<InMemoryTaskRepository, InMemoryActivityRepository, DefaultClock>;

/// Provides a board whose deletes cascade into its activity log.
#[fixture]
pub fn service() -> TestService {
    let activity = InMemoryActivityRepository::new();
    let tasks = InMemoryTaskRepository::with_activity_log(activity.clone());
    TaskBoardService::new(Arc::new(tasks), Arc::new(activity), Arc::new(DefaultClock))
}

/// Returns the titles of a column in position order.
///
/// # Errors
///
/// Returns an error if the column cannot be listed.
pub async fn column_titles(
    service: &TestService,
    status: TaskStatus,
) -> Result<Vec<String>, eyre::Report> {
    let tasks = service.list_tasks(Some(status.as_str())).await?;
    Ok(tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect())
}

/// Checks that a column holds positions `0..k-1` without gaps or duplicates.
///
/// # Errors
///
/// Returns an error if the column cannot be listed or is not dense.
pub async fn ensure_dense(service: &TestService, status: TaskStatus) -> Result<(), eyre::Report> {
    let tasks = service.list_tasks(Some(status.as_str())).await?;
    for (index, task) in tasks.iter().enumerate() {
        let expected = u32::try_from(index)?;
        eyre::ensure!(
            task.position().value() == expected,
            "column {status} has {} at position {}, expected {expected}",
            task.title().as_str(),
            task.position().value()
        );
    }
    Ok(())
}

/// Creates one task per title in the given column.
///
/// # Errors
///
/// Returns an error if any task creation fails.
pub async fn seed_column(
    service: &TestService,
    status: TaskStatus,
    titles: &[&str],
) -> Result<Vec<taskboard::task::domain::Task>, eyre::Report> {
    let mut created = Vec::with_capacity(titles.len());
    for title in titles {
        let task = service
            .create_task(CreateTaskRequest::new(*title).with_status(status.as_str()))
            .await?;
        created.push(task);
    }
    Ok(created)
}
