//! In-memory integration tests for task board flows.

use super::helpers::{TestService, column_titles, ensure_dense, seed_column, service};
use rstest::rstest;
use taskboard::activity::domain::ActivityAction;
use taskboard::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, MoveTaskRequest, TaskBoardError, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_travels_from_todo_to_done(service: TestService) -> Result<(), eyre::Report> {
    let created = service
        .create_task(CreateTaskRequest::new("Ship release").with_description("Tag and publish"))
        .await?;
    seed_column(&service, TaskStatus::InProgress, &["Review"]).await?;
    seed_column(&service, TaskStatus::Done, &["Plan", "Draft"]).await?;

    let started = service
        .move_task(MoveTaskRequest::new(created.id(), "inprogress", 0))
        .await?;
    eyre::ensure!(started.position().value() == 1, "appended after Review");

    let finished = service
        .move_task(MoveTaskRequest::new(created.id(), "done", 0))
        .await?;
    eyre::ensure!(finished.status() == TaskStatus::Done, "task should be done");
    eyre::ensure!(finished.position().value() == 2, "appended after Draft");
    eyre::ensure!(
        finished.description() == Some("Tag and publish"),
        "moves must not touch details"
    );

    eyre::ensure!(
        column_titles(&service, TaskStatus::Done).await? == ["Plan", "Draft", "Ship release"],
        "done column order mismatch"
    );
    for status in TaskStatus::ALL {
        ensure_dense(&service, status).await?;
    }

    let log = service.activity_log(50).await;
    let moves = log
        .iter()
        .filter(|record| record.action() == ActivityAction::TaskMoved)
        .count();
    eyre::ensure!(moves == 2, "expected two task_moved records, found {moves}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reordering_within_column_rewrites_sibling_positions(
    service: TestService,
) -> Result<(), eyre::Report> {
    let seeded = seed_column(&service, TaskStatus::Todo, &["A", "B", "C", "D"]).await?;
    let last = seeded
        .last()
        .ok_or_else(|| eyre::eyre!("expected seeded tasks"))?;

    service
        .move_task(MoveTaskRequest::new(last.id(), "todo", 3))
        .await?;
    ensure_dense(&service, TaskStatus::Todo).await?;

    let first = seeded
        .first()
        .ok_or_else(|| eyre::eyre!("expected seeded tasks"))?;
    service
        .move_task(MoveTaskRequest::new(first.id(), "todo", 3))
        .await?;

    eyre::ensure!(
        column_titles(&service, TaskStatus::Todo).await? == ["B", "C", "D", "A"],
        "A should sit at the end after the move"
    );
    ensure_dense(&service, TaskStatus::Todo).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_drops_its_history_but_keeps_the_deletion(
    service: TestService,
) -> Result<(), eyre::Report> {
    let seeded = seed_column(&service, TaskStatus::Todo, &["keep", "drop"]).await?;
    let dropped = seeded
        .last()
        .ok_or_else(|| eyre::eyre!("expected seeded tasks"))?;
    service
        .move_task(MoveTaskRequest::new(dropped.id(), "done", 0))
        .await?;

    service.delete_task(dropped.id()).await?;

    let log = service.activity_log(50).await;
    eyre::ensure!(
        log.iter().all(|record| record.task_id() != Some(dropped.id())),
        "records referencing a deleted task should be removed"
    );
    let newest = log
        .first()
        .ok_or_else(|| eyre::eyre!("expected activity records"))?;
    eyre::ensure!(
        newest.action() == ActivityAction::TaskDeleted,
        "newest record should be the deletion"
    );
    eyre::ensure!(
        newest.details()["title"] == "drop",
        "deletion should record the title"
    );

    let missing = service.get_task(dropped.id()).await;
    eyre::ensure!(
        matches!(missing, Err(TaskBoardError::NotFound(_))),
        "deleted task should be gone"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activity_log_respects_limit_and_newest_first_order(
    service: TestService,
) -> Result<(), eyre::Report> {
    seed_column(&service, TaskStatus::Todo, &["one", "two", "three"]).await?;

    let log = service.activity_log(2).await;

    eyre::ensure!(log.len() == 2, "expected two records, found {}", log.len());
    let titles: Vec<_> = log
        .iter()
        .filter_map(|record| record.details()["title"].as_str())
        .collect();
    eyre::ensure!(titles == ["three", "two"], "unexpected order {titles:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_details_leaves_column_order_alone(
    service: TestService,
) -> Result<(), eyre::Report> {
    let seeded = seed_column(&service, TaskStatus::InProgress, &["x", "y"]).await?;
    let first = seeded
        .first()
        .ok_or_else(|| eyre::eyre!("expected seeded tasks"))?;

    service
        .update_task(UpdateTaskRequest::new(first.id()).with_title("x renamed"))
        .await?;

    eyre::ensure!(
        column_titles(&service, TaskStatus::InProgress).await? == ["x renamed", "y"],
        "rename should not reorder the column"
    );
    Ok(())
}
