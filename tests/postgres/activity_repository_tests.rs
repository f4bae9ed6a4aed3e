//! Ordering, limits and referential rules of the activity log table.

use crate::postgres::helpers::{PgBoard, at, pg_board, placed_task};
use rstest::rstest;
use serde_json::json;
use taskboard::activity::{
    domain::{ActivityAction, ActivityId, ActivityRecord},
    ports::{ActivityRepository, ActivityRepositoryError},
};
use taskboard::task::{
    domain::{TaskId, TaskStatus},
    ports::TaskRepository,
};

#[rstest]
fn recent_returns_newest_first_up_to_limit(pg_board: Option<PgBoard>) {
    let Some(board) = pg_board else { return };
    for (offset, label) in [(0, "oldest"), (20, "newest"), (10, "middle")] {
        let record = ActivityRecord::from_persisted(
            ActivityId::new(),
            ActivityAction::TaskDeleted,
            None,
            json!({ "title": label }),
            at(offset),
        );
        board
            .rt
            .block_on(board.activity.append(&record))
            .expect("append record");
    }

    let recent = board
        .rt
        .block_on(board.activity.recent(2))
        .expect("recent query");

    let titles: Vec<_> = recent
        .iter()
        .map(|record| record.details()["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("newest"), json!("middle")]);
}

#[rstest]
fn details_and_task_reference_survive_storage(pg_board: Option<PgBoard>) {
    let Some(board) = pg_board else { return };
    let task = placed_task("tracked", TaskStatus::Todo, 0, at(0)).expect("valid task");
    board.rt.block_on(board.tasks.store(&task)).expect("store task");
    let record = ActivityRecord::from_persisted(
        ActivityId::new(),
        ActivityAction::TaskMoved,
        Some(task.id()),
        json!({ "from": "todo", "to": "done", "nested": { "ok": true } }),
        at(5),
    );

    board
        .rt
        .block_on(board.activity.append(&record))
        .expect("append record");
    let stored = board
        .rt
        .block_on(board.activity.recent(10))
        .expect("recent query");

    assert_eq!(stored, vec![record]);
}

#[rstest]
fn records_must_reference_an_existing_task(pg_board: Option<PgBoard>) {
    let Some(board) = pg_board else { return };
    let dangling = ActivityRecord::from_persisted(
        ActivityId::new(),
        ActivityAction::TaskCreated,
        Some(TaskId::new()),
        json!({}),
        at(0),
    );

    let outcome = board.rt.block_on(board.activity.append(&dangling));

    assert!(matches!(outcome, Err(ActivityRepositoryError::Persistence(_))));
}

#[rstest]
fn deleting_a_task_removes_records_that_reference_it(pg_board: Option<PgBoard>) {
    let Some(board) = pg_board else { return };
    let doomed = placed_task("doomed", TaskStatus::Todo, 0, at(0)).expect("valid task");
    let kept = placed_task("kept", TaskStatus::Todo, 1, at(1)).expect("valid task");
    for task in [&doomed, &kept] {
        board.rt.block_on(board.tasks.store(task)).expect("store task");
        let record = ActivityRecord::from_persisted(
            ActivityId::new(),
            ActivityAction::TaskCreated,
            Some(task.id()),
            json!({ "title": task.title().as_str() }),
            at(2),
        );
        board
            .rt
            .block_on(board.activity.append(&record))
            .expect("append record");
    }

    board
        .rt
        .block_on(board.tasks.delete(doomed.id()))
        .expect("delete task");

    let remaining = board
        .rt
        .block_on(board.activity.recent(10))
        .expect("recent query");
    let referenced: Vec<_> = remaining.iter().map(ActivityRecord::task_id).collect();
    assert_eq!(referenced, vec![Some(kept.id())]);
}
