//! When steps for column position BDD scenarios.

use super::world::{ColumnWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::{
    domain::TaskId,
    services::{CreateTaskRequest, MoveTaskRequest},
};

#[when(r#"the task "{title}" is added to column "{status}""#)]
fn add_task(world: &mut ColumnWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(title.as_str()).with_status(status)),
    )
    .wrap_err("create task")?;
    world.tasks_by_title.insert(title, created.id());
    Ok(())
}

#[when(r#"the task "{title}" is deleted"#)]
fn delete_task(world: &mut ColumnWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    run_async(world.service.delete_task(task_id)).wrap_err("delete task")?;
    world.tasks_by_title.remove(&title);
    Ok(())
}

#[when(r#"the task "{title}" is moved to column "{status}" at position {position:i64}"#)]
fn move_task(
    world: &mut ColumnWorld,
    title: String,
    status: String,
    position: i64,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let result = run_async(
        world
            .service
            .move_task(MoveTaskRequest::new(task_id, status, position)),
    );
    world.last_move_result = Some(result);
    Ok(())
}

#[when(r#"an unknown task is moved to column "{status}" at position {position:i64}"#)]
fn move_unknown_task(world: &mut ColumnWorld, status: String, position: i64) {
    let result = run_async(
        world
            .service
            .move_task(MoveTaskRequest::new(TaskId::new(), status, position)),
    );
    world.last_move_result = Some(result);
}
