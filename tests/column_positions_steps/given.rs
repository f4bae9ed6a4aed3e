//! Given steps for column position BDD scenarios.

use super::world::{ColumnWorld, run_async, split_titles};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::services::CreateTaskRequest;

#[given(r#"tasks "{titles}" in column "{status}""#)]
fn tasks_in_column(
    world: &mut ColumnWorld,
    titles: String,
    status: String,
) -> Result<(), eyre::Report> {
    for title in split_titles(&titles) {
        let created = run_async(
            world
                .service
                .create_task(CreateTaskRequest::new(title).with_status(status.as_str())),
        )
        .wrap_err_with(|| format!("create task {title:?} in scenario setup"))?;
        world.tasks_by_title.insert(title.to_owned(), created.id());
    }
    Ok(())
}
