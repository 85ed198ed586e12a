//! When steps for tenant access BDD scenarios.

use super::world::{TenantWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskgate::error::Classify;
use taskgate::identity::{
    domain::{UserRole, UserType},
    services::CreateUserRequest,
};
use taskgate::task::{
    domain::{TaskStatus, TaskVisibility},
    services::CreateTaskRequest,
};

#[when(r#""{actor}" creates a "{visibility}" task "{title}" in company "{company}""#)]
fn create_task(
    world: &mut TenantWorld,
    actor: String,
    visibility: String,
    title: String,
    company: String,
) -> Result<(), eyre::Report> {
    let audience =
        TaskVisibility::try_from(visibility.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let company_id = world.company(&company)?;
    let auth = world.principal(&actor)?;
    let task_id = run_async(world.tasks.create(
        auth,
        company_id,
        CreateTaskRequest::new(title, audience),
    ))
    .wrap_err("create task in scenario")?;
    world.current_task = Some(task_id);
    Ok(())
}

#[when(r#""{actor}" sets the task status to "{status}""#)]
fn set_status(world: &mut TenantWorld, actor: String, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str()).map_err(|err| eyre::eyre!("{err}"))?;
    let task_id = world.task()?;
    let auth = world.principal(&actor)?;
    let company_id = auth.company_id();
    let result = run_async(world.tasks.update_status(auth, company_id, task_id, target));
    world.last_outcome = Some(result.map_err(|err| err.kind()));
    Ok(())
}

#[when(r#""{actor}" adds a {user_type} {role} user "{name}" to company "{company}""#)]
fn add_user(
    world: &mut TenantWorld,
    actor: String,
    user_type: String,
    role: String,
    name: String,
    company: String,
) -> Result<(), eyre::Report> {
    let request = CreateUserRequest::new(
        name,
        "scenario",
        UserRole::try_from(role.as_str()).map_err(|err| eyre::eyre!("{err}"))?,
        UserType::try_from(user_type.as_str()).map_err(|err| eyre::eyre!("{err}"))?,
    );
    let company_id = world.company(&company)?;
    let auth = world.principal(&actor)?;
    let result = run_async(world.accounts.create(auth, company_id, request));
    world.last_outcome = Some(result.map(|_| ()).map_err(|err| err.kind()));
    Ok(())
}
