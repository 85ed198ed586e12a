//! Visibility-filtered task listing tests.

use super::helpers::{PASSWORD, Tenancy, tenancy};
use rstest::rstest;
use taskgate::access::VisibilityDenial;
use taskgate::identity::{
    domain::{UserRole, UserType},
    services::CreateUserRequest,
};
use taskgate::task::{
    domain::{Task, TaskId, TaskVisibility},
    services::{CreateTaskRequest, TaskServiceError},
};

fn ids(tasks: &[Task]) -> Vec<TaskId> {
    tasks.iter().map(Task::id).collect()
}

/// Seeds one shared task, one private task, and one private task assigned
/// to the viewer. Returns their identifiers in that order.
async fn seed(t: &Tenancy) -> Result<[TaskId; 3], eyre::Report> {
    let shared = t
        .tasks
        .create(
            &t.u3,
            t.tenant,
            CreateTaskRequest::new("Shared", TaskVisibility::Company).with_assignee(t.u4.id()),
        )
        .await?;
    let private = t
        .tasks
        .create(&t.u3, t.tenant, CreateTaskRequest::new("Private", TaskVisibility::Me))
        .await?;
    let assigned = t
        .tasks
        .create(
            &t.u3,
            t.tenant,
            CreateTaskRequest::new("Assigned", TaskVisibility::Me).with_assignee(t.u4.id()),
        )
        .await?;
    Ok([shared, private, assigned])
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn company_listing_depends_on_requester(
    #[future] tenancy: Result<Tenancy, eyre::Report>,
) -> Result<(), eyre::Report> {
    let t = tenancy.await?;
    let [shared, _private, assigned] = seed(&t).await?;

    let for_viewer = t.tasks.list_by_company(&t.u4, t.tenant).await?;
    let for_admin = t.tasks.list_by_company(&t.u2, t.tenant).await?;

    eyre::ensure!(ids(&for_viewer) == vec![shared, assigned], "viewer listing");
    eyre::ensure!(ids(&for_admin) == vec![shared], "admin listing");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_listing_hides_private_tasks_from_others(
    #[future] tenancy: Result<Tenancy, eyre::Report>,
) -> Result<(), eyre::Report> {
    let t = tenancy.await?;
    let [shared, _private, assigned] = seed(&t).await?;

    let own = t
        .tasks
        .list_by_assigned_user(&t.u4, t.tenant, t.u4.id())
        .await?;
    let by_superuser = t
        .tasks
        .list_by_assigned_user(&t.u1, t.tenant, t.u4.id())
        .await?;

    eyre::ensure!(ids(&own) == vec![shared, assigned], "own assignments");
    eyre::ensure!(ids(&by_superuser) == vec![shared], "superuser view");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nothing_visible_is_reported_as_not_found(
    #[future] tenancy: Result<Tenancy, eyre::Report>,
) -> Result<(), eyre::Report> {
    let t = tenancy.await?;
    t.tasks
        .create(&t.u3, t.tenant, CreateTaskRequest::new("Private", TaskVisibility::Me))
        .await?;

    let result = t.tasks.list_by_company(&t.u4, t.tenant).await;

    eyre::ensure!(
        matches!(result, Err(TaskServiceError::NoTasks)),
        "expected NoTasks, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_listing_stays_inside_the_requested_company(
    #[future] tenancy: Result<Tenancy, eyre::Report>,
) -> Result<(), eyre::Report> {
    let t = tenancy.await?;
    let [shared, _private, _assigned] = seed(&t).await?;
    let third = t.companies.create(&t.u1, "Tenant C").await?;
    let gina_id = t
        .accounts
        .create(
            &t.u1,
            third,
            CreateUserRequest::new("gina", PASSWORD, UserRole::Viewer, UserType::Normal),
        )
        .await?;
    let gina = t.accounts.get(gina_id).await?;

    let listed = t.tasks.list_by_assigned_user(&gina, third, t.u4.id()).await;
    let direct = t.tasks.find(&gina, third, shared).await;

    eyre::ensure!(
        matches!(listed, Err(TaskServiceError::NoTasks)),
        "another company's assignments must not be listed, got {listed:?}"
    );
    eyre::ensure!(
        matches!(
            direct,
            Err(TaskServiceError::TaskAccessDenied {
                reason: VisibilityDenial::OtherCompany,
                ..
            })
        ),
        "direct fetch should be denied, got {direct:?}"
    );
    Ok(())
}
