//! Task storage and visibility-filtered listings against `PostgreSQL`.

use crate::postgres::helpers::{BoxError, PgContext, pg_context, seed_company, seed_user};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;
use taskgate::access::{AssignedTaskFilter, CompanyTaskFilter};
use taskgate::company::domain::CompanyId;
use taskgate::error::{Classify, ErrorKind};
use taskgate::identity::{
    adapters::postgres::PostgresIdentityRepository,
    domain::{Auth, UserRole, UserType},
};
use taskgate::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{Task, TaskDetail, TaskId, TaskStatus, TaskVisibility},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskService, TaskServiceError, UpdateTaskRequest},
};

type PgTasks = TaskService<PostgresTaskRepository, PostgresIdentityRepository, DefaultClock>;

/// Admin company plus two tenants seeded in a fresh database.
struct PgTenancy {
    context: PgContext,
    service: PgTasks,
    tenant: CompanyId,
    other_tenant: CompanyId,
    root: Auth,
    editor: Auth,
    viewer: Auth,
    outsider: Auth,
}

impl PgTenancy {
    async fn create(&self, request: CreateTaskRequest) -> Result<TaskId, BoxError> {
        Ok(self.service.create(&self.editor, self.tenant, request).await?)
    }

    async fn reload(&self, id: TaskId) -> Result<Task, BoxError> {
        Ok(self
            .context
            .tasks
            .find_by_id(id)
            .await?
            .ok_or("stored task should be found")?)
    }
}

#[fixture]
async fn tenancy(
    #[future] pg_context: Result<Option<PgContext>, BoxError>,
) -> Result<Option<PgTenancy>, BoxError> {
    let Some(context) = pg_context.await? else {
        return Ok(None);
    };
    let admin = seed_company(&context, "Admin Co").await?;
    let tenant = seed_company(&context, "Tenant B").await?;
    let other_tenant = seed_company(&context, "Tenant C").await?;
    let root = seed_user(&context, admin, "root", UserRole::Editor, UserType::Admin).await?;
    let editor = seed_user(&context, tenant, "b-editor", UserRole::Editor, UserType::Normal).await?;
    let viewer = seed_user(&context, tenant, "b-viewer", UserRole::Viewer, UserType::Normal).await?;
    let outsider =
        seed_user(&context, other_tenant, "c-editor", UserRole::Editor, UserType::Normal).await?;

    let service = TaskService::new(
        Arc::clone(&context.tasks),
        Arc::clone(&context.identities),
        Arc::new(DefaultClock),
    );
    Ok(Some(PgTenancy {
        context,
        service,
        tenant,
        other_tenant,
        root,
        editor,
        viewer,
        outsider,
    }))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_reads_back_with_current_users(
    #[future] tenancy: Result<Option<PgTenancy>, BoxError>,
) -> Result<(), BoxError> {
    let Some(world) = tenancy.await? else {
        return Ok(());
    };
    let due = Utc
        .with_ymd_and_hms(2026, 4, 1, 9, 0, 0)
        .single()
        .ok_or("valid due date")?;

    let id = world
        .create(
            CreateTaskRequest::new("Quarterly report", TaskVisibility::Me)
                .with_detail("Numbers for Q1")
                .with_assignee(world.viewer.id())
                .with_due_date(due),
        )
        .await?;
    let task = world.reload(id).await?;

    assert_eq!(task.title().as_str(), "Quarterly report");
    assert_eq!(task.detail().map(TaskDetail::as_str), Some("Numbers for Q1"));
    assert_eq!(task.status(), TaskStatus::New);
    assert_eq!(task.visibility(), TaskVisibility::Me);
    assert_eq!(task.assignee(), Some(&world.viewer.to_user()));
    assert_eq!(task.due_date(), Some(due));
    assert_eq!(task.creator(), &world.editor.to_user());
    assert_eq!(task.updater(), &world.editor.to_user());
    assert_eq!(task.created_at(), task.updated_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_update_clears_unset_optional_fields(
    #[future] tenancy: Result<Option<PgTenancy>, BoxError>,
) -> Result<(), BoxError> {
    let Some(world) = tenancy.await? else {
        return Ok(());
    };
    let id = world
        .create(
            CreateTaskRequest::new("Draft", TaskVisibility::Company)
                .with_detail("first pass")
                .with_assignee(world.viewer.id()),
        )
        .await?;
    let created = world.reload(id).await?;

    world
        .service
        .update(
            &world.root,
            world.tenant,
            id,
            UpdateTaskRequest::new("Final", TaskVisibility::Company, TaskStatus::Done),
        )
        .await?;
    let updated = world.reload(id).await?;

    assert_eq!(updated.title().as_str(), "Final");
    assert_eq!(updated.detail(), None);
    assert_eq!(updated.assignee(), None);
    assert_eq!(updated.status(), TaskStatus::Done);
    assert_eq!(updated.creator(), &world.editor.to_user());
    assert_eq!(updated.updater(), &world.root.to_user());
    assert_eq!(
        updated.created_at().timestamp_micros(),
        created.created_at().timestamp_micros()
    );
    assert!(updated.updated_at() >= created.updated_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn company_listing_is_scoped_to_the_creators_company(
    #[future] tenancy: Result<Option<PgTenancy>, BoxError>,
) -> Result<(), BoxError> {
    let Some(world) = tenancy.await? else {
        return Ok(());
    };
    let shared = world
        .create(CreateTaskRequest::new("Shared", TaskVisibility::Company))
        .await?;
    let private_to_viewer = world
        .create(
            CreateTaskRequest::new("For the viewer", TaskVisibility::Me)
                .with_assignee(world.viewer.id()),
        )
        .await?;
    world
        .create(CreateTaskRequest::new("Editor only", TaskVisibility::Me))
        .await?;
    let foreign = world
        .service
        .create(
            &world.outsider,
            world.other_tenant,
            CreateTaskRequest::new("Tenant C plan", TaskVisibility::Company),
        )
        .await?;

    let in_tenant = world
        .context
        .tasks
        .list_for_company(&CompanyTaskFilter::new(world.tenant, world.viewer.id()))
        .await?;
    let in_other = world
        .context
        .tasks
        .list_for_company(&CompanyTaskFilter::new(world.other_tenant, world.viewer.id()))
        .await?;

    let ids = |tasks: &[Task]| tasks.iter().map(Task::id).collect::<Vec<_>>();
    assert_eq!(ids(&in_tenant), vec![shared, private_to_viewer]);
    assert_eq!(ids(&in_other), vec![foreign]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assigned_listing_is_scoped_to_the_requested_company(
    #[future] tenancy: Result<Option<PgTenancy>, BoxError>,
) -> Result<(), BoxError> {
    let Some(world) = tenancy.await? else {
        return Ok(());
    };
    let shared = world
        .create(
            CreateTaskRequest::new("Shared", TaskVisibility::Company)
                .with_assignee(world.viewer.id()),
        )
        .await?;
    let private = world
        .create(
            CreateTaskRequest::new("Private", TaskVisibility::Me).with_assignee(world.viewer.id()),
        )
        .await?;
    let viewer = world.viewer.id();

    let own = world
        .context
        .tasks
        .list_assigned(&AssignedTaskFilter::for_requester(viewer, viewer, world.tenant))
        .await?;
    let by_colleague = world
        .context
        .tasks
        .list_assigned(&AssignedTaskFilter::for_requester(
            world.editor.id(),
            viewer,
            world.tenant,
        ))
        .await?;
    let across_companies = world
        .context
        .tasks
        .list_assigned(&AssignedTaskFilter::for_requester(
            world.outsider.id(),
            viewer,
            world.other_tenant,
        ))
        .await?;

    assert_eq!(own.iter().map(Task::id).collect::<Vec<_>>(), vec![shared, private]);
    assert_eq!(by_colleague.iter().map(Task::id).collect::<Vec<_>>(), vec![shared]);
    assert!(across_companies.is_empty());

    let root_elsewhere = world
        .service
        .list_by_assigned_user(&world.root, world.other_tenant, viewer)
        .await;
    assert!(matches!(root_elsewhere, Err(TaskServiceError::NoTasks)));
    Ok(())
}

#[rstest]
#[case("UPDATE tasks SET status = 'BOGUS'")]
#[case("UPDATE tasks SET status = 'done'")]
#[case("UPDATE tasks SET status = ' DONE '")]
#[case("UPDATE tasks SET visibility = 'company'")]
#[tokio::test(flavor = "multi_thread")]
async fn non_canonical_stored_values_are_internal_errors(
    #[future] tenancy: Result<Option<PgTenancy>, BoxError>,
    #[case] corruption: &'static str,
) -> Result<(), BoxError> {
    let Some(world) = tenancy.await? else {
        return Ok(());
    };
    let id = world
        .create(CreateTaskRequest::new("Shared", TaskVisibility::Company))
        .await?;

    world.context.execute_sql(corruption).await?;

    let stored = world.context.tasks.find_by_id(id).await;
    assert!(matches!(stored, Err(TaskRepositoryError::Persistence(_))));

    let err = world
        .service
        .find(&world.editor, world.tenant, id)
        .await
        .err()
        .ok_or("corrupt task should not be returned")?;
    assert!(matches!(
        err,
        TaskServiceError::Repository(TaskRepositoryError::Persistence(_))
    ));
    assert_eq!(err.kind(), ErrorKind::InternalServerError);
    assert_eq!(err.status_code(), 500);
    Ok(())
}
