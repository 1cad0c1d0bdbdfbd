//! Integration tests for cascading deletion and link detachment.
//!
//! The schema has no `ON DELETE CASCADE`; every assertion here is about
//! the lifecycle manager doing the walk itself, and about what it must
//! NOT touch (shared parents survive deleting a child).

mod common;

use assert_matches::assert_matches;
use checker_core::error::CoreError;
use checker_db::lifecycle::{EntityRef, LifecycleManager};
use checker_db::models::user::UserRole;
use checker_db::repositories::{
    ContainerRepo, CsvRepo, PersistentCsvRepo, PersistentRecordRepo, ProjectHolderRepo,
    ProjectRepo, RecordRepo, SubmissionRepo, UserRepo,
};
use sqlx::SqlitePool;

use common::{detection, make_admin, make_client, make_container, make_project};

// ---------------------------------------------------------------------------
// Full client cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_client_removes_holder_projects_containers_and_submission(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (client, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;
    let (container, csv, snapshot) = make_container(&mut conn, project.id, "dock-a").await;

    RecordRepo::insert(&mut conn, csv.id, &detection(1, 0, "person"))
        .await
        .unwrap();
    PersistentRecordRepo::snapshot_from_csv(&mut conn, snapshot.id, csv.id)
        .await
        .unwrap();
    ContainerRepo::set_classes(&mut conn, container.id, &["person".to_string()])
        .await
        .unwrap();

    let submission = SubmissionRepo::create(&mut conn, &client.id).await.unwrap();
    SubmissionRepo::attach_container(&mut conn, submission.id, container.id)
        .await
        .unwrap();
    drop(conn);

    LifecycleManager::delete(&pool, EntityRef::User(client.id.clone()))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(UserRepo::find_by_id(&mut conn, &client.id)
        .await
        .unwrap()
        .is_none());
    assert!(ProjectHolderRepo::find_by_id(&mut conn, holder.id)
        .await
        .unwrap()
        .is_none());
    assert!(ProjectRepo::find_by_id(&mut conn, project.id)
        .await
        .unwrap()
        .is_none());
    assert!(ContainerRepo::find_by_id(&mut conn, container.id)
        .await
        .unwrap()
        .is_none());
    assert!(CsvRepo::find_by_id(&mut conn, csv.id).await.unwrap().is_none());
    assert!(PersistentCsvRepo::find_by_id(&mut conn, snapshot.id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(RecordRepo::count_by_csv(&mut conn, csv.id).await.unwrap(), 0);
    assert!(SubmissionRepo::find_by_id(&mut conn, submission.id)
        .await
        .unwrap()
        .is_none());

    // The admin who assigned the project is not owned by the client.
    assert!(UserRepo::find_by_id(&mut conn, &admin.id)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Admin cascade stops at project boundaries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_admin_removes_projects_but_not_clients(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (client, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;
    drop(conn);

    LifecycleManager::delete(&pool, EntityRef::User(admin.id.clone()))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(UserRepo::find_by_id(&mut conn, &admin.id)
        .await
        .unwrap()
        .is_none());
    assert!(ProjectRepo::find_by_id(&mut conn, project.id)
        .await
        .unwrap()
        .is_none());
    // The client and its holder belong to the client, not the admin.
    assert!(UserRepo::find_by_id(&mut conn, &client.id)
        .await
        .unwrap()
        .is_some());
    assert!(ProjectHolderRepo::find_by_id(&mut conn, holder.id)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Project cascade closure
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_project_empties_it_but_spares_admin_and_holder(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (client, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;

    let (container_a, csv_a, snapshot_a) = make_container(&mut conn, project.id, "dock-a").await;
    let (container_b, csv_b, snapshot_b) = make_container(&mut conn, project.id, "dock-b").await;
    RecordRepo::insert(&mut conn, csv_a.id, &detection(1, 0, "person"))
        .await
        .unwrap();
    RecordRepo::insert(&mut conn, csv_b.id, &detection(1, 0, "forklift"))
        .await
        .unwrap();
    PersistentRecordRepo::snapshot_from_csv(&mut conn, snapshot_a.id, csv_a.id)
        .await
        .unwrap();
    drop(conn);

    LifecycleManager::delete(&pool, EntityRef::Project(project.id))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(ProjectRepo::find_by_id(&mut conn, project.id)
        .await
        .unwrap()
        .is_none());
    for container_id in [container_a.id, container_b.id] {
        assert!(ContainerRepo::find_by_id(&mut conn, container_id)
            .await
            .unwrap()
            .is_none());
    }
    for csv_id in [csv_a.id, csv_b.id] {
        assert!(CsvRepo::find_by_id(&mut conn, csv_id).await.unwrap().is_none());
        assert_eq!(RecordRepo::count_by_csv(&mut conn, csv_id).await.unwrap(), 0);
    }
    for snapshot_id in [snapshot_a.id, snapshot_b.id] {
        assert!(PersistentCsvRepo::find_by_id(&mut conn, snapshot_id)
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            PersistentRecordRepo::count_by_csv(&mut conn, snapshot_id)
                .await
                .unwrap(),
            0
        );
    }

    // Both parents of the project survive the cascade.
    assert!(UserRepo::find_by_id(&mut conn, &admin.id)
        .await
        .unwrap()
        .is_some());
    assert!(ProjectHolderRepo::find_by_id(&mut conn, holder.id)
        .await
        .unwrap()
        .is_some());
    assert!(UserRepo::find_by_id(&mut conn, &client.id)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Csv deletion stops at the container boundary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_csv_spares_its_container(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (_, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;
    let (container, csv, snapshot) = make_container(&mut conn, project.id, "dock-a").await;
    RecordRepo::insert(&mut conn, csv.id, &detection(1, 0, "person"))
        .await
        .unwrap();
    drop(conn);

    LifecycleManager::delete(&pool, EntityRef::Csv(csv.id))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(CsvRepo::find_by_id(&mut conn, csv.id).await.unwrap().is_none());
    assert_eq!(RecordRepo::count_by_csv(&mut conn, csv.id).await.unwrap(), 0);
    // The owning container and its snapshot are untouched.
    assert!(ContainerRepo::find_by_id(&mut conn, container.id)
        .await
        .unwrap()
        .is_some());
    assert!(PersistentCsvRepo::find_by_id(&mut conn, snapshot.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_snapshot_spares_container_and_working_csv(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (_, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;
    let (container, csv, snapshot) = make_container(&mut conn, project.id, "dock-a").await;
    drop(conn);

    LifecycleManager::delete(&pool, EntityRef::PersistentCsv(snapshot.id))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(PersistentCsvRepo::find_by_id(&mut conn, snapshot.id)
        .await
        .unwrap()
        .is_none());
    assert!(ContainerRepo::find_by_id(&mut conn, container.id)
        .await
        .unwrap()
        .is_some());
    assert!(CsvRepo::find_by_id(&mut conn, csv.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Container cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_container_spares_project_and_client(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (client, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;
    let (container, csv, snapshot) = make_container(&mut conn, project.id, "dock-a").await;

    RecordRepo::insert(&mut conn, csv.id, &detection(1, 0, "person"))
        .await
        .unwrap();
    let submission = SubmissionRepo::create(&mut conn, &client.id).await.unwrap();
    SubmissionRepo::attach_container(&mut conn, submission.id, container.id)
        .await
        .unwrap();
    drop(conn);

    LifecycleManager::delete(&pool, EntityRef::Container(container.id))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(ContainerRepo::find_by_id(&mut conn, container.id)
        .await
        .unwrap()
        .is_none());
    assert!(CsvRepo::find_by_id(&mut conn, csv.id).await.unwrap().is_none());
    assert!(PersistentCsvRepo::find_by_id(&mut conn, snapshot.id)
        .await
        .unwrap()
        .is_none());
    assert!(ContainerRepo::classes(&mut conn, container.id)
        .await
        .unwrap()
        .is_empty());
    // The submission names the container, so it goes too.
    assert!(SubmissionRepo::find_by_id(&mut conn, submission.id)
        .await
        .unwrap()
        .is_none());

    assert!(ProjectRepo::find_by_id(&mut conn, project.id)
        .await
        .unwrap()
        .is_some());
    assert!(UserRepo::find_by_id(&mut conn, &client.id)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Submission deletion detaches without cascading upward
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_submission_frees_container(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (client, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;
    let (container, _, _) = make_container(&mut conn, project.id, "dock-a").await;

    let submission = SubmissionRepo::create(&mut conn, &client.id).await.unwrap();
    SubmissionRepo::attach_container(&mut conn, submission.id, container.id)
        .await
        .unwrap();
    drop(conn);

    LifecycleManager::delete(&pool, EntityRef::Submission(submission.id))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(ContainerRepo::find_by_id(&mut conn, container.id)
        .await
        .unwrap()
        .is_some());
    assert!(SubmissionRepo::find_by_container(&mut conn, container.id)
        .await
        .unwrap()
        .is_none());
    // The client can now re-submit for this container.
    assert!(UserRepo::find_by_id(&mut conn, &client.id)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Single-record deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_record_leaves_siblings(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (_, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;
    let (_, csv, _) = make_container(&mut conn, project.id, "dock-a").await;

    let kept = RecordRepo::insert(&mut conn, csv.id, &detection(1, 0, "person"))
        .await
        .unwrap();
    let doomed = RecordRepo::insert(&mut conn, csv.id, &detection(2, 0, "forklift"))
        .await
        .unwrap();
    drop(conn);

    LifecycleManager::delete(&pool, EntityRef::Record(doomed.id))
        .await
        .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    assert!(RecordRepo::find_by_id(&mut conn, doomed.id)
        .await
        .unwrap()
        .is_none());
    assert!(RecordRepo::find_by_id(&mut conn, kept.id)
        .await
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Absent entities
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deleting_absent_entity_is_not_found(pool: SqlitePool) {
    let err = LifecycleManager::delete(&pool, EntityRef::Container(4242))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Container", .. });

    let err = LifecycleManager::delete(&pool, EntityRef::User("ghost".to_string()))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "User", .. });
}

// ---------------------------------------------------------------------------
// Schema-level uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_is_rejected(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    make_admin(&mut conn, "admin-1").await;

    let err = UserRepo::create(
        &mut conn,
        &checker_db::models::user::CreateUser {
            id: "admin-2".to_string(),
            email: "admin-1@example.com".to_string(),
            username: "Impostor".to_string(),
            role: UserRole::Admin,
        },
        common::reg_date(),
    )
    .await
    .unwrap_err();
    assert!(checker_db::is_unique_violation(&err));
}

#[sqlx::test(migrations = "./migrations")]
async fn second_working_csv_per_container_is_rejected(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let admin = make_admin(&mut conn, "admin-1").await;
    let (_, holder) = make_client(&mut conn, "client-1").await;
    let project = make_project(&mut conn, &admin.id, holder.id).await;
    let (container, _, _) = make_container(&mut conn, project.id, "dock-a").await;

    let err = CsvRepo::create(&mut conn, container.id).await.unwrap_err();
    assert!(checker_db::is_unique_violation(&err));

    let err = PersistentCsvRepo::create(&mut conn, container.id)
        .await
        .unwrap_err();
    assert!(checker_db::is_unique_violation(&err));
}
