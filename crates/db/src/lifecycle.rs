//! Entity lifecycle management: link detachment and cascading deletion.
//!
//! The schema carries no `ON DELETE CASCADE`; every bidirectional link in
//! the owned-entity graph is maintained here instead. Deleting an entity
//! runs its detach hook — remove it from parent collections, clear
//! one-to-one partners, delete exclusively-owned children — and the
//! physical delete inside one transaction, so a partial cascade is never
//! observable.

use checker_core::error::CoreError;
use checker_core::types::{DbId, UserId};
use sqlx::SqliteConnection;

use crate::repositories::{
    ContainerRepo, CsvRepo, PersistentCsvRepo, PersistentRecordRepo, ProjectHolderRepo,
    ProjectRepo, RecordRepo, SubmissionRepo, UserRepo,
};
use crate::{store_err, DbPool};

/// Reference to one deletable entity. The match over this enum is the
/// detach-hook registry: one arm per entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    User(UserId),
    ProjectHolder(DbId),
    Project(DbId),
    Container(DbId),
    Csv(DbId),
    PersistentCsv(DbId),
    Record(DbId),
    Submission(DbId),
}

pub struct LifecycleManager;

impl LifecycleManager {
    /// Delete an entity and everything it exclusively owns, atomically.
    ///
    /// Fails with `NotFound` if the entity is absent; an entity that was
    /// never attached to a parent deletes cleanly (the detach is a no-op).
    pub async fn delete(pool: &DbPool, entity: EntityRef) -> Result<(), CoreError> {
        let mut tx = pool.begin().await.map_err(store_err)?;
        Self::delete_in_tx(&mut tx, entity).await?;
        tx.commit().await.map_err(store_err)
    }

    /// Dispatch to the per-type detach-and-delete routine on a transaction
    /// the caller already holds.
    pub async fn delete_in_tx(
        conn: &mut SqliteConnection,
        entity: EntityRef,
    ) -> Result<(), CoreError> {
        match entity {
            EntityRef::User(id) => delete_user(conn, &id).await,
            EntityRef::ProjectHolder(id) => delete_project_holder(conn, id).await,
            EntityRef::Project(id) => delete_project(conn, id).await,
            EntityRef::Container(id) => delete_container(conn, id).await,
            EntityRef::Csv(id) => delete_csv(conn, id).await,
            EntityRef::PersistentCsv(id) => delete_persistent_csv(conn, id).await,
            EntityRef::Record(id) => delete_record(conn, id).await,
            EntityRef::Submission(id) => delete_submission(conn, id).await,
        }
    }
}

/// A user owns different subtrees depending on its variant: an admin its
/// assigned projects, a client its submission and project holder.
async fn delete_user(conn: &mut SqliteConnection, id: &UserId) -> Result<(), CoreError> {
    let user = UserRepo::find_by_id(conn, id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("User", id))?;

    if user.is_admin() {
        for project in ProjectRepo::list_by_admin(conn, id).await.map_err(store_err)? {
            delete_project(conn, project.id).await?;
        }
    } else {
        if let Some(submission) = SubmissionRepo::find_by_client(conn, id)
            .await
            .map_err(store_err)?
        {
            SubmissionRepo::delete_row(conn, submission.id)
                .await
                .map_err(store_err)?;
        }
        if let Some(holder) = ProjectHolderRepo::find_by_client(conn, id)
            .await
            .map_err(store_err)?
        {
            delete_project_holder(conn, holder.id).await?;
        }
    }

    UserRepo::delete_row(conn, id).await.map_err(store_err)?;
    tracing::debug!(user_id = %id, "deleted user");
    Ok(())
}

/// Deleting a holder trickles down through its projects and detaches the
/// client (the link lives on the holder row, so dropping the row is the
/// detach).
async fn delete_project_holder(conn: &mut SqliteConnection, id: DbId) -> Result<(), CoreError> {
    ProjectHolderRepo::find_by_id(conn, id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("ProjectHolder", id))?;

    for project in ProjectRepo::list_by_holder(conn, id).await.map_err(store_err)? {
        delete_project(conn, project.id).await?;
    }

    ProjectHolderRepo::delete_row(conn, id).await.map_err(store_err)?;
    Ok(())
}

/// Deletes every container under the project; the owning admin and
/// project holder are left untouched.
async fn delete_project(conn: &mut SqliteConnection, id: DbId) -> Result<(), CoreError> {
    ProjectRepo::find_by_id(conn, id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Project", id))?;

    for container in ContainerRepo::list_by_project(conn, id)
        .await
        .map_err(store_err)?
    {
        delete_container(conn, container.id).await?;
    }

    ProjectRepo::delete_row(conn, id).await.map_err(store_err)?;
    tracing::debug!(project_id = id, "deleted project");
    Ok(())
}

/// Removes the container's submission, its working and snapshot csv
/// subtrees, and its class labels before the row itself.
async fn delete_container(conn: &mut SqliteConnection, id: DbId) -> Result<(), CoreError> {
    ContainerRepo::find_by_id(conn, id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Container", id))?;

    if let Some(submission) = SubmissionRepo::find_by_container(conn, id)
        .await
        .map_err(store_err)?
    {
        SubmissionRepo::delete_row(conn, submission.id)
            .await
            .map_err(store_err)?;
    }

    if let Some(csv) = CsvRepo::find_by_container(conn, id).await.map_err(store_err)? {
        delete_csv(conn, csv.id).await?;
    }

    if let Some(snapshot) = PersistentCsvRepo::find_by_container(conn, id)
        .await
        .map_err(store_err)?
    {
        delete_persistent_csv(conn, snapshot.id).await?;
    }

    ContainerRepo::delete_classes(conn, id).await.map_err(store_err)?;
    ContainerRepo::delete_row(conn, id).await.map_err(store_err)?;
    tracing::debug!(container_id = id, "deleted container");
    Ok(())
}

async fn delete_csv(conn: &mut SqliteConnection, id: DbId) -> Result<(), CoreError> {
    CsvRepo::find_by_id(conn, id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Csv", id))?;

    RecordRepo::delete_all_by_csv(conn, id).await.map_err(store_err)?;
    CsvRepo::delete_row(conn, id).await.map_err(store_err)?;
    Ok(())
}

async fn delete_persistent_csv(conn: &mut SqliteConnection, id: DbId) -> Result<(), CoreError> {
    PersistentCsvRepo::find_by_id(conn, id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("PersistentCsv", id))?;

    PersistentRecordRepo::delete_all_by_csv(conn, id)
        .await
        .map_err(store_err)?;
    PersistentCsvRepo::delete_row(conn, id).await.map_err(store_err)?;
    Ok(())
}

async fn delete_record(conn: &mut SqliteConnection, id: DbId) -> Result<(), CoreError> {
    RecordRepo::find_by_id(conn, id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Record", id))?;

    RecordRepo::delete_row(conn, id).await.map_err(store_err)?;
    Ok(())
}

/// A submission owns nothing; dropping the row clears both one-to-one
/// links (container and client) at once.
async fn delete_submission(conn: &mut SqliteConnection, id: DbId) -> Result<(), CoreError> {
    SubmissionRepo::find_by_id(conn, id)
        .await
        .map_err(store_err)?
        .ok_or_else(|| CoreError::not_found("Submission", id))?;

    SubmissionRepo::delete_row(conn, id).await.map_err(store_err)?;
    Ok(())
}
