//! Shared fixtures for the integration tests: canned users, projects,
//! containers, and a frame-rate probe that never touches ffprobe.

use async_trait::async_trait;
use checker_core::detections::RecordValues;
use checker_core::probe::{FrameRateProbe, ProbeError};
use checker_core::types::DbId;
use checker_db::models::container::{Container, CreateContainer};
use checker_db::models::csv::{Csv, PersistentCsv};
use checker_db::models::project::{CreateProject, Project};
use checker_db::models::project_holder::ProjectHolder;
use checker_db::models::user::{CreateUser, User, UserRole};
use checker_db::repositories::{
    ContainerRepo, CsvRepo, PersistentCsvRepo, ProjectHolderRepo, ProjectRepo, UserRepo,
};
use chrono::NaiveDate;
use sqlx::SqliteConnection;

/// A [`FrameRateProbe`] that always reports the same rate.
pub struct FixedRate(pub f64);

#[async_trait]
impl FrameRateProbe for FixedRate {
    async fn frame_rate(&self, _blob_ref: &str) -> Result<f64, ProbeError> {
        Ok(self.0)
    }
}

/// A probe that always fails; ingestion must not reach storage after it.
pub struct BrokenProbe;

#[async_trait]
impl FrameRateProbe for BrokenProbe {
    async fn frame_rate(&self, _blob_ref: &str) -> Result<f64, ProbeError> {
        Err(ProbeError::Unsupported("no video stream in blob".into()))
    }
}

pub fn reg_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

pub async fn make_admin(conn: &mut SqliteConnection, id: &str) -> User {
    UserRepo::create(
        conn,
        &CreateUser {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            username: format!("{id} name"),
            role: UserRole::Admin,
        },
        reg_date(),
    )
    .await
    .unwrap()
}

/// Create a client account together with its project holder, the way
/// first-login registration does.
pub async fn make_client(conn: &mut SqliteConnection, id: &str) -> (User, ProjectHolder) {
    let user = UserRepo::create(
        conn,
        &CreateUser {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            username: format!("{id} name"),
            role: UserRole::Client,
        },
        reg_date(),
    )
    .await
    .unwrap();
    let holder = ProjectHolderRepo::create(conn, &user.id).await.unwrap();
    (user, holder)
}

pub async fn make_project(
    conn: &mut SqliteConnection,
    admin_id: &str,
    holder_id: DbId,
) -> Project {
    ProjectRepo::create(
        conn,
        &CreateProject {
            title: "Warehouse cameras".to_string(),
            description: "Q1 footage review".to_string(),
            admin_id: admin_id.to_string(),
            holder_id,
        },
    )
    .await
    .unwrap()
}

/// Create a bare container with an empty working csv and empty snapshot,
/// bypassing the ingestion workflow.
pub async fn make_container(
    conn: &mut SqliteConnection,
    project_id: DbId,
    name: &str,
) -> (Container, Csv, PersistentCsv) {
    let container = ContainerRepo::create(
        conn,
        &CreateContainer {
            project_id,
            name: name.to_string(),
            description: String::new(),
            blob_name: format!("{name}.mp4"),
            frame_rate: 30.0,
            video_file_name: format!("{name}.mp4"),
            csv_file_name: format!("{name}.csv"),
        },
    )
    .await
    .unwrap();
    let csv = CsvRepo::create(conn, container.id).await.unwrap();
    let snapshot = PersistentCsvRepo::create(conn, container.id).await.unwrap();
    (container, csv, snapshot)
}

/// One detection row with distinctive, assertable values.
pub fn detection(object_id: i64, frame_num: i64, label: &str) -> RecordValues {
    RecordValues {
        frame_num,
        object_id,
        label: label.to_string(),
        tracker_l: 10 + object_id,
        tracker_t: 20 + frame_num,
        tracker_w: 64,
        tracker_h: 128,
        model_confidence: 0.9,
        tracker_confidence: 0.8,
    }
}

/// Render rows into the upload CSV format the detection parser accepts.
pub fn detections_csv(rows: &[RecordValues]) -> String {
    let mut text = String::from(
        "frame_num,object_id,label,tracker_l,tracker_t,tracker_w,tracker_h,model_confidence,tracker_confidence\n",
    );
    for row in rows {
        text.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            row.frame_num,
            row.object_id,
            row.label,
            row.tracker_l,
            row.tracker_t,
            row.tracker_w,
            row.tracker_h,
            row.model_confidence,
            row.tracker_confidence,
        ));
    }
    text
}
