use checker_core::detections::RecordValues;
use checker_core::types::DbId;
use serde::{Deserialize, Serialize};

/// One tracked object on one frame of the working annotation set.
///
/// `(csv_id, object_id)` is the business identity; `id` is only the
/// surrogate row key.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Record {
    pub id: DbId,
    pub csv_id: DbId,
    pub frame_num: i64,
    pub object_id: i64,
    pub label: String,
    pub tracker_l: i64,
    pub tracker_t: i64,
    pub tracker_w: i64,
    pub tracker_h: i64,
    pub model_confidence: f64,
    pub tracker_confidence: f64,
}

impl Record {
    /// The record's field values without identity, as used for snapshot
    /// copies and equality-of-content checks.
    pub fn values(&self) -> RecordValues {
        RecordValues {
            frame_num: self.frame_num,
            object_id: self.object_id,
            label: self.label.clone(),
            tracker_l: self.tracker_l,
            tracker_t: self.tracker_t,
            tracker_w: self.tracker_w,
            tracker_h: self.tracker_h,
            model_confidence: self.model_confidence,
            tracker_confidence: self.tracker_confidence,
        }
    }
}

/// A snapshot row; same value columns as [`Record`], parented to a
/// persistent csv.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PersistentRecord {
    pub id: DbId,
    pub persistent_csv_id: DbId,
    pub frame_num: i64,
    pub object_id: i64,
    pub label: String,
    pub tracker_l: i64,
    pub tracker_t: i64,
    pub tracker_w: i64,
    pub tracker_h: i64,
    pub model_confidence: f64,
    pub tracker_confidence: f64,
}

/// One incoming corrected record in a merge batch.
///
/// Clients echo back the rows they loaded, so a surrogate `id` may be
/// present; the engine ignores it and resolves the target row through the
/// natural key alone.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPatch {
    #[serde(default)]
    pub id: Option<DbId>,
    pub frame_num: i64,
    pub object_id: i64,
    pub label: String,
    pub tracker_l: i64,
    pub tracker_t: i64,
    pub tracker_w: i64,
    pub tracker_h: i64,
    pub model_confidence: f64,
    pub tracker_confidence: f64,
}

impl RecordPatch {
    pub fn values(&self) -> RecordValues {
        RecordValues {
            frame_num: self.frame_num,
            object_id: self.object_id,
            label: self.label.clone(),
            tracker_l: self.tracker_l,
            tracker_t: self.tracker_t,
            tracker_w: self.tracker_w,
            tracker_h: self.tracker_h,
            model_confidence: self.model_confidence,
            tracker_confidence: self.tracker_confidence,
        }
    }
}

impl From<RecordValues> for RecordPatch {
    fn from(values: RecordValues) -> Self {
        Self {
            id: None,
            frame_num: values.frame_num,
            object_id: values.object_id,
            label: values.label,
            tracker_l: values.tracker_l,
            tracker_t: values.tracker_t,
            tracker_w: values.tracker_w,
            tracker_h: values.tracker_h,
            model_confidence: values.model_confidence,
            tracker_confidence: values.tracker_confidence,
        }
    }
}
